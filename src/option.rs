//! Context options.
//!
//! [`OptionKind`] names an option; [`ContextOption`] is an option together
//! with its value. Each kind maps to a fixed libzmq option code.

use std::fmt;

use crate::ffi::raw::{
    ZmqOptionCode, ZMQ_BLOCKY, ZMQ_IO_THREADS, ZMQ_IPV6, ZMQ_MAX_MSGSZ, ZMQ_MAX_SOCKETS,
    ZMQ_MSG_T_SIZE, ZMQ_SOCKET_LIMIT, ZMQ_THREAD_NAME_PREFIX, ZMQ_THREAD_SCHED_POLICY,
};

/// An option, without a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKind {
    /// Size of the I/O thread pool.
    IoThreads,
    /// Maximum number of sockets.
    MaxSockets,
    /// Maximum message size.
    MaxMessageSize,
    /// Largest value `MaxSockets` accepts.
    SocketLimit,
    /// IPv6 for sockets created on the context.
    Ipv6,
    /// Whether termination blocks on unsent messages.
    Blocky,
    /// Scheduling policy of the I/O threads.
    ThreadSchedPolicy,
    /// Numeric name prefix of the I/O threads.
    ThreadNamePrefix,
    /// Size of `zmq_msg_t` in the running library.
    RuntimeMessageSize,
}

impl OptionKind {
    /// Every option, in catalog order.
    pub const ALL: [OptionKind; 9] = [
        OptionKind::IoThreads,
        OptionKind::MaxSockets,
        OptionKind::MaxMessageSize,
        OptionKind::SocketLimit,
        OptionKind::Ipv6,
        OptionKind::Blocky,
        OptionKind::ThreadSchedPolicy,
        OptionKind::ThreadNamePrefix,
        OptionKind::RuntimeMessageSize,
    ];

    /// The libzmq option code.
    pub const fn code(self) -> ZmqOptionCode {
        match self {
            OptionKind::IoThreads => ZMQ_IO_THREADS,
            OptionKind::MaxSockets => ZMQ_MAX_SOCKETS,
            OptionKind::MaxMessageSize => ZMQ_MAX_MSGSZ,
            OptionKind::SocketLimit => ZMQ_SOCKET_LIMIT,
            OptionKind::Ipv6 => ZMQ_IPV6,
            OptionKind::Blocky => ZMQ_BLOCKY,
            OptionKind::ThreadSchedPolicy => ZMQ_THREAD_SCHED_POLICY,
            OptionKind::ThreadNamePrefix => ZMQ_THREAD_NAME_PREFIX,
            OptionKind::RuntimeMessageSize => ZMQ_MSG_T_SIZE,
        }
    }

    /// Look up a kind by libzmq option code.
    pub fn from_code(code: ZmqOptionCode) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }

    /// Human label.
    pub const fn label(self) -> &'static str {
        match self {
            OptionKind::IoThreads => "I/O threads",
            OptionKind::MaxSockets => "max sockets",
            OptionKind::MaxMessageSize => "max message size",
            OptionKind::SocketLimit => "socket limit",
            OptionKind::Ipv6 => "IPv6",
            OptionKind::Blocky => "blocky",
            OptionKind::ThreadSchedPolicy => "thread scheduling policy",
            OptionKind::ThreadNamePrefix => "thread name prefix",
            OptionKind::RuntimeMessageSize => "runtime message size",
        }
    }

    /// Whether the engine rejects writes to this option.
    pub const fn is_read_only(self) -> bool {
        matches!(self, OptionKind::SocketLimit | OptionKind::RuntimeMessageSize)
    }

    /// Whether the payload is a boolean.
    pub const fn is_boolean(self) -> bool {
        matches!(self, OptionKind::Ipv6 | OptionKind::Blocky)
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An option together with its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextOption {
    /// Size of the I/O thread pool.
    IoThreads(i64),
    /// Maximum number of sockets.
    MaxSockets(i64),
    /// Maximum message size.
    MaxMessageSize(i64),
    /// Largest value `MaxSockets` accepts. Read-only.
    SocketLimit(i64),
    /// IPv6 for sockets created on the context.
    Ipv6(bool),
    /// Whether termination blocks on unsent messages.
    Blocky(bool),
    /// Scheduling policy of the I/O threads.
    ThreadSchedPolicy(i64),
    /// Numeric name prefix of the I/O threads.
    ThreadNamePrefix(i64),
    /// Size of `zmq_msg_t` in the running library. Read-only.
    RuntimeMessageSize(i64),
}

impl ContextOption {
    /// The option's kind.
    pub const fn kind(&self) -> OptionKind {
        match self {
            ContextOption::IoThreads(_) => OptionKind::IoThreads,
            ContextOption::MaxSockets(_) => OptionKind::MaxSockets,
            ContextOption::MaxMessageSize(_) => OptionKind::MaxMessageSize,
            ContextOption::SocketLimit(_) => OptionKind::SocketLimit,
            ContextOption::Ipv6(_) => OptionKind::Ipv6,
            ContextOption::Blocky(_) => OptionKind::Blocky,
            ContextOption::ThreadSchedPolicy(_) => OptionKind::ThreadSchedPolicy,
            ContextOption::ThreadNamePrefix(_) => OptionKind::ThreadNamePrefix,
            ContextOption::RuntimeMessageSize(_) => OptionKind::RuntimeMessageSize,
        }
    }

    /// The libzmq option code. Depends only on the kind.
    pub const fn code(&self) -> ZmqOptionCode {
        self.kind().code()
    }

    /// The value narrowed to the native `int`.
    ///
    /// Integers outside the `i32` range saturate; booleans become 1 or 0.
    pub fn to_raw(&self) -> i32 {
        match *self {
            ContextOption::Ipv6(enabled) | ContextOption::Blocky(enabled) => i32::from(enabled),
            ContextOption::IoThreads(v)
            | ContextOption::MaxSockets(v)
            | ContextOption::MaxMessageSize(v)
            | ContextOption::SocketLimit(v)
            | ContextOption::ThreadSchedPolicy(v)
            | ContextOption::ThreadNamePrefix(v)
            | ContextOption::RuntimeMessageSize(v) => saturate(v),
        }
    }

    /// Rebuild an option of `kind` from a native value. Booleans are true
    /// only for exactly 1.
    pub fn from_raw(kind: OptionKind, raw: i32) -> Self {
        let v = i64::from(raw);
        match kind {
            OptionKind::IoThreads => ContextOption::IoThreads(v),
            OptionKind::MaxSockets => ContextOption::MaxSockets(v),
            OptionKind::MaxMessageSize => ContextOption::MaxMessageSize(v),
            OptionKind::SocketLimit => ContextOption::SocketLimit(v),
            OptionKind::Ipv6 => ContextOption::Ipv6(raw == 1),
            OptionKind::Blocky => ContextOption::Blocky(raw == 1),
            OptionKind::ThreadSchedPolicy => ContextOption::ThreadSchedPolicy(v),
            OptionKind::ThreadNamePrefix => ContextOption::ThreadNamePrefix(v),
            OptionKind::RuntimeMessageSize => ContextOption::RuntimeMessageSize(v),
        }
    }

    /// Integer payload, if this is not a boolean option.
    pub fn as_int(&self) -> Option<i64> {
        match *self {
            ContextOption::Ipv6(_) | ContextOption::Blocky(_) => None,
            ContextOption::IoThreads(v)
            | ContextOption::MaxSockets(v)
            | ContextOption::MaxMessageSize(v)
            | ContextOption::SocketLimit(v)
            | ContextOption::ThreadSchedPolicy(v)
            | ContextOption::ThreadNamePrefix(v)
            | ContextOption::RuntimeMessageSize(v) => Some(v),
        }
    }

    /// Boolean payload, if this is a boolean option.
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            ContextOption::Ipv6(b) | ContextOption::Blocky(b) => Some(b),
            _ => None,
        }
    }
}

impl fmt::Display for ContextOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.as_bool(), self.as_int()) {
            (Some(b), _) => write!(f, "{}={}", self.kind(), b),
            (_, Some(v)) => write!(f, "{}={}", self.kind(), v),
            _ => write!(f, "{}", self.kind()),
        }
    }
}

fn saturate(v: i64) -> i32 {
    i32::try_from(v).unwrap_or(if v < 0 { i32::MIN } else { i32::MAX })
}
