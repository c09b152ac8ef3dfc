//! Configuration types.

use crate::option::{ContextOption, OptionKind};

/// How [`Context::get`](crate::Context::get) decides that a query failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryPolicy {
    /// Any result `<= 0` is a failure.
    ///
    /// A legitimate zero (IPv6 off, thread name prefix 0) or a negative
    /// default (scheduling policy -1) therefore reads back as an error.
    #[default]
    Strict,
    /// Only the native error sentinel `-1` is a failure, and not for
    /// [`OptionKind::ThreadSchedPolicy`] whose default is -1. Zero is a value.
    SentinelOnly,
}

impl QueryPolicy {
    /// Whether `raw`, returned by a query for `kind`, is a failure.
    pub(crate) fn is_failure(self, kind: OptionKind, raw: i32) -> bool {
        match self {
            QueryPolicy::Strict => raw <= 0,
            QueryPolicy::SentinelOnly => raw == -1 && kind != OptionKind::ThreadSchedPolicy,
        }
    }
}

/// Options applied to a context right after allocation.
///
/// # Example
///
/// ```
/// use zmq_context::{ContextOptions, QueryPolicy};
///
/// let opts = ContextOptions::default()
///     .with_io_threads(4)
///     .with_ipv6(true)
///     .with_query_policy(QueryPolicy::SentinelOnly);
/// assert_eq!(opts.to_entries().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextOptions {
    /// I/O thread pool size.
    pub io_threads: Option<i64>,
    /// Maximum number of sockets.
    pub max_sockets: Option<i64>,
    /// Maximum message size.
    pub max_message_size: Option<i64>,
    /// IPv6 on sockets created from this context.
    pub ipv6: Option<bool>,
    /// Block on termination while messages are pending.
    pub blocky: Option<bool>,
    /// I/O thread scheduling policy.
    pub thread_sched_policy: Option<i64>,
    /// I/O thread name prefix.
    pub thread_name_prefix: Option<i64>,
    /// Failure policy for option queries.
    pub query_policy: QueryPolicy,
}

impl ContextOptions {
    /// Set the I/O thread pool size.
    pub fn with_io_threads(mut self, n: i64) -> Self {
        self.io_threads = Some(n);
        self
    }

    /// Set the maximum number of sockets.
    pub fn with_max_sockets(mut self, n: i64) -> Self {
        self.max_sockets = Some(n);
        self
    }

    /// Set the maximum message size.
    pub fn with_max_message_size(mut self, size: i64) -> Self {
        self.max_message_size = Some(size);
        self
    }

    /// Enable or disable IPv6.
    pub fn with_ipv6(mut self, enabled: bool) -> Self {
        self.ipv6 = Some(enabled);
        self
    }

    /// Enable or disable blocking termination.
    pub fn with_blocky(mut self, enabled: bool) -> Self {
        self.blocky = Some(enabled);
        self
    }

    /// Set the I/O thread scheduling policy.
    pub fn with_thread_sched_policy(mut self, policy: i64) -> Self {
        self.thread_sched_policy = Some(policy);
        self
    }

    /// Set the I/O thread name prefix.
    pub fn with_thread_name_prefix(mut self, prefix: i64) -> Self {
        self.thread_name_prefix = Some(prefix);
        self
    }

    /// Set the query failure policy.
    pub fn with_query_policy(mut self, policy: QueryPolicy) -> Self {
        self.query_policy = policy;
        self
    }

    /// Configured options, in catalog order.
    pub fn to_entries(&self) -> Vec<ContextOption> {
        [
            self.io_threads.map(ContextOption::IoThreads),
            self.max_sockets.map(ContextOption::MaxSockets),
            self.max_message_size.map(ContextOption::MaxMessageSize),
            self.ipv6.map(ContextOption::Ipv6),
            self.blocky.map(ContextOption::Blocky),
            self.thread_sched_policy.map(ContextOption::ThreadSchedPolicy),
            self.thread_name_prefix.map(ContextOption::ThreadNamePrefix),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}
