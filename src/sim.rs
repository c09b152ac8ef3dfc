//! In-process engine with libzmq's context semantics.
//!
//! [`SimEngine`] stands in for libzmq where linking it is not possible or
//! not wanted, and lets tests inject failures the real library only
//! produces under signals or resource exhaustion.
//!
//! Behaviour follows libzmq 4.3: the same defaults, the same validation on
//! writes, `EFAULT` for unknown handles and a per-thread errno slot.

use std::cell::Cell;
use std::collections::{HashMap, VecDeque};
use std::os::raw::c_int;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::ffi::raw::{
    ZmqErrno, ZmqOptionCode, EFAULT, EINTR, EINVAL, EMFILE, ENOMEM, ZMQ_BLOCKY,
    ZMQ_IO_THREADS, ZMQ_IO_THREADS_DFLT, ZMQ_IPV6, ZMQ_MAX_MSGSZ, ZMQ_MAX_SOCKETS,
    ZMQ_MAX_SOCKETS_DFLT, ZMQ_MSG_T_SIZE, ZMQ_SOCKET_LIMIT, ZMQ_THREAD_NAME_PREFIX,
    ZMQ_THREAD_SCHED_POLICY, ZMQ_THREAD_SCHED_POLICY_DFLT,
};
use crate::ffi::{Engine, RawContext};

/// Largest socket count a simulated context accepts.
pub const SIM_SOCKET_LIMIT: c_int = 65535;

/// `sizeof(zmq_msg_t)` reported by a simulated context.
pub const SIM_MSG_T_SIZE: c_int = 64;

const TOKEN_STRIDE: usize = 0x40;

thread_local! {
    static ERRNO: Cell<ZmqErrno> = const { Cell::new(0) };
}

fn set_errno(code: ZmqErrno) {
    ERRNO.with(|e| e.set(code));
}

/// Fail with `code` the way libzmq does: set errno, return -1.
fn fail(code: ZmqErrno) -> c_int {
    set_errno(code);
    -1
}

#[derive(Debug, Clone)]
struct SimContext {
    io_threads: c_int,
    max_sockets: c_int,
    max_msgsz: c_int,
    ipv6: bool,
    blocky: bool,
    thread_sched_policy: c_int,
    thread_name_prefix: c_int,
}

impl Default for SimContext {
    fn default() -> Self {
        Self {
            io_threads: ZMQ_IO_THREADS_DFLT,
            max_sockets: ZMQ_MAX_SOCKETS_DFLT,
            max_msgsz: c_int::MAX,
            ipv6: false,
            blocky: true,
            thread_sched_policy: ZMQ_THREAD_SCHED_POLICY_DFLT,
            thread_name_prefix: 0,
        }
    }
}

impl SimContext {
    fn get(&self, code: ZmqOptionCode) -> c_int {
        match code {
            ZMQ_IO_THREADS => self.io_threads,
            ZMQ_MAX_SOCKETS => self.max_sockets,
            ZMQ_SOCKET_LIMIT => SIM_SOCKET_LIMIT,
            ZMQ_IPV6 => c_int::from(self.ipv6),
            ZMQ_BLOCKY => c_int::from(self.blocky),
            ZMQ_MAX_MSGSZ => self.max_msgsz,
            ZMQ_MSG_T_SIZE => SIM_MSG_T_SIZE,
            ZMQ_THREAD_SCHED_POLICY => self.thread_sched_policy,
            ZMQ_THREAD_NAME_PREFIX => self.thread_name_prefix,
            _ => fail(EINVAL),
        }
    }

    fn set(&mut self, code: ZmqOptionCode, value: c_int) -> c_int {
        if value < 0 {
            return fail(EINVAL);
        }
        match code {
            ZMQ_IO_THREADS => self.io_threads = value,
            ZMQ_MAX_SOCKETS if (1..=SIM_SOCKET_LIMIT).contains(&value) => {
                self.max_sockets = value;
            }
            ZMQ_IPV6 => self.ipv6 = value != 0,
            ZMQ_BLOCKY => self.blocky = value != 0,
            ZMQ_MAX_MSGSZ => self.max_msgsz = value,
            ZMQ_THREAD_SCHED_POLICY => self.thread_sched_policy = value,
            ZMQ_THREAD_NAME_PREFIX => self.thread_name_prefix = value,
            _ => return fail(EINVAL),
        }
        0
    }
}

#[derive(Debug, Default)]
struct SimState {
    next_token: usize,
    contexts: HashMap<usize, SimContext>,
    allocation_fault: Option<ZmqErrno>,
    release_faults: VecDeque<ZmqErrno>,
    forced: HashMap<ZmqOptionCode, c_int>,
}

/// Counters of native calls made against a [`SimEngine`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimCalls {
    /// `zmq_ctx_new` calls.
    pub allocate: usize,
    /// `zmq_ctx_term` calls.
    pub release: usize,
    /// `zmq_ctx_get` calls.
    pub query: usize,
    /// `zmq_ctx_set` calls.
    pub set: usize,
}

impl SimCalls {
    /// Sum of all counters.
    pub fn total(&self) -> usize {
        self.allocate + self.release + self.query + self.set
    }
}

/// An in-process engine.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use zmq_context::{sim::SimEngine, Context, Error};
///
/// let engine = Arc::new(SimEngine::new());
/// engine.fail_next_allocation(zmq_context::ffi::raw::EMFILE);
///
/// let err = Context::with_engine(engine.clone()).unwrap_err();
/// assert!(matches!(err, Error::AllocationFailure(_)));
/// assert_eq!(engine.live_contexts(), 0);
/// ```
#[derive(Debug, Default)]
pub struct SimEngine {
    state: Mutex<SimState>,
    allocate_calls: AtomicUsize,
    release_calls: AtomicUsize,
    query_calls: AtomicUsize,
    set_calls: AtomicUsize,
}

impl SimEngine {
    /// Create an engine with no live contexts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next allocation return null with `errno`.
    pub fn fail_next_allocation(&self, errno: ZmqErrno) {
        self.state.lock().allocation_fault = Some(errno);
    }

    /// Make the next release fail as if interrupted by a signal.
    pub fn interrupt_next_release(&self) {
        self.fail_next_release(EINTR);
    }

    /// Queue a release failure with `errno`. Faults are consumed in order.
    pub fn fail_next_release(&self, errno: ZmqErrno) {
        self.state.lock().release_faults.push_back(errno);
    }

    /// Make every query for `code` return `raw`, on every context.
    pub fn force_option(&self, code: ZmqOptionCode, raw: c_int) {
        self.state.lock().forced.insert(code, raw);
    }

    /// Drop all forced query results.
    pub fn clear_forced(&self) {
        self.state.lock().forced.clear();
    }

    /// Number of allocated, unreleased contexts.
    pub fn live_contexts(&self) -> usize {
        self.state.lock().contexts.len()
    }

    /// Native calls made so far.
    pub fn calls(&self) -> SimCalls {
        SimCalls {
            allocate: self.allocate_calls.load(Ordering::SeqCst),
            release: self.release_calls.load(Ordering::SeqCst),
            query: self.query_calls.load(Ordering::SeqCst),
            set: self.set_calls.load(Ordering::SeqCst),
        }
    }

    /// Overwrite the calling thread's errno slot.
    pub fn set_last_error(&self, errno: ZmqErrno) {
        set_errno(errno);
    }
}

impl Engine for SimEngine {
    fn name(&self) -> &'static str {
        "sim"
    }

    fn allocate(&self) -> Option<RawContext> {
        self.allocate_calls.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock();
        if let Some(errno) = state.allocation_fault.take() {
            set_errno(errno);
            return None;
        }

        state.next_token += TOKEN_STRIDE;
        let token = state.next_token;
        state.contexts.insert(token, SimContext::default());
        RawContext::from_token(token)
    }

    unsafe fn release(&self, handle: RawContext) -> c_int {
        self.release_calls.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock();
        if !state.contexts.contains_key(&handle.token()) {
            return fail(EFAULT);
        }
        if let Some(errno) = state.release_faults.pop_front() {
            return fail(errno);
        }
        state.contexts.remove(&handle.token());
        0
    }

    unsafe fn query_option(&self, handle: RawContext, code: ZmqOptionCode) -> c_int {
        self.query_calls.fetch_add(1, Ordering::SeqCst);
        let state = self.state.lock();
        let Some(ctx) = state.contexts.get(&handle.token()) else {
            return fail(EFAULT);
        };
        match state.forced.get(&code) {
            Some(&raw) => raw,
            None => ctx.get(code),
        }
    }

    unsafe fn set_option(&self, handle: RawContext, code: ZmqOptionCode, value: c_int) -> c_int {
        self.set_calls.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock();
        match state.contexts.get_mut(&handle.token()) {
            Some(ctx) => ctx.set(code, value),
            None => fail(EFAULT),
        }
    }

    fn last_error(&self) -> ZmqErrno {
        ERRNO.with(Cell::get)
    }

    fn describe_error(&self, code: ZmqErrno) -> String {
        match code {
            0 => "Success".to_string(),
            EINTR => "Interrupted system call".to_string(),
            ENOMEM => "Cannot allocate memory".to_string(),
            EFAULT => "Bad address".to_string(),
            EINVAL => "Invalid argument".to_string(),
            EMFILE => "Too many open files".to_string(),
            other => format!("Unknown error {other}"),
        }
    }
}
