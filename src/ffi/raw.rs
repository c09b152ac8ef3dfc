//! Raw C declarations for the libzmq context API.
//!
//! This module contains the direct FFI bindings and numeric constants.
//! Users should prefer the safe Rust wrappers in the parent modules.

use std::os::raw::c_int;
#[cfg(feature = "libzmq")]
use std::os::raw::{c_char, c_void};

/// Option identifier passed to `zmq_ctx_get` / `zmq_ctx_set`.
pub type ZmqOptionCode = c_int;

/// errno-style value returned by `zmq_errno`.
pub type ZmqErrno = c_int;

// Context option codes, from zmq.h
pub const ZMQ_IO_THREADS: ZmqOptionCode = 1;
pub const ZMQ_MAX_SOCKETS: ZmqOptionCode = 2;
pub const ZMQ_SOCKET_LIMIT: ZmqOptionCode = 3;
pub const ZMQ_THREAD_SCHED_POLICY: ZmqOptionCode = 4;
pub const ZMQ_MAX_MSGSZ: ZmqOptionCode = 5;
pub const ZMQ_MSG_T_SIZE: ZmqOptionCode = 6;
pub const ZMQ_THREAD_NAME_PREFIX: ZmqOptionCode = 9;
pub const ZMQ_IPV6: ZmqOptionCode = 42;
pub const ZMQ_BLOCKY: ZmqOptionCode = 70;

// Context option defaults, from zmq.h / ctx.cpp
pub const ZMQ_IO_THREADS_DFLT: c_int = 1;
pub const ZMQ_MAX_SOCKETS_DFLT: c_int = 1023;
pub const ZMQ_THREAD_SCHED_POLICY_DFLT: c_int = -1;

// errno values libzmq reports for context calls. Same numbers on Linux,
// macOS and the MSVC CRT.
pub const EINTR: ZmqErrno = 4;
pub const ENOMEM: ZmqErrno = 12;
pub const EFAULT: ZmqErrno = 14;
pub const EINVAL: ZmqErrno = 22;
pub const EMFILE: ZmqErrno = 24;

#[cfg(feature = "libzmq")]
extern "C" {
    pub fn zmq_ctx_new() -> *mut c_void;
    pub fn zmq_ctx_term(context: *mut c_void) -> c_int;
    pub fn zmq_ctx_get(context: *mut c_void, option: c_int) -> c_int;
    pub fn zmq_ctx_set(context: *mut c_void, option: c_int, optval: c_int) -> c_int;
    pub fn zmq_errno() -> c_int;
    pub fn zmq_strerror(errnum: c_int) -> *const c_char;
}
