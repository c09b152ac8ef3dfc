//! The native engine boundary.
//!
//! [`Engine`] is the complete set of native calls a [`Context`](crate::Context)
//! makes. [`LibZmq`] forwards them to the linked libzmq; the simulated engine
//! in [`crate::sim`] implements the same contract in process.

use std::os::raw::c_int;

use super::handles::RawContext;
use super::raw::{ZmqErrno, ZmqOptionCode};

/// Native calls backing a context.
///
/// Implementations must be usable from many threads at once. The last-error
/// slot returned by [`Engine::last_error`] is per thread and is overwritten
/// by any later failing call on that thread.
pub trait Engine: Send + Sync + 'static {
    /// Short name used in log output.
    fn name(&self) -> &'static str;

    /// Allocate a context (`zmq_ctx_new`). `None` when the engine returned null.
    fn allocate(&self) -> Option<RawContext>;

    /// Terminate a context (`zmq_ctx_term`). Returns 0 on success.
    ///
    /// # Safety
    ///
    /// `handle` must come from [`Engine::allocate`] on this engine and must
    /// not have been successfully released.
    unsafe fn release(&self, handle: RawContext) -> c_int;

    /// Query a context option (`zmq_ctx_get`).
    ///
    /// # Safety
    ///
    /// Same contract as [`Engine::release`].
    unsafe fn query_option(&self, handle: RawContext, code: ZmqOptionCode) -> c_int;

    /// Write a context option (`zmq_ctx_set`). Returns 0 on success.
    ///
    /// # Safety
    ///
    /// Same contract as [`Engine::release`].
    unsafe fn set_option(&self, handle: RawContext, code: ZmqOptionCode, value: c_int) -> c_int;

    /// The calling thread's last error (`zmq_errno`).
    fn last_error(&self) -> ZmqErrno;

    /// Human-readable text for an error code (`zmq_strerror`).
    fn describe_error(&self, code: ZmqErrno) -> String;
}

/// The system libzmq.
#[cfg(feature = "libzmq")]
#[derive(Debug, Default, Clone, Copy)]
pub struct LibZmq;

#[cfg(feature = "libzmq")]
impl Engine for LibZmq {
    fn name(&self) -> &'static str {
        "libzmq"
    }

    fn allocate(&self) -> Option<RawContext> {
        RawContext::from_ptr(unsafe { super::raw::zmq_ctx_new() })
    }

    unsafe fn release(&self, handle: RawContext) -> c_int {
        super::raw::zmq_ctx_term(handle.as_ptr())
    }

    unsafe fn query_option(&self, handle: RawContext, code: ZmqOptionCode) -> c_int {
        super::raw::zmq_ctx_get(handle.as_ptr(), code)
    }

    unsafe fn set_option(&self, handle: RawContext, code: ZmqOptionCode, value: c_int) -> c_int {
        super::raw::zmq_ctx_set(handle.as_ptr(), code, value)
    }

    fn last_error(&self) -> ZmqErrno {
        unsafe { super::raw::zmq_errno() }
    }

    fn describe_error(&self, code: ZmqErrno) -> String {
        unsafe {
            let ptr = super::raw::zmq_strerror(code);
            if ptr.is_null() {
                return String::new();
            }
            // Static storage owned by libzmq; not freed here.
            std::ffi::CStr::from_ptr(ptr).to_string_lossy().into_owned()
        }
    }
}
