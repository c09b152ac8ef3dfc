//! Error conversion utilities for FFI.
//!
//! The engine's last-error slot is per thread and overwritten by the next
//! failing native call. [`error_from_current`] must run on the failing
//! thread, directly after the failing call, before anything else touches
//! the engine.

use super::engine::Engine;
use super::raw::{ZmqErrno, EINTR};
use crate::error::{Error, ZmqError};

/// The native call that failed. Decides how an errno is classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeOp {
    /// `zmq_ctx_new`
    Allocate,
    /// `zmq_ctx_term`
    Release,
    /// `zmq_ctx_get`
    Query,
    /// `zmq_ctx_set`
    Set,
}

/// Build a failure value from `code`, or from the last-error slot when
/// `code` is `None`. The description is resolved by the engine.
pub fn from_current(engine: &dyn Engine, code: Option<ZmqErrno>) -> ZmqError {
    let code = code.unwrap_or_else(|| engine.last_error());
    ZmqError::new(Some(code), engine.describe_error(code))
}

/// Capture the last error and classify it for `op`.
pub fn error_from_current(engine: &dyn Engine, op: NativeOp) -> Error {
    classify(op, from_current(engine, None))
}

/// Map a translated failure onto the error taxonomy.
///
/// Never yields [`Error::InvalidContext`]: a native call only happens on a
/// live handle, so an errno of `EFAULT` from the engine is a plain failure.
pub fn classify(op: NativeOp, failure: ZmqError) -> Error {
    match (op, failure.code) {
        (NativeOp::Allocate, _) => Error::AllocationFailure(failure),
        (NativeOp::Release, Some(EINTR)) => Error::InterruptedTermination(failure),
        _ => Error::GenericFailure(failure),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ffi::raw::{EFAULT, EINVAL, ENOMEM};

    fn failure(code: ZmqErrno) -> ZmqError {
        ZmqError::new(Some(code), "x")
    }

    #[test]
    fn test_classify_allocation_always_allocation_failure() {
        assert!(classify(NativeOp::Allocate, failure(ENOMEM)).is_allocation_failure());
        assert!(classify(NativeOp::Allocate, failure(EFAULT)).is_allocation_failure());
    }

    #[test]
    fn test_classify_release() {
        assert!(classify(NativeOp::Release, failure(EINTR)).is_interrupted());
        assert!(matches!(
            classify(NativeOp::Release, failure(EFAULT)),
            Error::GenericFailure(_)
        ));
        assert!(matches!(
            classify(NativeOp::Release, failure(EINVAL)),
            Error::GenericFailure(_)
        ));
    }

    #[test]
    fn test_classify_interrupt_outside_release_is_generic() {
        assert!(matches!(
            classify(NativeOp::Query, failure(EINTR)),
            Error::GenericFailure(_)
        ));
    }

    #[test]
    fn test_classify_efault_on_live_handle_is_generic() {
        for op in [NativeOp::Release, NativeOp::Query, NativeOp::Set] {
            let err = classify(op, failure(EFAULT));
            assert!(!err.is_invalid_context(), "{op:?}");
            assert_eq!(err.code(), Some(EFAULT));
        }
    }
}
