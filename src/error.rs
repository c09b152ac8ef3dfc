//! Error types for the zmq-context crate.

use std::fmt;

use thiserror::Error;

use crate::ffi::raw::{EFAULT, EINTR};

/// Result type alias for context operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A failure reported by, or on behalf of, the native engine.
///
/// `code` is the errno-style value the engine reported, when there was one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZmqError {
    /// errno-style code.
    pub code: Option<i32>,
    /// Human-readable description.
    pub description: String,
}

impl ZmqError {
    /// Build a failure value from parts.
    pub fn new(code: Option<i32>, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
        }
    }

    /// Build the fixed failure value for a curated reason.
    ///
    /// Never consults the engine's last-error slot.
    pub fn from_reason(reason: ContextReason) -> Self {
        Self::new(Some(reason.code()), reason.description())
    }
}

impl fmt::Display for ZmqError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "{} (errno {})", self.description, code),
            None => f.write_str(&self.description),
        }
    }
}

impl std::error::Error for ZmqError {}

/// Failure causes with a stable code and description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextReason {
    /// The context handle was null or already released.
    InvalidContext,
    /// Termination was interrupted by a signal.
    Interrupted,
}

impl ContextReason {
    /// errno value for this reason.
    pub const fn code(self) -> i32 {
        match self {
            ContextReason::InvalidContext => EFAULT,
            ContextReason::Interrupted => EINTR,
        }
    }

    /// Fixed description for this reason.
    pub const fn description(self) -> &'static str {
        match self {
            ContextReason::InvalidContext => "The provided context was invalid.",
            ContextReason::Interrupted => {
                "Termination was interrupted by a signal. It can be restarted if needed."
            }
        }
    }
}

/// Error type for context operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The engine could not allocate a context.
    #[error("context allocation failed: {0}")]
    AllocationFailure(ZmqError),

    /// The context was never allocated or has already been released.
    #[error("invalid context: {0}")]
    InvalidContext(ZmqError),

    /// Termination was interrupted by a signal. Calling destroy again is safe.
    #[error("termination interrupted: {0}")]
    InterruptedTermination(ZmqError),

    /// Any other failure reported by the engine.
    #[error("{0}")]
    GenericFailure(ZmqError),
}

impl Error {
    /// The `InvalidContext` error for a released or missing handle.
    pub fn invalid_context() -> Self {
        Error::InvalidContext(ZmqError::from_reason(ContextReason::InvalidContext))
    }

    /// The failure value carried by this error.
    pub fn failure(&self) -> &ZmqError {
        match self {
            Error::AllocationFailure(e)
            | Error::InvalidContext(e)
            | Error::InterruptedTermination(e)
            | Error::GenericFailure(e) => e,
        }
    }

    /// errno-style code, if the engine reported one.
    pub fn code(&self) -> Option<i32> {
        self.failure().code
    }

    /// Human-readable description.
    pub fn description(&self) -> &str {
        &self.failure().description
    }

    /// Check if this is an invalid context error.
    pub fn is_invalid_context(&self) -> bool {
        matches!(self, Error::InvalidContext(_))
    }

    /// Check if this is an interrupted termination.
    pub fn is_interrupted(&self) -> bool {
        matches!(self, Error::InterruptedTermination(_))
    }

    /// Check if this is an allocation failure.
    pub fn is_allocation_failure(&self) -> bool {
        matches!(self, Error::AllocationFailure(_))
    }

    /// Whether repeating the same call on the same context can succeed.
    pub fn is_retryable(&self) -> bool {
        self.is_interrupted()
    }
}
