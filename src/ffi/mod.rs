//! FFI boundary to libzmq.
//!
//! This module contains the low-level C bindings and the [`Engine`] trait
//! the safe wrappers call through.

pub mod engine;
pub mod error;
pub mod handles;
pub mod raw;

pub use engine::Engine;
#[cfg(feature = "libzmq")]
pub use engine::LibZmq;
pub use error::{classify, error_from_current, from_current, NativeOp};
pub use handles::RawContext;
