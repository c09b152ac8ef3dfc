//! Safe ownership of a libzmq context.
//!
//! This crate wraps the libzmq context (`zmq_ctx_*`): the object that owns
//! the I/O threads and socket registry every ZeroMQ socket is created on.
//! It guarantees the native handle is never used after release and is
//! released at most once, exposes the context options as a typed catalog,
//! and turns libzmq's errno into inspectable errors.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use zmq_context::{sim::SimEngine, Context, ContextOption, ContextOptions, OptionKind};
//!
//! fn main() -> zmq_context::Result<()> {
//!     // `Context::new()` uses the system libzmq (feature `libzmq`). The
//!     // simulated engine behaves the same and needs no native library.
//!     let engine = Arc::new(SimEngine::new());
//!     let opts = ContextOptions::default().with_io_threads(2);
//!     let ctx = Context::with_engine_and_options(engine, opts)?;
//!
//!     assert_eq!(ctx.get(OptionKind::IoThreads)?, ContextOption::IoThreads(2));
//!     ctx.set(ContextOption::Blocky(false))?;
//!
//!     // Explicit destroy reports failures; dropping only logs them.
//!     ctx.destroy()?;
//!     assert!(ctx.get(OptionKind::IoThreads).unwrap_err().is_invalid_context());
//!     Ok(())
//! }
//! ```
//!
//! # Linking
//!
//! With the `libzmq` feature the crate links against the system libzmq.
//! Set `LIBZMQ_LIB_DIR` to add a search path and `LIBZMQ_STATIC=1` to link
//! statically.

pub mod context;
pub mod dev_tracing;
pub mod error;
pub mod ffi;
pub mod option;
pub mod sim;
pub mod types;

// Re-export main types at the crate root
pub use context::Context;
pub use error::{ContextReason, Error, Result, ZmqError};
pub use ffi::Engine;
#[cfg(feature = "libzmq")]
pub use ffi::LibZmq;
pub use option::{ContextOption, OptionKind};
pub use types::{ContextOptions, QueryPolicy};
