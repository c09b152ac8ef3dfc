//! Context lifecycle and option access.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{Error, Result};
use crate::ffi::{self, Engine, NativeOp, RawContext};
use crate::option::{ContextOption, OptionKind};
use crate::types::{ContextOptions, QueryPolicy};

/// Where the native handle is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HandleState {
    Live(RawContext),
    Released,
}

/// A libzmq context.
///
/// Owns one native context handle. The handle is released at most once,
/// either by [`Context::destroy`] or when the `Context` is dropped. After a
/// successful release every operation fails with [`Error::InvalidContext`].
///
/// `Context` is `Send + Sync`. Option reads and writes from many threads
/// run concurrently against the native context. A release is exclusive:
/// it waits for in-flight reads and writes, and any that arrive while it
/// runs wait for it to finish.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use zmq_context::{sim::SimEngine, Context, ContextOption, OptionKind};
///
/// let ctx = Context::with_engine(Arc::new(SimEngine::new()))?;
/// ctx.set(ContextOption::IoThreads(2))?;
/// assert_eq!(ctx.get(OptionKind::IoThreads)?, ContextOption::IoThreads(2));
///
/// // Dropping also releases, but swallows errors.
/// ctx.destroy()?;
/// # Ok::<(), zmq_context::Error>(())
/// ```
pub struct Context {
    engine: Arc<dyn Engine>,
    state: RwLock<HandleState>,
    query_policy: QueryPolicy,
}

impl Context {
    /// Create a new context on the system libzmq.
    #[cfg(feature = "libzmq")]
    pub fn new() -> Result<Self> {
        Self::with_engine(Arc::new(ffi::LibZmq))
    }

    /// Create a new context on the system libzmq and apply `options`.
    #[cfg(feature = "libzmq")]
    pub fn with_options(options: ContextOptions) -> Result<Self> {
        Self::with_engine_and_options(Arc::new(ffi::LibZmq), options)
    }

    /// Create a new context on `engine`.
    pub fn with_engine(engine: Arc<dyn Engine>) -> Result<Self> {
        Self::with_engine_and_options(engine, ContextOptions::default())
    }

    /// Create a new context on `engine` and apply `options`.
    ///
    /// Options are applied in catalog order. If one is rejected the new
    /// context is released and that error is returned.
    pub fn with_engine_and_options(
        engine: Arc<dyn Engine>,
        options: ContextOptions,
    ) -> Result<Self> {
        let handle = match engine.allocate() {
            Some(handle) => handle,
            None => {
                let err = ffi::error_from_current(engine.as_ref(), NativeOp::Allocate);
                tracing::debug!(engine = engine.name(), error = %err, "context allocation failed");
                return Err(err);
            }
        };
        tracing::debug!(engine = engine.name(), handle = handle.token(), "context allocated");

        let ctx = Self {
            engine,
            state: RwLock::new(HandleState::Live(handle)),
            query_policy: options.query_policy,
        };

        for entry in options.to_entries() {
            // On error `ctx` drops here and releases the handle.
            ctx.set(entry)?;
        }

        Ok(ctx)
    }

    /// Whether the handle is live.
    ///
    /// True until a release succeeds. A failed release leaves the context
    /// live. Waits for a release in progress on another thread.
    pub fn is_live(&self) -> bool {
        matches!(*self.state.read(), HandleState::Live(_))
    }

    /// The query failure policy in effect.
    pub fn query_policy(&self) -> QueryPolicy {
        self.query_policy
    }

    /// Name of the engine backing this context.
    pub fn engine_name(&self) -> &'static str {
        self.engine.name()
    }

    /// Read an option.
    ///
    /// Under [`QueryPolicy::Strict`] a native result of zero or less is an
    /// error, so options whose current value is 0 or negative cannot be read.
    ///
    /// If a release is in progress this waits for it. A failed release
    /// leaves the context usable and the read goes ahead.
    pub fn get(&self, kind: OptionKind) -> Result<ContextOption> {
        let state = self.state.read();
        let HandleState::Live(handle) = *state else {
            return Err(Error::invalid_context());
        };

        let raw = unsafe { self.engine.query_option(handle, kind.code()) };
        if self.query_policy.is_failure(kind, raw) {
            let err = ffi::error_from_current(self.engine.as_ref(), NativeOp::Query);
            drop(state);
            tracing::trace!(option = %kind, raw, error = %err, "context option query failed");
            return Err(err);
        }
        drop(state);

        let option = ContextOption::from_raw(kind, raw);
        tracing::trace!(%option, "context option read");
        Ok(option)
    }

    /// Read an option into `option`, keeping its kind.
    ///
    /// The current payload of `option` is ignored. On error `option` is left
    /// untouched.
    pub fn refresh(&self, option: &mut ContextOption) -> Result<()> {
        *option = self.get(option.kind())?;
        Ok(())
    }

    /// Write an option.
    ///
    /// Waits for a release in progress, like [`Context::get`].
    pub fn set(&self, option: ContextOption) -> Result<()> {
        let state = self.state.read();
        let HandleState::Live(handle) = *state else {
            return Err(Error::invalid_context());
        };

        let rc = unsafe { self.engine.set_option(handle, option.code(), option.to_raw()) };
        if rc != 0 {
            let err = ffi::error_from_current(self.engine.as_ref(), NativeOp::Set);
            drop(state);
            tracing::trace!(%option, error = %err, "context option write rejected");
            return Err(err);
        }
        drop(state);

        tracing::trace!(%option, "context option written");
        Ok(())
    }

    /// Release the native context.
    ///
    /// Blocks until the engine has shut down its I/O threads. Holds this
    /// context's lock for the whole call, so `get`, `set` and other
    /// `destroy` calls on the same context wait until it returns. Do not
    /// destroy a context while another thread needs it to close sockets.
    ///
    /// Fails with [`Error::InvalidContext`] without calling the engine if
    /// the context was already released. If the engine reports a failure
    /// the context stays live: [`Error::InterruptedTermination`] may be
    /// retried.
    pub fn destroy(&self) -> Result<()> {
        let mut state = self.state.write();
        let HandleState::Live(handle) = *state else {
            return Err(Error::invalid_context());
        };

        let rc = unsafe { self.engine.release(handle) };
        if rc != 0 {
            let err = ffi::error_from_current(self.engine.as_ref(), NativeOp::Release);
            drop(state);
            tracing::debug!(handle = handle.token(), error = %err, "context release failed");
            return Err(err);
        }

        *state = HandleState::Released;
        drop(state);
        tracing::debug!(handle = handle.token(), "context released");
        Ok(())
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        if !matches!(*self.state.get_mut(), HandleState::Live(_)) {
            return;
        }
        // Errors cannot be returned from drop; call destroy() to see them.
        if let Err(err) = self.destroy() {
            tracing::warn!(
                engine = self.engine.name(),
                error = %err,
                "context release on drop failed, native context leaked"
            );
        }
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("engine", &self.engine.name())
            .field("state", &*self.state.read())
            .field("query_policy", &self.query_policy)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimEngine;

    fn sim() -> Arc<SimEngine> {
        Arc::new(SimEngine::new())
    }

    #[test]
    fn test_state_transitions() {
        let engine = sim();
        let ctx = Context::with_engine(engine.clone()).unwrap();
        assert!(ctx.is_live());
        assert_eq!(engine.live_contexts(), 1);

        ctx.destroy().unwrap();
        assert!(!ctx.is_live());
        assert_eq!(engine.live_contexts(), 0);
    }

    #[test]
    fn test_failed_release_keeps_handle() {
        let engine = sim();
        let ctx = Context::with_engine(engine.clone()).unwrap();

        engine.fail_next_release(crate::ffi::raw::EINVAL);
        let err = ctx.destroy().unwrap_err();
        assert!(matches!(err, Error::GenericFailure(_)));
        assert!(ctx.is_live());

        ctx.destroy().unwrap();
    }

    #[test]
    fn test_debug_does_not_deadlock() {
        let ctx = Context::with_engine(sim()).unwrap();
        let text = format!("{ctx:?}");
        assert!(text.contains("Live"));
    }
}
