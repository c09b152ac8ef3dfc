//! Handle type for the opaque libzmq context pointer.

use std::os::raw::c_void;
use std::ptr::NonNull;

/// Opaque handle to a native context.
///
/// Null is not representable: an allocator that returns null yields `None`
/// instead of a `RawContext`.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawContext(NonNull<c_void>);

impl RawContext {
    /// Wrap a pointer returned by the engine. Returns `None` for null.
    #[inline]
    pub fn from_ptr(ptr: *mut c_void) -> Option<Self> {
        NonNull::new(ptr).map(Self)
    }

    /// Build a handle from a non-zero token. Used by engines whose handles
    /// are identifiers rather than real pointers.
    #[inline]
    pub fn from_token(token: usize) -> Option<Self> {
        Self::from_ptr(token as *mut c_void)
    }

    /// The raw pointer, for passing back across the FFI boundary.
    #[inline]
    pub fn as_ptr(self) -> *mut c_void {
        self.0.as_ptr()
    }

    /// The handle's address as an integer token.
    #[inline]
    pub fn token(self) -> usize {
        self.0.as_ptr() as usize
    }
}

// libzmq documents a context as safe to use from any thread.
unsafe impl Send for RawContext {}
unsafe impl Sync for RawContext {}
