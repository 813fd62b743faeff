use core::alloc::Layout;
use core::ptr::NonNull;

use crate::error::AllocError;

/// A source of memory for [`ProvisionedSlots`](crate::ProvisionedSlots).
///
/// This is a narrow, stable stand-in for the unstable `core::alloc::Allocator` trait: a map
/// requests exactly one block when its storage is acquired and returns it when the storage is
/// released.
///
/// # Safety
///
/// - A block returned by `allocate` must be valid for reads and writes of `layout.size()` bytes,
///   aligned to `layout.align()`, and must stay valid until it is passed to `deallocate`.
/// - `deallocate` must accept any block previously returned by `allocate` on the same provider
///   (or a clone of it) with the same layout.
pub unsafe trait MemoryProvider {
    /// Allocates a block of memory described by `layout`.
    ///
    /// Callers never request zero-sized layouts.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] if the block cannot be supplied.
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError>;

    /// Releases a block previously returned by [`allocate`](MemoryProvider::allocate).
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by `allocate` on this provider with the same `layout`, and
    /// must not have been deallocated already.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);
}

/// The global memory allocator.
///
/// Forwards to [`alloc::alloc::alloc`] and [`alloc::alloc::dealloc`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Global;

// SAFETY: The global allocator upholds the block validity requirements.
unsafe impl MemoryProvider for Global {
    #[inline]
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        debug_assert!(layout.size() != 0, "`Global::allocate()` - zero-sized layout!");
        // SAFETY: Callers never request zero-sized layouts.
        NonNull::new(unsafe { alloc::alloc::alloc(layout) }).ok_or(AllocError)
    }

    #[inline]
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: Forwarded from the caller.
        unsafe { alloc::alloc::dealloc(ptr.as_ptr(), layout) }
    }
}

// SAFETY: Forwards to the referenced provider.
unsafe impl<P: MemoryProvider + ?Sized> MemoryProvider for &P {
    #[inline]
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        (**self).allocate(layout)
    }

    #[inline]
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: Forwarded from the caller.
        unsafe { (**self).deallocate(ptr, layout) }
    }
}
