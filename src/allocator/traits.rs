//! The abstract allocation contract shared by every engine.
//!
//! The system is built around three traits:
//! - `Allocator`: raw allocation/deallocation over a [`Layout`]
//! - `MemoryUsage`: capacity observation
//! - `Resettable`: bulk reclamation for linear-style engines

use core::alloc::Layout;
use core::ptr::NonNull;

use crate::error::AllocResult;

/// Raw allocation interface implemented by every engine in this crate.
///
/// Allocators hand out byte ranges inside buffers they own; composition is
/// expressed by borrowing a parent `&dyn Allocator` for the child's backing
/// region, so the borrow checker enforces that a parent outlives its
/// children.
///
/// All engines here are single-threaded: interior mutability is `Cell`-based
/// and the concrete types are neither `Send` nor `Sync`.
///
/// # Safety
///
/// Implementors must ensure that:
/// - Returned pointers are valid, within the allocator's owned buffers, and
///   aligned to `layout.align()`
/// - Live allocations never overlap
/// - `deallocate` only releases ranges previously returned by the same
///   instance with the same layout
pub unsafe trait Allocator {
    /// Allocates memory for `layout`, failing with
    /// [`AllocError::OutOfMemory`](crate::AllocError::OutOfMemory) when the
    /// engine has no fitting space left.
    ///
    /// # Safety
    /// - `layout.size()` must be nonzero; a zero-size request is a contract
    ///   violation diagnosed by a debug assertion
    /// - The returned memory is uninitialized and must not be read before
    ///   being written
    unsafe fn allocate(&self, layout: Layout) -> AllocResult<NonNull<[u8]>>;

    /// Releases memory previously obtained from [`allocate`](Self::allocate).
    ///
    /// # Safety
    /// - `ptr` must have been returned by this instance and not yet released
    /// - `layout` must match the allocating call exactly
    /// - `ptr` must not be used afterwards
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);
}

/// Capacity observation for engines with a bounded buffer.
pub trait MemoryUsage {
    /// Bytes currently consumed by live allocations (including any internal
    /// rounding applied to them).
    fn used_memory(&self) -> usize;

    /// Bytes still available, or `None` when the engine can grow without a
    /// fixed bound (paged engines backed by the host heap).
    fn available_memory(&self) -> Option<usize>;

    /// Total capacity, when bounded.
    fn total_memory(&self) -> Option<usize> {
        self.available_memory()
            .map(|available| self.used_memory() + available)
    }
}

/// Bulk reclamation for linear-style engines.
pub trait Resettable {
    /// Returns the allocator to its pristine state, invalidating every
    /// previous allocation at once.
    ///
    /// # Safety
    /// The caller must have destroyed every object whose storage came from
    /// this allocator; any pointer obtained before the reset becomes
    /// dangling.
    unsafe fn reset(&self);
}

// Reference blanket impls let a child engine borrow its parent as
// `&dyn Allocator` while the parent remains usable at the call site.

unsafe impl<A: Allocator + ?Sized> Allocator for &A {
    unsafe fn allocate(&self, layout: Layout) -> AllocResult<NonNull<[u8]>> {
        unsafe { (**self).allocate(layout) }
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        unsafe { (**self).deallocate(ptr, layout) }
    }
}

impl<A: MemoryUsage + ?Sized> MemoryUsage for &A {
    fn used_memory(&self) -> usize {
        (**self).used_memory()
    }

    fn available_memory(&self) -> Option<usize> {
        (**self).available_memory()
    }

    fn total_memory(&self) -> Option<usize> {
        (**self).total_memory()
    }
}

impl<A: Resettable + ?Sized> Resettable for &A {
    unsafe fn reset(&self) {
        unsafe { (**self).reset() }
    }
}
