//! Frame allocator: per-frame scratch memory.
//!
//! The paged linear engine with intent attached: everything allocated
//! during a simulation frame is released in one [`reset`](Resettable::reset)
//! call at the frame boundary. The first page survives resets, so a frame
//! whose scratch fits one page never touches the backing allocator.

use core::alloc::Layout;
use core::ptr::NonNull;

use crate::allocator::paged_linear::PagedLinearAllocator;
use crate::allocator::{Allocator, MemoryUsage, Resettable};
use crate::error::AllocResult;

/// Per-frame scratch allocator.
///
/// Identical mechanics to [`PagedLinearAllocator`]; callers are expected to
/// invoke [`reset`](Resettable::reset) once per frame after destroying any
/// objects placed here.
pub struct FrameAllocator<'a> {
    inner: PagedLinearAllocator<'a>,
}

impl<'a> FrameAllocator<'a> {
    /// Creates a heap-backed frame allocator with `page_size`-byte pages.
    pub fn new(page_size: usize) -> AllocResult<Self> {
        Ok(Self {
            inner: PagedLinearAllocator::with_backing(None, page_size)?,
        })
    }

    /// Creates a frame allocator drawing pages from `parent`.
    pub fn new_in(parent: &'a dyn Allocator, page_size: usize) -> AllocResult<Self> {
        Ok(Self {
            inner: PagedLinearAllocator::with_backing(Some(parent), page_size)?,
        })
    }

    /// Configured page size in bytes.
    #[inline]
    pub fn page_size(&self) -> usize {
        self.inner.page_size()
    }

    /// Number of live pages.
    #[inline]
    pub fn page_count(&self) -> usize {
        self.inner.page_count()
    }
}

// SAFETY: delegates to the paged linear engine.
unsafe impl Allocator for FrameAllocator<'_> {
    unsafe fn allocate(&self, layout: Layout) -> AllocResult<NonNull<[u8]>> {
        unsafe { self.inner.allocate(layout) }
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        unsafe { self.inner.deallocate(ptr, layout) }
    }
}

impl MemoryUsage for FrameAllocator<'_> {
    fn used_memory(&self) -> usize {
        self.inner.used_memory()
    }

    fn available_memory(&self) -> Option<usize> {
        self.inner.available_memory()
    }
}

impl Resettable for FrameAllocator<'_> {
    unsafe fn reset(&self) {
        unsafe { self.inner.reset() }
    }
}
