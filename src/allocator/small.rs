//! Small-object allocator.
//!
//! Dispatches allocations to fixed-size sub-pools by size class. Each class
//! owns a [`PagedBlockAllocator`] whose block size equals the class size,
//! so classes grow and shrink independently. Requests above the top class
//! are rejected; callers should route those to a general allocator.

use core::alloc::Layout;
use core::ptr::NonNull;

use tracing::debug;

use crate::allocator::paged_block::PagedBlockAllocator;
use crate::allocator::{Allocator, MemoryUsage};
use crate::error::{AllocError, AllocResult};

/// Size classes in bytes. Blocks of each class are aligned to the class
/// size, so a class serves any request with `max(size, align)` at or below
/// it.
pub const SIZE_CLASSES: [usize; 4] = [8, 16, 32, 64];

/// Largest request the dispatcher accepts.
pub const MAX_SMALL_OBJECT_SIZE: usize = SIZE_CLASSES[SIZE_CLASSES.len() - 1];

/// Default page size in bytes for each class's sub-pool.
pub const DEFAULT_PAGE_SIZE: usize = 4096;

/// Size-class dispatcher over per-class paged block pools.
pub struct SmallObjectAllocator<'a> {
    classes: [PagedBlockAllocator<'a>; SIZE_CLASSES.len()],
}

impl<'a> SmallObjectAllocator<'a> {
    /// Creates a heap-backed small-object allocator whose class sub-pools
    /// grow in pages of roughly `page_size` bytes.
    pub fn new(page_size: usize) -> AllocResult<Self> {
        Self::with_backing(None, page_size)
    }

    /// Creates a small-object allocator drawing class pages from `parent`.
    pub fn new_in(parent: &'a dyn Allocator, page_size: usize) -> AllocResult<Self> {
        Self::with_backing(Some(parent), page_size)
    }

    pub(crate) fn with_backing(
        parent: Option<&'a dyn Allocator>,
        page_size: usize,
    ) -> AllocResult<Self> {
        if page_size == 0 {
            return Err(AllocError::invalid_config("page size must be nonzero"));
        }

        let class_pool = |class: usize| {
            PagedBlockAllocator::with_block_align(
                parent,
                class,
                class,
                (page_size / class).max(1),
            )
        };

        let classes = [
            class_pool(SIZE_CLASSES[0])?,
            class_pool(SIZE_CLASSES[1])?,
            class_pool(SIZE_CLASSES[2])?,
            class_pool(SIZE_CLASSES[3])?,
        ];

        debug!(page_size, "small object allocator created");

        Ok(Self { classes })
    }

    /// Index of the smallest class serving `layout`, or `None` when the
    /// request exceeds the top class.
    fn class_for(layout: Layout) -> Option<usize> {
        let fit = layout.size().max(layout.align());
        SIZE_CLASSES.iter().position(|&class| class >= fit)
    }

    /// Number of live pages across all classes.
    pub fn page_count(&self) -> usize {
        self.classes.iter().map(PagedBlockAllocator::page_count).sum()
    }
}

// SAFETY: every request maps deterministically to one class sub-pool, so
// allocate and deallocate of the same layout meet the same pool and the
// per-pool guarantees carry over. Class blocks are class-size aligned,
// covering any alignment the size rule admits.
unsafe impl Allocator for SmallObjectAllocator<'_> {
    unsafe fn allocate(&self, layout: Layout) -> AllocResult<NonNull<[u8]>> {
        debug_assert!(layout.size() > 0, "zero-size allocation is a contract violation");

        let class = Self::class_for(layout)
            .ok_or_else(|| AllocError::exceeds_max_size(MAX_SMALL_OBJECT_SIZE))?;
        // SAFETY: caller upholds the allocate contract.
        unsafe { self.classes[class].allocate(layout) }
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        let Some(class) = Self::class_for(layout) else {
            debug_assert!(false, "layout was never accepted by this allocator");
            return;
        };
        // SAFETY: the size rule is deterministic, so ptr returns to the
        // class that produced it.
        unsafe { self.classes[class].deallocate(ptr, layout) };
    }
}

impl MemoryUsage for SmallObjectAllocator<'_> {
    fn used_memory(&self) -> usize {
        self.classes.iter().map(MemoryUsage::used_memory).sum()
    }

    fn available_memory(&self) -> Option<usize> {
        // Growth is bounded only by the backing.
        None
    }
}
