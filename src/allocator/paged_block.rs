//! Paged block allocator.
//!
//! A growing list of [`BlockAllocator`] pages, each holding `page_capacity`
//! blocks. Allocation takes the first page with a free block and adds a
//! page when all are full; a page whose last block is freed is released
//! back to the backing immediately.

use core::alloc::Layout;
use core::cell::RefCell;
use core::ptr::NonNull;

use tracing::{debug, trace};

use crate::allocator::block::BlockAllocator;
use crate::allocator::{Allocator, MemoryUsage};
use crate::error::{AllocError, AllocResult};

/// Block allocator that grows and shrinks in pages.
pub struct PagedBlockAllocator<'a> {
    parent: Option<&'a dyn Allocator>,
    block_size: usize,
    block_align: usize,
    page_capacity: usize,
    pages: RefCell<Vec<BlockAllocator<'a>>>,
}

impl<'a> PagedBlockAllocator<'a> {
    /// Creates a heap-backed paged block allocator with pages of
    /// `page_capacity` blocks of `block_size` bytes.
    pub fn new(block_size: usize, page_capacity: usize) -> AllocResult<Self> {
        Self::with_block_align(
            None,
            block_size,
            crate::allocator::block::DEFAULT_BLOCK_ALIGN,
            page_capacity,
        )
    }

    /// Creates a paged block allocator drawing pages from `parent`.
    pub fn new_in(
        parent: &'a dyn Allocator,
        block_size: usize,
        page_capacity: usize,
    ) -> AllocResult<Self> {
        Self::with_block_align(
            Some(parent),
            block_size,
            crate::allocator::block::DEFAULT_BLOCK_ALIGN,
            page_capacity,
        )
    }

    /// Core constructor; the typed pools and the small-object dispatcher
    /// route through this to carry their element alignment.
    pub(crate) fn with_block_align(
        parent: Option<&'a dyn Allocator>,
        block_size: usize,
        block_align: usize,
        page_capacity: usize,
    ) -> AllocResult<Self> {
        if block_size == 0 {
            return Err(AllocError::invalid_config("block size must be nonzero"));
        }
        if page_capacity == 0 {
            return Err(AllocError::invalid_config("page capacity must be nonzero"));
        }

        debug!(block_size, page_capacity, "paged block allocator created");

        Ok(Self {
            parent,
            block_size,
            block_align,
            page_capacity,
            pages: RefCell::new(Vec::new()),
        })
    }

    /// Block size in bytes as configured (pages may round it up).
    #[inline]
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Blocks per page.
    #[inline]
    pub fn page_capacity(&self) -> usize {
        self.page_capacity
    }

    /// Number of live pages.
    #[inline]
    pub fn page_count(&self) -> usize {
        self.pages.borrow().len()
    }

    fn new_page(&self) -> AllocResult<BlockAllocator<'a>> {
        BlockAllocator::with_block_align(
            self.parent,
            self.block_size,
            self.block_align,
            self.page_capacity,
        )
    }
}

// SAFETY: every pointer comes from exactly one page (pages own disjoint
// regions); deallocation routes back to the owning page by pointer-range
// lookup, so the per-page Allocator guarantees carry over.
unsafe impl Allocator for PagedBlockAllocator<'_> {
    unsafe fn allocate(&self, layout: Layout) -> AllocResult<NonNull<[u8]>> {
        debug_assert!(layout.size() > 0, "zero-size allocation is a contract violation");

        // First page with a free block wins, in insertion order.
        {
            let pages = self.pages.borrow();
            for page in pages.iter() {
                if !page.is_full() {
                    // SAFETY: caller upholds the allocate contract.
                    return unsafe { page.allocate(layout) };
                }
            }
        }

        let page = self.new_page()?;
        // SAFETY: a fresh page has every block free.
        let ptr = unsafe { page.allocate(layout)? };

        trace!(pages = self.pages.borrow().len() + 1, "added block page");
        self.pages.borrow_mut().push(page);
        Ok(ptr)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        let mut pages = self.pages.borrow_mut();
        let Some(index) = pages.iter().position(|page| page.contains(ptr.as_ptr())) else {
            debug_assert!(false, "foreign pointer deallocated");
            return;
        };

        // SAFETY: ptr belongs to this page per the range check.
        unsafe { pages[index].deallocate(ptr, layout) };

        // A fully free page goes back to the backing right away.
        if pages[index].is_empty() {
            pages.remove(index);
            trace!(pages = pages.len(), "released empty block page");
        }
    }
}

impl MemoryUsage for PagedBlockAllocator<'_> {
    fn used_memory(&self) -> usize {
        self.pages.borrow().iter().map(MemoryUsage::used_memory).sum()
    }

    fn available_memory(&self) -> Option<usize> {
        // Growth is bounded only by the backing.
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(size: usize, align: usize) -> Layout {
        Layout::from_size_align(size, align).unwrap()
    }

    #[test]
    fn pages_appear_on_demand() {
        let alloc = PagedBlockAllocator::new(32, 2).expect("create");
        let l = layout(32, 8);

        assert_eq!(alloc.page_count(), 0);
        let mut held = Vec::new();
        for _ in 0..5 {
            held.push(unsafe { alloc.allocate(l) }.expect("alloc"));
        }
        assert_eq!(alloc.page_count(), 3);

        for ptr in held {
            unsafe { alloc.deallocate(ptr.cast(), l) };
        }
        assert_eq!(alloc.page_count(), 0);
    }

    #[test]
    fn empty_page_is_released() {
        let alloc = PagedBlockAllocator::new(16, 2).expect("create");
        let l = layout(16, 8);

        let a = unsafe { alloc.allocate(l) }.expect("a");
        let b = unsafe { alloc.allocate(l) }.expect("b");
        let c = unsafe { alloc.allocate(l) }.expect("c");
        assert_eq!(alloc.page_count(), 2);

        // Clearing the second page releases it while the first stays.
        unsafe { alloc.deallocate(c.cast(), l) };
        assert_eq!(alloc.page_count(), 1);

        unsafe { alloc.deallocate(a.cast(), l) };
        unsafe { alloc.deallocate(b.cast(), l) };
        assert_eq!(alloc.page_count(), 0);
    }

    #[test]
    fn freed_block_in_earlier_page_is_reused() {
        let alloc = PagedBlockAllocator::new(32, 2).expect("create");
        let l = layout(32, 8);

        let a = unsafe { alloc.allocate(l) }.expect("a");
        let _b = unsafe { alloc.allocate(l) }.expect("b");
        let _c = unsafe { alloc.allocate(l) }.expect("c");
        assert_eq!(alloc.page_count(), 2);

        unsafe { alloc.deallocate(a.cast(), l) };
        let d = unsafe { alloc.allocate(l) }.expect("d");
        assert_eq!(a.cast::<u8>(), d.cast::<u8>());
        assert_eq!(alloc.page_count(), 2);
    }
}
