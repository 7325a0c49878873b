//! Paged linear allocator.
//!
//! A growing list of [`LinearAllocator`] pages. Allocation bumps the newest
//! page and adds a page when it is full; requests larger than the page size
//! get a dedicated page of exactly the required size. `reset` keeps the
//! first page and releases the rest, so steady-state frames allocate
//! nothing from the backing.

use core::alloc::Layout;
use core::cell::RefCell;
use core::ptr::NonNull;

use tracing::{debug, trace};

use crate::allocator::{Allocator, LinearAllocator, MemoryUsage, Resettable};
use crate::error::{AllocError, AllocResult};

/// Default page size in bytes.
pub const DEFAULT_PAGE_SIZE: usize = 4096;

/// Linear allocator that grows by adding pages from its backing.
pub struct PagedLinearAllocator<'a> {
    parent: Option<&'a dyn Allocator>,
    page_size: usize,
    pages: RefCell<Vec<LinearAllocator<'a>>>,
}

impl<'a> PagedLinearAllocator<'a> {
    /// Creates a heap-backed paged linear allocator with `page_size`-byte
    /// pages.
    pub fn new(page_size: usize) -> AllocResult<Self> {
        Self::with_backing(None, page_size)
    }

    /// Creates a paged linear allocator drawing pages from `parent`.
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

        debug!(page_size, "paged linear allocator created");

        Ok(Self {
            parent,
            page_size,
            pages: RefCell::new(Vec::new()),
        })
    }

    /// Configured page size in bytes.
    #[inline]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of live pages.
    #[inline]
    pub fn page_count(&self) -> usize {
        self.pages.borrow().len()
    }
}

impl Default for PagedLinearAllocator<'_> {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE).expect("default page size is valid")
    }
}

// SAFETY: each page is a LinearAllocator with its own disjoint region; a
// returned pointer comes from exactly one page, so the Allocator guarantees
// of the page carry over.
unsafe impl Allocator for PagedLinearAllocator<'_> {
    unsafe fn allocate(&self, layout: Layout) -> AllocResult<NonNull<[u8]>> {
        debug_assert!(layout.size() > 0, "zero-size allocation is a contract violation");

        // Fast path: the newest page.
        {
            let pages = self.pages.borrow();
            if let Some(page) = pages.last() {
                // SAFETY: caller upholds the allocate contract.
                if let Ok(ptr) = unsafe { page.allocate(layout) } {
                    return Ok(ptr);
                }
            }
        }

        // The current page is full (or missing). An oversized request gets
        // a dedicated page with room for alignment slack; everything else
        // gets a standard page.
        let required = layout
            .size()
            .checked_add(layout.align() - 1)
            .ok_or(AllocError::SizeOverflow)?;
        let page_bytes = required.max(self.page_size);

        let page = LinearAllocator::with_backing(self.parent, page_bytes)?;
        // SAFETY: the fresh page is at least `size + align - 1` bytes, so
        // the bump cannot fail.
        let ptr = unsafe { page.allocate(layout) }.expect("fresh page fits the request");

        trace!(page_bytes, pages = self.pages.borrow().len() + 1, "added linear page");
        self.pages.borrow_mut().push(page);
        Ok(ptr)
    }

    unsafe fn deallocate(&self, _ptr: NonNull<u8>, _layout: Layout) {
        // Storage is reclaimed in bulk by reset() or drop.
    }
}

impl MemoryUsage for PagedLinearAllocator<'_> {
    fn used_memory(&self) -> usize {
        self.pages.borrow().iter().map(LinearAllocator::used).sum()
    }

    fn available_memory(&self) -> Option<usize> {
        // Growth is bounded only by the backing.
        None
    }
}

impl Resettable for PagedLinearAllocator<'_> {
    unsafe fn reset(&self) {
        let mut pages = self.pages.borrow_mut();
        // Keep the first page to make steady-state resets allocation-free.
        pages.truncate(1);
        if let Some(page) = pages.first() {
            // SAFETY: caller upholds the reset contract.
            unsafe { page.reset() };
        }
    }
}
