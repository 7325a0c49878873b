//! Growable typed object pool.

use core::marker::PhantomData;

use crate::allocator::paged_block::PagedBlockAllocator;
use crate::allocator::Allocator;
use crate::error::AllocResult;
use crate::handle::{shared_layout, Shared, Unique};

/// Default number of objects per page.
pub const DEFAULT_PAGE_CAPACITY: usize = 32;

/// Typed pool layered on a [`PagedBlockAllocator`]: grows by a page of
/// `page_capacity` objects when full and releases a page once its last
/// object is destroyed.
pub struct PagedObjectPool<'a, T> {
    blocks: PagedBlockAllocator<'a>,
    _marker: PhantomData<T>,
}

impl<'a, T> PagedObjectPool<'a, T> {
    /// Creates a heap-backed pool growing `page_capacity` objects at a time.
    pub fn new(page_capacity: usize) -> AllocResult<Self> {
        Self::with_backing(None, page_capacity)
    }

    /// Creates a pool whose pages are drawn from `parent`.
    pub fn new_in(parent: &'a dyn Allocator, page_capacity: usize) -> AllocResult<Self> {
        Self::with_backing(Some(parent), page_capacity)
    }

    fn with_backing(
        parent: Option<&'a dyn Allocator>,
        page_capacity: usize,
    ) -> AllocResult<Self> {
        let layout = shared_layout::<T>();
        Ok(Self {
            blocks: PagedBlockAllocator::with_block_align(
                parent,
                layout.size(),
                layout.align(),
                page_capacity,
            )?,
            _marker: PhantomData,
        })
    }

    /// Constructs `value` in the pool behind an exclusive handle.
    pub fn create(&self, value: T) -> AllocResult<Unique<'_, T>> {
        Unique::new_in(value, &self.blocks)
    }

    /// Constructs `value` in the pool behind a reference-counted handle.
    pub fn create_shared(&self, value: T) -> AllocResult<Shared<'_, T>> {
        Shared::new_in(value, &self.blocks)
    }

    /// Objects per page.
    #[inline]
    pub fn page_capacity(&self) -> usize {
        self.blocks.page_capacity()
    }

    /// Number of live pages.
    #[inline]
    pub fn page_count(&self) -> usize {
        self.blocks.page_count()
    }
}

impl<T> Default for PagedObjectPool<'_, T> {
    fn default() -> Self {
        Self::with_backing(None, DEFAULT_PAGE_CAPACITY).expect("default page capacity is valid")
    }
}
