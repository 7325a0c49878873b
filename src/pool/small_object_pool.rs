//! Untyped small-object pool.

use crate::allocator::small::{SmallObjectAllocator, DEFAULT_PAGE_SIZE};
use crate::allocator::Allocator;
use crate::error::AllocResult;
use crate::handle::{Shared, Unique};

/// Pool facade over the [`SmallObjectAllocator`]: the element type is
/// supplied per call, so one pool serves mixed small objects.
///
/// Values whose layout exceeds the top size class are rejected with
/// [`AllocError::ExceedsMaxSize`](crate::AllocError::ExceedsMaxSize);
/// route those through a general allocator instead.
pub struct SmallObjectPool<'a> {
    classes: SmallObjectAllocator<'a>,
}

impl<'a> SmallObjectPool<'a> {
    /// Creates a heap-backed pool whose size classes grow in pages of
    /// roughly `page_size` bytes.
    pub fn new(page_size: usize) -> AllocResult<Self> {
        Ok(Self {
            classes: SmallObjectAllocator::with_backing(None, page_size)?,
        })
    }

    /// Creates a pool drawing class pages from `parent`.
    pub fn new_in(parent: &'a dyn Allocator, page_size: usize) -> AllocResult<Self> {
        Ok(Self {
            classes: SmallObjectAllocator::with_backing(Some(parent), page_size)?,
        })
    }

    /// Constructs `value` in its size class behind an exclusive handle.
    pub fn create<T>(&self, value: T) -> AllocResult<Unique<'_, T>> {
        Unique::new_in(value, &self.classes)
    }

    /// Constructs `value` and its reference count in the fitting size class.
    pub fn create_shared<T>(&self, value: T) -> AllocResult<Shared<'_, T>> {
        Shared::new_in(value, &self.classes)
    }

    /// Number of live pages across all size classes.
    #[inline]
    pub fn page_count(&self) -> usize {
        self.classes.page_count()
    }
}

impl Default for SmallObjectPool<'_> {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE).expect("default page size is valid")
    }
}
