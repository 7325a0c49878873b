//! Fixed-capacity typed object pool.

use core::marker::PhantomData;

use crate::allocator::block::BlockAllocator;
use crate::allocator::Allocator;
use crate::error::AllocResult;
use crate::handle::{shared_layout, Shared, Unique};

/// Typed pool of up to `count` objects layered on a [`BlockAllocator`].
///
/// Blocks are sized to also hold the reference-count header of
/// [`Shared`] handles, so both handle kinds draw from the same pool.
pub struct ObjectPool<'a, T> {
    blocks: BlockAllocator<'a>,
    _marker: PhantomData<T>,
}

impl<'a, T> ObjectPool<'a, T> {
    /// Creates a heap-backed pool with room for `count` objects.
    pub fn new(count: usize) -> AllocResult<Self> {
        Self::with_backing(None, count)
    }

    /// Creates a pool whose buffer is drawn from `parent`.
    pub fn new_in(parent: &'a dyn Allocator, count: usize) -> AllocResult<Self> {
        Self::with_backing(Some(parent), count)
    }

    fn with_backing(parent: Option<&'a dyn Allocator>, count: usize) -> AllocResult<Self> {
        let layout = shared_layout::<T>();
        Ok(Self {
            blocks: BlockAllocator::with_block_align(parent, layout.size(), layout.align(), count)?,
            _marker: PhantomData,
        })
    }

    /// Constructs `value` in the pool behind an exclusive handle.
    ///
    /// Fails with out-of-memory when every slot is taken.
    pub fn create(&self, value: T) -> AllocResult<Unique<'_, T>> {
        Unique::new_in(value, &self.blocks)
    }

    /// Constructs `value` in the pool behind a reference-counted handle.
    pub fn create_shared(&self, value: T) -> AllocResult<Shared<'_, T>> {
        Shared::new_in(value, &self.blocks)
    }

    /// Total number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.blocks.block_count()
    }

    /// Number of free slots.
    #[inline]
    pub fn available(&self) -> usize {
        self.blocks.free_blocks()
    }
}
