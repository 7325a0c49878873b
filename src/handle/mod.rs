//! Owning handles that construct and destroy values inside an allocator.
//!
//! Each handle carries a back reference to the allocator that produced it;
//! dropping the handle runs the value's destructor and returns the storage
//! to that allocator.

mod array;
mod shared;
mod unique;

pub use array::UniqueArray;
pub use shared::Shared;
pub use unique::Unique;

pub(crate) use shared::shared_layout;

use crate::allocator::Allocator;
use crate::error::AllocResult;

/// Constructs `value` inside `alloc` behind an exclusive handle.
pub fn make_unique<'a, T>(alloc: &'a dyn Allocator, value: T) -> AllocResult<Unique<'a, T>> {
    Unique::new_in(value, alloc)
}

/// Constructs `value` inside `alloc` behind a reference-counted handle.
pub fn make_shared<'a, T>(alloc: &'a dyn Allocator, value: T) -> AllocResult<Shared<'a, T>> {
    Shared::new_in(value, alloc)
}

/// Constructs `len` default values contiguously inside `alloc`.
pub fn make_unique_array<'a, T: Default>(
    alloc: &'a dyn Allocator,
    len: usize,
) -> AllocResult<UniqueArray<'a, T>> {
    UniqueArray::new_in(alloc, len)
}
