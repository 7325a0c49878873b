//! # ember-memory
//!
//! Composable memory allocators for games, simulations, and other
//! latency-sensitive programs that want predictable allocation behavior
//! instead of a general-purpose heap.
//!
//! The crate provides:
//! - Allocator engines: buddy, linear/frame, fixed-block, paged variants,
//!   and a small-object size-class dispatcher
//! - Owning handles ([`Unique`], [`Shared`], [`UniqueArray`]) that
//!   construct and destroy values inside an allocator
//! - Typed object pools and standard-container factories wired to an
//!   allocator
//!
//! ## Composition
//!
//! Every engine implements the same [`Allocator`] contract and obtains its
//! backing memory either from the host heap or from a parent allocator, so
//! engines stack freely:
//!
//! ```rust
//! use ember_memory::prelude::*;
//!
//! fn main() -> AllocResult<()> {
//!     // A buddy allocator carved into a block pool, with typed handles.
//!     let buddy = BuddyAllocator::with_min_block_size(2048, 32)?;
//!     let blocks = BlockAllocator::new_in(&buddy, 32, 8)?;
//!
//!     let value = make_unique(&blocks, [1u32, 2, 3])?;
//!     assert_eq!(value[2], 3);
//!     Ok(())
//! }
//! ```
//!
//! ## Contract
//!
//! All engines are single-threaded: one logical owner per allocator, plain
//! `Cell`-based interior mutability, non-atomic handle reference counts.
//! The only recoverable failure is [`AllocError::OutOfMemory`]; contract
//! misuse is diagnosed with debug assertions (see [`error`]).

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod allocator;
pub mod collections;
pub mod error;
pub mod handle;
pub mod pool;
pub mod utils;

pub use crate::allocator::{
    Allocator, BlockAllocator, BuddyAllocator, FrameAllocator, LinearAllocator, MemoryUsage,
    PagedBlockAllocator, PagedLinearAllocator, Resettable, SmallObjectAllocator,
};
pub use crate::error::{AllocError, AllocResult};
pub use crate::handle::{make_shared, make_unique, make_unique_array, Shared, Unique, UniqueArray};
pub use crate::pool::{ObjectPool, PagedObjectPool, SmallObjectPool};

/// Convenient re-exports of the commonly used types and traits.
pub mod prelude {
    pub use crate::allocator::{
        Allocator, BlockAllocator, BuddyAllocator, FrameAllocator, LinearAllocator, MemoryUsage,
        PagedBlockAllocator, PagedLinearAllocator, Resettable, SmallObjectAllocator,
    };
    pub use crate::collections::{
        deque_in, hash_map_in, hash_set_in, queue_in, stack_in, string_in, vector_in,
    };
    pub use crate::error::{AllocError, AllocResult};
    pub use crate::handle::{
        make_shared, make_unique, make_unique_array, Shared, Unique, UniqueArray,
    };
    pub use crate::pool::{ObjectPool, PagedObjectPool, SmallObjectPool};
}
