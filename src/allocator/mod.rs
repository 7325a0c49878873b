//! Allocator engines and the abstract contract they share.
//!
//! Every engine owns its backing memory: either a buffer from the host heap
//! or one borrowed from a parent allocator, which is how the engines
//! compose (a buddy allocator backing a block allocator backing a typed
//! pool, and so on).

pub(crate) mod backing;
mod traits;

// Engine implementations
pub mod block;
pub mod buddy;
pub mod frame;
pub mod linear;
pub mod paged_block;
pub mod paged_linear;
pub mod small;

pub use block::{BlockAllocator, DEFAULT_BLOCK_ALIGN};
pub use buddy::{BuddyAllocator, DEFAULT_MIN_BLOCK_SIZE};
pub use frame::FrameAllocator;
pub use linear::LinearAllocator;
pub use paged_block::PagedBlockAllocator;
pub use paged_linear::{PagedLinearAllocator, DEFAULT_PAGE_SIZE};
pub use small::{SmallObjectAllocator, MAX_SMALL_OBJECT_SIZE, SIZE_CLASSES};
pub use traits::{Allocator, MemoryUsage, Resettable};
