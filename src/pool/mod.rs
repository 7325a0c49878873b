//! Typed object pools layered on the block engines.

mod object_pool;
mod paged_object_pool;
mod small_object_pool;

pub use object_pool::ObjectPool;
pub use paged_object_pool::{PagedObjectPool, DEFAULT_PAGE_CAPACITY};
pub use small_object_pool::SmallObjectPool;
