//! Adaptor that plumbs this crate's allocators into allocator-aware
//! container crates.

use core::alloc::Layout;
use core::ptr::NonNull;

use allocator_api2::alloc::AllocError as RawAllocError;

use crate::allocator::Allocator;

/// Borrowed, copyable allocator handle implementing
/// [`allocator_api2::alloc::Allocator`].
///
/// This is the one shim between the crate's fallible single-threaded
/// contract and the container ecosystem's allocator vocabulary; containers
/// built over it draw every internal allocation from the wrapped engine.
#[derive(Clone, Copy)]
pub struct AllocHandle<'a> {
    alloc: &'a dyn Allocator,
}

impl<'a> AllocHandle<'a> {
    /// Wraps `alloc` for use inside containers.
    pub fn new(alloc: &'a dyn Allocator) -> Self {
        Self { alloc }
    }

    /// The wrapped allocator.
    pub fn allocator(&self) -> &'a dyn Allocator {
        self.alloc
    }
}

#[inline]
fn dangling_slice(layout: Layout) -> NonNull<[u8]> {
    // An aligned non-null address stands in for zero-size allocations, as
    // the container allocator contract expects.
    let ptr = NonNull::new(layout.align() as *mut u8).expect("alignment is nonzero");
    NonNull::slice_from_raw_parts(ptr, 0)
}

// SAFETY: delegates to the wrapped engine, which upholds the validity,
// alignment, and disjointness guarantees; zero-size requests never reach
// the engine (they are a contract violation there) and are answered with
// dangling pointers here.
unsafe impl allocator_api2::alloc::Allocator for AllocHandle<'_> {
    fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, RawAllocError> {
        if layout.size() == 0 {
            return Ok(dangling_slice(layout));
        }
        // SAFETY: layout is nonzero and the returned pointer is managed by
        // the container under the same layout.
        unsafe { self.alloc.allocate(layout) }.map_err(|_| RawAllocError)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        if layout.size() == 0 {
            return;
        }
        // SAFETY: caller guarantees ptr/layout came from allocate above.
        unsafe { self.alloc.deallocate(ptr, layout) };
    }
}
