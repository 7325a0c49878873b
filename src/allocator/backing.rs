//! Backing-region acquisition for the allocator engines.
//!
//! Every engine owns one contiguous byte range (or a growing list of them
//! when paged). A [`Region`] is that range plus where it came from: the host
//! heap, or a parent allocator it is returned to on drop.

use core::alloc::Layout;
use core::ptr::NonNull;

use tracing::trace;

use crate::allocator::Allocator;
use crate::error::{AllocError, AllocResult};

/// A contiguous byte range owned by one engine for its whole lifetime.
///
/// The region is released back to its source when dropped, which is why a
/// parent-backed region borrows the parent for `'a`.
pub(crate) struct Region<'a> {
    ptr: NonNull<u8>,
    layout: Layout,
    parent: Option<&'a dyn Allocator>,
}

impl<'a> Region<'a> {
    /// Acquires `layout` bytes from `parent`, or from the host heap when no
    /// parent is given.
    pub(crate) fn acquire(
        parent: Option<&'a dyn Allocator>,
        layout: Layout,
    ) -> AllocResult<Self> {
        debug_assert!(layout.size() > 0, "backing region must be non-empty");

        let ptr = match parent {
            // SAFETY: layout is nonzero; the pointer is recorded together
            // with the layout so the drop impl can return it unchanged.
            Some(parent) => unsafe { parent.allocate(layout)? }.cast::<u8>(),
            None => {
                // SAFETY: layout has nonzero size.
                let raw = unsafe { std::alloc::alloc(layout) };
                NonNull::new(raw).ok_or_else(|| AllocError::out_of_memory(layout))?
            }
        };

        trace!(
            size = layout.size(),
            align = layout.align(),
            parent_backed = parent.is_some(),
            "acquired backing region"
        );

        Ok(Self { ptr, layout, parent })
    }

    /// Base pointer of the region.
    #[inline]
    pub(crate) fn as_ptr(&self) -> *mut u8 {
        self.ptr.as_ptr()
    }

    /// Base address of the region.
    #[inline]
    pub(crate) fn base_addr(&self) -> usize {
        self.ptr.as_ptr() as usize
    }

    /// One-past-the-end address of the region.
    #[inline]
    pub(crate) fn end_addr(&self) -> usize {
        self.base_addr() + self.layout.size()
    }

    /// Region length in bytes.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.layout.size()
    }

    /// Whether `addr` falls inside the region.
    #[inline]
    pub(crate) fn contains(&self, addr: usize) -> bool {
        addr >= self.base_addr() && addr < self.end_addr()
    }
}

impl Drop for Region<'_> {
    fn drop(&mut self) {
        match self.parent {
            // SAFETY: ptr/layout are exactly what acquire() obtained from
            // this parent, and the region is dropped at most once.
            Some(parent) => unsafe { parent.deallocate(self.ptr, self.layout) },
            // SAFETY: ptr/layout are exactly what std::alloc::alloc returned.
            None => unsafe { std::alloc::dealloc(self.ptr.as_ptr(), self.layout) },
        }
    }
}
