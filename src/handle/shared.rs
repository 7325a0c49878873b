//! Reference-counted handle.

use core::alloc::Layout;
use core::cell::Cell;
use core::fmt;
use core::ops::Deref;
use core::ptr::{self, NonNull};

use crate::allocator::Allocator;
use crate::error::AllocResult;

/// Count and value share one allocation.
struct SharedInner<T> {
    strong: Cell<usize>,
    value: T,
}

/// Shared ownership of one object constructed inside an allocator.
///
/// Cloning bumps a non-atomic reference count; the last handle to drop runs
/// the value's destructor and returns the storage. Single-threaded, like
/// everything in this crate.
pub struct Shared<'a, T> {
    inner: NonNull<SharedInner<T>>,
    alloc: &'a dyn Allocator,
}

impl<'a, T> Shared<'a, T> {
    /// Moves `value` into storage obtained from `alloc` together with its
    /// reference count.
    ///
    /// On failure the allocator is left untouched and `value` is dropped.
    #[must_use = "dropping the handle immediately destroys the value"]
    pub fn new_in(value: T, alloc: &'a dyn Allocator) -> AllocResult<Self> {
        let layout = Layout::new::<SharedInner<T>>();

        // SAFETY: SharedInner always has nonzero size (it carries the
        // count). An allocation failure propagates before the write,
        // dropping `value` normally.
        let inner = unsafe { alloc.allocate(layout) }?.cast::<SharedInner<T>>();
        // SAFETY: the fresh storage is valid and aligned for SharedInner<T>.
        unsafe {
            inner.as_ptr().write(SharedInner {
                strong: Cell::new(1),
                value,
            });
        }

        Ok(Self { inner, alloc })
    }

    /// Borrowed raw pointer to the value.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        // SAFETY: inner holds an initialized SharedInner for the handle's
        // lifetime.
        unsafe { ptr::addr_of!((*self.inner.as_ptr()).value) }
    }

    /// Number of live handles to the value.
    #[inline]
    pub fn strong_count(&self) -> usize {
        // SAFETY: inner is valid while any handle lives.
        unsafe { self.inner.as_ref() }.strong.get()
    }
}

impl<'a, T> Clone for Shared<'a, T> {
    fn clone(&self) -> Self {
        // SAFETY: inner is valid while any handle lives.
        let strong = &unsafe { self.inner.as_ref() }.strong;
        strong.set(strong.get() + 1);
        Self {
            inner: self.inner,
            alloc: self.alloc,
        }
    }
}

impl<'a, T> Deref for Shared<'a, T> {
    type Target = T;

    fn deref(&self) -> &T {
        // SAFETY: inner holds an initialized SharedInner for the handle's
        // lifetime.
        &unsafe { self.inner.as_ref() }.value
    }
}

impl<T> Drop for Shared<'_, T> {
    fn drop(&mut self) {
        // SAFETY: inner is valid; the count reaches zero exactly once, at
        // which point the control block is destroyed and its storage
        // returned with the allocating layout.
        unsafe {
            let strong = &self.inner.as_ref().strong;
            let remaining = strong.get() - 1;
            strong.set(remaining);
            if remaining == 0 {
                ptr::drop_in_place(self.inner.as_ptr());
                self.alloc
                    .deallocate(self.inner.cast(), Layout::new::<SharedInner<T>>());
            }
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Shared<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        T::fmt(self, f)
    }
}

/// Storage layout a pool must provide to host values of type `T` behind
/// [`Shared`] handles as well as [`Unique`](super::Unique) ones.
pub(crate) fn shared_layout<T>() -> Layout {
    Layout::new::<SharedInner<T>>()
}
