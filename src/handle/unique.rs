//! Exclusively owning handle.

use core::alloc::Layout;
use core::fmt;
use core::ops::{Deref, DerefMut};
use core::ptr::{self, NonNull};

use crate::allocator::Allocator;
use crate::error::AllocResult;

/// Exclusive ownership of one object constructed inside an allocator.
///
/// Dropping the handle runs the value's destructor and returns the storage
/// to the allocator it came from. [`reset`](Self::reset) does the same
/// early, leaving an empty handle that a fresh value can be move-assigned
/// into. Movable, not copyable.
///
/// Dereferencing an empty (reset) handle panics.
pub struct Unique<'a, T> {
    /// `None` once the handle has been reset.
    ptr: Option<NonNull<T>>,
    alloc: &'a dyn Allocator,
}

impl<'a, T> Unique<'a, T> {
    /// Moves `value` into storage obtained from `alloc`.
    ///
    /// On failure the allocator is left untouched and `value` is dropped.
    #[must_use = "dropping the handle immediately destroys the value"]
    pub fn new_in(value: T, alloc: &'a dyn Allocator) -> AllocResult<Self> {
        let layout = Layout::new::<T>();

        if layout.size() == 0 {
            // Zero-sized values occupy no storage; the handle still owns the
            // value and runs its destructor on drop.
            let ptr = NonNull::<T>::dangling();
            // SAFETY: any aligned non-null pointer is valid for a zero-sized
            // write.
            unsafe { ptr.as_ptr().write(value) };
            return Ok(Self {
                ptr: Some(ptr),
                alloc,
            });
        }

        // SAFETY: layout is the value's own nonzero layout. An allocation
        // failure propagates before the write, dropping `value` normally.
        let ptr = unsafe { alloc.allocate(layout) }?.cast::<T>();
        // SAFETY: the fresh storage is valid and aligned for T.
        unsafe { ptr.as_ptr().write(value) };
        Ok(Self {
            ptr: Some(ptr),
            alloc,
        })
    }

    /// Borrowed raw pointer to the value, or null for a reset handle.
    #[inline]
    pub fn as_ptr(&self) -> *mut T {
        self.ptr.map_or(ptr::null_mut(), NonNull::as_ptr)
    }

    /// Destroys the value and returns its storage, leaving the handle
    /// empty. Dropping an empty handle is a no-op, so the binding can be
    /// reused by move-assigning a freshly created handle into it.
    pub fn reset(&mut self) {
        if let Some(ptr) = self.ptr.take() {
            // SAFETY: ptr holds an initialized T; after the in-place drop
            // the storage is returned exactly once with its original
            // layout.
            unsafe {
                ptr::drop_in_place(ptr.as_ptr());
                let layout = Layout::new::<T>();
                if layout.size() != 0 {
                    self.alloc.deallocate(ptr.cast(), layout);
                }
            }
        }
    }

    /// Consumes the handle and returns the value, releasing the storage
    /// without running the destructor twice.
    ///
    /// Panics if the handle has been reset.
    pub fn into_inner(mut self) -> T {
        let ptr = self.ptr.take().expect("handle was reset");
        // SAFETY: ptr holds an initialized T; ownership moves to `value`
        // and the storage is released without dropping in place. The
        // handle's own drop sees an empty pointer and does nothing.
        let value = unsafe { ptr::read(ptr.as_ptr()) };
        let layout = Layout::new::<T>();
        if layout.size() != 0 {
            // SAFETY: storage came from this allocator with this layout.
            unsafe { self.alloc.deallocate(ptr.cast(), layout) };
        }
        value
    }
}

impl<'a, T> Deref for Unique<'a, T> {
    type Target = T;

    fn deref(&self) -> &T {
        let ptr = self.ptr.expect("dereferenced a reset handle");
        // SAFETY: a live handle's ptr holds an initialized T for the
        // handle's lifetime.
        unsafe { &*ptr.as_ptr() }
    }
}

impl<'a, T> DerefMut for Unique<'a, T> {
    fn deref_mut(&mut self) -> &mut T {
        let ptr = self.ptr.expect("dereferenced a reset handle");
        // SAFETY: exclusive ownership makes the unique borrow sound.
        unsafe { &mut *ptr.as_ptr() }
    }
}

impl<T> Drop for Unique<'_, T> {
    fn drop(&mut self) {
        self.reset();
    }
}

impl<T: fmt::Debug> fmt::Debug for Unique<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ptr {
            // SAFETY: a live handle's ptr holds an initialized T.
            Some(ptr) => unsafe { &*ptr.as_ptr() }.fmt(f),
            None => f.write_str("<reset>"),
        }
    }
}
