//! Exclusively owning handle for contiguous arrays.

use core::alloc::Layout;
use core::fmt;
use core::mem;
use core::ops::{Deref, DerefMut};
use core::ptr::{self, NonNull};

use crate::allocator::Allocator;
use crate::error::{AllocError, AllocResult};

/// Exclusive ownership of `len` objects constructed contiguously inside an
/// allocator.
///
/// Dropping the handle destroys the elements in reverse order, then returns
/// the single backing allocation.
pub struct UniqueArray<'a, T> {
    ptr: NonNull<T>,
    len: usize,
    alloc: &'a dyn Allocator,
}

impl<'a, T> UniqueArray<'a, T> {
    /// Allocates `len` elements from `alloc`, constructing each with
    /// `T::default()`.
    #[must_use = "dropping the handle immediately destroys the values"]
    pub fn new_in(alloc: &'a dyn Allocator, len: usize) -> AllocResult<Self>
    where
        T: Default,
    {
        let layout = Layout::array::<T>(len).map_err(|_| AllocError::SizeOverflow)?;

        if layout.size() == 0 {
            // Empty arrays and zero-sized element types occupy no storage.
            let ptr = NonNull::<T>::dangling();
            for index in 0..len {
                // SAFETY: zero-sized writes are valid at any aligned
                // non-null pointer.
                unsafe { ptr.as_ptr().add(index).write(T::default()) };
            }
            return Ok(Self { ptr, len, alloc });
        }

        // SAFETY: layout is the array's own nonzero layout.
        let ptr = unsafe { alloc.allocate(layout) }?.cast::<T>();
        for index in 0..len {
            // SAFETY: index < len, inside the fresh allocation; Default
            // cannot fail, so every slot ends up initialized.
            unsafe { ptr.as_ptr().add(index).write(T::default()) };
        }

        Ok(Self { ptr, len, alloc })
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the array is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Borrowed raw pointer to the first element.
    #[inline]
    pub fn as_ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }
}

impl<'a, T> Deref for UniqueArray<'a, T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        // SAFETY: ptr..ptr+len holds initialized elements for the handle's
        // lifetime.
        unsafe { core::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

impl<'a, T> DerefMut for UniqueArray<'a, T> {
    fn deref_mut(&mut self) -> &mut [T] {
        // SAFETY: exclusive ownership makes the unique borrow sound.
        unsafe { core::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl<T> Drop for UniqueArray<'_, T> {
    fn drop(&mut self) {
        // Destroy in reverse construction order, then release the single
        // backing allocation.
        // SAFETY: every slot holds an initialized element; the storage is
        // returned exactly once with its original layout.
        unsafe {
            for index in (0..self.len).rev() {
                ptr::drop_in_place(self.ptr.as_ptr().add(index));
            }
            if self.len != 0 && mem::size_of::<T>() != 0 {
                let layout = Layout::array::<T>(self.len).expect("layout validated at construction");
                self.alloc.deallocate(self.ptr.cast(), layout);
            }
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for UniqueArray<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
