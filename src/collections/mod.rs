//! Standard-container factories wired to an allocator.
//!
//! Every function here returns a container whose internal allocations are
//! drawn from the given allocator via [`AllocHandle`]; container semantics
//! are otherwise the host library's. The three constructor shapes are
//! empty, copy-from-range, and (through slice/iterator coercions)
//! copy-from-existing-container.

mod adapters;
mod deque;
mod raw;
mod string;

use core::hash::Hash;

use hashbrown::hash_map::DefaultHashBuilder;

pub use adapters::{Queue, Stack};
pub use deque::Deque;
pub use raw::AllocHandle;
pub use string::String;

use crate::allocator::Allocator;

/// Dynamic array drawing storage from an allocator.
pub type Vector<'a, T> = allocator_api2::vec::Vec<T, AllocHandle<'a>>;

/// Hash map drawing storage from an allocator.
pub type HashMap<'a, K, V> = hashbrown::HashMap<K, V, DefaultHashBuilder, AllocHandle<'a>>;

/// Hash set drawing storage from an allocator.
pub type HashSet<'a, K> = hashbrown::HashSet<K, DefaultHashBuilder, AllocHandle<'a>>;

/// Empty vector backed by `alloc`.
pub fn vector_in<T>(alloc: &dyn Allocator) -> Vector<'_, T> {
    Vector::new_in(AllocHandle::new(alloc))
}

/// Vector holding clones of `items`, backed by `alloc`.
pub fn vector_from_slice_in<'a, T: Clone>(alloc: &'a dyn Allocator, items: &[T]) -> Vector<'a, T> {
    let mut vector = Vector::with_capacity_in(items.len(), AllocHandle::new(alloc));
    vector.extend_from_slice(items);
    vector
}

/// Empty hash map backed by `alloc`.
pub fn hash_map_in<K, V>(alloc: &dyn Allocator) -> HashMap<'_, K, V> {
    HashMap::new_in(AllocHandle::new(alloc))
}

/// Hash map holding `entries`, backed by `alloc`.
pub fn hash_map_from_iter_in<'a, K, V>(
    alloc: &'a dyn Allocator,
    entries: impl IntoIterator<Item = (K, V)>,
) -> HashMap<'a, K, V>
where
    K: Hash + Eq,
{
    let mut map = hash_map_in(alloc);
    map.extend(entries);
    map
}

/// Empty hash set backed by `alloc`.
pub fn hash_set_in<K: Hash + Eq>(alloc: &dyn Allocator) -> HashSet<'_, K> {
    HashSet::new_in(AllocHandle::new(alloc))
}

/// Hash set holding `values`, backed by `alloc`.
pub fn hash_set_from_iter_in<'a, K>(
    alloc: &'a dyn Allocator,
    values: impl IntoIterator<Item = K>,
) -> HashSet<'a, K>
where
    K: Hash + Eq,
{
    let mut set = hash_set_in(alloc);
    set.extend(values);
    set
}

/// Empty deque backed by `alloc`.
pub fn deque_in<T>(alloc: &dyn Allocator) -> Deque<'_, T> {
    Deque::new_in(alloc)
}

/// Deque holding clones of `items`, backed by `alloc`.
pub fn deque_from_slice_in<'a, T: Clone>(alloc: &'a dyn Allocator, items: &[T]) -> Deque<'a, T> {
    Deque::from_slice_in(alloc, items)
}

/// Empty stack backed by `alloc`.
pub fn stack_in<T>(alloc: &dyn Allocator) -> Stack<'_, T> {
    Stack::new_in(alloc)
}

/// Stack holding clones of `items` (bottom first), backed by `alloc`.
pub fn stack_from_slice_in<'a, T: Clone>(alloc: &'a dyn Allocator, items: &[T]) -> Stack<'a, T> {
    Stack::from_slice_in(alloc, items)
}

/// Empty queue backed by `alloc`.
pub fn queue_in<T>(alloc: &dyn Allocator) -> Queue<'_, T> {
    Queue::new_in(alloc)
}

/// Queue holding clones of `items` (front first), backed by `alloc`.
pub fn queue_from_slice_in<'a, T: Clone>(alloc: &'a dyn Allocator, items: &[T]) -> Queue<'a, T> {
    Queue::from_slice_in(alloc, items)
}

/// Empty string backed by `alloc`.
pub fn string_in(alloc: &dyn Allocator) -> String<'_> {
    String::new_in(alloc)
}

/// String holding a copy of `source`, backed by `alloc`.
pub fn string_from_str_in<'a>(alloc: &'a dyn Allocator, source: impl AsRef<str>) -> String<'a> {
    String::from_str_in(alloc, source)
}

/// String from raw UTF-8 bytes, backed by `alloc`.
pub fn string_from_utf8_in<'a>(
    alloc: &'a dyn Allocator,
    bytes: &[u8],
) -> Result<String<'a>, core::str::Utf8Error> {
    String::from_utf8_in(alloc, bytes)
}
