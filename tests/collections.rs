//! Integration tests for the allocator-backed container factories.

use ember_memory::collections::{
    deque_from_slice_in, deque_in, hash_map_from_iter_in, hash_map_in, hash_set_from_iter_in,
    hash_set_in, queue_from_slice_in, queue_in, stack_from_slice_in, stack_in, string_from_str_in,
    string_from_utf8_in, string_in, vector_from_slice_in, vector_in,
};
use ember_memory::{BuddyAllocator, FrameAllocator, LinearAllocator, MemoryUsage};

#[test]
fn vector_from_buddy_allocator() {
    let allocator = BuddyAllocator::with_min_block_size(256, 16).expect("create");

    let mut vec = vector_in::<i32>(&allocator);
    vec.push(5);
    vec.push(6);

    assert_eq!(vec.len(), 2);
    assert_eq!(vec[0], 5);
    assert_eq!(vec[1], 6);
    assert!(allocator.used_memory() > 0);
}

#[test]
fn vector_from_frame_allocator() {
    let buddy = BuddyAllocator::new(512).expect("buddy");
    let frame = FrameAllocator::new_in(&buddy, 32).expect("frame");

    let mut vec = vector_in::<i32>(&frame);
    vec.push(5);
    vec.push(6);
    assert_eq!(vec.as_slice(), [5, 6]);
}

#[test]
fn vector_copies_a_range() {
    let allocator = LinearAllocator::new(4 * 1024).expect("create");

    let source = [1, 2, 3, 4];
    let vec = vector_from_slice_in(&allocator, &source);
    assert_eq!(vec.as_slice(), source);

    // Copy-from-existing-container goes through the same factory.
    let copy = vector_from_slice_in(&allocator, &vec);
    assert_eq!(copy.as_slice(), source);
}

#[test]
fn hash_map_round_trips() {
    let allocator = BuddyAllocator::new(4096).expect("create");

    let mut map = hash_map_in::<&str, i32>(&allocator);
    map.insert("one", 1);
    map.insert("two", 2);

    assert_eq!(map.get("one"), Some(&1));
    assert_eq!(map.get("two"), Some(&2));
    assert_eq!(map.get("three"), None);
}

#[test]
fn hash_map_copies_entries() {
    let allocator = BuddyAllocator::new(4096).expect("create");

    let map = hash_map_from_iter_in(&allocator, [("a", 1), ("b", 2)]);
    let copy = hash_map_from_iter_in(&allocator, map.iter().map(|(k, v)| (*k, *v)));
    assert_eq!(copy.len(), 2);
    assert_eq!(copy["b"], 2);
}

#[test]
fn hash_set_membership() {
    let allocator = BuddyAllocator::new(4096).expect("create");

    let mut set = hash_set_in::<i32>(&allocator);
    set.insert(1);
    set.insert(2);
    set.insert(2);

    assert_eq!(set.len(), 2);
    assert!(set.contains(&1));
    assert!(!set.contains(&3));

    let copy = hash_set_from_iter_in(&allocator, set.iter().copied());
    assert_eq!(copy.len(), 2);
}

#[test]
fn deque_works_from_both_ends() {
    let allocator = LinearAllocator::new(4 * 1024).expect("create");

    let mut deque = deque_in::<i32>(&allocator);
    deque.push_back(2);
    deque.push_front(1);
    deque.push_back(3);

    assert_eq!(deque.pop_front(), Some(1));
    assert_eq!(deque.pop_back(), Some(3));
    assert_eq!(deque.pop_back(), Some(2));

    let copied = deque_from_slice_in(&allocator, &[9, 8, 7]);
    let collected: Vec<_> = copied.iter().copied().collect();
    assert_eq!(collected, vec![9, 8, 7]);
}

#[test]
fn stack_is_lifo() {
    let allocator = BuddyAllocator::new(1024).expect("create");

    let mut stack = stack_in::<i32>(&allocator);
    stack.push(1);
    stack.push(2);
    stack.push(3);

    assert_eq!(stack.top(), Some(&3));
    assert_eq!(stack.pop(), Some(3));
    assert_eq!(stack.pop(), Some(2));
    assert_eq!(stack.pop(), Some(1));
    assert_eq!(stack.pop(), None);

    let seeded = stack_from_slice_in(&allocator, &[1, 2]);
    assert_eq!(seeded.top(), Some(&2));
}

#[test]
fn queue_is_fifo() {
    let allocator = BuddyAllocator::new(1024).expect("create");

    let mut queue = queue_in::<i32>(&allocator);
    queue.push(1);
    queue.push(2);
    queue.push(3);

    assert_eq!(queue.front(), Some(&1));
    assert_eq!(queue.pop(), Some(1));
    assert_eq!(queue.pop(), Some(2));
    assert_eq!(queue.pop(), Some(3));
    assert_eq!(queue.pop(), None);

    let seeded = queue_from_slice_in(&allocator, &[4, 5]);
    assert_eq!(seeded.front(), Some(&4));
}

#[test]
fn string_construction_shapes() {
    let allocator = BuddyAllocator::new(1024).expect("create");

    let mut empty = string_in(&allocator);
    assert!(empty.is_empty());
    empty.push_str("test");
    empty.push('!');
    assert_eq!(empty, "test!");

    let copied = string_from_str_in(&allocator, "test");
    assert_eq!(copied, "test");

    let owned_source = std::string::String::from("from std");
    let from_owned = string_from_str_in(&allocator, &owned_source);
    assert_eq!(from_owned, "from std");

    let from_bytes = string_from_utf8_in(&allocator, b"raw bytes").expect("valid utf8");
    assert_eq!(from_bytes, "raw bytes");

    assert!(string_from_utf8_in(&allocator, &[0xFF, 0xFE]).is_err());
}

#[test]
fn containers_free_back_into_block_engines() {
    use ember_memory::PagedBlockAllocator;

    let allocator = PagedBlockAllocator::new(64, 8).expect("create");
    {
        let mut vec = vector_in::<u8>(&allocator);
        vec.extend_from_slice(&[1, 2, 3]);
        assert!(allocator.page_count() > 0);
    }
    assert_eq!(allocator.page_count(), 0);
}
