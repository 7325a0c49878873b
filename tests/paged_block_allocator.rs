//! Integration tests for the paged block allocator.

use ember_memory::{make_shared, make_unique, BuddyAllocator, MemoryUsage, PagedBlockAllocator};

#[test]
fn five_values_across_three_pages() {
    let allocator = PagedBlockAllocator::new(32, 2).expect("create");

    let values: Vec<_> = (1..=5)
        .map(|n| make_unique(&allocator, n).expect("allocate"))
        .collect();
    assert_eq!(allocator.page_count(), 3);

    for (index, value) in values.iter().enumerate() {
        assert_eq!(**value, index as i32 + 1);
    }
}

#[test]
fn pages_are_released_when_empty() {
    let allocator = PagedBlockAllocator::new(32, 2).expect("create");

    let a = make_unique(&allocator, 1).expect("a");
    let b = make_unique(&allocator, 2).expect("b");
    let c = make_unique(&allocator, 3).expect("c");
    assert_eq!(allocator.page_count(), 2);

    drop(c);
    assert_eq!(allocator.page_count(), 1);
    drop(a);
    drop(b);
    assert_eq!(allocator.page_count(), 0);
}

#[test]
fn freed_slots_in_early_pages_are_preferred() {
    let allocator = PagedBlockAllocator::new(32, 2).expect("create");

    let a = make_unique(&allocator, 1).expect("a");
    let _b = make_unique(&allocator, 2).expect("b");
    let _c = make_unique(&allocator, 3).expect("c");

    let a_addr = a.as_ptr() as usize;
    drop(a);
    let d = make_unique(&allocator, 4).expect("d");
    assert_eq!(d.as_ptr() as usize, a_addr);
    assert_eq!(allocator.page_count(), 2);
}

#[test]
fn page_liveness_stays_bounded() {
    let allocator = PagedBlockAllocator::new(16, 4).expect("create");
    let mut held = Vec::new();

    for round in 0..3 {
        for n in 0..4 {
            held.push(make_unique(&allocator, round * 4 + n).expect("allocate"));
        }
        let live = held.len();
        let pages = allocator.page_count();
        assert!(pages <= live.div_ceil(4) + 1, "pages {pages} for {live} live");
    }
}

#[test]
fn buddy_backed_pages() {
    let buddy = BuddyAllocator::with_min_block_size(4096, 32).expect("buddy");
    let allocator = PagedBlockAllocator::new_in(&buddy, 32, 8).expect("create");

    let shared = make_shared(&allocator, (7u32, 9u32)).expect("shared");
    let clone = shared.clone();
    assert_eq!(*clone, (7, 9));

    assert!(buddy.used_memory() > 0);
    drop(shared);
    drop(clone);
    // The last handle released the only page back to the buddy.
    assert_eq!(allocator.page_count(), 0);
    assert_eq!(buddy.used_memory(), 0);
}
