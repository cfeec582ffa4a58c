#![cfg(miri)]

use orderqueue::{release_orphan, DuplicatePolicy, Edge, OrderQueue};
use std::sync::{Arc, Barrier};
use std::thread;

const MIRI_THREADS: usize = 2;
const MIRI_ITEMS_PER_THREAD: usize = 20;

#[test]
fn miri_link_and_unlink_both_edges() {
    let queue = OrderQueue::<i64, Box<u32>>::new();
    for (i, k) in [5, 1, 9, 5, 3, 9].into_iter().enumerate() {
        queue.insert(Box::new(i as u32), k, DuplicatePolicy::Allow).unwrap();
    }
    assert!(queue.insert(Box::new(99), 3, DuplicatePolicy::Reject).is_err());

    let mut edge = Edge::Highest;
    while let Some(orphan) = queue.pop(edge) {
        assert!(orphan.is_detached());
        release_orphan(Some(orphan));
        edge = if edge == Edge::Highest { Edge::Lowest } else { Edge::Highest };
    }
    queue.check_invariants().unwrap();
}

#[test]
fn miri_drop_with_linked_nodes() {
    let queue = OrderQueue::<i64, Vec<u8>>::new();
    for k in 0..8 {
        queue.insert(vec![k as u8; 4], k % 3, DuplicatePolicy::Allow).unwrap();
    }
    let orphan = queue.pop(Edge::Lowest);
    drop(queue);
    assert_eq!(orphan.map(|o| o.into_payload()), Some(vec![0; 4]));
}

#[test]
fn miri_concurrent_insert_pop() {
    let queue = Arc::new(OrderQueue::<i64, usize>::new());
    let barrier = Arc::new(Barrier::new(MIRI_THREADS));

    let handles: Vec<_> = (0..MIRI_THREADS)
        .map(|t| {
            let queue = Arc::clone(&queue);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let mut popped = 0;
                for i in 0..MIRI_ITEMS_PER_THREAD {
                    queue
                        .insert(t * MIRI_ITEMS_PER_THREAD + i, (i % 7) as i64, DuplicatePolicy::Allow)
                        .unwrap();
                    if i % 2 == 1 && queue.pop(Edge::Highest).is_some() {
                        popped += 1;
                    }
                }
                popped
            })
        })
        .collect();

    let popped: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    queue.check_invariants().unwrap();
    assert_eq!(queue.count(), MIRI_THREADS * MIRI_ITEMS_PER_THREAD - popped);
}
