use lockfree_sssp::{Distance, LockFreePairingHeap, VertexId, INFINITE};
use rand::prelude::*;
use rand::rngs::StdRng;
use std::thread;

#[test]
fn delete_min_on_empty_heap_is_none() {
    let heap = LockFreePairingHeap::with_capacity(8);
    assert_eq!(heap.delete_min(), None);
    assert_eq!(heap.len(), 0);
}

#[test]
fn singleton_insert_and_extract() {
    let heap = LockFreePairingHeap::with_capacity(1);
    heap.insert(0, 42);
    assert_eq!(heap.len(), 1);
    assert_eq!(heap.delete_min(), Some((0, 42)));
    assert_eq!(heap.len(), 0);
    assert_eq!(heap.delete_min(), None);
}

#[test]
fn size_matches_inserts_minus_delete_mins() {
    let mut rng = StdRng::seed_from_u64(7);
    let k = 100;
    let heap = LockFreePairingHeap::with_capacity(k);
    for v in 0..k {
        heap.insert(v as VertexId, rng.gen_range(0..10_000));
    }
    assert_eq!(heap.len(), k);
    let j = 40;
    for _ in 0..j {
        assert!(heap.delete_min().is_some());
    }
    assert_eq!(heap.len(), k - j);
}

#[test]
fn distances_are_monotonically_non_increasing() {
    let heap = LockFreePairingHeap::with_capacity(4);
    heap.insert(0, 100);
    heap.insert(1, 50);
    heap.insert(2, 200);

    heap.decrease_key(0, 80);
    assert_eq!(heap.distance(0), Some(80));

    // Non-decreasing updates are rejected.
    heap.decrease_key(0, 80);
    assert_eq!(heap.distance(0), Some(80));
    heap.decrease_key(0, 300);
    assert_eq!(heap.distance(0), Some(80));

    heap.decrease_key(0, 10);
    assert_eq!(heap.distance(0), Some(10));
    assert!(heap.is_heap_ordered());
    assert_eq!(heap.delete_min(), Some((0, 10)));
}

#[test]
fn decrease_key_on_finalized_vertex_is_a_no_op() {
    let heap = LockFreePairingHeap::with_capacity(3);
    heap.insert(0, 1);
    heap.insert(1, 2);
    heap.insert(2, 3);
    assert_eq!(heap.delete_min(), Some((0, 1)));

    // The extracted vertex stays finalized.
    heap.decrease_key(0, 0);
    assert_eq!(heap.distance(0), None);
    assert_eq!(heap.len(), 2);
    assert_eq!(heap.delete_min(), Some((1, 2)));
    assert_eq!(heap.delete_min(), Some((2, 3)));
}

/// Single-threaded fuzz: every delete_min must return a globally minimal
/// distance, checked against an exhaustively scanned oracle.
#[test]
fn fuzz_delete_min_is_always_minimal() {
    let mut rng = StdRng::seed_from_u64(42);
    let n = 500;
    let heap = LockFreePairingHeap::with_capacity(n);
    let mut oracle: Vec<Option<Distance>> = Vec::with_capacity(n);

    for v in 0..n {
        let d = rng.gen_range(0..10_000);
        heap.insert(v as VertexId, d);
        oracle.push(Some(d));
    }

    let mut remaining = n;
    while remaining > 0 {
        // A burst of random decrease-key attempts, some of them no-ops.
        for _ in 0..20 {
            let v = rng.gen_range(0..n);
            let d = rng.gen_range(0..10_000);
            heap.decrease_key(v as VertexId, d);
            if let Some(cur) = oracle[v] {
                if d < cur {
                    oracle[v] = Some(d);
                }
            }
        }
        assert!(heap.is_heap_ordered());

        let (vertex, distance) = heap.delete_min().expect("heap emptied early");
        let min = oracle.iter().flatten().min().copied().expect("oracle empty");
        assert_eq!(distance, min, "delete_min returned a non-minimal distance");
        assert_eq!(oracle[vertex as usize], Some(distance));
        oracle[vertex as usize] = None;
        remaining -= 1;
    }
    assert_eq!(heap.delete_min(), None);
    assert_eq!(heap.len(), 0);
}

/// Many threads hammer insert and decrease_key on one shared heap; afterwards
/// the structure must be heap-ordered, sized correctly, and a full drain must
/// surface every vertex exactly once with its minimum applied distance.
#[test]
fn concurrent_insert_and_decrease_key_stress() {
    let threads = 8;
    let per_thread = 500;
    let n = threads * per_thread;
    let mut rng = StdRng::seed_from_u64(123);

    let initial: Vec<Distance> = (0..n).map(|_| rng.gen_range(10_000..20_000)).collect();
    let targets: Vec<Distance> = (0..n).map(|_| rng.gen_range(0..10_000)).collect();

    let heap = LockFreePairingHeap::with_capacity(n);

    // Phase 1: concurrent inserts of disjoint vertex ranges.
    thread::scope(|scope| {
        for t in 0..threads {
            let heap = &heap;
            let initial = &initial;
            scope.spawn(move || {
                for v in t * per_thread..(t + 1) * per_thread {
                    heap.insert(v as VertexId, initial[v]);
                }
            });
        }
    });
    assert_eq!(heap.len(), n);
    assert!(heap.is_heap_ordered());

    // Phase 2: every thread races decrease_key over every vertex, with both
    // winning values and deliberately stale (higher) ones.
    thread::scope(|scope| {
        for t in 0..threads {
            let heap = &heap;
            let targets = &targets;
            scope.spawn(move || {
                for v in 0..n {
                    let rotated = (v + t * per_thread) % n;
                    heap.decrease_key(rotated as VertexId, targets[rotated] + 5_000);
                    heap.decrease_key(rotated as VertexId, targets[rotated]);
                }
            });
        }
    });
    assert_eq!(heap.len(), n);
    assert!(heap.is_heap_ordered());

    // Drain: no lost updates, no lost keys, non-decreasing order.
    let mut seen = vec![false; n];
    let mut last = 0;
    for _ in 0..n {
        let (vertex, distance) = heap.delete_min().expect("key lost under contention");
        assert!(!seen[vertex as usize], "vertex extracted twice");
        seen[vertex as usize] = true;
        assert_eq!(
            distance, targets[vertex as usize],
            "vertex {} kept a stale distance",
            vertex
        );
        assert!(distance >= last, "extraction order not sorted");
        last = distance;
    }
    assert_eq!(heap.delete_min(), None);
    assert!(seen.iter().all(|&s| s));
}

#[test]
fn infinite_sentinel_orders_after_finite_distances() {
    let heap = LockFreePairingHeap::with_capacity(3);
    heap.insert(0, INFINITE);
    heap.insert(1, 5);
    heap.insert(2, INFINITE);
    assert_eq!(heap.delete_min(), Some((1, 5)));
    let (_, d) = heap.delete_min().expect("two sentinels left");
    assert_eq!(d, INFINITE);
    let (_, d) = heap.delete_min().expect("one sentinel left");
    assert_eq!(d, INFINITE);
    assert_eq!(heap.delete_min(), None);
}
