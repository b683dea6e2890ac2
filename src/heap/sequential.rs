use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::sync::Mutex;

use crate::heap::traits::PriorityQueue;
use crate::{Distance, VertexId, INFINITE};

/// Plain binary-heap baseline behind the same [`PriorityQueue`] seam.
///
/// Decrease-key is lazy: a new entry is pushed and stale ones are skipped at
/// pop time against the per-vertex best distance. A mutex makes it usable
/// from the unchanged multi-worker orchestrator; it exists as the reference
/// backend, not as a fast path.
pub struct SequentialBinaryHeap {
    inner: Mutex<Inner>,
}

struct Inner {
    heap: BinaryHeap<Reverse<(Distance, VertexId)>>,
    best: Vec<Distance>,
    in_heap: Vec<bool>,
    live: usize,
}

impl PriorityQueue for SequentialBinaryHeap {
    fn with_capacity(vertices: usize) -> Self {
        SequentialBinaryHeap {
            inner: Mutex::new(Inner {
                heap: BinaryHeap::with_capacity(vertices),
                best: vec![INFINITE; vertices],
                in_heap: vec![false; vertices],
                live: 0,
            }),
        }
    }

    fn insert(&self, vertex: VertexId, distance: Distance) {
        let mut inner = self.inner.lock().unwrap();
        inner.best[vertex as usize] = distance;
        inner.in_heap[vertex as usize] = true;
        inner.live += 1;
        inner.heap.push(Reverse((distance, vertex)));
    }

    fn decrease_key(&self, vertex: VertexId, distance: Distance) {
        let mut inner = self.inner.lock().unwrap();
        if !inner.in_heap[vertex as usize] || distance >= inner.best[vertex as usize] {
            return;
        }
        inner.best[vertex as usize] = distance;
        inner.heap.push(Reverse((distance, vertex)));
    }

    fn delete_min(&self) -> Option<(VertexId, Distance)> {
        let mut inner = self.inner.lock().unwrap();
        while let Some(Reverse((distance, vertex))) = inner.heap.pop() {
            // Skip entries superseded by a later decrease-key.
            if inner.in_heap[vertex as usize] && inner.best[vertex as usize] == distance {
                inner.in_heap[vertex as usize] = false;
                inner.live -= 1;
                return Some((vertex, distance));
            }
        }
        None
    }

    fn len(&self) -> usize {
        self.inner.lock().unwrap().live
    }
}
