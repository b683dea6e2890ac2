use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, AtomicUsize, Ordering};

use crate::heap::arena::{Arena, NIL};
use crate::heap::node::{ChildList, DescriptorSlot, NodeSlot};
use crate::heap::traits::PriorityQueue;
use crate::{Distance, VertexId};

fn pack(descriptor: u32, stamp: u32) -> u64 {
    ((descriptor as u64) << 32) | stamp as u64
}

fn unpack(cell: u64) -> (u32, u32) {
    ((cell >> 32) as u32, cell as u32)
}

/// A lock-free pairing heap keyed by vertex distance.
///
/// `insert` and `decrease_key` are lock-free: the only globally shared
/// mutable cell is a `(descriptor, stamp)` word, and every structural change
/// of root identity goes through a compare-and-swap on it. A winning CAS
/// publishes a write descriptor carrying the one outstanding relocation (the
/// displaced root's vertex must point at its clone); any thread that touches
/// the heap afterwards executes the descriptor first, so a preempted
/// winner's debt is always paid and all threads agree on the canonical root.
///
/// `delete_min` is explicitly not lock-free. It is correct only while no
/// insert or decrease-key is in flight, which the SSSP orchestrator
/// guarantees with its round barrier.
///
/// Nodes live in an append-only arena and are retired in place, so replaced
/// roots stay readable for any thread still holding their index; everything
/// is reclaimed when the heap drops.
pub struct LockFreePairingHeap {
    nodes: Arena<NodeSlot>,
    descriptors: Arena<DescriptorSlot>,
    /// One child list per vertex, shared by all clones of that vertex.
    children: Vec<ChildList>,
    /// Vertex -> current live node slot (the heap-position back-reference).
    node_of: Vec<AtomicU32>,
    /// One-way transition true -> false at extraction, never reversed.
    in_heap: Vec<AtomicBool>,
    /// Packed `(descriptor index, stamp)`.
    cell: AtomicU64,
    len: AtomicUsize,
}

impl LockFreePairingHeap {
    /// Creates an empty heap for vertices `0..vertices`.
    pub fn with_capacity(vertices: usize) -> Self {
        let descriptors = Arena::with_capacity(vertices.max(64));
        let empty = descriptors.alloc();
        // Default descriptor slots already read as a quiescent empty root.
        LockFreePairingHeap {
            nodes: Arena::with_capacity(vertices.max(64)),
            descriptors,
            children: (0..vertices).map(|_| ChildList::new()).collect(),
            node_of: (0..vertices).map(|_| AtomicU32::new(NIL)).collect(),
            in_heap: (0..vertices).map(|_| AtomicBool::new(false)).collect(),
            cell: AtomicU64::new(pack(empty, 0)),
            len: AtomicUsize::new(0),
        }
    }

    fn load_cell(&self) -> (u64, &DescriptorSlot) {
        let word = self.cell.load(Ordering::Acquire);
        (word, self.descriptors.get(unpack(word).0))
    }

    /// Installs `descriptor` if the cell still holds `expected`, bumping the
    /// stamp so a recycled root index can never be mistaken for the old one.
    fn cas_cell(&self, expected: u64, descriptor: u32) -> bool {
        let (_, stamp) = unpack(expected);
        self.cell
            .compare_exchange(
                expected,
                pack(descriptor, stamp.wrapping_add(1)),
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }

    /// Executes an observed descriptor's outstanding relocation (helping).
    fn help(&self, descriptor: &DescriptorSlot) {
        if !descriptor.pending.load(Ordering::Acquire) {
            return;
        }
        let vertex = descriptor.vertex.load(Ordering::Relaxed);
        if vertex != NIL {
            let from = descriptor.from.load(Ordering::Relaxed);
            let to = descriptor.to.load(Ordering::Relaxed);
            // Idempotent: once the slot moved on, the CAS fails harmlessly.
            let _ = self.node_of[vertex as usize].compare_exchange(
                from,
                to,
                Ordering::AcqRel,
                Ordering::Acquire,
            );
        }
        descriptor.pending.store(false, Ordering::Release);
    }

    fn help_current(&self) {
        let (_, descriptor) = self.load_cell();
        self.help(descriptor);
    }

    fn alloc_node(&self, vertex: u32, distance: Distance) -> u32 {
        let slot = self.nodes.alloc();
        let node = self.nodes.get(slot);
        node.vertex.store(vertex, Ordering::Relaxed);
        node.distance.store(distance, Ordering::Relaxed);
        node.parent.store(NIL, Ordering::Relaxed);
        slot
    }

    /// Defensive copy of a root about to be displaced: the clone shares the
    /// vertex's child list by construction, so children attached to the old
    /// slot while the swap is in flight are never lost.
    fn clone_node(&self, slot: u32) -> u32 {
        let source = self.nodes.get(slot);
        let clone = self.nodes.alloc();
        let target = self.nodes.get(clone);
        target
            .vertex
            .store(source.vertex.load(Ordering::Relaxed), Ordering::Relaxed);
        target
            .distance
            .store(source.distance.load(Ordering::Acquire), Ordering::Relaxed);
        target
            .parent
            .store(source.parent.load(Ordering::Acquire), Ordering::Relaxed);
        clone
    }

    fn new_descriptor(&self, root: u32, vertex: u32, from: u32, to: u32, pending: bool) -> u32 {
        let slot = self.descriptors.alloc();
        let descriptor = self.descriptors.get(slot);
        descriptor.root.store(root, Ordering::Relaxed);
        descriptor.vertex.store(vertex, Ordering::Relaxed);
        descriptor.from.store(from, Ordering::Relaxed);
        descriptor.to.store(to, Ordering::Relaxed);
        descriptor.pending.store(pending, Ordering::Release);
        slot
    }

    fn vertex_of(&self, slot: u32) -> u32 {
        self.nodes.get(slot).vertex.load(Ordering::Relaxed)
    }

    fn distance_of(&self, slot: u32) -> Distance {
        self.nodes.get(slot).distance.load(Ordering::Acquire)
    }

    /// O(1) meld: the node with the larger distance becomes a child of the
    /// other. Returns the winner's slot.
    fn merge(&self, a: u32, b: u32) -> u32 {
        if a == NIL {
            return b;
        }
        if b == NIL {
            return a;
        }
        let (small, large) = if self.distance_of(a) <= self.distance_of(b) {
            (a, b)
        } else {
            (b, a)
        };
        let small_vertex = self.vertex_of(small);
        let large_vertex = self.vertex_of(large);
        self.children[small_vertex as usize].push(large_vertex);
        self.nodes
            .get(large)
            .parent
            .store(small_vertex, Ordering::Release);
        small
    }

    /// Inserts `vertex` with its initial `distance`. Lock-free.
    pub fn insert(&self, vertex: VertexId, distance: Distance) {
        let node = self.alloc_node(vertex, distance);
        self.node_of[vertex as usize].store(node, Ordering::Release);
        self.in_heap[vertex as usize].store(true, Ordering::Release);

        loop {
            let (word, descriptor) = self.load_cell();
            self.help(descriptor);
            let root = descriptor.root.load(Ordering::Relaxed);

            if root == NIL {
                // Empty heap: the new node becomes the sole root.
                let quiescent = self.new_descriptor(node, NIL, NIL, NIL, false);
                if self.cas_cell(word, quiescent) {
                    break;
                }
                continue;
            }

            let root_vertex = self.vertex_of(root);
            if distance >= self.distance_of(root) {
                // Root identity is unchanged: hang the node under the root
                // without touching the shared cell.
                self.nodes
                    .get(node)
                    .parent
                    .store(root_vertex, Ordering::Release);
                self.children[root_vertex as usize].push(vertex);
                break;
            }

            // The new node must become the root: clone the old root, meld,
            // and race to publish. The clone inherits the old root's child
            // list, and the descriptor records the relocation old -> clone.
            let clone = self.clone_node(root);
            let winner = self.merge(clone, node);
            let next = self.new_descriptor(winner, root_vertex, root, clone, true);
            if self.cas_cell(word, next) {
                self.help(self.descriptors.get(next));
                break;
            }
            // Lost the race: undo the speculative link and retry against
            // whatever root we observe next.
            self.children[vertex as usize].remove(root_vertex);
            self.help_current();
        }

        self.help_current();
        self.len.fetch_add(1, Ordering::Relaxed);
    }

    /// Lowers `vertex`'s distance to `new_distance`. Lock-free.
    ///
    /// No-op when the vertex has been finalized or the new distance is not
    /// strictly smaller; distances are monotonically non-increasing over a
    /// node's in-heap lifetime no matter how relaxations interleave.
    pub fn decrease_key(&self, vertex: VertexId, new_distance: Distance) {
        let v = vertex as usize;
        if !self.in_heap[v].load(Ordering::Acquire) {
            return;
        }

        // Case 1: the target is the canonical root. Its key lives in the
        // published descriptor chain, so the update must go through a clone
        // and a fresh CAS rather than an in-place write that a concurrent
        // root replacement could overwrite.
        loop {
            let (word, descriptor) = self.load_cell();
            self.help(descriptor);
            let node = self.node_of[v].load(Ordering::Acquire);
            if descriptor.root.load(Ordering::Relaxed) != node {
                break;
            }
            if new_distance >= self.distance_of(node) {
                return;
            }
            let clone = self.clone_node(node);
            self.nodes
                .get(clone)
                .distance
                .store(new_distance, Ordering::Relaxed);
            let next = self.new_descriptor(clone, vertex, node, clone, true);
            if self.cas_cell(word, next) {
                self.help(self.descriptors.get(next));
                return;
            }
            self.help_current();
        }

        self.help_current();
        let node = self.node_of[v].load(Ordering::Acquire);
        let slot = self.nodes.get(node);

        // Lower the key through a CAS loop so a racing relaxation can only
        // ever leave the smaller of the two values behind.
        let mut current = slot.distance.load(Ordering::Acquire);
        loop {
            if new_distance >= current {
                return;
            }
            match slot.distance.compare_exchange(
                current,
                new_distance,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => break,
                Err(observed) => current = observed,
            }
        }

        let parent = slot.parent.load(Ordering::Acquire);
        if parent == NIL {
            // Became the root between the loop above and here; the key only
            // got smaller, so heap order still holds.
            return;
        }

        // Case 2: still no smaller than the parent, structure is untouched.
        let parent_node = self.node_of[parent as usize].load(Ordering::Acquire);
        if parent_node != NIL && self.distance_of(parent_node) <= new_distance {
            return;
        }

        // Unlink from the parent's child collection, then reattach.
        self.children[parent as usize].remove(vertex);

        loop {
            let (word, descriptor) = self.load_cell();
            self.help(descriptor);
            let node = self.node_of[v].load(Ordering::Acquire);
            let root = descriptor.root.load(Ordering::Relaxed);
            if root == NIL || root == node {
                return;
            }
            let root_vertex = self.vertex_of(root);

            // Case 3: not below the current root; relink as a direct child.
            if self.distance_of(root) <= self.distance_of(node) {
                self.nodes
                    .get(node)
                    .parent
                    .store(root_vertex, Ordering::Release);
                self.children[root_vertex as usize].push(vertex);
                return;
            }

            // Case 4: the unlinked node must replace the root.
            self.nodes.get(node).parent.store(NIL, Ordering::Release);
            let clone = self.clone_node(root);
            let winner = self.merge(clone, node);
            let next = self.new_descriptor(winner, root_vertex, root, clone, true);
            if self.cas_cell(word, next) {
                self.help(self.descriptors.get(next));
                return;
            }
            self.help_current();
            self.children[v].remove(root_vertex);
        }
    }

    /// Extracts the minimum. Single-writer: callers must guarantee that no
    /// insert or decrease-key is concurrently in flight.
    pub fn delete_min(&self) -> Option<(VertexId, Distance)> {
        let (word, descriptor) = self.load_cell();
        // Pay any debt left by the last concurrent phase before reading.
        self.help(descriptor);
        let root = descriptor.root.load(Ordering::Relaxed);
        if root == NIL {
            return None;
        }

        let vertex = self.vertex_of(root);
        let distance = self.distance_of(root);
        self.in_heap[vertex as usize].store(false, Ordering::Release);
        self.len.fetch_sub(1, Ordering::Relaxed);

        let new_root = self.consolidate(vertex);
        let quiescent = self.new_descriptor(new_root, NIL, NIL, NIL, false);
        let (_, stamp) = unpack(word);
        self.cell
            .store(pack(quiescent, stamp.wrapping_add(1)), Ordering::Release);

        Some((vertex, distance))
    }

    /// Two-pass pairing consolidation of the deleted root's children: pair
    /// and meld left to right, then fold the winners back into one root.
    fn consolidate(&self, deleted: u32) -> u32 {
        let mut kids: Vec<u32> = Vec::new();
        for child_vertex in self.children[deleted as usize].iter_live() {
            if !self.in_heap[child_vertex as usize].load(Ordering::Acquire) {
                continue;
            }
            let node = self.node_of[child_vertex as usize].load(Ordering::Acquire);
            if node == NIL {
                continue;
            }
            // Entries superseded by a later relink (or raced into the list
            // twice) no longer point back at the deleted root; skip them.
            // Clearing the parent as we take a child also makes a duplicate
            // entry for the same vertex fail this check.
            let slot = self.nodes.get(node);
            if slot.parent.load(Ordering::Acquire) != deleted {
                continue;
            }
            slot.parent.store(NIL, Ordering::Relaxed);
            kids.push(node);
        }

        if kids.is_empty() {
            return NIL;
        }

        let mut winners = Vec::with_capacity(kids.len() / 2 + 1);
        let mut i = 0;
        while i + 1 < kids.len() {
            winners.push(self.merge(kids[i], kids[i + 1]));
            i += 2;
        }
        if i < kids.len() {
            winners.push(kids[i]);
        }

        let mut root = match winners.pop() {
            Some(node) => node,
            None => return NIL,
        };
        while let Some(winner) = winners.pop() {
            root = self.merge(root, winner);
        }
        self.nodes.get(root).parent.store(NIL, Ordering::Relaxed);
        root
    }

    pub fn len(&self) -> usize {
        self.len.load(Ordering::Relaxed)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current distance of an in-heap vertex.
    pub fn distance(&self, vertex: VertexId) -> Option<Distance> {
        let v = vertex as usize;
        if v >= self.in_heap.len() || !self.in_heap[v].load(Ordering::Acquire) {
            return None;
        }
        let node = self.node_of[v].load(Ordering::Acquire);
        if node == NIL {
            return None;
        }
        Some(self.distance_of(node))
    }

    /// Quiescent structural check: every live child's distance is at least
    /// its parent's. Only meaningful while no operation is in flight.
    pub fn is_heap_ordered(&self) -> bool {
        let (_, descriptor) = self.load_cell();
        let root = descriptor.root.load(Ordering::Relaxed);
        root == NIL || self.subtree_ordered(root)
    }

    fn subtree_ordered(&self, node: u32) -> bool {
        let vertex = self.vertex_of(node);
        let distance = self.distance_of(node);
        for child_vertex in self.children[vertex as usize].iter_live() {
            if !self.in_heap[child_vertex as usize].load(Ordering::Acquire) {
                continue;
            }
            let child = self.node_of[child_vertex as usize].load(Ordering::Acquire);
            if child == NIL || self.nodes.get(child).parent.load(Ordering::Acquire) != vertex {
                continue;
            }
            if self.distance_of(child) < distance || !self.subtree_ordered(child) {
                return false;
            }
        }
        true
    }
}

impl PriorityQueue for LockFreePairingHeap {
    fn with_capacity(vertices: usize) -> Self {
        LockFreePairingHeap::with_capacity(vertices)
    }

    fn insert(&self, vertex: VertexId, distance: Distance) {
        LockFreePairingHeap::insert(self, vertex, distance)
    }

    fn decrease_key(&self, vertex: VertexId, distance: Distance) {
        LockFreePairingHeap::decrease_key(self, vertex, distance)
    }

    fn delete_min(&self) -> Option<(VertexId, Distance)> {
        LockFreePairingHeap::delete_min(self)
    }

    fn len(&self) -> usize {
        LockFreePairingHeap::len(self)
    }
}
