use std::ptr;
use std::sync::atomic::{AtomicBool, AtomicPtr, AtomicU32, AtomicU64, Ordering};

use crate::heap::arena::NIL;

/// One pairing-heap node.
///
/// A vertex has exactly one live node at a time; root replacement retires a
/// node by cloning it into a fresh slot and swinging the vertex's `node_of`
/// entry, so slots are written by at most one logical owner and read through
/// atomics everywhere.
pub(crate) struct NodeSlot {
    /// Owning vertex; set once at allocation.
    pub vertex: AtomicU32,
    pub distance: AtomicU64,
    /// Parent vertex id, `NIL` at the root.
    pub parent: AtomicU32,
}

impl Default for NodeSlot {
    fn default() -> Self {
        NodeSlot {
            vertex: AtomicU32::new(NIL),
            distance: AtomicU64::new(0),
            parent: AtomicU32::new(NIL),
        }
    }
}

/// A pending root update published through the heap's shared cell.
///
/// `root` is the canonical root slot. When `vertex != NIL` the descriptor
/// carries an outstanding relocation: the vertex's `node_of` entry must be
/// CASed `from -> to`. Whichever thread touches the heap next executes it
/// (helping), and `execute` is idempotent under the pending flag.
pub(crate) struct DescriptorSlot {
    pub root: AtomicU32,
    pub pending: AtomicBool,
    pub vertex: AtomicU32,
    pub from: AtomicU32,
    pub to: AtomicU32,
}

impl Default for DescriptorSlot {
    fn default() -> Self {
        DescriptorSlot {
            root: AtomicU32::new(NIL),
            pending: AtomicBool::new(false),
            vertex: AtomicU32::new(NIL),
            from: AtomicU32::new(NIL),
            to: AtomicU32::new(NIL),
        }
    }
}

struct ChildCell {
    vertex: u32,
    removed: AtomicBool,
    /// Immutable after publication; cells are only ever pushed at the head.
    next: *mut ChildCell,
}

/// Concurrent multiset of child vertex ids.
///
/// One list exists per vertex and is shared by every node (original or
/// clone) of that vertex, mirroring how a cloned root keeps the same child
/// collection as the node it replaces. Removal is logical: cells are marked
/// and skipped, and reclaimed only when the list drops, so traversal never
/// races with a free.
pub(crate) struct ChildList {
    head: AtomicPtr<ChildCell>,
}

impl ChildList {
    pub fn new() -> Self {
        ChildList {
            head: AtomicPtr::new(ptr::null_mut()),
        }
    }

    pub fn push(&self, vertex: u32) {
        let cell = Box::into_raw(Box::new(ChildCell {
            vertex,
            removed: AtomicBool::new(false),
            next: ptr::null_mut(),
        }));
        loop {
            let head = self.head.load(Ordering::Acquire);
            unsafe { (*cell).next = head };
            if self
                .head
                .compare_exchange(head, cell, Ordering::Release, Ordering::Acquire)
                .is_ok()
            {
                return;
            }
        }
    }

    /// Marks one live occurrence of `vertex` as removed.
    pub fn remove(&self, vertex: u32) -> bool {
        let mut cur = self.head.load(Ordering::Acquire);
        while !cur.is_null() {
            let cell = unsafe { &*cur };
            if cell.vertex == vertex
                && cell
                    .removed
                    .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                    .is_ok()
            {
                return true;
            }
            cur = cell.next;
        }
        false
    }

    /// Iterates the vertices not marked removed, newest first.
    pub fn iter_live(&self) -> impl Iterator<Item = u32> + '_ {
        let mut cur = self.head.load(Ordering::Acquire);
        std::iter::from_fn(move || {
            while !cur.is_null() {
                let cell = unsafe { &*cur };
                cur = cell.next;
                if !cell.removed.load(Ordering::Acquire) {
                    return Some(cell.vertex);
                }
            }
            None
        })
    }
}

impl Drop for ChildList {
    fn drop(&mut self) {
        let mut cur = *self.head.get_mut();
        while !cur.is_null() {
            let cell = unsafe { Box::from_raw(cur) };
            cur = cell.next;
        }
    }
}

unsafe impl Send for ChildList {}
unsafe impl Sync for ChildList {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_remove_iter() {
        let list = ChildList::new();
        list.push(1);
        list.push(2);
        list.push(3);
        assert!(list.remove(2));
        assert!(!list.remove(2));
        let live: Vec<u32> = list.iter_live().collect();
        assert_eq!(live, vec![3, 1]);
    }

    #[test]
    fn readd_after_remove_is_live_again() {
        let list = ChildList::new();
        list.push(5);
        assert!(list.remove(5));
        list.push(5);
        assert_eq!(list.iter_live().collect::<Vec<_>>(), vec![5]);
    }
}
