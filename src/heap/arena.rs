use std::sync::atomic::{AtomicPtr, AtomicU32, Ordering};

/// Sentinel index: no slot / no vertex.
pub(crate) const NIL: u32 = u32::MAX;

/// First bucket holds `1 << BASE_SHIFT` slots; each subsequent bucket doubles.
const BASE_SHIFT: usize = 10;
const MAX_BUCKETS: usize = 21;

/// Append-only arena of default-initialized slots.
///
/// Allocation is a fetch-add plus a one-time CAS to install the backing
/// bucket, so any number of threads may allocate concurrently. Indices are
/// never reused: within one arena an index names one slot forever, which
/// makes index comparison an exact identity test (no ABA, no generation tag
/// needed). Slots retired by the heap simply stay in place until the arena
/// drops.
pub(crate) struct Arena<T> {
    buckets: [AtomicPtr<T>; MAX_BUCKETS],
    next: AtomicU32,
}

fn bucket_len(bucket: usize) -> usize {
    1 << (BASE_SHIFT + bucket)
}

fn locate(index: u32) -> (usize, usize) {
    let adjusted = index as u64 + (1 << BASE_SHIFT);
    let bucket = (63 - adjusted.leading_zeros() as usize) - BASE_SHIFT;
    let offset = (adjusted as usize) - bucket_len(bucket);
    (bucket, offset)
}

impl<T: Default> Arena<T> {
    /// Creates an arena with buckets pre-installed for at least `capacity`
    /// slots, so the common allocations never contend on bucket setup.
    pub fn with_capacity(capacity: usize) -> Self {
        let arena = Arena {
            buckets: std::array::from_fn(|_| AtomicPtr::new(std::ptr::null_mut())),
            next: AtomicU32::new(0),
        };
        let mut covered = 0;
        let mut bucket = 0;
        while covered < capacity.max(1) && bucket < MAX_BUCKETS {
            arena.ensure_bucket(bucket);
            covered += bucket_len(bucket);
            bucket += 1;
        }
        arena
    }

    /// Allocates one default-initialized slot and returns its index.
    pub fn alloc(&self) -> u32 {
        let index = self.next.fetch_add(1, Ordering::Relaxed);
        let (bucket, _) = locate(index);
        assert!(bucket < MAX_BUCKETS, "arena capacity exhausted");
        self.ensure_bucket(bucket);
        index
    }

    fn ensure_bucket(&self, bucket: usize) {
        if !self.buckets[bucket].load(Ordering::Acquire).is_null() {
            return;
        }
        let boxed: Box<[T]> = (0..bucket_len(bucket)).map(|_| T::default()).collect();
        let ptr = Box::into_raw(boxed) as *mut T;
        if self.buckets[bucket]
            .compare_exchange(
                std::ptr::null_mut(),
                ptr,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_err()
        {
            // Another thread installed the bucket first.
            unsafe {
                drop(Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                    ptr,
                    bucket_len(bucket),
                )));
            }
        }
    }
}

impl<T> Arena<T> {
    /// Borrows the slot at `index`.
    ///
    /// The index must come from `alloc` on this arena; publication of the
    /// index through any release/acquire edge also publishes the bucket.
    pub fn get(&self, index: u32) -> &T {
        let (bucket, offset) = locate(index);
        let ptr = self.buckets[bucket].load(Ordering::Acquire);
        debug_assert!(!ptr.is_null());
        unsafe { &*ptr.add(offset) }
    }
}

impl<T> Drop for Arena<T> {
    fn drop(&mut self) {
        for (bucket, slot) in self.buckets.iter().enumerate() {
            let ptr = slot.load(Ordering::Acquire);
            if !ptr.is_null() {
                unsafe {
                    drop(Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                        ptr,
                        bucket_len(bucket),
                    )));
                }
            }
        }
    }
}

unsafe impl<T: Send + Sync> Send for Arena<T> {}
unsafe impl<T: Send + Sync> Sync for Arena<T> {}
