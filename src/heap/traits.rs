use crate::{Distance, VertexId};

/// A decrease-key priority queue over integer distances.
///
/// This is the seam between the orchestrator and the queue backend: any
/// conforming implementation can be substituted without touching the
/// algorithm. Vertex ids must be dense and below the constructed capacity,
/// and each vertex may be inserted at most once per run.
///
/// Concurrency contract (the orchestrator enforces it via its round
/// barrier): `insert` and `decrease_key` may be called from many threads at
/// once, but `delete_min` requires that no other operation is in flight.
pub trait PriorityQueue: Send + Sync {
    /// Creates an empty queue able to hold vertices `0..vertices`.
    fn with_capacity(vertices: usize) -> Self
    where
        Self: Sized;

    /// Inserts a vertex with its initial distance.
    fn insert(&self, vertex: VertexId, distance: Distance);

    /// Lowers a vertex's distance. A no-op when the vertex has already been
    /// extracted or when `distance` is not strictly smaller than the current
    /// value, which makes stale and duplicate relaxations harmless.
    fn decrease_key(&self, vertex: VertexId, distance: Distance);

    /// Extracts the vertex with the globally smallest distance.
    ///
    /// Single-writer: the caller must guarantee no concurrent queue
    /// operation of any kind.
    fn delete_min(&self) -> Option<(VertexId, Distance)>;

    /// Number of vertices currently in the queue.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
