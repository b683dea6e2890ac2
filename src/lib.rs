//! Parallel single-source shortest paths over a lock-free pairing heap.
//!
//! The heap supports concurrent `insert` and `decrease_key` from many worker
//! threads through a CAS-based root-replacement protocol with operation
//! helping, while a single orchestrator thread extracts minima one round at a
//! time. Each round, the orchestrator finalizes one vertex and releases the
//! worker pool to relax that vertex's outgoing edges in disjoint strided
//! slices; the heap's monotonicity guard makes racing relaxations of the same
//! target harmless.
//!
//! The queue backend is a trait, so the orchestrator also runs unchanged on
//! the sequential binary-heap baseline.

pub mod algorithm;
pub mod graph;
pub mod heap;

pub use algorithm::{
    parallel::ParallelDijkstra, run_sssp, serial::SerialDijkstra, ShortestPathAlgorithm,
    ShortestPathResult,
};
pub use graph::{FrozenGraph, GraphBuilder};
pub use heap::{LockFreePairingHeap, PriorityQueue, SequentialBinaryHeap};

/// Dense vertex identifier.
pub type VertexId = u32;

/// Tentative or finalized path distance.
pub type Distance = u64;

/// Sentinel distance for vertices not (yet) reached from the source.
pub const INFINITE: Distance = Distance::MAX;

/// Error types for the library
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Invalid edge: from {0} to {1}")]
    InvalidEdge(VertexId, VertexId),

    #[error("Source vertex not found in graph")]
    SourceNotFound,

    #[error("Worker count must be at least 1")]
    NoWorkers,

    #[error("A worker thread panicked during edge relaxation")]
    WorkerPanicked,
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;
