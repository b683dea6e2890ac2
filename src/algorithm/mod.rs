pub mod parallel;
pub mod serial;
pub mod traits;

pub use parallel::ParallelDijkstra;
pub use serial::SerialDijkstra;
pub use traits::{ShortestPathAlgorithm, ShortestPathResult};

use crate::graph::FrozenGraph;
use crate::{Result, VertexId};

/// Computes single-source shortest paths with `workers` relaxation threads.
///
/// Unreached vertices carry [`crate::INFINITE`] in the result rather than
/// being absent.
pub fn run_sssp(graph: &FrozenGraph, source: VertexId, workers: usize) -> Result<ShortestPathResult> {
    ParallelDijkstra::new(workers)?.run(graph, source)
}
