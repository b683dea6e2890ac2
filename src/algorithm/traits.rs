use crate::graph::FrozenGraph;
use crate::{Distance, Result, VertexId, INFINITE};

/// Result of a shortest path computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPathResult {
    /// Source vertex ID
    pub source: VertexId,

    /// Distance from the source to each vertex; `INFINITE` when unreached.
    pub distances: Vec<Distance>,
}

impl ShortestPathResult {
    pub fn distance(&self, vertex: VertexId) -> Distance {
        self.distances[vertex as usize]
    }

    pub fn is_reachable(&self, vertex: VertexId) -> bool {
        self.distance(vertex) != INFINITE
    }

    pub fn reachable_count(&self) -> usize {
        self.distances.iter().filter(|&&d| d != INFINITE).count()
    }
}

/// Trait for shortest path algorithms over a frozen graph.
pub trait ShortestPathAlgorithm {
    /// Compute shortest paths from a source vertex to all other vertices
    fn shortest_paths(&self, graph: &FrozenGraph, source: VertexId) -> Result<ShortestPathResult>;

    /// Get the name of the algorithm
    fn name(&self) -> &'static str;
}
