use crate::graph::frozen::{Edge, FrozenGraph};
use crate::{Error, Result, VertexId};

/// Construction-time companion of [`FrozenGraph`].
///
/// Edges may only be added before `freeze()`; the frozen representation is
/// immutable and safe to read from any number of threads.
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    adjacency: Vec<Vec<Edge>>,
}

impl GraphBuilder {
    /// Creates a builder for a graph with `vertex_count` vertices, ids
    /// `0..vertex_count`.
    pub fn new(vertex_count: usize) -> Self {
        GraphBuilder {
            adjacency: vec![Vec::new(); vertex_count],
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Adds a directed edge `u -> v`. Parallel edges and self-loops are kept
    /// as given; weights are assumed non-negative and are not range-checked.
    pub fn add_edge(&mut self, u: VertexId, v: VertexId, weight: u64) -> Result<()> {
        if u as usize >= self.adjacency.len() || v as usize >= self.adjacency.len() {
            return Err(Error::InvalidEdge(u, v));
        }
        self.adjacency[u as usize].push(Edge { target: v, weight });
        Ok(())
    }

    /// Adds `u -> v` and `v -> u` with the same weight.
    pub fn add_undirected_edge(&mut self, u: VertexId, v: VertexId, weight: u64) -> Result<()> {
        self.add_edge(u, v, weight)?;
        self.add_edge(v, u, weight)
    }

    /// Converts the per-vertex edge vectors into the immutable CSR layout.
    ///
    /// Must complete before any reader thread starts; handing the returned
    /// graph to the spawned threads publishes it.
    pub fn freeze(self) -> FrozenGraph {
        let graph = FrozenGraph::from_adjacency(self.adjacency);
        log::debug!(
            "froze graph: {} vertices, {} edges",
            graph.vertex_count(),
            graph.edge_count()
        );
        graph
    }
}
