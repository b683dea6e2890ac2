use crate::graph::builder::GraphBuilder;
use crate::{Result, VertexId};

/// A single outgoing edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub target: VertexId,
    pub weight: u64,
}

/// An immutable weighted digraph in CSR form.
///
/// Built once via [`GraphBuilder::freeze`] and read concurrently thereafter;
/// no mutation is possible after construction.
#[derive(Debug, Clone)]
pub struct FrozenGraph {
    /// `offsets[v]..offsets[v + 1]` indexes `edges` for vertex `v`.
    offsets: Vec<usize>,
    edges: Vec<Edge>,
}

impl FrozenGraph {
    /// Builds and freezes a graph from an edge list in one step.
    pub fn from_edges(vertex_count: usize, edges: &[(VertexId, VertexId, u64)]) -> Result<Self> {
        let mut builder = GraphBuilder::new(vertex_count);
        for &(u, v, w) in edges {
            builder.add_edge(u, v, w)?;
        }
        Ok(builder.freeze())
    }

    pub(crate) fn from_adjacency(adjacency: Vec<Vec<Edge>>) -> Self {
        let mut offsets = Vec::with_capacity(adjacency.len() + 1);
        let mut edges = Vec::with_capacity(adjacency.iter().map(Vec::len).sum());
        offsets.push(0);
        for list in adjacency {
            edges.extend_from_slice(&list);
            offsets.push(edges.len());
        }
        FrozenGraph { offsets, edges }
    }

    pub fn vertex_count(&self) -> usize {
        self.offsets.len() - 1
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// The outgoing edges of `v`, in insertion order.
    pub fn outgoing(&self, v: VertexId) -> &[Edge] {
        let v = v as usize;
        &self.edges[self.offsets[v]..self.offsets[v + 1]]
    }
}
