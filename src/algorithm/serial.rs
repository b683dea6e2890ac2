use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::algorithm::traits::{ShortestPathAlgorithm, ShortestPathResult};
use crate::graph::FrozenGraph;
use crate::{Error, Result, VertexId, INFINITE};

/// Classic single-threaded Dijkstra, used as the parity oracle for the
/// parallel implementation.
#[derive(Debug, Default)]
pub struct SerialDijkstra;

impl SerialDijkstra {
    pub fn new() -> Self {
        SerialDijkstra
    }
}

impl ShortestPathAlgorithm for SerialDijkstra {
    fn name(&self) -> &'static str {
        "serial-dijkstra"
    }

    fn shortest_paths(&self, graph: &FrozenGraph, source: VertexId) -> Result<ShortestPathResult> {
        let n = graph.vertex_count();
        if source as usize >= n {
            return Err(Error::SourceNotFound);
        }

        let mut distances = vec![INFINITE; n];
        distances[source as usize] = 0;

        let mut queue = BinaryHeap::new();
        queue.push(Reverse((0, source)));

        while let Some(Reverse((distance, u))) = queue.pop() {
            // Skip entries superseded by a shorter path found later.
            if distance > distances[u as usize] {
                continue;
            }
            for edge in graph.outgoing(u) {
                let candidate = distance.saturating_add(edge.weight);
                if candidate < distances[edge.target as usize] {
                    distances[edge.target as usize] = candidate;
                    queue.push(Reverse((candidate, edge.target)));
                }
            }
        }

        Ok(ShortestPathResult { source, distances })
    }
}
