use crate::graph::{FrozenGraph, GraphBuilder};
use crate::VertexId;
use rand::prelude::*;
use rand::rngs::StdRng;

/// Generates a random undirected graph with `vertices` vertices.
///
/// Every unordered vertex pair is connected with probability `density`
/// (both directions, same weight), weights drawn uniformly from
/// `1..=max_weight`. The construction is O(n^2); intended for benchmarks and
/// randomized tests, not for huge inputs.
pub fn random_graph(vertices: usize, density: f64, max_weight: u64, seed: u64) -> FrozenGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut builder = GraphBuilder::new(vertices);

    for u in 1..vertices {
        for v in 0..u {
            if rng.gen::<f64>() < density {
                let weight = rng.gen_range(1..=max_weight);
                builder
                    .add_undirected_edge(u as VertexId, v as VertexId, weight)
                    .expect("generated vertex ids are in range");
            }
        }
    }

    builder.freeze()
}
