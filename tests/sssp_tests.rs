use lockfree_sssp::graph::generators::random_graph;
use lockfree_sssp::{
    run_sssp, Error, FrozenGraph, GraphBuilder, ParallelDijkstra, SequentialBinaryHeap,
    SerialDijkstra, ShortestPathAlgorithm, INFINITE,
};

/// The reference scenario: 5 vertices, source 0, expected distances
/// {0:0, 1:7, 2:3, 3:9, 4:10}.
fn scenario_graph() -> FrozenGraph {
    FrozenGraph::from_edges(
        5,
        &[
            (0, 1, 10),
            (0, 2, 3),
            (2, 1, 4),
            (1, 3, 2),
            (2, 3, 8),
            (3, 4, 1),
        ],
    )
    .expect("scenario edges are valid")
}

#[test]
fn scenario_distances_for_one_and_three_workers() {
    let graph = scenario_graph();
    let expected = vec![0, 7, 3, 9, 10];
    for workers in [1, 3] {
        let result = run_sssp(&graph, 0, workers).expect("run failed");
        assert_eq!(result.distances, expected, "workers = {}", workers);
    }
}

#[test]
fn scenario_matches_serial_reference() {
    let graph = scenario_graph();
    let serial = SerialDijkstra::new()
        .shortest_paths(&graph, 0)
        .expect("serial run failed");
    assert_eq!(serial.distances, vec![0, 7, 3, 9, 10]);
}

#[test]
fn singleton_graph_terminates_immediately() {
    let graph = FrozenGraph::from_edges(1, &[]).expect("empty edge list");
    let result = run_sssp(&graph, 0, 2).expect("run failed");
    assert_eq!(result.distances, vec![0]);
    assert_eq!(result.reachable_count(), 1);
}

#[test]
fn disconnected_vertices_keep_the_infinite_sentinel() {
    // 0 -> 1 is the only edge; 2 and 3 are unreachable but still present.
    let graph = FrozenGraph::from_edges(4, &[(0, 1, 4)]).expect("edges valid");
    let result = run_sssp(&graph, 0, 3).expect("run failed");
    assert_eq!(result.distances, vec![0, 4, INFINITE, INFINITE]);
    assert!(!result.is_reachable(2));
    assert_eq!(result.reachable_count(), 2);
}

#[test]
fn more_workers_than_edges_is_fine() {
    let graph = scenario_graph();
    let result = run_sssp(&graph, 0, 8).expect("run failed");
    assert_eq!(result.distances, vec![0, 7, 3, 9, 10]);
}

#[test]
fn zero_workers_is_rejected() {
    assert!(matches!(ParallelDijkstra::new(0), Err(Error::NoWorkers)));
}

#[test]
fn unknown_source_is_rejected() {
    let graph = scenario_graph();
    assert!(matches!(
        run_sssp(&graph, 99, 2),
        Err(Error::SourceNotFound)
    ));
}

#[test]
fn edge_to_unknown_vertex_fails_at_construction() {
    let mut builder = GraphBuilder::new(3);
    assert!(matches!(
        builder.add_edge(0, 7, 1),
        Err(Error::InvalidEdge(0, 7))
    ));
    assert!(matches!(
        builder.add_edge(9, 1, 1),
        Err(Error::InvalidEdge(9, 1))
    ));
    assert!(builder.add_edge(0, 2, 1).is_ok());
}

#[test]
fn undirected_edges_relax_both_directions() {
    let mut builder = GraphBuilder::new(3);
    builder.add_undirected_edge(0, 1, 2).expect("valid edge");
    builder.add_undirected_edge(1, 2, 3).expect("valid edge");
    let graph = builder.freeze();
    let from_zero = run_sssp(&graph, 0, 2).expect("run failed");
    assert_eq!(from_zero.distances, vec![0, 2, 5]);
    let from_two = run_sssp(&graph, 2, 2).expect("run failed");
    assert_eq!(from_two.distances, vec![5, 3, 0]);
}

#[test]
fn parallel_matches_serial_across_worker_counts() {
    let serial = SerialDijkstra::new();
    for seed in 1..4 {
        let graph = random_graph(200, 0.05, 100, seed);
        let reference = serial
            .shortest_paths(&graph, 0)
            .expect("serial run failed");
        for workers in [1, 2, 4, 8] {
            let result = run_sssp(&graph, 0, workers).expect("parallel run failed");
            assert_eq!(
                result.distances, reference.distances,
                "seed {} workers {}",
                seed, workers
            );
        }
    }
}

#[test]
fn sequential_backend_plugs_into_the_same_orchestrator() {
    let graph = scenario_graph();
    let result = ParallelDijkstra::new(3)
        .expect("worker count valid")
        .run_with_queue::<SequentialBinaryHeap>(&graph, 0)
        .expect("run failed");
    assert_eq!(result.distances, vec![0, 7, 3, 9, 10]);

    let serial = SerialDijkstra::new();
    let random = random_graph(150, 0.08, 100, 9);
    let reference = serial.shortest_paths(&random, 0).expect("serial run failed");
    let parallel = ParallelDijkstra::new(4)
        .expect("worker count valid")
        .run_with_queue::<SequentialBinaryHeap>(&random, 0)
        .expect("run failed");
    assert_eq!(parallel.distances, reference.distances);
}

#[test]
fn parallel_edges_and_self_loops_are_handled() {
    // Two parallel edges 0 -> 1 with different weights plus a self-loop.
    let graph = FrozenGraph::from_edges(2, &[(0, 1, 9), (0, 1, 4), (0, 0, 1)]).expect("valid");
    let result = run_sssp(&graph, 0, 2).expect("run failed");
    assert_eq!(result.distances, vec![0, 4]);
}
