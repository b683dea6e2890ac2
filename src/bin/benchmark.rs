use std::time::{Duration, Instant};

use lockfree_sssp::graph::generators::random_graph;
use lockfree_sssp::{run_sssp, SerialDijkstra, ShortestPathAlgorithm};

const MAX_WEIGHT: u64 = 100;
const SEED: u64 = 0;

fn usage() -> ! {
    eprintln!("usage: benchmark [vertices] [density] [reps] [workers...]");
    eprintln!("example: benchmark 5000 0.05 5 1 2 4 8");
    std::process::exit(2);
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let vertices: usize = args
        .next()
        .map(|a| a.parse().unwrap_or_else(|_| usage()))
        .unwrap_or(5000);
    let density: f64 = args
        .next()
        .map(|a| a.parse().unwrap_or_else(|_| usage()))
        .unwrap_or(0.05);
    let reps: usize = args
        .next()
        .map(|a| a.parse().unwrap_or_else(|_| usage()))
        .unwrap_or(5);
    let mut worker_counts: Vec<usize> = args.map(|a| a.parse().unwrap_or_else(|_| usage())).collect();
    if worker_counts.is_empty() {
        worker_counts = vec![1, 2, 4, 8];
    }

    println!(
        "Generating random graph: {} vertices, density {}, max weight {}",
        vertices, density, MAX_WEIGHT
    );
    let graph = random_graph(vertices, density, MAX_WEIGHT, SEED);
    println!("Graph has {} edges", graph.edge_count());

    // Serial baseline.
    let serial = SerialDijkstra::new();
    let mut serial_total = Duration::ZERO;
    let mut reachable = 0;
    for _ in 0..reps {
        let start = Instant::now();
        let result = serial.shortest_paths(&graph, 0).expect("serial run failed");
        serial_total += start.elapsed();
        reachable = result.reachable_count();
    }
    let serial_avg = serial_total / reps as u32;
    println!(
        "serial:              avg {:?} over {} reps ({} reachable)",
        serial_avg, reps, reachable
    );

    // Parallel runs across worker counts.
    for &workers in &worker_counts {
        let mut total = Duration::ZERO;
        for _ in 0..reps {
            let start = Instant::now();
            let result = run_sssp(&graph, 0, workers).expect("parallel run failed");
            total += start.elapsed();
            assert_eq!(result.reachable_count(), reachable);
        }
        let avg = total / reps as u32;
        println!(
            "parallel ({:2} workers): avg {:?} over {} reps, {:.2}x serial",
            workers,
            avg,
            reps,
            avg.as_secs_f64() / serial_avg.as_secs_f64().max(f64::EPSILON)
        );
    }
}
