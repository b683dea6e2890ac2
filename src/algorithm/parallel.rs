use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{debug, trace};

use crate::algorithm::traits::{ShortestPathAlgorithm, ShortestPathResult};
use crate::graph::FrozenGraph;
use crate::heap::{LockFreePairingHeap, PriorityQueue};
use crate::{Distance, Error, Result, VertexId, INFINITE};

enum Command {
    Round { vertex: VertexId, distance: Distance },
    Shutdown,
}

/// Dijkstra with parallel edge relaxation.
///
/// One orchestrator thread repeatedly extracts the global minimum; a fixed
/// pool of long-lived workers relaxes the extracted vertex's outgoing edges
/// in disjoint strided slices, calling `decrease_key` back into the shared
/// queue. A two-phase rendezvous (round broadcast, then one completion per
/// worker) guarantees that every relaxation of round `k` finishes before the
/// round `k + 1` extraction, which is what keeps the greedy extraction
/// correct. The queue is therefore only ever in one of two modes: many
/// writers and no extraction, or one extraction and no writers.
#[derive(Debug)]
pub struct ParallelDijkstra {
    workers: usize,
}

impl ParallelDijkstra {
    /// Creates an instance with a pool of `workers` relaxation threads.
    pub fn new(workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(Error::NoWorkers);
        }
        Ok(ParallelDijkstra { workers })
    }

    /// Runs on the lock-free pairing heap backend.
    pub fn run(&self, graph: &FrozenGraph, source: VertexId) -> Result<ShortestPathResult> {
        self.run_with_queue::<LockFreePairingHeap>(graph, source)
    }

    /// Runs on any conforming queue backend.
    pub fn run_with_queue<Q: PriorityQueue>(
        &self,
        graph: &FrozenGraph,
        source: VertexId,
    ) -> Result<ShortestPathResult> {
        let n = graph.vertex_count();
        if source as usize >= n {
            return Err(Error::SourceNotFound);
        }
        let workers = self.workers;
        debug!(
            "parallel dijkstra: {} vertices, {} edges, {} workers",
            n,
            graph.edge_count(),
            workers
        );

        // Seed the queue before any worker exists: one node per vertex, the
        // source at zero, everything else at the infinite sentinel.
        let queue = Q::with_capacity(n);
        queue.insert(source, 0);
        for vertex in 0..n as VertexId {
            if vertex != source {
                queue.insert(vertex, INFINITE);
            }
        }

        let abort = AtomicBool::new(false);
        let mut distances = vec![INFINITE; n];

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            thread::scope(|scope| {
                let mut lanes = Vec::with_capacity(workers);
                for index in 0..workers {
                    let (round_tx, round_rx) = bounded::<Command>(1);
                    let (done_tx, done_rx) = bounded::<()>(1);
                    let queue = &queue;
                    let abort = &abort;
                    scope.spawn(move || {
                        worker_loop(index, workers, graph, queue, abort, round_rx, done_tx)
                    });
                    lanes.push((round_tx, done_rx));
                }

                let run = (|| -> Result<()> {
                    while let Some((vertex, distance)) = queue.delete_min() {
                        trace!("finalized vertex {} at distance {}", vertex, distance);
                        debug_assert_eq!(
                            distances[vertex as usize],
                            INFINITE,
                            "finalized distance written twice"
                        );
                        distances[vertex as usize] = distance;

                        // Release the round, then block until every worker
                        // reports back. A closed lane means its worker died.
                        for (round_tx, _) in &lanes {
                            if round_tx.send(Command::Round { vertex, distance }).is_err() {
                                return Err(Error::WorkerPanicked);
                            }
                        }
                        for (_, done_rx) in &lanes {
                            if done_rx.recv().is_err() {
                                return Err(Error::WorkerPanicked);
                            }
                        }
                    }
                    Ok(())
                })();

                // Kill every worker, on success and on failure alike, so no
                // sibling stays blocked on the rendezvous.
                abort.store(true, Ordering::Release);
                for (round_tx, _) in &lanes {
                    let _ = round_tx.send(Command::Shutdown);
                }
                run
            })
        }));

        match outcome {
            Ok(run) => run?,
            Err(_) => return Err(Error::WorkerPanicked),
        }

        debug!(
            "parallel dijkstra finished: {} reachable vertices",
            distances.iter().filter(|&&d| d != INFINITE).count()
        );
        Ok(ShortestPathResult { source, distances })
    }
}

impl ShortestPathAlgorithm for ParallelDijkstra {
    fn name(&self) -> &'static str {
        "parallel-dijkstra"
    }

    fn shortest_paths(&self, graph: &FrozenGraph, source: VertexId) -> Result<ShortestPathResult> {
        self.run(graph, source)
    }
}

fn worker_loop<Q: PriorityQueue>(
    index: usize,
    stride: usize,
    graph: &FrozenGraph,
    queue: &Q,
    abort: &AtomicBool,
    rounds: Receiver<Command>,
    done: Sender<()>,
) {
    // Idle between rounds, blocked on the round-start signal.
    while let Ok(Command::Round { vertex, distance }) = rounds.recv() {
        // Active: relax edge indices index, index + stride, ... of the
        // finalized vertex. The partition is disjoint across workers, so
        // only parallel edges can make two workers race on one target, and
        // the queue's monotonicity guard makes that race benign.
        let edges = graph.outgoing(vertex);
        let mut pos = index;
        while pos < edges.len() {
            if abort.load(Ordering::Acquire) {
                return;
            }
            let edge = edges[pos];
            queue.decrease_key(edge.target, distance.saturating_add(edge.weight));
            pos += stride;
        }
        // Report round completion; a gone orchestrator ends the run.
        if done.send(()).is_err() {
            return;
        }
    }
    // Shutdown command or disconnected channel: terminated.
}
