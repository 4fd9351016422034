//! Concurrency load harness.
//!
//! Spawns independent workers against shared strategy instances. Each
//! worker runs a fixed number of cycles; on each cycle it draws a uniform
//! value in [0,1) and performs its bound action only when the draw falls
//! below its configured probability. Workers never coordinate with each
//! other - the point is to stress the strategies' concurrent behavior -
//! and signal completion through a shared barrier the orchestrator waits
//! on.
//!
//! There is no cancellation: a worker always runs its full cycle count.
//! Action failures are counted, not propagated, so a mixed workload keeps
//! running when one operation is rejected.

use rand::Rng;
use roster_core::RosterResult;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Barrier;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Per-worker parameters.
#[derive(Debug, Clone, Copy)]
pub struct WorkerConfig {
    /// Number of cycles to run.
    pub cycles: u32,
    /// Probability in [0,1] that a cycle performs the action.
    pub probability: f64,
}

impl WorkerConfig {
    /// A worker that performs its action on every cycle.
    pub fn every_cycle(cycles: u32) -> Self {
        Self {
            cycles,
            probability: 1.0,
        }
    }
}

/// What a single worker accomplished.
#[derive(Debug, Clone)]
pub struct WorkerReport {
    /// Worker name, for logs and diagnostics.
    pub name: String,
    /// Actions performed (cycles whose draw fell below the probability).
    pub operations: u64,
    /// Performed actions that returned an error.
    pub failures: u64,
    /// Time spent inside the action across all performed cycles.
    pub elapsed: Duration,
}

impl WorkerReport {
    /// Successful operations per second of action time.
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            (self.operations - self.failures) as f64 / secs
        }
    }
}

/// Aggregate over every worker in a run.
#[derive(Debug, Clone)]
pub struct LoadSummary {
    /// Actions performed across all workers.
    pub total_operations: u64,
    /// Failed actions across all workers.
    pub total_failures: u64,
    /// Wall time between harness start and the completion barrier.
    pub wall_time: Duration,
}

/// Orchestrates a fixed-size set of probabilistic workers.
///
/// Construct with the number of workers the run will hold, `spawn` each
/// worker, then `wait` for the shared barrier and collect the reports.
pub struct LoadHarness {
    barrier: Arc<Barrier>,
    capacity: usize,
    handles: Vec<JoinHandle<WorkerReport>>,
    started: Instant,
}

impl LoadHarness {
    /// Create a harness for exactly `worker_count` workers. The barrier
    /// counts the orchestrator as one extra party.
    pub fn new(worker_count: usize) -> Self {
        Self {
            barrier: Arc::new(Barrier::new(worker_count + 1)),
            capacity: worker_count,
            handles: Vec::with_capacity(worker_count),
            started: Instant::now(),
        }
    }

    /// Spawn one worker bound to an action.
    ///
    /// # Panics
    ///
    /// Panics when more workers are spawned than the harness was sized
    /// for; the completion barrier is sized at construction and an extra
    /// worker could never pass it.
    pub fn spawn<F, Fut>(&mut self, name: impl Into<String>, config: WorkerConfig, action: F)
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = RosterResult<()>> + Send + 'static,
    {
        assert!(
            self.handles.len() < self.capacity,
            "harness sized for {} workers",
            self.capacity
        );

        let barrier = Arc::clone(&self.barrier);
        let name = name.into();
        let handle = tokio::spawn(async move {
            let mut operations = 0u64;
            let mut failures = 0u64;
            let mut elapsed = Duration::ZERO;

            for _ in 0..config.cycles {
                // The rng handle must not live across the await below.
                let draw = rand::rng().random::<f64>();
                if draw < config.probability {
                    let start = Instant::now();
                    let result = action().await;
                    elapsed += start.elapsed();
                    operations += 1;
                    if result.is_err() {
                        failures += 1;
                    }
                }
            }

            info!(
                worker = %name,
                operations,
                failures,
                elapsed_ms = elapsed.as_millis() as u64,
                "worker finished"
            );
            barrier.wait().await;
            WorkerReport {
                name,
                operations,
                failures,
                elapsed,
            }
        });
        self.handles.push(handle);
    }

    /// Wait for every worker to reach the completion barrier, then
    /// collect per-worker reports and the run summary.
    pub async fn wait(self) -> (Vec<WorkerReport>, LoadSummary) {
        self.barrier.wait().await;
        let wall_time = self.started.elapsed();

        let mut reports = Vec::with_capacity(self.handles.len());
        for handle in self.handles {
            match handle.await {
                Ok(report) => reports.push(report),
                // Only reachable when an action panicked; the run's
                // remaining reports are still worth returning.
                Err(err) => error!(error = %err, "load worker task did not complete"),
            }
        }

        let summary = LoadSummary {
            total_operations: reports.iter().map(|r| r.operations).sum(),
            total_failures: reports.iter().map(|r| r.failures).sum(),
            wall_time,
        };
        (reports, summary)
    }
}
