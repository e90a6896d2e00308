//! Worker pipeline: synthesizes polar tiles on a thread pool using
//! style-snapshot tasks and channels for result delivery.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread::JoinHandle;
use std::time::Duration;

use polecap_geo::TileAddress;

use crate::{CapError, PolarTile, PolarTileSource, StyleBundle};

/// A self-contained synthesis task that can run on any thread.
///
/// Carries the style snapshot taken at submit time, so a style swap while the
/// task is queued does not affect it.
pub struct CapTask {
    /// Tile to synthesize.
    pub address: TileAddress,
    /// Style in effect when the task was created.
    pub style: Arc<StyleBundle>,
    /// Caller-defined generation, echoed back in the result.
    pub generation: u64,
}

/// The result of a completed synthesis task.
pub struct CapResult {
    pub address: TileAddress,
    /// `Ok(None)` when the tile produced no cap surface.
    pub outcome: Result<Option<PolarTile>, CapError>,
    pub generation: u64,
}

/// Polar tile synthesis backed by a thread pool.
///
/// Tasks go in through [`submit`](Self::submit) and results come back through
/// [`drain_results`](Self::drain_results) or
/// [`recv_result`](Self::recv_result). Submission never blocks: once `budget`
/// tasks are in flight it is refused.
pub struct CapPipeline {
    task_sender: Option<crossbeam_channel::Sender<CapTask>>,
    result_receiver: crossbeam_channel::Receiver<CapResult>,
    worker_handles: Vec<JoinHandle<()>>,
    /// Maximum number of tasks in flight.
    budget: usize,
    in_flight: Arc<AtomicUsize>,
    source: Arc<PolarTileSource>,
}

impl CapPipeline {
    /// Spawn `worker_count` workers sharing `source`, accepting at most
    /// `budget` tasks in flight.
    pub fn new(worker_count: usize, budget: usize, source: Arc<PolarTileSource>) -> Self {
        let (task_tx, task_rx) = crossbeam_channel::bounded(budget);
        let (result_tx, result_rx) = crossbeam_channel::unbounded();
        let in_flight = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::with_capacity(worker_count);
        for _ in 0..worker_count {
            let rx: crossbeam_channel::Receiver<CapTask> = task_rx.clone();
            let tx = result_tx.clone();
            let source = Arc::clone(&source);
            let flight = Arc::clone(&in_flight);

            handles.push(std::thread::spawn(move || {
                while let Ok(task) = rx.recv() {
                    let _slot = InFlightSlot(&flight);
                    let outcome = source.generate_with(task.address, &task.style);
                    if let Err(err) = &outcome {
                        tracing::warn!("Polar tile {} failed: {err}", task.address);
                    }

                    let _ = tx.send(CapResult {
                        address: task.address,
                        outcome,
                        generation: task.generation,
                    });
                }
            }));
        }
        tracing::debug!("Cap pipeline started with {worker_count} workers, budget {budget}");

        Self {
            task_sender: Some(task_tx),
            result_receiver: result_rx,
            worker_handles: handles,
            budget,
            in_flight,
            source,
        }
    }

    /// Submit a tile with the source's current style. Returns `false` if the
    /// budget is exhausted or the pipeline has been shut down.
    pub fn submit(&self, address: TileAddress, generation: u64) -> bool {
        self.submit_task(CapTask {
            address,
            style: self.source.style(),
            generation,
        })
    }

    /// Submit a prepared task. Returns `false` if the budget is exhausted or
    /// the pipeline has been shut down.
    pub fn submit_task(&self, task: CapTask) -> bool {
        let Some(sender) = &self.task_sender else {
            return false;
        };
        let reserved = self
            .in_flight
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                (n < self.budget).then_some(n + 1)
            })
            .is_ok();
        if !reserved {
            return false;
        }
        if sender.try_send(task).is_err() {
            self.in_flight.fetch_sub(1, Ordering::AcqRel);
            return false;
        }
        true
    }

    /// Drain all completed results without blocking.
    pub fn drain_results(&self) -> Vec<CapResult> {
        let mut results = Vec::new();
        while let Ok(result) = self.result_receiver.try_recv() {
            results.push(result);
        }
        results
    }

    /// Wait up to `timeout` for the next completed result.
    pub fn recv_result(&self, timeout: Duration) -> Option<CapResult> {
        self.result_receiver.recv_timeout(timeout).ok()
    }

    /// Number of tasks currently queued or being processed.
    pub fn in_flight_count(&self) -> usize {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Whether any worker thread is still running.
    pub fn has_workers(&self) -> bool {
        self.worker_handles.iter().any(|handle| !handle.is_finished())
    }

    pub fn source(&self) -> &Arc<PolarTileSource> {
        &self.source
    }

    /// Close the task channel and join all workers.
    pub fn shutdown(&mut self) {
        self.task_sender.take();
        for handle in self.worker_handles.drain(..) {
            let _ = handle.join();
        }
    }
}

/// Releases one unit of the in-flight budget when dropped, including when a
/// worker unwinds mid-task.
struct InFlightSlot<'a>(&'a AtomicUsize);

impl Drop for InFlightSlot<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

impl Drop for CapPipeline {
    fn drop(&mut self) {
        self.shutdown();
    }
}
