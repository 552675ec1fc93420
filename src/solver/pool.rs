//! Fixed fan-out worker pool with an explicit return channel
//!
//! # Protocol
//!
//! ```text
//!  coordinator                      workers (one per index)
//!  ───────────                      ───────────────────────
//!  spawn unit 0 ─────────────────▶  job(0) ─┐
//!  spawn unit 1 ─────────────────▶  job(1) ─┤  Ok(WorkerResult { index, value })
//!  ...                                       │  or Err(WorkerFailure { index, reason })
//!  spawn unit n-1 ───────────────▶  job(n-1)─┤
//!  drop own sender                           │
//!                                            ▼
//!  aggregation barrier ◀──────────── mpsc channel
//!    slot[index] = value (write-once)
//!    stop when every index settled, every sender dropped, or deadline passed
//! ```
//!
//! Every unit sends exactly one message. A panic inside the job is caught and
//! turned into a [`WorkerFailure`], so a crashing worker is reported rather than
//! silently leaving its slot empty. A unit that dies without sending is still
//! detected: once all senders are gone the barrier stops waiting and lists the
//! unfilled indices.
//!
//! The barrier returns either every value, in index order, or an
//! [`AggregationReport`]. A partially filled vector never leaves this module.
//!
//! # Abandonment
//!
//! When the barrier stops early it raises a shared cancellation flag. Units
//! that have not started their job yet return without computing. Jobs
//! dispatched through [`FanOut::run_cancellable`] see the flag and can stop
//! mid-computation; plain [`FanOut::run`] jobs run to completion. Either way a
//! late send fails quietly because the receiver is gone, and the barrier logs
//! how many units were still running when it gave up. Each unit's private data
//! is dropped when the unit returns.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::solver::error::{AggregationReport, FailureReason, WorkerFailure};
use crate::solver::traits::{SolverConfiguration, WorkerBackend};

/// Value computed by one worker for one index
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkerResult {
    pub index: usize,
    pub value: f64,
}

type WorkerMessage = Result<WorkerResult, WorkerFailure>;

// =================================================================================================
// Fan-out
// =================================================================================================

/// Runs one job per index and gathers the results
///
/// # Example
///
/// ```rust
/// use cramer_rs::solver::{FanOut, WorkerBackend};
///
/// let pool = FanOut::new(WorkerBackend::Threads, None);
/// let squares = pool.run(4, |i| Ok((i * i) as f64)).unwrap();
/// assert_eq!(squares, vec![0.0, 1.0, 4.0, 9.0]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FanOut {
    backend: WorkerBackend,
    timeout: Option<Duration>,
}

impl FanOut {
    /// Create a pool
    pub fn new(backend: WorkerBackend, timeout: Option<Duration>) -> Self {
        Self { backend, timeout }
    }

    /// Pool matching a solver configuration
    pub fn from_configuration(config: &SolverConfiguration) -> Self {
        Self::new(config.backend, config.timeout)
    }

    /// Dispatch `units` workers running `job(index)` and wait at the barrier
    ///
    /// Returns the values in index order when every unit delivered one.
    pub fn run<F>(&self, units: usize, job: F) -> Result<Vec<f64>, AggregationReport>
    where
        F: Fn(usize) -> Result<f64, FailureReason> + Send + Sync + 'static,
    {
        self.run_cancellable(units, move |index, _| job(index))
    }

    /// Like [`run`](Self::run), but `job(index, cancelled)` also receives the
    /// flag raised once the barrier stops waiting
    ///
    /// Long jobs should poll the flag and give up with
    /// [`FailureReason::Cancelled`] so abandoned units release their CPU.
    pub fn run_cancellable<F>(&self, units: usize, job: F) -> Result<Vec<f64>, AggregationReport>
    where
        F: Fn(usize, &AtomicBool) -> Result<f64, FailureReason> + Send + Sync + 'static,
    {
        let started = Instant::now();
        let mut aggregator = Aggregator::new(units);

        if units == 0 {
            return aggregator.finish(false, started.elapsed());
        }

        let (sender, receiver) = mpsc::channel::<WorkerMessage>();
        let job = Arc::new(job);
        let cancelled = Arc::new(AtomicBool::new(false));
        let running = Arc::new(AtomicUsize::new(0));

        let unit = |index: usize| WorkerUnit {
            index,
            job: Arc::clone(&job),
            sender: sender.clone(),
            cancelled: Arc::clone(&cancelled),
            running: Arc::clone(&running),
        };

        log::debug!("dispatching {} workers on {} backend", units, self.backend.name());

        match self.backend {
            WorkerBackend::Threads => {
                for index in 0..units {
                    let worker = unit(index);
                    let spawned = thread::Builder::new()
                        .name(format!("cramer-worker-{index}"))
                        .spawn(move || worker.execute());

                    if let Err(e) = spawned {
                        aggregator.merge(Err(WorkerFailure {
                            index,
                            reason: FailureReason::SpawnFailed(e.to_string()),
                        }));
                    }
                }
            }
            #[cfg(feature = "parallel")]
            WorkerBackend::Rayon { max_threads } => {
                let mut builder = rayon::ThreadPoolBuilder::new()
                    .thread_name(|i| format!("cramer-rayon-{i}"));
                if let Some(threads) = max_threads {
                    builder = builder.num_threads(threads);
                }

                match builder.build() {
                    // Spawned jobs keep the pool's threads alive after `pool` drops.
                    Ok(pool) => {
                        for index in 0..units {
                            let worker = unit(index);
                            pool.spawn(move || worker.execute());
                        }
                    }
                    Err(e) => {
                        for index in 0..units {
                            aggregator.merge(Err(WorkerFailure {
                                index,
                                reason: FailureReason::SpawnFailed(e.to_string()),
                            }));
                        }
                    }
                }
            }
        }

        // Only worker-held senders remain: disconnection means nobody is left to report.
        drop(sender);

        let outcome = aggregator.collect(&receiver, self.timeout, started);
        cancelled.store(true, Ordering::Relaxed);

        let late = running.load(Ordering::Relaxed);
        if outcome.is_err() && late > 0 {
            log::warn!(
                "{late} worker(s) still running after the barrier closed, cancellation requested"
            );
        }
        outcome
    }
}

// =================================================================================================
// Worker unit
// =================================================================================================

struct WorkerUnit<F> {
    index: usize,
    job: Arc<F>,
    sender: Sender<WorkerMessage>,
    cancelled: Arc<AtomicBool>,
    running: Arc<AtomicUsize>,
}

/// Counts a unit as running until dropped, panics included
struct RunningGuard<'a>(&'a AtomicUsize);

impl<'a> RunningGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::Relaxed);
        Self(counter)
    }
}

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::Relaxed);
    }
}

impl<F> WorkerUnit<F>
where
    F: Fn(usize, &AtomicBool) -> Result<f64, FailureReason>,
{
    fn execute(self) {
        let index = self.index;

        if self.cancelled.load(Ordering::Relaxed) {
            log::debug!("worker {index}: abandoned before start");
            return;
        }

        let guard = RunningGuard::enter(&self.running);
        let job = &self.job;
        let cancelled = self.cancelled.as_ref();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| job(index, cancelled)));
        drop(guard);

        let message = match outcome {
            Ok(Ok(value)) => {
                log::debug!("worker {index}: done");
                Ok(WorkerResult { index, value })
            }
            Ok(Err(FailureReason::Cancelled)) => {
                log::debug!("worker {index}: stopped after cancellation");
                Err(WorkerFailure { index, reason: FailureReason::Cancelled })
            }
            Ok(Err(reason)) => Err(WorkerFailure { index, reason }),
            Err(payload) => Err(WorkerFailure {
                index,
                reason: FailureReason::Panicked(panic_message(payload.as_ref())),
            }),
        };

        if self.sender.send(message).is_err() {
            log::debug!("worker {index}: barrier already closed, result discarded");
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

// =================================================================================================
// Aggregation barrier
// =================================================================================================

struct Aggregator {
    slots: Vec<Option<f64>>,
    settled: Vec<bool>,
    pending: usize,
    failures: Vec<WorkerFailure>,
}

impl Aggregator {
    fn new(expected: usize) -> Self {
        Self {
            slots: vec![None; expected],
            settled: vec![false; expected],
            pending: expected,
            failures: Vec::new(),
        }
    }

    fn merge(&mut self, message: WorkerMessage) {
        let index = match &message {
            Ok(result) => result.index,
            Err(failure) => failure.index,
        };

        if index >= self.slots.len() {
            log::warn!("discarding message for unknown index {index}");
            return;
        }

        match message {
            Ok(result) if self.slots[index].is_some() => {
                log::warn!("worker {index}: second result {} ignored", result.value);
                self.failures.push(WorkerFailure { index, reason: FailureReason::Duplicate });
            }
            Ok(result) => {
                self.slots[index] = Some(result.value);
            }
            Err(failure) => {
                log::warn!("{failure}");
                self.failures.push(failure);
            }
        }

        if !self.settled[index] {
            self.settled[index] = true;
            self.pending -= 1;
        }
    }

    fn collect(
        mut self,
        receiver: &Receiver<WorkerMessage>,
        timeout: Option<Duration>,
        started: Instant,
    ) -> Result<Vec<f64>, AggregationReport> {
        let deadline = timeout.map(|t| started + t);
        let mut timed_out = false;

        while self.pending > 0 {
            let message = match deadline {
                Some(deadline) => {
                    let remaining = deadline.saturating_duration_since(Instant::now());
                    match receiver.recv_timeout(remaining) {
                        Ok(message) => message,
                        Err(RecvTimeoutError::Timeout) => {
                            timed_out = true;
                            break;
                        }
                        Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                None => match receiver.recv() {
                    Ok(message) => message,
                    Err(_) => break,
                },
            };
            self.merge(message);
        }

        self.finish(timed_out, started.elapsed())
    }

    fn finish(self, timed_out: bool, elapsed: Duration) -> Result<Vec<f64>, AggregationReport> {
        if self.slots.iter().all(Option::is_some) {
            return Ok(self.slots.into_iter().flatten().collect());
        }

        let missing: Vec<usize> = self
            .slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_none())
            .map(|(i, _)| i)
            .collect();

        Err(AggregationReport {
            expected: self.slots.len(),
            received: self.slots.len() - missing.len(),
            missing,
            failures: self.failures,
            timed_out,
            elapsed,
        })
    }
}

// =================================================================================================
// Tests
// =================================================================================================
