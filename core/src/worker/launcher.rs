use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use bytes::Bytes;

use crate::completion::{CompletionQueue, JobOutcome, ResultHandle};
use crate::compression::{CodecError, Direction, FrameCodec, Stage};
use crate::telemetry::{CodecCounters, SharedCounters};
use crate::worker::types::{ErrorDelivery, Job, JobId, LaunchError};

/// Everything a worker needs, moved onto its thread.
struct WorkerContext {
    codec: FrameCodec,
    queue: Arc<CompletionQueue>,
    counters: Arc<SharedCounters>,
    delivery: ErrorDelivery,
}

/// Spawns one named worker thread per async request and keeps its handle
/// until the worker is reaped or joined at shutdown.
pub struct JobLauncher {
    codec: FrameCodec,
    queue: Arc<CompletionQueue>,
    counters: Arc<SharedCounters>,
    delivery: ErrorDelivery,
    name_prefix: String,
    next_id: AtomicU64,
    closed: AtomicBool,
    workers: Mutex<Vec<JoinHandle<()>>>,
}

impl JobLauncher {
    pub fn new(
        codec: FrameCodec,
        queue: Arc<CompletionQueue>,
        counters: Arc<SharedCounters>,
        delivery: ErrorDelivery,
        name_prefix: impl Into<String>,
    ) -> Self {
        Self {
            codec,
            queue,
            counters,
            delivery,
            name_prefix: name_prefix.into(),
            next_id: AtomicU64::new(1),
            closed: AtomicBool::new(false),
            workers: Mutex::new(Vec::new()),
        }
    }

    /// Start `direction` on `input` in a new worker thread.
    ///
    /// Exactly one completion closure is enqueued per successful launch. If the
    /// thread cannot be spawned, `handle` is dropped undelivered and the error
    /// is returned here instead.
    pub fn launch<H: ResultHandle>(
        &self,
        input: Vec<u8>,
        direction: Direction,
        handle: H,
    ) -> Result<JobId, LaunchError> {
        let mut workers = self.lock_workers();
        if self.closed.load(Ordering::Acquire) {
            return Err(LaunchError::ShutDown);
        }
        reap(&mut workers);

        let id = JobId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let job = Job { id, direction, input };
        let ctx = WorkerContext {
            codec: self.codec.clone(),
            queue: Arc::clone(&self.queue),
            counters: Arc::clone(&self.counters),
            delivery: self.delivery,
        };

        log::debug!("job {id}: {direction} of {} bytes", job.input.len());
        let worker = thread::Builder::new()
            .name(format!("{}-{}", self.name_prefix, id.0))
            .spawn(move || run_job(job, handle, ctx))
            .map_err(LaunchError::Spawn)?;

        workers.push(worker);
        self.counters.record_launch();
        Ok(id)
    }

    /// Workers that have not finished yet.
    pub fn in_flight(&self) -> usize {
        let mut workers = self.lock_workers();
        reap(&mut workers);
        workers.len()
    }

    pub fn is_shut_down(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Refuse new jobs and join every outstanding worker.
    /// Returns how many workers were joined. Safe to call more than once.
    pub fn shutdown(&self) -> usize {
        let handles = {
            let mut workers = self.lock_workers();
            self.closed.store(true, Ordering::Release);
            std::mem::take(&mut *workers)
        };
        let joined = handles.len();
        for worker in handles {
            join(worker);
        }
        if joined > 0 {
            log::debug!("launcher shutdown joined {joined} workers");
        }
        joined
    }

    fn lock_workers(&self) -> MutexGuard<'_, Vec<JoinHandle<()>>> {
        self.workers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for JobLauncher {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Join finished workers and drop them from the registry.
fn reap(workers: &mut Vec<JoinHandle<()>>) {
    let mut i = 0;
    while i < workers.len() {
        if workers[i].is_finished() {
            join(workers.swap_remove(i));
        } else {
            i += 1;
        }
    }
}

fn join(worker: JoinHandle<()>) {
    let name = worker.thread().name().unwrap_or("worker").to_owned();
    if worker.join().is_err() {
        log::error!("{name} panicked outside the codec");
    }
}

fn run_job<H: ResultHandle>(job: Job, handle: H, ctx: WorkerContext) {
    let Job { id, direction, input } = job;

    let mut local = CodecCounters::default();
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        ctx.codec.run_tracked(direction, &input, &mut local)
    }))
    .unwrap_or_else(|_| Err(CodecError::stream(direction, Stage::Worker, "worker panicked")));
    drop(input);

    ctx.counters.merge_codec(&local);
    ctx.counters.record_outcome(result.is_ok());
    match &result {
        Ok(out) => log::debug!("job {id}: {direction} produced {} bytes", out.len()),
        Err(e) => log::warn!("job {id}: {e}"),
    }

    let outcome: JobOutcome = result.map(Bytes::from);
    let delivery = ctx.delivery;
    ctx.queue.enqueue(move || complete(id, handle, outcome, delivery));
}

/// Body of the completion closure; runs on the host thread.
fn complete<H: ResultHandle>(id: JobId, handle: H, outcome: JobOutcome, delivery: ErrorDelivery) {
    match (outcome, delivery) {
        (Err(e), ErrorDelivery::LogOnly) => {
            log::error!("job {id}: result dropped after failure: {e}");
            drop(handle);
        }
        (outcome, _) => handle.deliver(outcome),
    }
}
