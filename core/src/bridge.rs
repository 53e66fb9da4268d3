//! bridge.rs
//! The host-facing object: one codec, one completion queue, one launcher.
//!
//! Lifecycle: `attach` on the host thread, use, `detach`. A bridge dropped
//! without `detach` joins its workers and releases their results undelivered.
//! Sync calls may come from any thread; `pump` only from the host thread.
use std::sync::Arc;
use std::thread::{self, ThreadId};

use crate::completion::{CompletionQueue, ResultHandle};
use crate::compression::{Direction, FrameCodec};
use crate::config::BridgeConfig;
use crate::telemetry::{CodecCounters, SharedCounters, TelemetrySnapshot};
use crate::types::BridgeError;
use crate::worker::{JobId, JobLauncher};

pub struct Bridge {
    config: BridgeConfig,
    host: ThreadId,
    codec: FrameCodec,
    queue: Arc<CompletionQueue>,
    counters: Arc<SharedCounters>,
    launcher: JobLauncher,
}

impl Bridge {
    /// Validate `config` and bind the bridge to the calling thread.
    pub fn attach(config: BridgeConfig) -> Result<Self, BridgeError> {
        config.validate()?;

        let codec = FrameCodec::new(config.frame.clone());
        let queue = Arc::new(CompletionQueue::new());
        let counters = Arc::new(SharedCounters::new());
        let launcher = JobLauncher::new(
            codec.clone(),
            Arc::clone(&queue),
            Arc::clone(&counters),
            config.error_delivery,
            config.worker_name_prefix.clone(),
        );
        let host = thread::current().id();

        log::debug!(
            "bridge attached on {:?} (level {}, {:?})",
            thread::current().name().unwrap_or("unnamed"),
            config.frame.compression_level,
            config.error_delivery,
        );

        Ok(Self { config, host, codec, queue, counters, launcher })
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn is_host_thread(&self) -> bool {
        thread::current().id() == self.host
    }

    pub fn encode(&self, input: &[u8]) -> Result<Vec<u8>, BridgeError> {
        self.run(Direction::Encode, input)
    }

    pub fn decode(&self, input: &[u8]) -> Result<Vec<u8>, BridgeError> {
        self.run(Direction::Decode, input)
    }

    fn run(&self, direction: Direction, input: &[u8]) -> Result<Vec<u8>, BridgeError> {
        let mut local = CodecCounters::default();
        let result = self.codec.run_tracked(direction, input, &mut local);
        self.counters.merge_codec(&local);
        Ok(result?)
    }

    pub fn encode_async<H: ResultHandle>(&self, input: Vec<u8>, handle: H) -> Result<JobId, BridgeError> {
        self.submit(Direction::Encode, input, handle)
    }

    pub fn decode_async<H: ResultHandle>(&self, input: Vec<u8>, handle: H) -> Result<JobId, BridgeError> {
        self.submit(Direction::Decode, input, handle)
    }

    /// Start an async job. `handle` receives the outcome during a later `pump`.
    pub fn submit<H: ResultHandle>(
        &self,
        direction: Direction,
        input: Vec<u8>,
        handle: H,
    ) -> Result<JobId, BridgeError> {
        Ok(self.launcher.launch(input, direction, handle)?)
    }

    /// One host tick: run every completion queued so far.
    pub fn pump(&self) -> Result<usize, BridgeError> {
        if !self.is_host_thread() {
            return Err(BridgeError::WrongThread("pump"));
        }
        Ok(self.drain())
    }

    /// Stop accepting jobs and join the workers. Their completions stay queued.
    /// Returns the number of workers joined. Runs no host code, so it may be
    /// called with the host lock released.
    pub fn shutdown(&self) -> usize {
        self.launcher.shutdown()
    }

    /// `shutdown`, then on the host thread deliver what the workers left in
    /// the queue. Returns the number of completions run.
    pub fn detach(&self) -> usize {
        let joined = self.shutdown();
        let delivered = if self.is_host_thread() { self.drain() } else { 0 };
        if joined > 0 || delivered > 0 {
            log::debug!("bridge detached: joined {joined} workers, delivered {delivered}");
        }
        delivered
    }

    pub fn is_detached(&self) -> bool {
        self.launcher.is_shut_down()
    }

    pub fn snapshot(&self) -> TelemetrySnapshot {
        TelemetrySnapshot::from(
            &self.counters.codec(),
            &self.counters.jobs(),
            self.launcher.in_flight(),
            self.queue.len(),
        )
    }

    fn drain(&self) -> usize {
        let ran = self.queue.drain_once();
        if ran > 0 {
            self.counters.record_drained(ran);
        }
        ran
    }
}

// Dropping never runs host callbacks: pending results are released undelivered.
impl Drop for Bridge {
    fn drop(&mut self) {
        let joined = self.shutdown();
        let released = self.queue.discard();
        if joined > 0 || released > 0 {
            log::debug!("bridge dropped: joined {joined} workers, released {released} undelivered");
        }
    }
}

impl std::fmt::Debug for Bridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bridge")
            .field("host", &self.host)
            .field("detached", &self.is_detached())
            .field("queue", &self.queue)
            .finish()
    }
}
