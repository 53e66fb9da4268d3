#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::thread::{self, ThreadId};
    use std::time::{Duration, Instant};

    use rand::{rngs::StdRng, RngCore, SeedableRng};

    use lz4_bridge_core::prelude::*;

    #[derive(Clone, Default)]
    struct Tally {
        delivered: Arc<AtomicUsize>,
        released: Arc<AtomicUsize>,
        threads: Arc<Mutex<Vec<ThreadId>>>,
        outcomes: Arc<Mutex<Vec<JobOutcome>>>,
    }

    impl Tally {
        fn delivered(&self) -> usize {
            self.delivered.load(Ordering::SeqCst)
        }

        fn released(&self) -> usize {
            self.released.load(Ordering::SeqCst)
        }
    }

    struct Recorder(Tally);

    impl ResultHandle for Recorder {
        fn deliver(self, outcome: JobOutcome) {
            self.0.threads.lock().unwrap().push(thread::current().id());
            self.0.outcomes.lock().unwrap().push(outcome);
            self.0.delivered.fetch_add(1, Ordering::SeqCst);
        }
    }

    impl Drop for Recorder {
        fn drop(&mut self) {
            self.0.released.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// Tick the bridge like a host frame loop until `done` holds.
    fn pump_until(bridge: &Bridge, done: impl Fn() -> bool) {
        let deadline = Instant::now() + Duration::from_secs(30);
        while !done() {
            bridge.pump().unwrap();
            assert!(Instant::now() < deadline, "timed out waiting for completions");
            thread::sleep(Duration::from_millis(1));
        }
    }

    fn attach() -> Bridge {
        let _ = env_logger::builder().is_test(true).try_init();
        Bridge::attach(BridgeConfig::default()).unwrap()
    }

    #[test]
    fn hello_world_async_is_delivered_once_on_the_host_thread() {
        let bridge = attach();
        let tally = Tally::default();

        bridge.encode_async(b"hello world".to_vec(), Recorder(tally.clone())).unwrap();
        pump_until(&bridge, || tally.delivered() == 1);

        // Extra ticks deliver nothing more.
        for _ in 0..5 {
            assert_eq!(bridge.pump().unwrap(), 0);
        }
        assert_eq!(tally.delivered(), 1);
        assert_eq!(tally.released(), 1);
        assert_eq!(tally.threads.lock().unwrap()[0], thread::current().id());

        let outcomes = tally.outcomes.lock().unwrap();
        let frame = outcomes[0].as_ref().unwrap();
        assert_eq!(bridge.decode(frame).unwrap(), b"hello world");
    }

    #[test]
    fn async_decode_delivers_plaintext() {
        let bridge = attach();
        let frame = bridge.encode(b"round trip").unwrap();

        let got = Arc::new(Mutex::new(None));
        let g = Arc::clone(&got);
        bridge
            .decode_async(frame, move |outcome: JobOutcome| {
                *g.lock().unwrap() = Some(outcome);
            })
            .unwrap();

        pump_until(&bridge, || got.lock().unwrap().is_some());
        let outcome = got.lock().unwrap().take().unwrap();
        assert_eq!(&outcome.unwrap()[..], b"round trip");
    }

    #[test]
    fn async_failure_reaches_the_handle() {
        let bridge = attach();
        let tally = Tally::default();

        bridge.decode_async(b"not a frame".to_vec(), Recorder(tally.clone())).unwrap();
        pump_until(&bridge, || tally.delivered() == 1);

        let outcomes = tally.outcomes.lock().unwrap();
        let err = outcomes[0].as_ref().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Stream);
        assert_eq!(err.direction(), Direction::Decode);
    }

    #[test]
    fn concurrent_jobs_deliver_and_release_exactly_once() {
        const JOBS: usize = 64;
        let bridge = attach();
        let tally = Tally::default();
        let mut rng = StdRng::seed_from_u64(64);

        for i in 0..JOBS {
            let mut input = vec![0u8; 4096 + i * 512];
            rng.fill_bytes(&mut input);
            let direction = if i % 4 == 3 { Direction::Decode } else { Direction::Encode };
            let input = match direction {
                Direction::Encode => input,
                Direction::Decode => bridge.encode(&input).unwrap(),
            };
            bridge.submit(direction, input, Recorder(tally.clone())).unwrap();
        }

        pump_until(&bridge, || tally.delivered() == JOBS);
        bridge.detach();

        assert_eq!(tally.delivered(), JOBS);
        assert_eq!(tally.released(), JOBS);
        assert!(tally.outcomes.lock().unwrap().iter().all(|o| o.is_ok()));

        let host = thread::current().id();
        assert!(tally.threads.lock().unwrap().iter().all(|t| *t == host));

        let snap = bridge.snapshot();
        assert!(snap.is_settled(), "{snap:?}");
        assert_eq!(snap.jobs.launched, JOBS as u64);
        assert_eq!(snap.jobs.succeeded, JOBS as u64);
        assert_eq!(snap.jobs.drained, JOBS as u64);
    }

    #[test]
    fn pump_off_the_host_thread_is_rejected() {
        let bridge = attach();
        assert!(bridge.is_host_thread());

        crossbeam::scope(|s| {
            let result = s.spawn(|_| (bridge.is_host_thread(), bridge.pump())).join().unwrap();
            assert!(!result.0);
            assert!(matches!(result.1, Err(BridgeError::WrongThread("pump"))));
        })
        .unwrap();

        // Sync calls are fine from anywhere.
        crossbeam::scope(|s| {
            let frame = s.spawn(|_| bridge.encode(b"elsewhere").unwrap()).join().unwrap();
            assert_eq!(bridge.decode(&frame).unwrap(), b"elsewhere");
        })
        .unwrap();
    }

    #[test]
    fn detach_joins_workers_and_delivers_pending() {
        let bridge = attach();
        let tally = Tally::default();
        for i in 0..8 {
            bridge.encode_async(vec![i; 100_000], Recorder(tally.clone())).unwrap();
        }

        assert_eq!(bridge.detach(), 8);
        assert_eq!(tally.delivered(), 8);
        assert!(bridge.is_detached());

        assert_eq!(bridge.detach(), 0, "detach is idempotent");
    }

    #[test]
    fn launch_after_detach_is_rejected() {
        let bridge = attach();
        bridge.detach();

        let tally = Tally::default();
        let err = bridge.encode_async(b"late".to_vec(), Recorder(tally.clone())).unwrap_err();
        assert!(matches!(err, BridgeError::Launch(LaunchError::ShutDown)));
        assert_eq!(tally.delivered(), 0);
        assert_eq!(tally.released(), 1);

        // Sync paths keep working.
        assert!(bridge.encode(b"still fine").is_ok());
    }

    #[test]
    fn dropping_the_bridge_releases_without_delivering() {
        let tally = Tally::default();
        {
            let bridge = attach();
            for _ in 0..4 {
                bridge.encode_async(vec![7; 50_000], Recorder(tally.clone())).unwrap();
            }
        }
        assert_eq!(tally.delivered(), 0, "drop never runs host callbacks");
        assert_eq!(tally.released(), 4);
    }

    #[test]
    fn shutdown_joins_and_leaves_delivery_to_the_host() {
        let bridge = attach();
        let tally = Tally::default();
        for i in 0..4u8 {
            bridge.encode_async(vec![i; 20_000], Recorder(tally.clone())).unwrap();
        }

        bridge.shutdown();
        assert!(bridge.is_detached());
        assert_eq!(bridge.snapshot().jobs_in_flight, 0);
        assert_eq!(bridge.snapshot().completions_pending, 4);
        assert_eq!(tally.delivered(), 0);

        assert_eq!(bridge.detach(), 4);
        assert_eq!(tally.delivered(), 4);
        assert_eq!(tally.released(), 4);
    }

    #[test]
    fn detach_off_the_host_thread_leaves_the_queue() {
        let bridge = attach();
        let tally = Tally::default();
        bridge.encode_async(b"pending".to_vec(), Recorder(tally.clone())).unwrap();

        crossbeam::scope(|s| {
            assert_eq!(s.spawn(|_| bridge.detach()).join().unwrap(), 0);
        })
        .unwrap();
        assert_eq!(tally.delivered(), 0);
        assert_eq!(bridge.snapshot().completions_pending, 1);

        assert_eq!(bridge.pump().unwrap(), 1);
        assert_eq!(tally.delivered(), 1);
    }

    #[test]
    fn log_only_mode_drops_failed_results() {
        let config = BridgeConfig { error_delivery: ErrorDelivery::LogOnly, ..BridgeConfig::default() };
        let bridge = Bridge::attach(config).unwrap();
        let tally = Tally::default();

        bridge.decode_async(b"garbage".to_vec(), Recorder(tally.clone())).unwrap();
        bridge.detach();

        assert_eq!(tally.delivered(), 0);
        assert_eq!(tally.released(), 1);
        let snap = bridge.snapshot();
        assert_eq!(snap.jobs.failed, 1);
        assert_eq!(snap.jobs.drained, 1);
    }

    #[test]
    fn invalid_config_is_rejected_at_attach() {
        let mut config = BridgeConfig::default();
        config.frame.chunk_size = 0;
        let err = Bridge::attach(config).unwrap_err();
        assert!(matches!(err, BridgeError::Config(ConfigError::Invalid(_))));
    }

    #[test]
    fn sync_calls_feed_the_snapshot() {
        let bridge = attach();
        let input = vec![b'z'; 10_000];
        let frame = bridge.encode(&input).unwrap();
        bridge.decode(&frame).unwrap();
        assert!(matches!(bridge.decode(b"bad"), Err(BridgeError::Codec(_))));

        let snap = bridge.snapshot();
        assert_eq!(snap.codec.encode_calls, 1);
        assert_eq!(snap.codec.decode_calls, 2);
        assert_eq!(snap.codec.failures, 1);
        assert_eq!(snap.codec.encode_bytes_in, 10_000);
        assert!(snap.compression_ratio > 0.0 && snap.compression_ratio < 0.1);
        assert_eq!(snap.jobs.launched, 0);
    }
}
