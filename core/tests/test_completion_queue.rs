#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use lz4_bridge_core::completion::CompletionQueue;

    #[test]
    fn drain_on_empty_queue_runs_nothing() {
        let queue = CompletionQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.drain_once(), 0);
    }

    #[test]
    fn runs_in_fifo_order() {
        let queue = CompletionQueue::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for i in 0..10 {
            let seen = Arc::clone(&seen);
            queue.enqueue(move || seen.lock().unwrap().push(i));
        }
        assert_eq!(queue.len(), 10);
        assert!(seen.lock().unwrap().is_empty(), "nothing runs before the drain");

        assert_eq!(queue.drain_once(), 10);
        assert_eq!(*seen.lock().unwrap(), (0..10).collect::<Vec<_>>());
        assert!(queue.is_empty());
    }

    #[test]
    fn each_closure_runs_once() {
        let queue = CompletionQueue::new();
        let runs = Arc::new(AtomicUsize::new(0));
        let r = Arc::clone(&runs);
        queue.enqueue(move || {
            r.fetch_add(1, Ordering::SeqCst);
        });

        queue.drain_once();
        queue.drain_once();
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn producers_keep_their_order_across_threads() {
        const PRODUCERS: usize = 4;
        const PER_PRODUCER: usize = 1000;

        let queue = CompletionQueue::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        crossbeam::scope(|s| {
            for p in 0..PRODUCERS {
                let queue = &queue;
                let seen = Arc::clone(&seen);
                s.spawn(move |_| {
                    for i in 0..PER_PRODUCER {
                        let seen = Arc::clone(&seen);
                        queue.enqueue(move || seen.lock().unwrap().push((p, i)));
                    }
                });
            }
        })
        .unwrap();

        assert_eq!(queue.drain_once(), PRODUCERS * PER_PRODUCER);

        let seen = seen.lock().unwrap();
        for p in 0..PRODUCERS {
            let order: Vec<usize> = seen.iter().filter(|(q, _)| *q == p).map(|(_, i)| *i).collect();
            assert_eq!(order, (0..PER_PRODUCER).collect::<Vec<_>>(), "producer {p}");
        }
    }

    #[test]
    fn drain_while_producers_run() {
        const TOTAL: usize = 2000;

        let queue = CompletionQueue::new();
        let runs = Arc::new(AtomicUsize::new(0));

        crossbeam::scope(|s| {
            for _ in 0..2 {
                let queue = &queue;
                let runs = Arc::clone(&runs);
                s.spawn(move |_| {
                    for _ in 0..TOTAL / 2 {
                        let runs = Arc::clone(&runs);
                        queue.enqueue(move || {
                            runs.fetch_add(1, Ordering::SeqCst);
                        });
                    }
                });
            }

            let mut drained = 0;
            while drained < TOTAL {
                drained += queue.drain_once();
                std::thread::yield_now();
            }
            assert_eq!(drained, TOTAL);
        })
        .unwrap();

        assert_eq!(runs.load(Ordering::SeqCst), TOTAL);
    }

    #[test]
    fn closure_may_enqueue_during_drain() {
        let queue = Arc::new(CompletionQueue::new());
        let seen = Arc::new(Mutex::new(Vec::new()));

        let q = Arc::clone(&queue);
        let s = Arc::clone(&seen);
        queue.enqueue(move || {
            s.lock().unwrap().push("outer");
            let s = Arc::clone(&s);
            q.enqueue(move || s.lock().unwrap().push("inner"));
        });

        // The follow-up is picked up by the same drain.
        assert_eq!(queue.drain_once(), 2);
        assert_eq!(*seen.lock().unwrap(), vec!["outer", "inner"]);
    }

    #[test]
    fn discard_drops_without_running() {
        struct Guard(Arc<AtomicUsize>);
        impl Drop for Guard {
            fn drop(&mut self) {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }

        let queue = CompletionQueue::new();
        let runs = Arc::new(AtomicUsize::new(0));
        let drops = Arc::new(AtomicUsize::new(0));
        for _ in 0..3 {
            let runs = Arc::clone(&runs);
            let guard = Guard(Arc::clone(&drops));
            queue.enqueue(move || {
                let _guard = guard;
                runs.fetch_add(1, Ordering::SeqCst);
            });
        }

        assert_eq!(queue.discard(), 3);
        assert!(queue.is_empty());
        assert_eq!(runs.load(Ordering::SeqCst), 0);
        assert_eq!(drops.load(Ordering::SeqCst), 3);
        assert_eq!(queue.drain_once(), 0);
    }

    #[test]
    fn debug_shows_pending_count() {
        let queue = CompletionQueue::new();
        queue.enqueue(|| {});
        assert_eq!(format!("{queue:?}"), "CompletionQueue { pending: 1 }");
    }
}
