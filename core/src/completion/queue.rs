use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::completion::types::Completion;

/// Unbounded FIFO of completion closures.
///
/// Any thread may enqueue. Only the host thread drains, and it runs each
/// closure with the lock released, so a closure may enqueue more work or call
/// back into the host without deadlocking producers.
#[derive(Default)]
pub struct CompletionQueue {
    inner: Mutex<VecDeque<Completion>>,
}

impl CompletionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.enqueue_boxed(Box::new(task));
    }

    pub fn enqueue_boxed(&self, task: Completion) {
        self.lock().push_back(task);
    }

    /// Run queued closures until the queue is observed empty.
    /// Returns how many ran.
    pub fn drain_once(&self) -> usize {
        let mut ran = 0;
        loop {
            // Guard is dropped at the end of this statement.
            let next = self.lock().pop_front();
            match next {
                Some(task) => {
                    task();
                    ran += 1;
                }
                None => return ran,
            }
        }
    }

    /// Drop every queued closure without running it. Returns how many were dropped.
    pub fn discard(&self) -> usize {
        let dropped = std::mem::take(&mut *self.lock());
        dropped.len()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panicking producer cannot leave the deque half-updated, so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, VecDeque<Completion>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for CompletionQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionQueue").field("pending", &self.len()).finish()
    }
}
