use bytes::Bytes;

use crate::compression::CodecError;

/// Deferred "deliver this result" step, run on the host thread.
pub type Completion = Box<dyn FnOnce() + Send + 'static>;

/// Variant result of one async job.
pub type JobOutcome = Result<Bytes, CodecError>;

/// Host-side destination of one async result.
///
/// `deliver` takes `self` by value, so a handle can be delivered at most once;
/// dropping it is the release. Implementations must only touch host state
/// inside `deliver`, which always runs on the host thread.
pub trait ResultHandle: Send + 'static {
    fn deliver(self, outcome: JobOutcome);
}

impl<F> ResultHandle for F
where
    F: FnOnce(JobOutcome) + Send + 'static,
{
    fn deliver(self, outcome: JobOutcome) {
        self(outcome)
    }
}
