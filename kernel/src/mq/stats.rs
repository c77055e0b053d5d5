use vodca::References;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DispatchOutcome {
    Queued,
    /// The queue was full. The job is gone.
    Dropped,
    /// The queue is shutting down and no longer accepts jobs.
    Closed,
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, References)]
pub struct QueueStats {
    queued: usize,
    capacity: usize,
    dropped: u64,
    completed: u64,
    failed: u64,
}

impl QueueStats {
    pub fn new(queued: usize, capacity: usize, dropped: u64, completed: u64, failed: u64) -> Self {
        Self {
            queued,
            capacity,
            dropped,
            completed,
            failed,
        }
    }
}
