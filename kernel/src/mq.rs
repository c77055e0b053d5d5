mod config;
mod handler;
mod info;
mod stats;

pub use crate::mq::{config::*, handler::*, info::*, stats::*};
use error_stack::Context;
use std::fmt::{Display, Formatter};

/// Outcome reported by a job handler. Both variants are terminal: jobs are
/// never retried.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ErrorOperation {
    /// The job's target no longer exists.
    NotFound,
    Failed,
}

impl Display for ErrorOperation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorOperation::NotFound => write!(f, "Job target not found"),
            ErrorOperation::Failed => write!(f, "Job failed"),
        }
    }
}

impl Context for ErrorOperation {}

/// Producer side of a queue. Never blocks and never fails the caller.
pub trait JobDispatcher<T>: 'static + Sync + Send {
    fn dispatch(&self, info: QueueInfo<T>) -> DispatchOutcome;
    fn stats(&self) -> QueueStats;
}

/// Bounded in-process queue drained by a fixed pool of workers.
#[async_trait::async_trait]
pub trait MessageQueue<M, T>: 'static + Sync + Send
where
    M: 'static + Clone + Sync + Send,
    T: 'static + Sync + Send,
{
    type Dispatcher: JobDispatcher<T> + Clone;

    fn new(name: &str, config: MQConfig) -> Self;

    fn dispatcher(&self) -> Self::Dispatcher;

    /// Spawns `worker_count` workers. Calling it again while workers run has
    /// no effect.
    fn start_workers<H>(&self, module: M, handler: H)
    where
        H: Handler<M, T>;

    /// Stops accepting jobs, optionally waits for the queued ones, then stops
    /// and joins every worker.
    async fn shutdown(&self, drain: bool);

    fn stats(&self) -> QueueStats;
}
