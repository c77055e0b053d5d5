use std::fmt::Debug;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::mpsc::{self, Receiver, Sender};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use kernel::interface::mq::{
    DestructQueueInfo, DispatchOutcome, ErrorOperation, Handler, JobDispatcher, MQConfig,
    MessageQueue, QueueInfo, QueueStats,
};

const DRAIN_POLL: Duration = Duration::from_millis(20);

#[derive(Default)]
struct Counters {
    dropped: AtomicU64,
    completed: AtomicU64,
    failed: AtomicU64,
}

struct Shared {
    name: String,
    capacity: usize,
    accepting: AtomicBool,
    counters: Counters,
}

impl Shared {
    fn stats(&self, available: usize) -> QueueStats {
        QueueStats::new(
            self.capacity.saturating_sub(available),
            self.capacity,
            self.counters.dropped.load(Ordering::Relaxed),
            self.counters.completed.load(Ordering::Relaxed),
            self.counters.failed.load(Ordering::Relaxed),
        )
    }
}

/// Cheap handle used by request handlers to enqueue jobs.
pub struct InProcessDispatcher<T> {
    sender: Sender<QueueInfo<T>>,
    shared: Arc<Shared>,
}

impl<T> Clone for InProcessDispatcher<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> JobDispatcher<T> for InProcessDispatcher<T>
where
    T: 'static + Debug + Sync + Send,
{
    fn dispatch(&self, info: QueueInfo<T>) -> DispatchOutcome {
        let name = &self.shared.name;
        if !self.shared.accepting.load(Ordering::Acquire) {
            warn!("Queue {name} is shutting down, rejecting {:?}", info.data());
            return DispatchOutcome::Closed;
        }
        match self.sender.try_send(info) {
            Ok(()) => DispatchOutcome::Queued,
            Err(TrySendError::Full(info)) => {
                self.shared.counters.dropped.fetch_add(1, Ordering::Relaxed);
                warn!(
                    "Queue {name} is full, dropping Id: {}, Job: {:?}",
                    info.id(),
                    info.data()
                );
                DispatchOutcome::Dropped
            }
            Err(TrySendError::Closed(info)) => {
                warn!("Queue {name} is closed, dropping Id: {}", info.id());
                DispatchOutcome::Closed
            }
        }
    }

    fn stats(&self) -> QueueStats {
        self.shared.stats(self.sender.capacity())
    }
}

/// Bounded tokio channel drained by `worker_count` tasks sharing one receiver.
///
/// Nothing is persisted: jobs still queued when the process dies are lost.
pub struct InProcessMessageQueue<M, T> {
    config: MQConfig,
    dispatcher: InProcessDispatcher<T>,
    receiver: Arc<tokio::sync::Mutex<Receiver<QueueInfo<T>>>>,
    cancel: CancellationToken,
    workers: Mutex<Vec<JoinHandle<()>>>,
    _module: PhantomData<fn() -> M>,
}

impl<M, T> InProcessMessageQueue<M, T>
where
    M: 'static + Clone + Sync + Send,
    T: 'static + Debug + Sync + Send,
{
    #[tracing::instrument(skip_all, fields(queue = %shared.name, worker = index))]
    async fn listen<H>(
        index: usize,
        shared: Arc<Shared>,
        receiver: Arc<tokio::sync::Mutex<Receiver<QueueInfo<T>>>>,
        cancel: CancellationToken,
        module: M,
        handler: H,
    ) where
        H: Handler<M, T>,
    {
        info!("Worker started");
        loop {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                info = async { receiver.lock().await.recv().await } => info,
            };
            let Some(info) = next else {
                break;
            };
            let DestructQueueInfo { id, data } = info.into_destruct();
            let job = format!("{data:?}");
            debug!("Processing Id: {id}, Job: {job}");
            // Each job runs on its own task so a panicking handler cannot take
            // the worker down with it.
            let run = tokio::spawn(handler.clone().call(module.clone(), data));
            match run.await {
                Ok(Ok(())) => {
                    shared.counters.completed.fetch_add(1, Ordering::Relaxed);
                    debug!("Done Id: {id}");
                }
                Err(panicked) => {
                    shared.counters.failed.fetch_add(1, Ordering::Relaxed);
                    error!("Handler crashed on Id: {id}, Job: {job}: {panicked}");
                }
                Ok(Err(report)) => {
                    shared.counters.failed.fetch_add(1, Ordering::Relaxed);
                    match report.current_context() {
                        ErrorOperation::NotFound => {
                            warn!("Skipped Id: {id}, Job: {job}, Report: {report:?}")
                        }
                        ErrorOperation::Failed => {
                            error!("Failed Id: {id}, Job: {job}, Report: {report:?}")
                        }
                    }
                }
            }
        }
        info!("Worker stopped");
    }
}

#[async_trait::async_trait]
impl<M, T> MessageQueue<M, T> for InProcessMessageQueue<M, T>
where
    M: 'static + Clone + Sync + Send,
    T: 'static + Debug + Sync + Send,
{
    type Dispatcher = InProcessDispatcher<T>;

    fn new(name: &str, config: MQConfig) -> Self {
        let (sender, receiver) = mpsc::channel(*config.capacity());
        let shared = Arc::new(Shared {
            name: name.to_string(),
            capacity: *config.capacity(),
            accepting: AtomicBool::new(true),
            counters: Counters::default(),
        });
        Self {
            config,
            dispatcher: InProcessDispatcher { sender, shared },
            receiver: Arc::new(tokio::sync::Mutex::new(receiver)),
            cancel: CancellationToken::new(),
            workers: Mutex::new(Vec::new()),
            _module: PhantomData,
        }
    }

    fn dispatcher(&self) -> Self::Dispatcher {
        self.dispatcher.clone()
    }

    fn start_workers<H>(&self, module: M, handler: H)
    where
        H: Handler<M, T>,
    {
        let mut workers = self.workers.lock().unwrap_or_else(PoisonError::into_inner);
        if !workers.is_empty() {
            warn!(
                "Workers of {} are already running",
                self.dispatcher.shared.name
            );
            return;
        }
        for index in 0..*self.config.worker_count() {
            let shared = Arc::clone(&self.dispatcher.shared);
            let receiver = Arc::clone(&self.receiver);
            let cancel = self.cancel.clone();
            let module = module.clone();
            let handler = handler.clone();
            workers.push(tokio::spawn(async move {
                Self::listen(index, shared, receiver, cancel, module, handler).await;
            }));
        }
    }

    async fn shutdown(&self, drain: bool) {
        let shared = &self.dispatcher.shared;
        shared.accepting.store(false, Ordering::Release);
        let workers = {
            let mut workers = self.workers.lock().unwrap_or_else(PoisonError::into_inner);
            std::mem::take(&mut *workers)
        };

        if drain && !workers.is_empty() {
            info!("Draining {} queued job(s) of {}", self.stats().queued(), shared.name);
            while self.dispatcher.sender.capacity() < shared.capacity {
                tokio::time::sleep(DRAIN_POLL).await;
            }
        }
        self.cancel.cancel();

        for worker in workers {
            if let Err(error) = worker.await {
                error!("Worker of {} ended abnormally: {error}", shared.name);
            }
        }
        info!("Queue {} stopped, {:?}", shared.name, self.stats());
    }

    fn stats(&self) -> QueueStats {
        self.dispatcher.stats()
    }
}
