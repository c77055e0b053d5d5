use crate::handler::AppModule;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use kernel::interface::mq::{JobDispatcher, QueueStats};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct QueueStatsResponse {
    queued: usize,
    capacity: usize,
    dropped: u64,
    completed: u64,
    failed: u64,
}

impl From<QueueStats> for QueueStatsResponse {
    fn from(value: QueueStats) -> Self {
        Self {
            queued: *value.queued(),
            capacity: *value.capacity(),
            dropped: *value.dropped(),
            completed: *value.completed(),
            failed: *value.failed(),
        }
    }
}

pub trait QueueRouter {
    fn route_queue(self) -> Self;
}

impl QueueRouter for Router<AppModule> {
    fn route_queue(self) -> Self {
        self.route(
            "/queue/stats",
            get(|State(module): State<AppModule>| async move {
                Json(QueueStatsResponse::from(module.dispatcher().stats()))
            }),
        )
    }
}
