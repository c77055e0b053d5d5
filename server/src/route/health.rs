use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;

use crate::handler::AppModule;

pub trait HealthRouter {
    fn route_health(self) -> Self;
}

impl HealthRouter for Router<AppModule> {
    fn route_health(self) -> Self {
        self.route("/health", get(|| async { StatusCode::OK }))
    }
}
