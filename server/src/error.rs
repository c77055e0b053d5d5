use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use error_stack::Report;
use kernel::KernelError;
use serde::Serialize;
use std::process::{ExitCode, Termination};

#[derive(Debug)]
pub struct StackTrace(Report<KernelError>);

impl From<Report<KernelError>> for StackTrace {
    fn from(e: Report<KernelError>) -> Self {
        StackTrace(e)
    }
}

impl Termination for StackTrace {
    fn report(self) -> ExitCode {
        self.0.report()
    }
}

#[derive(Debug)]
pub struct ErrorStatus(Report<KernelError>);

impl From<Report<KernelError>> for ErrorStatus {
    fn from(e: Report<KernelError>) -> Self {
        ErrorStatus(e)
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    category: &'static str,
    message: String,
}

impl ErrorStatus {
    fn category(&self) -> (StatusCode, &'static str) {
        match self.0.current_context() {
            KernelError::Validation => (StatusCode::BAD_REQUEST, "validation"),
            KernelError::NotFound => (StatusCode::NOT_FOUND, "not_found"),
            KernelError::Timeout | KernelError::Internal => {
                (StatusCode::INTERNAL_SERVER_ERROR, "storage")
            }
        }
    }

    // Latest printable attachment, or the context itself.
    fn message(&self) -> String {
        self.0
            .downcast_ref::<String>()
            .cloned()
            .or_else(|| self.0.downcast_ref::<&str>().map(|s| s.to_string()))
            .unwrap_or_else(|| self.0.current_context().to_string())
    }
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> axum::response::Response {
        let (status, category) = self.category();
        if status.is_server_error() {
            tracing::error!("{:?}", self.0);
        } else {
            tracing::debug!("{:?}", self.0);
        }
        let body = ErrorBody {
            category,
            message: self.message(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use error_stack::Report;
    use kernel::KernelError;

    use super::ErrorStatus;

    async fn render(report: Report<KernelError>) -> (StatusCode, serde_json::Value) {
        let response = ErrorStatus::from(report).into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body is readable");
        let json = serde_json::from_slice(&bytes).expect("body is json");
        (status, json)
    }

    #[tokio::test]
    async fn maps_categories_to_status() {
        let (status, body) = render(
            Report::new(KernelError::Validation).attach_printable("qty must be positive: 0"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["category"], "validation");
        assert_eq!(body["message"], "qty must be positive: 0");

        let (status, body) = render(
            Report::new(KernelError::NotFound).attach_printable(format!("cart {} not found", 3)),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "cart 3 not found");

        let (status, body) = render(Report::new(KernelError::Timeout)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["category"], "storage");
        assert_eq!(body["message"], "Process timed out");
    }
}
