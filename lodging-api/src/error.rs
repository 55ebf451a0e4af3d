use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lodging_core::{DomainError, ErrorKind};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("{0}")]
    ValidationError(String),
}

/// Single mapping from error kind to HTTP status.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::PaymentRequired => StatusCode::PAYMENT_REQUIRED,
        ErrorKind::ForbiddenBooking => StatusCode::FORBIDDEN,
        ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
        ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl AppError {
    fn kind(&self) -> ErrorKind {
        match self {
            AppError::Domain(err) => err.kind(),
            AppError::ValidationError(_) => ErrorKind::BadRequest,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            AppError::Domain(err) => err.name(),
            AppError::ValidationError(_) => "InvalidDataError",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let status = status_for(kind);

        let message = if kind == ErrorKind::Internal {
            tracing::error!("Internal Server Error: {}", self);
            "Internal Server Error".to_string()
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "error": self.name(),
            "message": message,
        }));

        (status, body).into_response()
    }
}
