use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{debug, error};

use crate::utils::response::error as error_response;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed")]
    Validation(Vec<String>),

    #[error("database error")]
    Database(#[from] sqlx::Error),

    #[error("too many requests")]
    Throttled,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Throttled => StatusCode::TOO_MANY_REQUESTS,
        }
    }

    fn log(&self) {
        match self {
            AppError::Validation(errors) => {
                debug!(?errors, "Rejected submission");
            }
            AppError::Database(e) => {
                error!(error = ?e, "Database error");
            }
            AppError::Throttled => {
                debug!("Request throttled");
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log internal details
        self.log();

        // Only expose high-level messages to the client; database errors in
        // particular stay server-side.
        let (message, errors) = match self {
            AppError::Validation(errors) => ("Validation failed", Some(errors)),
            AppError::Database(_) => ("Server error", None),
            AppError::Throttled => ("Too many requests", None),
        };

        error_response(status, message, errors)
    }
}
