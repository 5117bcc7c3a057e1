use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde_json::json;

use crate::store::StoreError;

/// Everything the core can refuse. Each variant leaves stored state
/// untouched and maps to a user-facing message.
#[derive(Debug, Display)]
pub enum AppError {
    /// A required field for the employee's category is missing or malformed.
    #[display(fmt = "{}", _0)]
    Validation(String),

    /// Registration with an employee code that is already taken.
    #[display(fmt = "{}", _0)]
    DuplicateKey(String),

    /// Bulk entry whose selection matched no employees.
    #[display(fmt = "{}", _0)]
    EmptySelection(String),

    #[display(fmt = "{}", _0)]
    NotFound(String),

    #[display(fmt = "Storage failure: {}", _0)]
    Store(StoreError),
}

impl std::error::Error for AppError {}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Store(e)
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::DuplicateKey(_) => StatusCode::CONFLICT,
            AppError::EmptySelection(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            // Storage details go to the log, not to the client.
            AppError::Store(e) => {
                tracing::error!(error = %e, "Record store failure");
                "Something went wrong, Contact with system admin".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(json!({ "message": message }))
    }
}
