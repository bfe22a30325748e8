use actix_web::{HttpResponse, http::StatusCode};
use derive_more::Display;
use serde_json::json;
use tracing::error;

/// Structured failure reasons surfaced to the caller. Every error is recovered
/// at the boundary nearest its cause; database errors are logged and collapsed
/// into a generic 500 body.
#[derive(Debug, Display)]
pub enum AppError {
    #[display(fmt = "{}", _0)]
    NotFound(String),
    #[display(fmt = "{}", _0)]
    OutOfWindow(String),
    #[display(fmt = "{}", _0)]
    InvalidInput(String),
    #[display(fmt = "{}", _0)]
    InsufficientBalance(String),
    #[display(fmt = "{}", _0)]
    Conflict(String),
    #[display(fmt = "database error: {}", _0)]
    Db(sqlx::Error),
}

impl AppError {
    fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::OutOfWindow(_) => "OUT_OF_WINDOW",
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::InsufficientBalance(_) => "INSUFFICIENT_BALANCE",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Db(_) => "INTERNAL",
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Db(e)
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::OutOfWindow(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::InsufficientBalance(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::Db(e) => {
                error!(error = %e, "database error");
                "Internal Server Error".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(json!({
            "error": self.code(),
            "message": message,
        }))
    }
}
