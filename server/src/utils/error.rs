use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

use crate::models::ValidationErrors;
use crate::utils::response::error as error_response;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    /// A session could not be acquired from the pool.
    #[error("Connection error: {0}")]
    ConnectionError(#[source] sqlx::Error),

    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Any other failure reported by the database, including constraint
    /// violations. Not interpreted here.
    #[error("Database error")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Migration error")]
    MigrationError(#[from] sqlx::migrate::MigrateError),
}

impl AppError {
    pub fn not_found(resource: &str, id: i64) -> Self {
        AppError::NotFound(format!("{} with id '{}' was not found", resource, id))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::ConnectionError(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::MigrationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::ConnectionError(_) => "CONNECTION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::MigrationError(_) => "MIGRATION_ERROR",
        }
    }

    fn log(&self) {
        match self {
            AppError::ValidationError(errors) => {
                warn!(fields = ?errors.fields(), "Rejected invalid input");
            }
            AppError::NotFound(msg) => {
                warn!(message = %msg, "Resource not found");
            }
            AppError::ConnectionError(e) => {
                error!(error = ?e, "Could not acquire a database session");
            }
            AppError::DatabaseError(e) => {
                error!(error = ?e, "Database error");
            }
            AppError::MigrationError(e) => {
                error!(error = ?e, "Migration error");
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();

        self.log();

        // Validation failures are the only errors whose details are safe to
        // return; everything else stays in the logs.
        let (public_message, details) = match &self {
            AppError::ValidationError(errors) => (
                "The provided input is invalid".to_string(),
                serde_json::to_value(errors).ok(),
            ),
            AppError::NotFound(msg) => (msg.clone(), None),
            AppError::ConnectionError(_) => ("The database is unavailable".to_string(), None),
            AppError::DatabaseError(_) | AppError::MigrationError(_) => {
                ("A database error occurred".to_string(), None)
            }
        };

        error_response(code, public_message, details, status)
    }
}
