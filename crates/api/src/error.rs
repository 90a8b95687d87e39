//! Mapping of domain errors to JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde_json::json;
use tracing::error;

use claimdesk_core::dimension::DimensionError;
use claimdesk_core::expense::ExpenseError;
use claimdesk_shared::AppError;

/// Error returned by handlers.
///
/// Renders as `{"error": code, "title": title, "message": message}`.
#[derive(Debug)]
pub struct ApiError {
    error: AppError,
    title: &'static str,
}

impl ApiError {
    /// Wraps an application error with the default title.
    #[must_use]
    pub const fn new(error: AppError) -> Self {
        Self {
            error,
            title: "Error",
        }
    }

    /// Sets the title shown with the message.
    #[must_use]
    pub const fn with_title(mut self, title: &'static str) -> Self {
        self.title = title;
        self
    }

    /// The 403 response for role checks.
    #[must_use]
    pub fn not_permitted() -> Self {
        Self::new(AppError::Forbidden("Not permitted".to_string())).with_title("Not Permitted")
    }

    /// HTTP status of the response.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// The wrapped application error.
    #[must_use]
    pub const fn inner(&self) -> &AppError {
        &self.error
    }
}

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        Self::new(error)
    }
}

impl From<DbErr> for ApiError {
    fn from(e: DbErr) -> Self {
        Self::new(AppError::Database(e.to_string()))
    }
}

impl From<ExpenseError> for ApiError {
    fn from(e: ExpenseError) -> Self {
        let title = e.title();
        let message = e.to_string();
        let error = match e {
            ExpenseError::NotFound(_) => AppError::NotFound(message),
            ExpenseError::DuplicateJournalEntry(_) => AppError::Conflict(message),
            ExpenseError::NotPermitted(_) => AppError::Forbidden(message),
            ExpenseError::NegativeAmount { .. }
            | ExpenseError::AmountPrecision { .. }
            | ExpenseError::AmountOutOfRange { .. }
            | ExpenseError::TotalOutOfRange { .. }
            | ExpenseError::MissingDimension { .. }
            | ExpenseError::PaymentReferenceRequired => AppError::Validation(message),
            ExpenseError::InvalidTransition { .. }
            | ExpenseError::CannotModify(_)
            | ExpenseError::PaymentAccountMissing { .. }
            | ExpenseError::Ledger(_) => AppError::BusinessRule(message),
            ExpenseError::Database(detail) => AppError::Database(detail),
        };

        Self::new(error).with_title(title)
    }
}

impl From<DimensionError> for ApiError {
    fn from(e: DimensionError) -> Self {
        let message = e.to_string();
        let error = match e {
            DimensionError::NotFound(_) => AppError::NotFound(message),
            DimensionError::Duplicate(_) => AppError::Conflict(message),
            DimensionError::InvalidFieldname(_) => AppError::Validation(message),
            DimensionError::NotPermitted => return Self::not_permitted(),
            DimensionError::FieldCreation { .. } => AppError::Internal(message),
            DimensionError::Database(detail) => AppError::Database(detail),
        };

        Self::new(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self.error {
            AppError::Database(detail) => {
                error!(error = %detail, "Database error");
                "An error occurred".to_string()
            }
            other => {
                if status.is_server_error() {
                    error!(error = %other, "Request failed");
                }
                other.message().to_string()
            }
        };

        (
            status,
            Json(json!({
                "error": self.error.error_code().to_ascii_lowercase(),
                "title": self.title,
                "message": message
            })),
        )
            .into_response()
    }
}
