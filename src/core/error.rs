//! HTTP error handling

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{error, warn};

use crate::infrastructure::store::StoreError;

pub const NOT_CONFIGURED_ERROR: &str = "Database not configured";
pub const NOT_CONFIGURED_MESSAGE: &str = "Please configure MONGODB_URI in your .env.local file";

/// The record service operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::List => "Failed to fetch foods",
            Operation::Create => "Failed to create food",
            Operation::Update => "Failed to update food",
            Operation::Delete => "Failed to delete food",
        }
    }

    /// List and create failures carry the raw diagnostic back to the client.
    fn reports_details(self) -> bool {
        matches!(self, Operation::List | Operation::Create)
    }
}

#[derive(Debug)]
pub enum CoreError {
    BadRequest(String),
    NotConfigured(Operation),
    OperationFailed { operation: Operation, details: String },
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl CoreError {
    pub fn failed(operation: Operation, err: impl std::fmt::Display) -> Self {
        CoreError::OperationFailed {
            operation,
            details: err.to_string(),
        }
    }

    /// Maps a store failure, upgrading configuration problems for list and create.
    pub fn store(operation: Operation, err: StoreError) -> Self {
        if err.is_not_configured() && operation.reports_details() {
            error!(?operation, "store not configured: {}", err);
            CoreError::NotConfigured(operation)
        } else {
            CoreError::failed(operation, err)
        }
    }
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            CoreError::BadRequest(details) => {
                warn!("rejected request: {}", details);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Invalid request".to_string(),
                        message: None,
                        details: Some(details),
                    },
                )
            }
            CoreError::NotConfigured(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: NOT_CONFIGURED_ERROR.to_string(),
                    message: Some(NOT_CONFIGURED_MESSAGE.to_string()),
                    details: None,
                },
            ),
            CoreError::OperationFailed { operation, details } => {
                error!(?operation, "{}: {}", operation.failure_message(), details);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: operation.failure_message().to_string(),
                        message: None,
                        details: operation.reports_details().then_some(details),
                    },
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<JsonRejection> for CoreError {
    fn from(rejection: JsonRejection) -> Self {
        CoreError::BadRequest(rejection.body_text())
    }
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(err: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = err
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    error
                        .message
                        .as_ref()
                        .map(|msg| msg.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field))
                })
            })
            .collect();
        messages.sort();

        CoreError::BadRequest(messages.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: CoreError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn not_configured_only_upgrades_list_and_create() {
        let err = || StoreError::NotConfigured("bad uri".to_string());
        assert!(matches!(
            CoreError::store(Operation::List, err()),
            CoreError::NotConfigured(Operation::List)
        ));
        assert!(matches!(
            CoreError::store(Operation::Create, err()),
            CoreError::NotConfigured(Operation::Create)
        ));
        assert!(matches!(
            CoreError::store(Operation::Delete, err()),
            CoreError::OperationFailed { operation: Operation::Delete, .. }
        ));
    }

    #[test]
    fn other_store_errors_are_generic_failures() {
        let err = StoreError::UnexpectedId("42".to_string());
        assert!(matches!(
            CoreError::store(Operation::List, err),
            CoreError::OperationFailed { operation: Operation::List, .. }
        ));
    }

    #[test]
    fn statuses() {
        assert_eq!(status_of(CoreError::BadRequest("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(CoreError::NotConfigured(Operation::List)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(CoreError::failed(Operation::Update, "boom")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
