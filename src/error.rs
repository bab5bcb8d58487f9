//! Defines the app level error type and conversions to rendered HTML pages, alerts and JSON.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::{
    alert::Alert,
    error_page::ErrorPage,
    transaction::{TransactionId, ValidationErrors},
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The requested page does not exist.
    #[error("the requested resource could not be found")]
    NotFound,

    /// No transaction in the ledger has the given ID.
    ///
    /// The client should refresh the page, the transaction may have been
    /// deleted since the page was loaded.
    #[error("transaction {0} is not in the ledger")]
    TransactionNotFound(TransactionId),

    /// Two transactions used to seed the ledger share an ID.
    #[error("the transaction ID {0} is used more than once")]
    DuplicateTransactionId(TransactionId),

    /// A submitted transaction failed validation.
    #[error("invalid transaction: {0}")]
    InvalidTransaction(ValidationErrors),

    /// A filter selector had a value that is not one of its options.
    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    /// The ledger config file could not be read or parsed.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The seed file could not be read or parsed.
    #[error("invalid seed data: {0}")]
    InvalidSeed(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// Could not acquire the ledger lock
    #[error("could not acquire the ledger lock")]
    LedgerLockError,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound | Error::TransactionNotFound(_) => ErrorPage::NotFound.into_response(),
            Error::InvalidTimezoneError(timezone) => ErrorPage::Internal {
                description: "Invalid Timezone Settings".to_owned(),
                fix: format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::LedgerLockError => ErrorPage::internal().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                ErrorPage::internal().into_response()
            }
        }
    }
}

/// The body of a JSON API error response.
#[derive(Debug, Serialize)]
pub struct ErrorMessage {
    /// A description of what went wrong, suitable for showing to the user.
    pub message: String,
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::NotFound | Error::TransactionNotFound(_) => StatusCode::NOT_FOUND,
            Error::InvalidTransaction(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::InvalidFilter(_) | Error::DuplicateTransactionId(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let status_code = self.status_code();
        let alert = match self {
            Error::InvalidTimezoneError(timezone) => Alert::Error {
                message: "Invalid Timezone Settings".to_owned(),
                details: format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            },
            Error::TransactionNotFound(id) => Alert::Error {
                message: "Could not find transaction".to_owned(),
                details: format!(
                    "Transaction {id} could not be found. \
                    Try refreshing the page to see if the transaction has already been deleted."
                ),
            },
            Error::InvalidFilter(details) => Alert::Error {
                message: "Invalid filter".to_owned(),
                details,
            },
            Error::InvalidTransaction(errors) => Alert::Error {
                message: "Invalid transaction".to_owned(),
                details: errors.to_string(),
            },
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                Alert::Error {
                    message: "Something went wrong".to_owned(),
                    details:
                        "An unexpected error occurred, check the server logs for more details."
                            .to_owned(),
                }
            }
        };

        (status_code, alert.into_html()).into_response()
    }

    /// Convert the error into an HTTP response with a JSON `{"message": ...}` body.
    pub fn into_json_response(self) -> Response {
        let status_code = self.status_code();
        let message = match self {
            Error::InvalidTransaction(errors) => errors.to_string(),
            error @ (Error::NotFound
            | Error::TransactionNotFound(_)
            | Error::InvalidFilter(_)
            | Error::DuplicateTransactionId(_)) => error.to_string(),
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                "An unexpected error occurred, check the server logs for more details.".to_owned()
            }
        };

        (status_code, Json(ErrorMessage { message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::Value;

    use crate::{
        Error,
        transaction::{TransactionId, form::TransactionForm},
    };

    #[tokio::test]
    async fn json_response_carries_message_and_status() {
        let response = Error::TransactionNotFound(TransactionId::new("42")).into_json_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "transaction 42 is not in the ledger");
    }

    #[tokio::test]
    async fn validation_errors_are_unprocessable() {
        let errors = TransactionForm::default().validate().unwrap_err();

        let response = Error::InvalidTransaction(errors).into_json_response();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert!(
            json["message"]
                .as_str()
                .unwrap()
                .contains("Amount is required.")
        );
    }

    #[test]
    fn alert_status_codes() {
        let cases = [
            (Error::InvalidFilter("bad".to_owned()), StatusCode::BAD_REQUEST),
            (
                Error::TransactionNotFound(TransactionId::new("1")),
                StatusCode::NOT_FOUND,
            ),
            (Error::LedgerLockError, StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, want) in cases {
            assert_eq!(error.into_alert_response().status(), want);
        }
    }
}
