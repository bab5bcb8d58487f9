//! JSON endpoints for reading and changing the ledger without the page.
//!
//! Errors are returned as `{"message": "..."}` with a 4xx or 5xx status.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use time::OffsetDateTime;

use crate::{Error, app_state::LedgerState, error::ErrorMessage};

use super::{
    core::{TransactionId, TransactionRecord},
    form::{TransactionForm, TransactionPayload},
    ledger::Ledger,
};

/// List every transaction in store order.
pub async fn list_transactions_json(State(state): State<LedgerState>) -> Response {
    match state.lock() {
        Ok(ledger) => Json(ledger.records().to_vec()).into_response(),
        Err(error) => error.into_json_response(),
    }
}

/// Create a transaction and return it with its new ID.
pub async fn create_transaction_json(
    State(state): State<LedgerState>,
    payload: Result<Json<TransactionPayload>, JsonRejection>,
) -> Response {
    let form = match payload {
        Ok(Json(payload)) => TransactionForm::from(payload),
        Err(rejection) => return rejection_response(rejection),
    };

    match with_ledger(&state, |ledger, now| ledger.create(&form, now)) {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(error) => error.into_json_response(),
    }
}

/// Replace the transaction `transaction_id` and return the stored record.
pub async fn update_transaction_json(
    State(state): State<LedgerState>,
    Path(transaction_id): Path<String>,
    payload: Result<Json<TransactionPayload>, JsonRejection>,
) -> Response {
    let form = match payload {
        Ok(Json(payload)) => TransactionForm::from(payload),
        Err(rejection) => return rejection_response(rejection),
    };
    let id = TransactionId::new(transaction_id);

    match with_ledger(&state, |ledger, now| ledger.update(&id, &form, now)) {
        Ok(record) => Json(record).into_response(),
        Err(error) => error.into_json_response(),
    }
}

/// Delete the transaction `transaction_id`.
pub async fn delete_transaction_json(
    State(state): State<LedgerState>,
    Path(transaction_id): Path<String>,
) -> Response {
    let id = TransactionId::new(transaction_id);

    match with_ledger(&state, |ledger, now| ledger.remove(&id, now)) {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error.into_json_response(),
    }
}

fn with_ledger(
    state: &LedgerState,
    operation: impl FnOnce(&mut Ledger, OffsetDateTime) -> Result<TransactionRecord, Error>,
) -> Result<TransactionRecord, Error> {
    let now = state.now()?;
    let mut ledger = state.lock()?;

    operation(&mut ledger, now)
}

fn rejection_response(rejection: JsonRejection) -> Response {
    tracing::debug!("Rejected JSON body: {rejection}");

    (
        rejection.status(),
        Json(ErrorMessage {
            message: rejection.body_text(),
        }),
    )
        .into_response()
}
