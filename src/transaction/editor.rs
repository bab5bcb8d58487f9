//! Handlers that open and close the transaction editor.

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
};

use crate::app_state::LedgerState;

use super::{core::TransactionId, view::editor_view};

/// Open the editor for a new transaction, prefilled with today's date.
pub async fn get_new_transaction_editor(State(state): State<LedgerState>) -> Response {
    let now = match state.now() {
        Ok(now) => now,
        Err(error) => return error.into_alert_response(),
    };
    let mut ledger = match state.lock() {
        Ok(ledger) => ledger,
        Err(error) => return error.into_alert_response(),
    };

    let fields = ledger.open_add_editor(now);

    Html(editor_view(ledger.editor(), &fields, None, &state.config).into_string()).into_response()
}

/// Open the editor bound to an existing transaction.
pub async fn get_edit_transaction_editor(
    State(state): State<LedgerState>,
    Path(transaction_id): Path<String>,
) -> Response {
    let mut ledger = match state.lock() {
        Ok(ledger) => ledger,
        Err(error) => return error.into_alert_response(),
    };

    match ledger.open_edit_editor(&TransactionId::new(transaction_id)) {
        Ok(fields) => {
            Html(editor_view(ledger.editor(), &fields, None, &state.config).into_string())
                .into_response()
        }
        Err(error) => error.into_alert_response(),
    }
}

/// Close the editor, discarding its contents.
pub async fn cancel_editor(State(state): State<LedgerState>) -> Response {
    match state.lock() {
        Ok(mut ledger) => {
            ledger.cancel_editor();
            Html(String::new()).into_response()
        }
        Err(error) => error.into_alert_response(),
    }
}
