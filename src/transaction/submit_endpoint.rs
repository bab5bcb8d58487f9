//! Handles the editor form: adds a new transaction or saves an edit.

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use maud::html;

use crate::{alert::Alert, app_state::LedgerState};

use super::{
    form::{EditorFields, TransactionForm},
    ledger::Submission,
    view::{closed_editor_oob, editor_view, transaction_table_view},
};

/// Submit the editor.
///
/// On success the response is the re-rendered table, with the editor closed
/// and an alert swapped in out-of-band. If the form is invalid, the editor is
/// returned with a 422 status and inline error messages.
pub async fn submit_transaction_endpoint(
    State(state): State<LedgerState>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let now = match state.now() {
        Ok(now) => now,
        Err(error) => return error.into_alert_response(),
    };
    let mut ledger = match state.lock() {
        Ok(ledger) => ledger,
        Err(error) => return error.into_alert_response(),
    };

    let (submission, view) = match ledger.submit(&form, now) {
        Ok(result) => result,
        Err(errors) => {
            tracing::debug!("Rejected transaction form: {errors}");
            let editor = editor_view(
                ledger.editor(),
                &EditorFields::from_form(&form),
                Some(&errors),
                &state.config,
            );
            return (StatusCode::UNPROCESSABLE_ENTITY, Html(editor.into_string())).into_response();
        }
    };

    let alert = match submission {
        Submission::Added(record) => Some(Alert::Success {
            message: format!(
                "Transaction of {}{} saved and added to the list!",
                state.config.currency.symbol, record.amount
            ),
        }),
        Submission::Updated(record) => Some(Alert::Success {
            message: format!("Transaction ID {} successfully updated!", record.id),
        }),
        // The ledger has already logged the dropped edit.
        Submission::Dropped(_) => None,
    };

    Html(
        html! {
            (transaction_table_view(&view, &state.config))
            (closed_editor_oob())
            @if let Some(alert) = alert {
                (alert.into_markup())
            }
        }
        .into_string(),
    )
    .into_response()
}
