//! Handles deleting a transaction from the table.

use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Response},
};
use maud::html;
use serde::Deserialize;

use crate::{alert::Alert, app_state::LedgerState};

use super::{
    core::TransactionId,
    ledger::Deletion,
    view::{closed_editor_oob, transaction_table_view},
};

/// The query string of a delete request.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteQuery {
    /// Set to `true` once the user has confirmed the deletion.
    #[serde(default)]
    pub confirm: bool,
}

/// Delete a transaction and render the table.
///
/// Without `confirm=true` the request is treated as a declined confirmation
/// and nothing changes. Deleting a missing ID re-renders the table unchanged.
pub async fn delete_transaction_endpoint(
    State(state): State<LedgerState>,
    Path(transaction_id): Path<String>,
    Query(query): Query<DeleteQuery>,
) -> Response {
    let now = match state.now() {
        Ok(now) => now,
        Err(error) => return error.into_alert_response(),
    };
    let mut ledger = match state.lock() {
        Ok(ledger) => ledger,
        Err(error) => return error.into_alert_response(),
    };

    let (deletion, view) = ledger.delete(&TransactionId::new(transaction_id), query.confirm, now);
    let table = transaction_table_view(&view, &state.config);

    let markup = match deletion {
        Deletion::Deleted(_) => html! {
            (table)
            (closed_editor_oob())
            (Alert::Success { message: "Transaction deleted!".to_owned() }.into_markup())
        },
        Deletion::Missing(_) | Deletion::Cancelled => table,
    };

    Html(markup.into_string()).into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::{Path, Query, State};
    use scraper::Selector;
    use time::macros::date;

    use crate::{
        app_state::LedgerState,
        config::LedgerConfig,
        test_utils::{assert_status_ok, parse_html_fragment},
        transaction::{
            Ledger,
            core::{TransactionId, TransactionRecord, TransactionType},
        },
    };

    use super::{DeleteQuery, delete_transaction_endpoint};

    fn get_test_state() -> LedgerState {
        let records = ["1", "2"]
            .into_iter()
            .map(|id| TransactionRecord {
                id: TransactionId::new(id),
                date: date!(2025 - 06 - 01),
                description: "Coffee".to_owned(),
                transaction_type: TransactionType::Expense,
                category: "food".to_owned(),
                account: "cash".to_owned(),
                amount: 4.5,
                recurring: false,
            })
            .collect();
        let mut ledger = Ledger::new();
        ledger.seed(records).unwrap();

        LedgerState {
            ledger: Arc::new(Mutex::new(ledger)),
            local_timezone: "Etc/UTC".to_owned(),
            config: Arc::new(LedgerConfig::default()),
        }
    }

    #[tokio::test]
    async fn confirmed_delete_removes_record() {
        let state = get_test_state();

        let response = delete_transaction_endpoint(
            State(state.clone()),
            Path("1".to_owned()),
            Query(DeleteQuery { confirm: true }),
        )
        .await;

        assert_status_ok(&response);
        let html = parse_html_fragment(response).await;
        let message: String = html
            .select(&Selector::parse(".alert-message").unwrap())
            .next()
            .expect("no alert")
            .text()
            .collect();
        assert_eq!(message, "Transaction deleted!");
        assert_eq!(
            html.select(&Selector::parse("tr.transaction-row").unwrap())
                .count(),
            1
        );
        assert!(
            state
                .ledger
                .lock()
                .unwrap()
                .get(&TransactionId::new("1"))
                .is_none()
        );
    }

    #[tokio::test]
    async fn unconfirmed_delete_changes_nothing() {
        let state = get_test_state();

        let response = delete_transaction_endpoint(
            State(state.clone()),
            Path("1".to_owned()),
            Query(DeleteQuery::default()),
        )
        .await;

        assert_status_ok(&response);
        let html = parse_html_fragment(response).await;
        assert!(
            html.select(&Selector::parse(".alert-message").unwrap())
                .next()
                .is_none()
        );
        assert_eq!(state.ledger.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn deleting_missing_record_is_a_no_op() {
        let state = get_test_state();

        let response = delete_transaction_endpoint(
            State(state.clone()),
            Path("404".to_owned()),
            Query(DeleteQuery { confirm: true }),
        )
        .await;

        assert_status_ok(&response);
        assert_eq!(state.ledger.lock().unwrap().len(), 2);
    }
}
