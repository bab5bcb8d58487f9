//! Handlers for the transactions page and its table fragment.

use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Response},
};

use time::OffsetDateTime;

use crate::{Error, app_state::LedgerState};

use super::{
    filter::{FilterQuery, TransactionFilter},
    ledger::{Ledger, LedgerView},
    view::{transaction_table_view, transactions_page_view},
};

/// Render the full transactions page.
///
/// A page load starts from a clean slate: no filters, newest first and the
/// editor closed.
pub async fn get_transactions_page(State(state): State<LedgerState>) -> Response {
    let now = match state.now() {
        Ok(now) => now,
        Err(error) => return error.into_response(),
    };
    let mut ledger = match state.lock() {
        Ok(ledger) => ledger,
        Err(error) => return error.into_response(),
    };

    ledger.reset_view();
    let view = ledger.view(now);

    Html(transactions_page_view(&view, ledger.filter(), &state.config).into_string())
        .into_response()
}

/// Apply the filter selectors in the query string and render the table.
pub async fn get_transaction_table(
    State(state): State<LedgerState>,
    Query(query): Query<FilterQuery>,
) -> Response {
    render_table(&state, |ledger, now| {
        let filter = TransactionFilter::try_from(query)?;
        Ok(ledger.set_filter(filter, now))
    })
}

/// Flip the date sort order and render the table.
pub async fn sort_transactions(State(state): State<LedgerState>) -> Response {
    render_table(&state, |ledger, now| Ok(ledger.toggle_sort(now)))
}

/// Re-apply the current filter and sort and render the table.
pub async fn refresh_transactions(State(state): State<LedgerState>) -> Response {
    render_table(&state, |ledger, now| Ok(ledger.refresh(now)))
}

fn render_table(
    state: &LedgerState,
    update: impl FnOnce(&mut Ledger, OffsetDateTime) -> Result<LedgerView, Error>,
) -> Response {
    let result = state.now().and_then(|now| {
        let mut ledger = state.lock()?;
        update(&mut ledger, now)
    });

    match result {
        Ok(view) => Html(transaction_table_view(&view, &state.config).into_string()).into_response(),
        Err(error) => error.into_alert_response(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Query, State},
        http::StatusCode,
    };
    use scraper::{ElementRef, Html, Selector};
    use time::macros::date;

    use crate::{
        app_state::LedgerState,
        config::LedgerConfig,
        test_utils::{
            assert_content_type, assert_status_ok, assert_valid_html, parse_html_document,
            parse_html_fragment,
        },
        transaction::{
            Ledger,
            core::{TransactionId, TransactionRecord, TransactionType},
            filter::{FilterQuery, Selection, TransactionFilter},
            sort::SortOrder,
        },
    };

    use super::{
        get_transaction_table, get_transactions_page, refresh_transactions, sort_transactions,
    };

    fn record(id: &str, date: time::Date, transaction_type: TransactionType) -> TransactionRecord {
        TransactionRecord {
            id: TransactionId::new(id),
            date,
            description: format!("transaction {id}"),
            transaction_type,
            category: "food".to_owned(),
            account: "cash".to_owned(),
            amount: 10.0,
            recurring: false,
        }
    }

    fn get_test_state() -> LedgerState {
        let mut ledger = Ledger::new();
        ledger
            .seed(vec![
                record("1", date!(2025 - 01 - 01), TransactionType::Income),
                record("2", date!(2025 - 02 - 01), TransactionType::Expense),
            ])
            .unwrap();

        LedgerState {
            ledger: Arc::new(Mutex::new(ledger)),
            local_timezone: "Etc/UTC".to_owned(),
            config: Arc::new(LedgerConfig::default()),
        }
    }

    fn visible_row_ids(html: &Html) -> Vec<String> {
        html.select(&Selector::parse("tr.transaction-row:not([hidden])").unwrap())
            .filter_map(|row: ElementRef<'_>| row.value().attr("data-id").map(str::to_owned))
            .collect()
    }

    #[tokio::test]
    async fn page_load_resets_filter_and_sort() {
        let state = get_test_state();
        {
            let mut ledger = state.ledger.lock().unwrap();
            ledger.set_filter(
                TransactionFilter {
                    transaction_type: Selection::Only(TransactionType::Expense),
                    ..Default::default()
                },
                time::OffsetDateTime::now_utc(),
            );
            ledger.toggle_sort(time::OffsetDateTime::now_utc());
        }

        let response = get_transactions_page(State(state.clone())).await;

        assert_status_ok(&response);
        assert_content_type(&response, "text/html; charset=utf-8");
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        assert_eq!(visible_row_ids(&html), ["2", "1"]);
        let ledger = state.ledger.lock().unwrap();
        assert_eq!(ledger.sort_order(), SortOrder::Descending);
        assert!(ledger.filter().is_unrestricted());
    }

    #[tokio::test]
    async fn table_applies_filter_query() {
        let state = get_test_state();
        let query = FilterQuery {
            transaction_type: Some("income".to_owned()),
            ..Default::default()
        };

        let response = get_transaction_table(State(state), Query(query)).await;

        assert_status_ok(&response);
        let html = parse_html_fragment(response).await;
        assert_eq!(visible_row_ids(&html), ["1"]);
    }

    #[tokio::test]
    async fn invalid_filter_is_bad_request() {
        let query = FilterQuery {
            range: Some("next-year".to_owned()),
            ..Default::default()
        };

        let response = get_transaction_table(State(get_test_state()), Query(query)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn sort_toggles_order() {
        let state = get_test_state();

        let response = sort_transactions(State(state.clone())).await;

        let html = parse_html_fragment(response).await;
        assert_eq!(visible_row_ids(&html), ["1", "2"]);

        let response = refresh_transactions(State(state)).await;

        let html = parse_html_fragment(response).await;
        assert_eq!(visible_row_ids(&html), ["1", "2"]);
    }

    #[tokio::test]
    async fn invalid_timezone_is_an_error_alert() {
        let state = LedgerState {
            local_timezone: "Not/AZone".to_owned(),
            ..get_test_state()
        };

        let response = refresh_transactions(State(state)).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
