//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/transactions/{transaction_id}/edit', use [format_endpoint].

/// The root route which redirects to the transactions page.
pub const ROOT: &str = "/";
/// The page for displaying the transaction ledger.
pub const TRANSACTIONS_VIEW: &str = "/transactions";
/// The table fragment, re-rendered with the filter in the query string.
pub const TRANSACTIONS_TABLE: &str = "/transactions/table";
/// The route to flip the date sort order.
pub const SORT_TRANSACTIONS: &str = "/transactions/sort";
/// The route to re-apply the current filter and sort.
pub const REFRESH_TRANSACTIONS: &str = "/transactions/refresh";
/// The editor fragment for adding a transaction.
pub const NEW_TRANSACTION_EDITOR: &str = "/transactions/new";
/// The editor fragment for editing an existing transaction.
pub const EDIT_TRANSACTION_EDITOR: &str = "/transactions/{transaction_id}/edit";
/// The route to close the editor.
pub const CANCEL_EDITOR: &str = "/transactions/editor/cancel";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route the editor form submits to.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to delete a transaction from the table.
pub const DELETE_TRANSACTION: &str = "/api/transactions/{transaction_id}";

/// The JSON route for listing and creating transactions.
pub const TRANSACTIONS_JSON: &str = "/api/v1/transactions";
/// The JSON route for updating and deleting a transaction.
pub const TRANSACTION_JSON: &str = "/api/v1/transactions/{transaction_id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/transactions/{transaction_id}', '{transaction_id}' is the parameter.
///
/// This function assumes that an endpoint path contains a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: &str) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map_or(endpoint_path.len(), |end| param_start + end + 1);

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::format_endpoint;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS_VIEW);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS_TABLE);
        assert_endpoint_is_valid_uri(endpoints::SORT_TRANSACTIONS);
        assert_endpoint_is_valid_uri(endpoints::REFRESH_TRANSACTIONS);
        assert_endpoint_is_valid_uri(endpoints::NEW_TRANSACTION_EDITOR);
        assert_endpoint_is_valid_uri(endpoints::EDIT_TRANSACTION_EDITOR);
        assert_endpoint_is_valid_uri(endpoints::CANCEL_EDITOR);
        assert_endpoint_is_valid_uri(endpoints::STATIC);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS_API);
        assert_endpoint_is_valid_uri(endpoints::DELETE_TRANSACTION);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS_JSON);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTION_JSON);
    }

    #[test]
    fn produces_valid_uri() {
        let formatted_path = format_endpoint("/hello/{world_id}", "1");

        assert_eq!(formatted_path, "/hello/1");
        assert!(formatted_path.parse::<Uri>().is_ok());

        let formatted_path = format_endpoint("/hello/{world}", "1749988800000");

        assert_eq!(formatted_path, "/hello/1749988800000");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        let formatted_path = format_endpoint("/hello/world", "1");

        assert_eq!(formatted_path, "/hello/world");
    }

    #[test]
    fn parameter_in_middle() {
        let formatted_path = format_endpoint(endpoints::EDIT_TRANSACTION_EDITOR, "7");

        assert_eq!(formatted_path, "/transactions/7/edit");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }
}
