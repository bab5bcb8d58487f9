//! Application router configuration.

use axum::{
    Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Redirect, Response},
    routing::{delete, get, post, put},
};
use axum_htmx::{HxRedirect, HxRequest};
use tower_http::services::ServeDir;

use crate::{
    AppState, endpoints,
    error_page::get_404_not_found,
    logging::logging_middleware,
    transaction::{
        cancel_editor, create_transaction_json, delete_transaction_endpoint,
        delete_transaction_json, get_edit_transaction_editor, get_new_transaction_editor,
        get_transaction_table, get_transactions_page, list_transactions_json,
        refresh_transactions, sort_transactions, submit_transaction_endpoint,
        update_transaction_json,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::TRANSACTIONS_VIEW, get(get_transactions_page))
        .route(endpoints::TRANSACTIONS_TABLE, get(get_transaction_table))
        .route(endpoints::SORT_TRANSACTIONS, post(sort_transactions))
        .route(endpoints::REFRESH_TRANSACTIONS, post(refresh_transactions))
        .route(
            endpoints::NEW_TRANSACTION_EDITOR,
            get(get_new_transaction_editor),
        )
        .route(
            endpoints::EDIT_TRANSACTION_EDITOR,
            get(get_edit_transaction_editor),
        )
        .route(endpoints::CANCEL_EDITOR, post(cancel_editor))
        .route(
            endpoints::TRANSACTIONS_API,
            post(submit_transaction_endpoint),
        )
        .route(
            endpoints::DELETE_TRANSACTION,
            delete(delete_transaction_endpoint),
        );

    let json_routes = Router::new()
        .route(
            endpoints::TRANSACTIONS_JSON,
            get(list_transactions_json).post(create_transaction_json),
        )
        .route(
            endpoints::TRANSACTION_JSON,
            put(update_transaction_json).delete(delete_transaction_json),
        );

    page_routes
        .merge(json_routes)
        .layer(middleware::from_fn(logging_middleware))
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the transactions page.
///
/// htmx requests get an `HX-Redirect` header so the browser loads the full page.
async fn get_index_page(HxRequest(is_htmx): HxRequest) -> Response {
    if is_htmx {
        (
            HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
            StatusCode::OK,
        )
            .into_response()
    } else {
        Redirect::to(endpoints::TRANSACTIONS_VIEW).into_response()
    }
}

#[cfg(test)]
mod root_route_tests {
    use axum::http::StatusCode;
    use axum_htmx::{HX_REDIRECT, HxRequest};

    use crate::{endpoints, routing::get_index_page};

    #[tokio::test]
    async fn root_redirects_to_transactions() {
        let response = get_index_page(HxRequest(false)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let location = response.headers().get("location").unwrap();
        assert_eq!(location, endpoints::TRANSACTIONS_VIEW);
    }

    #[tokio::test]
    async fn htmx_root_request_gets_hx_redirect() {
        let response = get_index_page(HxRequest(true)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let location = response.headers().get(HX_REDIRECT).unwrap();
        assert_eq!(location, endpoints::TRANSACTIONS_VIEW);
    }
}
