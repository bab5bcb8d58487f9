//! Full error pages for requests that expect a page rather than a fragment.
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

/// A full HTML error page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorPage {
    /// The route or transaction does not exist.
    NotFound,
    /// Something went wrong on the server.
    Internal { description: String, fix: String },
}

impl ErrorPage {
    /// The generic 500 page.
    pub fn internal() -> Self {
        Self::Internal {
            description: "Sorry, something went wrong.".to_owned(),
            fix: "Try again later or check the server logs".to_owned(),
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ErrorPage::NotFound => StatusCode::NOT_FOUND,
            ErrorPage::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn into_html(self) -> Html<String> {
        let markup = match self {
            ErrorPage::NotFound => error_view(
                "Not Found",
                "404",
                "Something's missing.",
                "Sorry, we can't find that page. Check the address or head back to your transactions.",
            ),
            ErrorPage::Internal { description, fix } => {
                error_view("Internal Server Error", "500", &description, &fix)
            }
        };

        Html(markup.into_string())
    }
}

impl IntoResponse for ErrorPage {
    fn into_response(self) -> Response {
        (self.status_code(), self.into_html()).into_response()
    }
}

/// The fallback handler for unknown routes.
pub async fn get_404_not_found() -> Response {
    ErrorPage::NotFound.into_response()
}
