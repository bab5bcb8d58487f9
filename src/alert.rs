//! Alert messages shown to the user after an action succeeds or fails.
//!
//! Alerts are swapped out-of-band into the `#alert-container` element of the
//! base page, so they can be appended to any htmx response.

use axum::response::Html;
use maud::{Markup, html};

/// An alert message. Errors also say what to do about them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alert {
    Success { message: String },
    Error { message: String, details: String },
}

impl Alert {
    /// Render the alert as an out-of-band swap for the alert container.
    pub fn into_markup(self) -> Markup {
        let (is_success, message, details) = match self {
            Alert::Success { message } => (true, message, String::new()),
            Alert::Error { message, details } => (false, message, details),
        };

        let colour_style = if is_success {
            "text-green-800 bg-green-50 border-green-300 dark:bg-gray-800 \
            dark:text-green-400 dark:border-green-800"
        } else {
            "text-red-800 bg-red-50 border-red-300 dark:bg-gray-800 \
            dark:text-red-400 dark:border-red-800"
        };

        html! {
            div
                id="alert-container"
                hx-swap-oob="true"
                class="w-full max-w-md px-4"
                style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            {
                div
                    role="alert"
                    data-alert-kind=(if is_success { "success" } else { "error" })
                    class={ "flex items-start gap-3 p-4 text-sm border rounded " (colour_style) }
                {
                    div class="flex-1"
                    {
                        p class="font-medium alert-message" { (message) }

                        @if !details.is_empty() {
                            p class="mt-1 alert-details" { (details) }
                        }
                    }

                    button
                        type="button"
                        aria-label="Dismiss"
                        class="ms-auto"
                        onclick="this.closest('[role=alert]').remove()"
                    {
                        "×"
                    }
                }
            }
        }
    }

    pub fn into_html(self) -> Html<String> {
        Html(self.into_markup().into_string())
    }
}
