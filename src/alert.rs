//! Alert system for displaying success and error messages to users.
//!
//! Alerts are rendered as HTML fragments that htmx swaps into the page's
//! `#alert-container`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

/// A dismissible message shown after an htmx request.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// A success message with no details.
    SuccessSimple { message: String },
    /// An error message with details.
    Error { message: String, details: String },
}

impl Alert {
    /// Render the alert.
    pub fn into_html(self) -> Markup {
        let (is_error, message, details) = match self {
            Alert::SuccessSimple { message } => (false, message, String::new()),
            Alert::Error { message, details } => (true, message, details),
        };

        let style = if is_error {
            "flex items-start p-4 mb-4 rounded-lg border text-red-800 border-red-300 \
            bg-red-50 dark:bg-gray-800 dark:text-red-400 dark:border-red-800"
        } else {
            "flex items-start p-4 mb-4 rounded-lg border text-green-800 border-green-300 \
            bg-green-50 dark:bg-gray-800 dark:text-green-400 dark:border-green-800"
        };

        // Template adapted from https://flowbite.com/docs/components/alerts/
        html! {
            div class=(style) role="alert"
            {
                div class="flex-1"
                {
                    p class="font-medium" { (message) }

                    @if !details.is_empty() {
                        p class="mt-1 text-sm" { (details) }
                    }
                }

                button
                    type="button"
                    aria-label="Dismiss"
                    class="ms-3 -mx-1.5 -my-1.5 rounded-lg p-1.5 inline-flex \
                        items-center justify-center h-8 w-8 hover:opacity-75"
                    onclick="this.closest('#alert-container').classList.add('hidden')"
                {
                    "✕"
                }
            }
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        (StatusCode::OK, self.into_html()).into_response()
    }
}
