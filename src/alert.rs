//! Dismissable alert fragments for form endpoints.
//!
//! Form endpoints respond to htmx requests, so errors are rendered as HTML
//! fragments that the response-targets extension swaps into the page's
//! alert container.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

/// A success or error message shown at the top of the page.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// A green confirmation message.
    Success {
        message: String,
    },
    /// A red error message with optional detail text.
    Error {
        message: String,
        details: String,
    },
}

impl Alert {
    /// Create a success alert.
    pub fn success(message: &str) -> Self {
        Self::Success {
            message: message.to_owned(),
        }
    }

    /// Create an error alert.
    pub fn error(message: &str, details: &str) -> Self {
        Self::Error {
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    fn into_html(self) -> Markup {
        let (container_style, message, details) = match self {
            Alert::Success { message } => (
                "p-4 mb-4 rounded-lg bg-green-50 text-green-800 \
                dark:bg-gray-800 dark:text-green-400 shadow",
                message,
                String::new(),
            ),
            Alert::Error { message, details } => (
                "p-4 mb-4 rounded-lg bg-red-50 text-red-800 \
                dark:bg-gray-800 dark:text-red-400 shadow",
                message,
                details,
            ),
        };

        html! {
            div class=(container_style) role="alert"
            {
                div class="flex items-start justify-between gap-4"
                {
                    div
                    {
                        p class="font-medium" { (message) }

                        @if !details.is_empty() {
                            p class="mt-1 text-sm" { (details) }
                        }
                    }

                    button
                        type="button"
                        class="font-bold"
                        aria-label="Dismiss"
                        onclick="this.closest('[role=alert]').remove()"
                    {
                        "\u{00d7}"
                    }
                }
            }
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_html().into_response()
    }
}

/// Render `alert` as an HTML fragment response with the given status code.
pub fn render(status_code: StatusCode, alert: Alert) -> Response {
    (status_code, alert.into_html()).into_response()
}
