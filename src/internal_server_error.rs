//! The 500 page.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::html;

use crate::{
    endpoints,
    html::{LINK_STYLE, PAGE_CONTAINER_STYLE, base},
};

/// Get a response containing the generic 500 page.
///
/// The underlying cause is never included; it belongs in the server logs.
pub fn render_internal_server_error() -> Response {
    let content = html! {
        main class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-4xl font-bold" { "500" }
            p class="mt-2" { "Sorry, something went wrong." }
            p { "Try again later or check the server logs." }
            a href=(endpoints::CUSTOMERS_VIEW) class=(LINK_STYLE) { "Back to customers" }
        }
    };

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        base("Internal Server Error", &content),
    )
        .into_response()
}
