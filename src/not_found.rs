//! The 404 page.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::html;

use crate::{
    endpoints,
    html::{LINK_STYLE, PAGE_CONTAINER_STYLE, base},
};

/// Handler for routes that do not match anything else.
pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}

/// Get a response containing the 404 page.
pub fn get_404_not_found_response() -> Response {
    let content = html! {
        main class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-4xl font-bold" { "404" }
            p class="mt-2" { "The page you are looking for does not exist." }
            a href=(endpoints::CUSTOMERS_VIEW) class=(LINK_STYLE) { "Back to customers" }
        }
    };

    (StatusCode::NOT_FOUND, base("Not Found", &content)).into_response()
}
