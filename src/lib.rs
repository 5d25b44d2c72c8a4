//! Clientele is a web app for managing a customer database along with the
//! product and category records that go with it.
//!
//! This library provides a REST server with two surfaces: a JSON resource API
//! under `/api/*` and HTML pages for browsing and editing customers.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use time::Date;
use tokio::signal;

mod alert;
mod api;
mod app_state;
mod category;
mod customer;
mod db;
mod endpoints;
mod html;
mod internal_server_error;
mod logging;
mod member_tier;
mod navigation;
mod not_found;
mod pagination;
mod product;
mod routing;
#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use logging::logging_middleware;
pub use pagination::PaginationConfig;
pub use routing::build_router;

use crate::{
    alert::{Alert, render},
    internal_server_error::render_internal_server_error,
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal,
/// whichever comes first, and then signals the server to shut down
/// gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// Read a port number from the environment variable `env_var`, falling back
/// to `default` if the variable is unset or does not parse as a port.
pub fn parse_port_or_default(env_var: &str, default: u16) -> u16 {
    std::env::var(env_var)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty string was used to create a category name.
    #[error("Category name cannot be empty")]
    EmptyCategoryName,

    /// An empty string was used to create a customer name.
    #[error("Customer name cannot be empty")]
    EmptyCustomerName,

    /// An empty string was used to create a product name.
    #[error("Product name cannot be empty")]
    EmptyProductName,

    /// A name submitted through a form was shorter than the minimum length.
    ///
    /// This rule only applies to the browser forms. The JSON API accepts any
    /// non-empty name, the same as the store schema.
    #[error("Name must be at least 2 characters")]
    NameTooShort,

    /// A date string submitted through a form could not be parsed.
    #[error("\"{0}\" is not a valid date")]
    InvalidDate(String),

    /// A date of birth in the future was submitted through the add customer
    /// form.
    ///
    /// Customers cannot be born later than today. Only the add form enforces
    /// this; the edit form and the JSON API accept any date.
    #[error("{0} is a date in the future, which is not allowed")]
    FutureDateOfBirth(Date),

    /// The member tier selected in a form was not one of the known tiers.
    #[error("\"{0}\" is not a valid member tier, expected a number from 1 to 4")]
    InvalidMemberTier(String),

    /// The member number already exists in the database.
    ///
    /// Member numbers carry a UNIQUE constraint that is enforced by the
    /// store, not the API, so this error surfaces from the SQL layer rather
    /// than from input validation.
    #[error("the member number already exists in the database")]
    DuplicateMemberNumber,

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the
    /// parameters (e.g., ID) are correct and that the resource has been
    /// created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to update a category that does not exist
    #[error("tried to update a category that is not in the database")]
    UpdateMissingCategory,

    /// Tried to delete a category that does not exist
    #[error("tried to delete a category that is not in the database")]
    DeleteMissingCategory,

    /// Tried to update a customer that does not exist
    #[error("tried to update a customer that is not in the database")]
    UpdateMissingCustomer,

    /// Tried to delete a customer that does not exist
    #[error("tried to delete a customer that is not in the database")]
    DeleteMissingCustomer,

    /// Tried to update a product that does not exist
    #[error("tried to update a product that is not in the database")]
    UpdateMissingProduct,

    /// Tried to delete a product that does not exist
    #[error("tried to delete a product that is not in the database")]
    DeleteMissingProduct,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067
                    && desc.ends_with("customer.member_number") =>
            {
                Error::DuplicateMemberNumber
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            // Any errors that are not handled above are not intended to be
            // shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                render_internal_server_error()
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        match self {
            Error::NameTooShort
            | Error::EmptyCategoryName
            | Error::EmptyCustomerName
            | Error::EmptyProductName => render(
                StatusCode::BAD_REQUEST,
                Alert::error("Invalid name", &self.to_string()),
            ),
            Error::InvalidDate(_) | Error::FutureDateOfBirth(_) => render(
                StatusCode::BAD_REQUEST,
                Alert::error("Invalid date of birth", &self.to_string()),
            ),
            Error::InvalidMemberTier(_) => render(
                StatusCode::BAD_REQUEST,
                Alert::error("Invalid member tier", &self.to_string()),
            ),
            Error::DuplicateMemberNumber => render(
                StatusCode::BAD_REQUEST,
                Alert::error(
                    "Duplicate member number",
                    "That member number is already in use. \
                    Choose a different member number, or edit the existing customer.",
                ),
            ),
            Error::UpdateMissingCustomer => render(
                StatusCode::NOT_FOUND,
                Alert::error(
                    "Could not update customer",
                    "The customer could not be found.",
                ),
            ),
            Error::DeleteMissingCustomer => render(
                StatusCode::NOT_FOUND,
                Alert::error(
                    "Could not delete customer",
                    "The customer could not be found. \
                    Try refreshing the page to see if the customer has already been deleted.",
                ),
            ),
            _ => render(
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::error(
                    "Something went wrong",
                    "An unexpected error occurred, check the server logs for more details.",
                ),
            ),
        }
    }
}
