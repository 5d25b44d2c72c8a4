//! Customer creation page and endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    customer::{
        create_customer,
        form::{
            CustomerFormData, CustomerFormView, FormMethod, customer_form_view,
            parse_customer_form, today_form_date,
        },
    },
    html::{FORM_CONTAINER_STYLE, base},
    navigation::NavBar,
};

/// The state needed for creating a customer.
#[derive(Debug, Clone)]
pub struct CreateCustomerEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateCustomerEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the customer creation page.
pub async fn get_new_customer_page() -> Response {
    new_customer_view().into_response()
}

/// Handle customer creation form submission.
///
/// On success the client is redirected to the customer list. Validation
/// failures re-render the form with the submitted values and an error
/// message so the user stays on the page.
pub async fn create_customer_form_endpoint(
    State(state): State<CreateCustomerEndpointState>,
    Form(form_data): Form<CustomerFormData>,
) -> Response {
    // The add form is the only place the future-date rule applies.
    let new_customer = match parse_customer_form(&form_data, true) {
        Ok(new_customer) => new_customer,
        Err(error) => {
            return new_customer_form_view(&form_data, &format!("Error: {error}"))
                .into_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match create_customer(new_customer, &connection) {
        Ok(_) => (
            HxRedirect(endpoints::CUSTOMERS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(Error::DuplicateMemberNumber) => Error::DuplicateMemberNumber.into_alert_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating a customer: {error}");

            error.into_alert_response()
        }
    }
}

fn new_customer_view() -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_CUSTOMER_VIEW).into_html();
    let form = new_customer_form_view(&CustomerFormData::default(), "");

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold py-4" { "Add New Customer" }
            (form)
        }
    };

    base("Add Customer", &content)
}

pub(crate) fn new_customer_form_view(values: &CustomerFormData, error_message: &str) -> Markup {
    let max_date_of_birth = today_form_date();

    customer_form_view(&CustomerFormView {
        submit_endpoint: endpoints::POST_CUSTOMER_FORM,
        method: FormMethod::Post,
        submit_label: "Add Customer",
        values,
        error_message,
        max_date_of_birth: Some(&max_date_of_birth),
    })
}
