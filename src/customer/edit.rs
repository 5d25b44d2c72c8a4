//! Customer editing page and endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    customer::{
        CustomerId, CustomerUpdate, get_customer, update_customer,
        form::{
            CustomerFormData, CustomerFormView, FormMethod, customer_form_view,
            parse_customer_form,
        },
    },
    html::{FORM_CONTAINER_STYLE, base},
    navigation::NavBar,
};

/// The state needed for the edit customer page.
#[derive(Debug, Clone)]
pub struct EditCustomerPageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditCustomerPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The state needed for updating a customer.
#[derive(Debug, Clone)]
pub struct UpdateCustomerEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdateCustomerEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the customer editing page, pre-populated with the stored fields.
pub async fn get_edit_customer_page(
    Path(customer_id): Path<CustomerId>,
    State(state): State<EditCustomerPageState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let customer = get_customer(customer_id, &connection)?;
    let values = CustomerFormData::from_customer(&customer);

    Ok(edit_customer_view(customer_id, &values, "").into_response())
}

/// Handle customer update form submission.
///
/// The same rules as the add form apply, except that the future-date check
/// on the date of birth is omitted here.
pub async fn update_customer_form_endpoint(
    Path(customer_id): Path<CustomerId>,
    State(state): State<UpdateCustomerEndpointState>,
    Form(form_data): Form<CustomerFormData>,
) -> Response {
    let new_fields = match parse_customer_form(&form_data, false) {
        Ok(new_fields) => new_fields,
        Err(error) => {
            return edit_customer_form_view(customer_id, &form_data, &format!("Error: {error}"))
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

    let update = CustomerUpdate {
        name: Some(new_fields.name.as_ref().to_string()),
        date_of_birth: Some(new_fields.date_of_birth),
        member_number: Some(new_fields.member_number),
        interests: Some(new_fields.interests.unwrap_or_default()),
    };

    match update_customer(customer_id, update, &connection) {
        Ok(_) => (
            HxRedirect(endpoints::format_endpoint(
                endpoints::CUSTOMER_DETAIL_VIEW,
                customer_id,
            )),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(Error::UpdateMissingCustomer) => Error::UpdateMissingCustomer.into_alert_response(),
        Err(Error::DuplicateMemberNumber) => Error::DuplicateMemberNumber.into_alert_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while updating customer {customer_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}

fn edit_customer_view(
    customer_id: CustomerId,
    values: &CustomerFormData,
    error_message: &str,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::CUSTOMERS_VIEW).into_html();
    let form = edit_customer_form_view(customer_id, values, error_message);

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold py-4" { "Edit Customer" }
            (form)
        }
    };

    base("Edit Customer", &content)
}

fn edit_customer_form_view(
    customer_id: CustomerId,
    values: &CustomerFormData,
    error_message: &str,
) -> Markup {
    let update_endpoint = endpoints::format_endpoint(endpoints::PUT_CUSTOMER_FORM, customer_id);

    customer_form_view(&CustomerFormView {
        submit_endpoint: &update_endpoint,
        method: FormMethod::Put,
        submit_label: "Save Changes",
        values,
        error_message,
        // The edit form does not cap the date of birth.
        max_date_of_birth: None,
    })
}


#[cfg(test)]
mod update_customer_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Form,
        extract::{Path, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use rusqlite::Connection;
    use time::{Duration, OffsetDateTime, macros::date};

    use crate::{
        customer::{
            CustomerName, MemberNumber, NewCustomer, create_customer, create_customer_table,
            form::CustomerFormData, get_customer, update_customer_form_endpoint,
        },
        endpoints,
        test_utils::assert_hx_redirect,
    };

    use super::UpdateCustomerEndpointState;

    fn get_update_customer_state() -> UpdateCustomerEndpointState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        create_customer_table(&connection).expect("Could not create customer table");

        UpdateCustomerEndpointState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    fn insert_test_customer(state: &UpdateCustomerEndpointState) -> i64 {
        create_customer(
            NewCustomer {
                name: CustomerName::new_unchecked("Ann Lee"),
                date_of_birth: date!(1990 - 05 - 01),
                member_number: MemberNumber::new("2"),
                interests: None,
            },
            &state.db_connection.lock().unwrap(),
        )
        .expect("Could not create test customer")
        .id
    }

    #[tokio::test]
    async fn update_redirects_to_the_detail_page() {
        let state = get_update_customer_state();
        let customer_id = insert_test_customer(&state);
        let form_data = CustomerFormData {
            name: "Ann Lee-Wong".to_string(),
            date_of_birth: "1990-05-01".to_string(),
            member_number: "3".to_string(),
            interests: "sailing".to_string(),
        };

        let response =
            update_customer_form_endpoint(Path(customer_id), State(state.clone()), Form(form_data))
                .await
                .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(
            &response,
            &endpoints::format_endpoint(endpoints::CUSTOMER_DETAIL_VIEW, customer_id),
        );

        let updated = get_customer(customer_id, &state.db_connection.lock().unwrap()).unwrap();
        assert_eq!(updated.name.as_ref(), "Ann Lee-Wong");
        assert_eq!(updated.member_number.as_ref(), "3");
    }

    #[tokio::test]
    async fn update_accepts_a_future_date_of_birth() {
        // The edit form omits the future-date check that the add form has.
        let state = get_update_customer_state();
        let customer_id = insert_test_customer(&state);
        let tomorrow = OffsetDateTime::now_utc().date() + Duration::days(1);
        let form_data = CustomerFormData {
            name: "Ann Lee".to_string(),
            date_of_birth: tomorrow.to_string(),
            member_number: "2".to_string(),
            interests: String::new(),
        };

        let response =
            update_customer_form_endpoint(Path(customer_id), State(state.clone()), Form(form_data))
                .await
                .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let updated = get_customer(customer_id, &state.db_connection.lock().unwrap()).unwrap();
        assert_eq!(updated.date_of_birth, tomorrow);
    }

    #[tokio::test]
    async fn update_missing_customer_returns_not_found_alert() {
        let state = get_update_customer_state();
        let form_data = CustomerFormData {
            name: "Ghost".to_string(),
            date_of_birth: "1990-05-01".to_string(),
            member_number: "1".to_string(),
            interests: String::new(),
        };

        let response = update_customer_form_endpoint(Path(42), State(state), Form(form_data))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
