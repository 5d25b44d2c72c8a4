//! The JSON API for the customer collection.
//!
//! The browser pages render customers server-side; this surface exists for
//! API clients and mirrors the page endpoints' semantics. Create performs no
//! field validation beyond required/type constraints, and the future-date
//! rule on the date of birth is deliberately absent here: only the add form
//! enforces it.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    AppState, Error,
    api::{internal_error, json_error},
    customer::{
        Customer, CustomerId, CustomerName, CustomerUpdate, MemberNumber, NewCustomer,
        create_customer, delete_customer, get_all_customers, get_customer, update_customer,
    },
};

/// The state needed for the customer API.
#[derive(Debug, Clone)]
pub struct CustomerApiState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CustomerApiState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The request body for creating a customer.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerBody {
    pub name: String,
    pub date_of_birth: Date,
    pub member_number: MemberNumber,
    #[serde(default)]
    pub interests: Option<String>,
}

/// The request body for updating a customer through the collection route.
///
/// The id names the record to update and is excluded from the write set.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerBody {
    pub id: CustomerId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<Date>,
    #[serde(default)]
    pub member_number: Option<MemberNumber>,
    #[serde(default)]
    pub interests: Option<String>,
}

/// The request body for updating a customer addressed by path id.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerFieldsBody {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<Date>,
    #[serde(default)]
    pub member_number: Option<MemberNumber>,
    #[serde(default)]
    pub interests: Option<String>,
}

/// The query parameters for deleting a customer.
#[derive(Debug, Deserialize)]
pub struct DeleteCustomerQuery {
    pub id: Option<CustomerId>,
}

/// The response body for a successful delete.
#[derive(Debug, Serialize)]
pub struct DeletedCustomerBody {
    pub message: String,
    pub customer: Customer,
}

/// Handle `GET /api/customer`: the entire collection, no pagination or
/// search.
pub async fn get_customers_endpoint(State(state): State<CustomerApiState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return internal_error("Failed to fetch customers");
        }
    };

    match get_all_customers(&connection) {
        Ok(customers) => Json(customers).into_response(),
        Err(error) => {
            tracing::error!("GET /api/customer failed: {error}");
            internal_error("Failed to fetch customers")
        }
    }
}

/// Handle `GET /api/customer/{id}`.
pub async fn get_customer_endpoint(
    Path(customer_id): Path<CustomerId>,
    State(state): State<CustomerApiState>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return internal_error("Failed to fetch customer");
        }
    };

    match get_customer(customer_id, &connection) {
        Ok(customer) => Json(customer).into_response(),
        Err(Error::NotFound) => json_error(StatusCode::NOT_FOUND, "Customer not found"),
        Err(error) => {
            tracing::error!("GET /api/customer/{customer_id} failed: {error}");
            internal_error("Failed to fetch customer")
        }
    }
}

/// Handle `POST /api/customer`.
pub async fn create_customer_endpoint(
    State(state): State<CustomerApiState>,
    Json(body): Json<CreateCustomerBody>,
) -> Response {
    // The schema's required constraint, nothing more. A missing or empty
    // name is a generic failure rather than a field-level error.
    let name = match CustomerName::new(&body.name) {
        Ok(name) => name,
        Err(error) => {
            tracing::error!("POST /api/customer failed: {error}");
            return internal_error("Failed to create customer");
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return internal_error("Failed to create customer");
        }
    };

    let new_customer = NewCustomer {
        name,
        date_of_birth: body.date_of_birth,
        member_number: body.member_number,
        interests: body.interests,
    };

    match create_customer(new_customer, &connection) {
        Ok(customer) => Json(customer).into_response(),
        Err(error) => {
            tracing::error!("POST /api/customer failed: {error}");
            internal_error("Failed to create customer")
        }
    }
}

/// Handle `PUT /api/customer` and `PATCH /api/customer`.
///
/// Both verbs share one replace-by-id operation; neither performs a deep
/// merge.
pub async fn update_customer_endpoint(
    State(state): State<CustomerApiState>,
    Json(body): Json<UpdateCustomerBody>,
) -> Response {
    let update = CustomerUpdate {
        name: body.name,
        date_of_birth: body.date_of_birth,
        member_number: body.member_number,
        interests: body.interests,
    };

    apply_customer_update(body.id, update, &state)
}

/// Handle `PUT /api/customer/{id}`.
pub async fn update_customer_by_id_endpoint(
    Path(customer_id): Path<CustomerId>,
    State(state): State<CustomerApiState>,
    Json(body): Json<UpdateCustomerFieldsBody>,
) -> Response {
    let update = CustomerUpdate {
        name: body.name,
        date_of_birth: body.date_of_birth,
        member_number: body.member_number,
        interests: body.interests,
    };

    apply_customer_update(customer_id, update, &state)
}

fn apply_customer_update(
    customer_id: CustomerId,
    update: CustomerUpdate,
    state: &CustomerApiState,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return internal_error("Failed to update customer");
        }
    };

    match update_customer(customer_id, update, &connection) {
        Ok(customer) => Json(customer).into_response(),
        Err(Error::UpdateMissingCustomer) => {
            json_error(StatusCode::NOT_FOUND, "Customer not found")
        }
        Err(error) => {
            tracing::error!("update of customer {customer_id} failed: {error}");
            internal_error("Failed to update customer")
        }
    }
}

/// Handle `DELETE /api/customer?id=`.
pub async fn delete_customer_endpoint(
    State(state): State<CustomerApiState>,
    Query(query): Query<DeleteCustomerQuery>,
) -> Response {
    let Some(customer_id) = query.id else {
        return json_error(StatusCode::BAD_REQUEST, "Customer ID is required");
    };

    delete_customer_response(customer_id, &state)
}

/// Handle `DELETE /api/customer/{id}`.
pub async fn delete_customer_by_id_endpoint(
    Path(customer_id): Path<CustomerId>,
    State(state): State<CustomerApiState>,
) -> Response {
    delete_customer_response(customer_id, &state)
}

fn delete_customer_response(customer_id: CustomerId, state: &CustomerApiState) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return internal_error("Failed to delete customer");
        }
    };

    match delete_customer(customer_id, &connection) {
        Ok(customer) => Json(DeletedCustomerBody {
            message: "Customer deleted successfully".to_string(),
            customer,
        })
        .into_response(),
        Err(Error::DeleteMissingCustomer) => {
            json_error(StatusCode::NOT_FOUND, "Customer not found")
        }
        Err(error) => {
            tracing::error!("DELETE /api/customer/{customer_id} failed: {error}");
            internal_error("Failed to delete customer")
        }
    }
}
