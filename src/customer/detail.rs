//! The customer detail page.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use time::{OffsetDateTime, macros::format_description};

use crate::{
    AppState, Error, endpoints,
    customer::{Customer, CustomerId, age_in_years, get_customer},
    html::{LINK_STYLE, PAGE_CONTAINER_STYLE, TIER_BADGE_STYLE, base},
    navigation::NavBar,
};

/// The state needed for the customer detail page.
#[derive(Debug, Clone)]
pub struct CustomerDetailPageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CustomerDetailPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the detail page for a single customer.
///
/// The membership tier and age shown here are derived for display only and
/// are never stored.
pub async fn get_customer_detail_page(
    Path(customer_id): Path<CustomerId>,
    State(state): State<CustomerDetailPageState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let customer = get_customer(customer_id, &connection)?;
    let age = age_in_years(customer.date_of_birth, OffsetDateTime::now_utc().date());

    Ok(customer_detail_view(&customer, age).into_response())
}

fn customer_detail_view(customer: &Customer, age: i32) -> Markup {
    let nav_bar = NavBar::new(endpoints::CUSTOMERS_VIEW).into_html();
    let tier = customer.member_number.tier();
    let edit_url = endpoints::format_endpoint(endpoints::EDIT_CUSTOMER_VIEW, customer.id);

    let born = customer
        .date_of_birth
        .format(format_description!(
            "[weekday repr:long], [month repr:long] [day padding:none], [year]"
        ))
        .unwrap_or_else(|_| customer.date_of_birth.to_string());

    let interests = customer
        .interests
        .as_deref()
        .filter(|interests| !interests.is_empty())
        .unwrap_or("Not specified");

    let detail_row = |label: &str, value: &str| {
        html! {
            div class="py-3 border-b border-gray-200 dark:border-gray-700"
            {
                span class="text-sm text-gray-500 dark:text-gray-400 block" { (label) }
                span { (value) }
            }
        }
    };

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-2xl bg-white dark:bg-gray-800 rounded border
                border-gray-200 dark:border-gray-700 px-6 py-4"
            {
                header class="flex items-center justify-between flex-wrap gap-2 py-2"
                {
                    h1 class="text-2xl font-bold" { (customer.name) }

                    span class={ (TIER_BADGE_STYLE) " " (tier.badge_style()) }
                    {
                        (tier.label())
                    }
                }

                p class="text-sm text-gray-500 dark:text-gray-400" { (tier.description()) }

                (detail_row("Born", &born))
                (detail_row("Age", &format!("{age} years")))
                (detail_row("Interests", interests))
                (detail_row("Member ID", &customer.id.to_string()))

                div class="flex gap-4 py-4"
                {
                    a href=(edit_url) class=(LINK_STYLE) { "Edit" }
                    a href=(endpoints::CUSTOMERS_VIEW) class=(LINK_STYLE) { "Back to Customers" }
                }
            }
        }
    };

    base(customer.name.as_ref(), &content)
}

#[cfg(test)]
mod customer_detail_page_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        customer::{
            CustomerName, MemberNumber, NewCustomer, create_customer, create_customer_table,
        },
        test_utils::{assert_valid_html, parse_html_document},
    };

    use super::{CustomerDetailPageState, get_customer_detail_page};

    fn get_detail_page_state() -> CustomerDetailPageState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        create_customer_table(&connection).expect("Could not create customer table");

        CustomerDetailPageState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    fn insert_test_customer(state: &CustomerDetailPageState, member_number: &str) -> i64 {
        create_customer(
            NewCustomer {
                name: CustomerName::new_unchecked("Ann Lee"),
                date_of_birth: date!(1990 - 05 - 01),
                member_number: MemberNumber::new(member_number),
                interests: Some("chess".to_string()),
            },
            &state.db_connection.lock().unwrap(),
        )
        .expect("Could not create test customer")
        .id
    }

    #[tokio::test]
    async fn renders_tier_label_and_description() {
        let state = get_detail_page_state();
        let customer_id = insert_test_customer(&state, "2");

        let response = get_customer_detail_page(Path(customer_id), State(state))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let text = html.html();
        assert!(text.contains("Ann Lee"));
        assert!(text.contains("Silver"));
        assert!(text.contains("Standard membership with enhanced benefits"));
        assert!(text.contains("chess"));
    }

    #[tokio::test]
    async fn unknown_member_number_falls_back() {
        let state = get_detail_page_state();
        let customer_id = insert_test_customer(&state, "9");

        let response = get_customer_detail_page(Path(customer_id), State(state))
            .await
            .into_response();

        let html = parse_html_document(response).await;
        let text = html.html();
        assert!(text.contains("Unknown"));
        assert!(text.contains("Membership tier not recognized"));
    }

    #[tokio::test]
    async fn missing_customer_renders_not_found() {
        let state = get_detail_page_state();

        let response = get_customer_detail_page(Path(42), State(state))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
