//! The customer listing page.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use time::macros::format_description;

use crate::{
    AppState, Error, endpoints,
    customer::{Customer, create::new_customer_form_view, form::CustomerFormData, get_all_customers},
    html::{
        BUTTON_DELETE_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, TIER_BADGE_STYLE, base,
    },
    navigation::NavBar,
};

/// The state needed for the customer listing page.
#[derive(Debug, Clone)]
pub struct CustomersPageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CustomersPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the customer listing page.
///
/// The entire collection is fetched unconditionally; the customer list has
/// no pagination or search affordance.
pub async fn get_customers_page(State(state): State<CustomersPageState>) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let customers = get_all_customers(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve customers: {error}"))?;

    Ok(customers_view(&customers).into_response())
}

fn customers_view(customers: &[Customer]) -> Markup {
    let nav_bar = NavBar::new(endpoints::CUSTOMERS_VIEW).into_html();

    let born_format = format_description!("[month repr:long] [day padding:none], [year]");

    let table_row = |customer: &Customer| {
        let tier = customer.member_number.tier();
        let detail_url = endpoints::format_endpoint(endpoints::CUSTOMER_DETAIL_VIEW, customer.id);
        let edit_url = endpoints::format_endpoint(endpoints::EDIT_CUSTOMER_VIEW, customer.id);
        let delete_url = endpoints::format_endpoint(endpoints::DELETE_CUSTOMER_FORM, customer.id);

        let born = customer
            .date_of_birth
            .format(born_format)
            .unwrap_or_else(|_| customer.date_of_birth.to_string());

        let interests = customer
            .interests
            .as_deref()
            .filter(|interests| !interests.is_empty())
            .unwrap_or("Not specified");

        html! {
            tr class=(TABLE_ROW_STYLE)
            {
                td class=(TABLE_CELL_STYLE)
                {
                    div class="flex items-center gap-3"
                    {
                        span class="font-semibold" { (customer.name) }

                        span class={ (TIER_BADGE_STYLE) " " (tier.badge_style()) }
                        {
                            (tier.label())
                        }
                    }
                }

                td class=(TABLE_CELL_STYLE) { (born) }

                td class=(TABLE_CELL_STYLE) { (interests) }

                td class=(TABLE_CELL_STYLE)
                {
                    div class="flex gap-4"
                    {
                        a href=(detail_url) class=(LINK_STYLE) { "View" }
                        a href=(edit_url) class=(LINK_STYLE) { "Edit" }

                        button
                            hx-delete=(delete_url)
                            hx-confirm="Are you sure you want to delete this customer?"
                            hx-swap="none"
                            hx-target-error="#alert-container"
                            class=(BUTTON_DELETE_STYLE)
                        {
                            "Delete"
                        }
                    }
                }
            }
        }
    };

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full max-w-5xl"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "All Customers (" (customers.len()) ")" }
                }

                details class="bg-white dark:bg-gray-800 rounded border
                    border-gray-200 dark:border-gray-700 px-4 py-3"
                {
                    summary class="cursor-pointer font-medium" { "+ Add Customer" }

                    div class="pt-4 max-w-md"
                    {
                        (new_customer_form_view(&CustomerFormData::default(), ""))
                    }
                }

                section class="dark:bg-gray-800 w-full"
                {
                    table class="w-full text-sm text-left rtl:text-right
                        text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Name" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Born" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Interests" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                            }
                        }

                        tbody
                        {
                            @for customer in customers {
                                (table_row(customer))
                            }

                            @if customers.is_empty() {
                                tr
                                {
                                    td
                                        colspan="4"
                                        class="px-6 py-4 text-center
                                            text-gray-500 dark:text-gray-400"
                                    {
                                        "No customers yet. "
                                        a href=(endpoints::NEW_CUSTOMER_VIEW) class=(LINK_STYLE)
                                        {
                                            "Add your first customer"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    base("Customers", &content)
}
