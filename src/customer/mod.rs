//! Customer records, their JSON API, and the customer pages.

mod api;
mod create;
mod db;
mod delete;
mod detail;
mod domain;
mod edit;
mod form;
mod list;

pub use api::{
    create_customer_endpoint, delete_customer_by_id_endpoint, delete_customer_endpoint,
    get_customer_endpoint, get_customers_endpoint, update_customer_by_id_endpoint,
    update_customer_endpoint,
};
pub use create::{create_customer_form_endpoint, get_new_customer_page};
pub use db::{
    create_customer, create_customer_table, delete_customer, get_all_customers, get_customer,
    update_customer,
};
pub use delete::delete_customer_page_endpoint;
pub use detail::get_customer_detail_page;
pub use domain::{
    Customer, CustomerId, CustomerName, CustomerUpdate, MemberNumber, NewCustomer, age_in_years,
};
pub use edit::{get_edit_customer_page, update_customer_form_endpoint};
pub use list::get_customers_page;
