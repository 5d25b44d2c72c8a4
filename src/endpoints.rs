//! The API and page endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/customers/{customer_id}',
//! use [format_endpoint].

/// The root route which redirects to the customer list.
pub const ROOT: &str = "/";
/// The page for listing all customers.
pub const CUSTOMERS_VIEW: &str = "/customers";
/// The page for creating a new customer.
pub const NEW_CUSTOMER_VIEW: &str = "/customers/new";
/// The page for viewing a single customer.
pub const CUSTOMER_DETAIL_VIEW: &str = "/customers/{customer_id}";
/// The page for editing an existing customer.
pub const EDIT_CUSTOMER_VIEW: &str = "/customers/{customer_id}/edit";

/// The form endpoint to create a customer.
pub const POST_CUSTOMER_FORM: &str = "/customers";
/// The form endpoint to update a customer.
pub const PUT_CUSTOMER_FORM: &str = "/customers/{customer_id}";
/// The form endpoint to delete a customer.
pub const DELETE_CUSTOMER_FORM: &str = "/customers/{customer_id}";

/// The JSON route to access the category collection.
pub const CATEGORY_API: &str = "/api/category";
/// The JSON route to access the customer collection.
pub const CUSTOMER_API: &str = "/api/customer";
/// The JSON route to access a single customer.
pub const CUSTOMER_BY_ID_API: &str = "/api/customer/{customer_id}";
/// The JSON route to access the product collection.
pub const PRODUCT_API: &str = "/api/product";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace. For
/// example, in the endpoint path '/customers/{customer_id}',
/// '{customer_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII
/// characters and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
