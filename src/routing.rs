//! Application router configuration for the page and JSON API routes.

use axum::{
    Router,
    response::Redirect,
    routing::get,
};

use crate::{
    AppState,
    category::{
        create_category_endpoint, delete_category_endpoint, get_categories_endpoint,
        update_category_endpoint,
    },
    customer::{
        create_customer_endpoint, create_customer_form_endpoint, delete_customer_by_id_endpoint,
        delete_customer_endpoint, delete_customer_page_endpoint, get_customer_detail_page,
        get_customer_endpoint, get_customers_endpoint, get_customers_page, get_edit_customer_page,
        get_new_customer_page, update_customer_by_id_endpoint, update_customer_endpoint,
        update_customer_form_endpoint,
    },
    endpoints,
    not_found::get_404_not_found,
    product::{
        create_product_endpoint, delete_product_endpoint, get_products_endpoint,
        update_product_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(
            endpoints::CUSTOMERS_VIEW,
            get(get_customers_page).post(create_customer_form_endpoint),
        )
        .route(endpoints::NEW_CUSTOMER_VIEW, get(get_new_customer_page))
        .route(
            endpoints::CUSTOMER_DETAIL_VIEW,
            get(get_customer_detail_page)
                .put(update_customer_form_endpoint)
                .delete(delete_customer_page_endpoint),
        )
        .route(endpoints::EDIT_CUSTOMER_VIEW, get(get_edit_customer_page));

    // PUT and PATCH on the collection routes share one replace-by-id
    // handler.
    let api_routes = Router::new()
        .route(
            endpoints::CATEGORY_API,
            get(get_categories_endpoint)
                .post(create_category_endpoint)
                .put(update_category_endpoint)
                .delete(delete_category_endpoint),
        )
        .route(
            endpoints::CUSTOMER_API,
            get(get_customers_endpoint)
                .post(create_customer_endpoint)
                .put(update_customer_endpoint)
                .patch(update_customer_endpoint)
                .delete(delete_customer_endpoint),
        )
        .route(
            endpoints::CUSTOMER_BY_ID_API,
            get(get_customer_endpoint)
                .put(update_customer_by_id_endpoint)
                .delete(delete_customer_by_id_endpoint),
        )
        .route(
            endpoints::PRODUCT_API,
            get(get_products_endpoint)
                .post(create_product_endpoint)
                .put(update_product_endpoint)
                .patch(update_product_endpoint)
                .delete(delete_product_endpoint),
        );

    page_routes
        .merge(api_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the customer list.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::CUSTOMERS_VIEW)
}
