//! The JSON API for the product collection.
//!
//! List reads expand the category reference into the embedded record;
//! create and update responses carry the reference as a plain id, the same
//! shape the caller submitted.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    api::{internal_error, json_error},
    category::CategoryId,
    product::{
        NewProduct, Product, ProductId, ProductName, ProductUpdate, create_product,
        delete_product, get_all_products, update_product,
    },
};

/// The state needed for the product API.
#[derive(Debug, Clone)]
pub struct ProductApiState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ProductApiState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

fn default_in_stock() -> bool {
    true
}

/// The request body for creating a product.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductBody {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub category: Option<CategoryId>,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

/// The request body for updating a product.
///
/// The id names the record to update and is excluded from the write set.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductBody {
    pub id: ProductId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub category: Option<CategoryId>,
    #[serde(default)]
    pub in_stock: Option<bool>,
}

/// The query parameters for deleting a product.
#[derive(Debug, Deserialize)]
pub struct DeleteProductQuery {
    pub id: Option<ProductId>,
}

/// The response body for a successful delete.
#[derive(Debug, Serialize)]
pub struct DeletedProductBody {
    pub message: String,
    pub product: Product,
}

/// Handle `GET /api/product`: every product with its category expanded.
pub async fn get_products_endpoint(State(state): State<ProductApiState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return internal_error("Failed to fetch products");
        }
    };

    match get_all_products(&connection) {
        Ok(products) => Json(products).into_response(),
        Err(error) => {
            tracing::error!("GET /api/product failed: {error}");
            internal_error("Failed to fetch products")
        }
    }
}

/// Handle `POST /api/product`.
pub async fn create_product_endpoint(
    State(state): State<ProductApiState>,
    Json(body): Json<CreateProductBody>,
) -> Response {
    let name = match ProductName::new(&body.name) {
        Ok(name) => name,
        Err(error) => {
            tracing::error!("POST /api/product failed: {error}");
            return internal_error("Failed to create product");
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return internal_error("Failed to create product");
        }
    };

    let new_product = NewProduct {
        name,
        description: body.description,
        price: body.price,
        category: body.category,
        in_stock: body.in_stock,
    };

    match create_product(new_product, &connection) {
        Ok(product) => Json(product).into_response(),
        Err(error) => {
            tracing::error!("POST /api/product failed: {error}");
            internal_error("Failed to create product")
        }
    }
}

/// Handle `PUT /api/product` and `PATCH /api/product`.
///
/// Both verbs share one replace-by-id operation; neither performs a deep
/// merge.
pub async fn update_product_endpoint(
    State(state): State<ProductApiState>,
    Json(body): Json<UpdateProductBody>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return internal_error("Failed to update product");
        }
    };

    let update = ProductUpdate {
        name: body.name,
        description: body.description,
        price: body.price,
        category: body.category,
        in_stock: body.in_stock,
    };

    match update_product(body.id, update, &connection) {
        Ok(product) => Json(product).into_response(),
        Err(Error::UpdateMissingProduct) => json_error(StatusCode::NOT_FOUND, "Product not found"),
        Err(error) => {
            tracing::error!("update of product {} failed: {error}", body.id);
            internal_error("Failed to update product")
        }
    }
}

/// Handle `DELETE /api/product?id=`.
pub async fn delete_product_endpoint(
    State(state): State<ProductApiState>,
    Query(query): Query<DeleteProductQuery>,
) -> Response {
    let Some(product_id) = query.id else {
        return json_error(StatusCode::BAD_REQUEST, "Product ID is required");
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return internal_error("Failed to delete product");
        }
    };

    match delete_product(product_id, &connection) {
        Ok(product) => Json(DeletedProductBody {
            message: "Product deleted successfully".to_string(),
            product,
        })
        .into_response(),
        Err(Error::DeleteMissingProduct) => json_error(StatusCode::NOT_FOUND, "Product not found"),
        Err(error) => {
            tracing::error!("DELETE /api/product failed: {error}");
            internal_error("Failed to delete product")
        }
    }
}
