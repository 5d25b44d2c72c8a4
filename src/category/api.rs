//! The JSON API for the category collection.
//!
//! The category list is the only one with query modes: `pno` selects a page,
//! `s` searches by name, and exactly one mode applies per request with `pno`
//! checked first.

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
    category::{
        Category, CategoryId, CategoryName, CategoryUpdate, NewCategory, create_category,
        delete_category, get_all_categories, get_category_page, search_categories,
        update_category,
    },
    pagination::PaginationConfig,
};

/// The state needed for the category API.
#[derive(Debug, Clone)]
pub struct CategoryApiState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for CategoryApiState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// The query parameters selecting the category list mode.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryListQuery {
    /// 1-based page number; takes precedence over `s`.
    pub pno: Option<u64>,
    /// Case-insensitive name substring to search for.
    pub s: Option<String>,
}

/// The request body for creating a category.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryBody {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub order: Option<f64>,
}

/// The request body for updating a category.
///
/// The id names the record to update and is excluded from the write set.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryBody {
    pub id: CategoryId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub order: Option<f64>,
}

/// The query parameters for deleting a category.
#[derive(Debug, Deserialize)]
pub struct DeleteCategoryQuery {
    pub id: Option<CategoryId>,
}

/// The response body for a successful delete.
#[derive(Debug, Serialize)]
pub struct DeletedCategoryBody {
    pub message: String,
    pub category: Category,
}

/// Handle `GET /api/category` in its three modes: paginated (`pno`), search
/// (`s`), or the full collection. All three sort by `order` descending.
pub async fn get_categories_endpoint(
    State(state): State<CategoryApiState>,
    Query(query): Query<CategoryListQuery>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return internal_error("Failed to fetch categories");
        }
    };

    let result = if let Some(page_number) = query.pno {
        get_category_page(page_number, state.pagination_config.page_size, &connection)
    } else if let Some(name_query) = &query.s {
        search_categories(name_query, &connection)
    } else {
        get_all_categories(&connection)
    };

    match result {
        Ok(categories) => Json(categories).into_response(),
        Err(error) => {
            tracing::error!("GET /api/category failed: {error}");
            internal_error("Failed to fetch categories")
        }
    }
}

/// Handle `POST /api/category`.
pub async fn create_category_endpoint(
    State(state): State<CategoryApiState>,
    Json(body): Json<CreateCategoryBody>,
) -> Response {
    let name = match CategoryName::new(&body.name) {
        Ok(name) => name,
        Err(error) => {
            tracing::error!("POST /api/category failed: {error}");
            return internal_error("Failed to create category");
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return internal_error("Failed to create category");
        }
    };

    let new_category = NewCategory {
        name,
        description: body.description,
        order: body.order,
    };

    match create_category(new_category, &connection) {
        Ok(category) => Json(category).into_response(),
        Err(error) => {
            tracing::error!("POST /api/category failed: {error}");
            internal_error("Failed to create category")
        }
    }
}

/// Handle `PUT /api/category`: replace-by-id with the id taken from the
/// body.
pub async fn update_category_endpoint(
    State(state): State<CategoryApiState>,
    Json(body): Json<UpdateCategoryBody>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return internal_error("Failed to update category");
        }
    };

    let update = CategoryUpdate {
        name: body.name,
        description: body.description,
        order: body.order,
    };

    match update_category(body.id, update, &connection) {
        Ok(category) => Json(category).into_response(),
        Err(Error::UpdateMissingCategory) => {
            json_error(StatusCode::NOT_FOUND, "Category not found")
        }
        Err(error) => {
            tracing::error!("PUT /api/category failed: {error}");
            internal_error("Failed to update category")
        }
    }
}

/// Handle `DELETE /api/category?id=`.
pub async fn delete_category_endpoint(
    State(state): State<CategoryApiState>,
    Query(query): Query<DeleteCategoryQuery>,
) -> Response {
    let Some(category_id) = query.id else {
        return json_error(StatusCode::BAD_REQUEST, "Category ID is required");
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return internal_error("Failed to delete category");
        }
    };

    match delete_category(category_id, &connection) {
        Ok(category) => Json(DeletedCategoryBody {
            message: "Category deleted successfully".to_string(),
            category,
        })
        .into_response(),
        Err(Error::DeleteMissingCategory) => {
            json_error(StatusCode::NOT_FOUND, "Category not found")
        }
        Err(error) => {
            tracing::error!("DELETE /api/category failed: {error}");
            internal_error("Failed to delete category")
        }
    }
}

#[cfg(test)]
mod category_api_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Json,
        extract::{Query, State},
        http::StatusCode,
    };
    use rusqlite::Connection;

    use crate::{
        category::{CategoryName, NewCategory, create_category, create_category_table},
        pagination::PaginationConfig,
        test_utils::response_json,
    };

    use super::{
        CategoryApiState, CategoryListQuery, CreateCategoryBody, DeleteCategoryQuery,
        UpdateCategoryBody, create_category_endpoint, delete_category_endpoint,
        get_categories_endpoint, update_category_endpoint,
    };

    fn get_category_api_state() -> CategoryApiState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        create_category_table(&connection).expect("Could not create category table");

        CategoryApiState {
            db_connection: Arc::new(Mutex::new(connection)),
            pagination_config: PaginationConfig::default(),
        }
    }

    fn insert_test_categories(state: &CategoryApiState, count: u32) {
        let connection = state.db_connection.lock().unwrap();

        for i in 1..=count {
            create_category(
                NewCategory {
                    name: CategoryName::new_unchecked(&format!("category {i}")),
                    description: None,
                    order: Some(i as f64),
                },
                &connection,
            )
            .unwrap();
        }
    }

    #[tokio::test]
    async fn default_mode_returns_everything_in_order_descending() {
        let state = get_category_api_state();
        insert_test_categories(&state, 4);

        let response =
            get_categories_endpoint(State(state), Query(CategoryListQuery::default())).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        let orders: Vec<f64> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|category| category["order"].as_f64().unwrap())
            .collect();
        assert_eq!(orders, vec![4.0, 3.0, 2.0, 1.0]);
    }

    #[tokio::test]
    async fn page_two_returns_records_ranked_fourth_to_sixth() {
        let state = get_category_api_state();
        insert_test_categories(&state, 10);

        let response = get_categories_endpoint(
            State(state),
            Query(CategoryListQuery {
                pno: Some(2),
                s: None,
            }),
        )
        .await;

        let body = response_json(response).await;
        let orders: Vec<f64> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|category| category["order"].as_f64().unwrap())
            .collect();
        assert_eq!(orders, vec![7.0, 6.0, 5.0]);
    }

    #[tokio::test]
    async fn pno_takes_precedence_over_search() {
        let state = get_category_api_state();
        insert_test_categories(&state, 4);

        let response = get_categories_endpoint(
            State(state),
            Query(CategoryListQuery {
                pno: Some(1),
                s: Some("category 4".to_string()),
            }),
        )
        .await;

        let body = response_json(response).await;
        // Page one of three records, not the single search match.
        assert_eq!(body.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn search_returns_matches_in_order_descending() {
        let state = get_category_api_state();
        {
            let connection = state.db_connection.lock().unwrap();
            for (name, order) in [("Catering", 1.0), ("Scatter", 3.0), ("Dogs", 2.0)] {
                create_category(
                    NewCategory {
                        name: CategoryName::new_unchecked(name),
                        description: None,
                        order: Some(order),
                    },
                    &connection,
                )
                .unwrap();
            }
        }

        let response = get_categories_endpoint(
            State(state),
            Query(CategoryListQuery {
                pno: None,
                s: Some("cat".to_string()),
            }),
        )
        .await;

        let body = response_json(response).await;
        let names: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|category| category["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Scatter", "Catering"]);
    }

    #[tokio::test]
    async fn create_returns_the_stored_record() {
        let state = get_category_api_state();
        let body = CreateCategoryBody {
            name: "Everyday Banking".to_string(),
            description: Some("Cheques and savings".to_string()),
            order: Some(1.0),
        };

        let response = create_category_endpoint(State(state), Json(body)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body["name"], "Everyday Banking");
        assert_eq!(body["description"], "Cheques and savings");
        assert!(body["id"].as_i64().unwrap() > 0);
    }

    #[tokio::test]
    async fn update_missing_category_is_not_found() {
        let state = get_category_api_state();
        let body = UpdateCategoryBody {
            id: 42,
            name: Some("Ghost".to_string()),
            description: None,
            order: None,
        };

        let response = update_category_endpoint(State(state), Json(body)).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = response_json(response).await;
        assert_eq!(body["error"], "Category not found");
    }

    #[tokio::test]
    async fn delete_without_id_is_bad_request() {
        let state = get_category_api_state();

        let response =
            delete_category_endpoint(State(state), Query(DeleteCategoryQuery { id: None })).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response_json(response).await;
        assert_eq!(body["error"], "Category ID is required");
    }

    #[tokio::test]
    async fn delete_returns_confirmation_and_snapshot() {
        let state = get_category_api_state();
        insert_test_categories(&state, 1);

        let response = delete_category_endpoint(
            State(state),
            Query(DeleteCategoryQuery { id: Some(1) }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body["message"], "Category deleted successfully");
        assert_eq!(body["category"]["name"], "category 1");
    }
}
