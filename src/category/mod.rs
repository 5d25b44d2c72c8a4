//! Category records and their JSON API.

mod api;
mod db;
mod domain;

pub use api::{
    create_category_endpoint, delete_category_endpoint, get_categories_endpoint,
    update_category_endpoint,
};
pub use db::{
    create_category, create_category_table, delete_category, get_all_categories, get_category,
    get_category_page, search_categories, update_category,
};
pub use domain::{Category, CategoryId, CategoryName, CategoryUpdate, NewCategory};
