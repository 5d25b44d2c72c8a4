//! Product records and their JSON API.

mod api;
mod db;
mod domain;

pub use api::{
    create_product_endpoint, delete_product_endpoint, get_products_endpoint,
    update_product_endpoint,
};
pub use db::{
    create_product, create_product_table, delete_product, get_all_products, get_product,
    update_product,
};
pub use domain::{NewProduct, Product, ProductId, ProductName, ProductUpdate, ProductWithCategory};
