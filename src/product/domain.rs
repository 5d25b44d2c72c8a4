//! Core product domain types.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    category::{Category, CategoryId},
};

/// A validated, non-empty product name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct ProductName(String);

impl ProductName {
    /// Create a product name.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyProductName] if `name` is
    /// an empty string.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyProductName)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a product name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for ProductName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for ProductName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Database identifier for a product.
pub type ProductId = i64;

/// A product as stored, with its category as a plain reference.
///
/// Deleting a category does not touch the products that reference it, so
/// the reference may dangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: ProductName,
    pub description: Option<String>,
    pub price: f64,
    pub category: Option<CategoryId>,
    pub in_stock: bool,
}

/// A product with its category reference expanded into the embedded record.
///
/// List reads resolve the reference; a dangling or absent reference yields
/// no category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductWithCategory {
    pub id: ProductId,
    pub name: ProductName,
    pub description: Option<String>,
    pub price: f64,
    pub category: Option<Category>,
    pub in_stock: bool,
}

/// The fields for a product that has not been stored yet.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: ProductName,
    pub description: Option<String>,
    pub price: f64,
    pub category: Option<CategoryId>,
    pub in_stock: bool,
}

/// The new field values for an update.
///
/// Fields that are `None` were not present in the request body and keep
/// their stored value. The id is never part of the update set.
#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<CategoryId>,
    pub in_stock: Option<bool>,
}
