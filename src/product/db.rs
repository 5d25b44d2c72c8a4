//! Database operations for products.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    category::{Category, CategoryName},
    product::{NewProduct, Product, ProductId, ProductName, ProductUpdate, ProductWithCategory},
};

/// Create a product and return it with its generated ID.
pub fn create_product(new_product: NewProduct, connection: &Connection) -> Result<Product, Error> {
    connection.execute(
        "INSERT INTO product (name, description, price, category_id, in_stock)
        VALUES (?1, ?2, ?3, ?4, ?5);",
        (
            new_product.name.as_ref(),
            &new_product.description,
            new_product.price,
            new_product.category,
            new_product.in_stock,
        ),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Product {
        id,
        name: new_product.name,
        description: new_product.description,
        price: new_product.price,
        category: new_product.category,
        in_stock: new_product.in_stock,
    })
}

/// Retrieve a single product by ID, with its category as a plain reference.
pub fn get_product(product_id: ProductId, connection: &Connection) -> Result<Product, Error> {
    connection
        .prepare(
            "SELECT id, name, description, price, category_id, in_stock
            FROM product WHERE id = :id;",
        )?
        .query_row(&[(":id", &product_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all products with their category references expanded.
///
/// The expansion is a left join: a product whose reference is absent or
/// dangles (the category was deleted) comes back without a category.
pub fn get_all_products(connection: &Connection) -> Result<Vec<ProductWithCategory>, Error> {
    connection
        .prepare(
            "SELECT product.id, product.name, product.description, product.price,
                product.in_stock,
                category.id, category.name, category.description, category.\"order\"
            FROM product
            LEFT JOIN category ON category.id = product.category_id;",
        )?
        .query_map([], map_joined_row)?
        .map(|maybe_product| maybe_product.map_err(|error| error.into()))
        .collect()
}

/// Overwrite the fields present in `update` on the product with `product_id`
/// and return the updated record.
///
/// # Errors
/// Returns an [Error::UpdateMissingProduct] if the product doesn't exist.
pub fn update_product(
    product_id: ProductId,
    update: ProductUpdate,
    connection: &Connection,
) -> Result<Product, Error> {
    let mut assignments: Vec<String> = Vec::new();
    let mut values: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

    if let Some(name) = update.name {
        values.push(Box::new(name));
        assignments.push(format!("name = ?{}", values.len()));
    }

    if let Some(description) = update.description {
        values.push(Box::new(description));
        assignments.push(format!("description = ?{}", values.len()));
    }

    if let Some(price) = update.price {
        values.push(Box::new(price));
        assignments.push(format!("price = ?{}", values.len()));
    }

    if let Some(category) = update.category {
        values.push(Box::new(category));
        assignments.push(format!("category_id = ?{}", values.len()));
    }

    if let Some(in_stock) = update.in_stock {
        values.push(Box::new(in_stock));
        assignments.push(format!("in_stock = ?{}", values.len()));
    }

    if assignments.is_empty() {
        return get_product(product_id, connection).map_err(|error| match error {
            Error::NotFound => Error::UpdateMissingProduct,
            other => other,
        });
    }

    values.push(Box::new(product_id));
    let query = format!(
        "UPDATE product SET {} WHERE id = ?{}",
        assignments.join(", "),
        values.len()
    );

    let params = rusqlite::params_from_iter(values.iter().map(|value| value.as_ref()));
    let rows_affected = connection.execute(&query, params)?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingProduct);
    }

    get_product(product_id, connection)
}

/// Delete a product by ID and return a snapshot of the deleted record.
///
/// # Errors
/// Returns an [Error::DeleteMissingProduct] if the product doesn't exist.
pub fn delete_product(product_id: ProductId, connection: &Connection) -> Result<Product, Error> {
    let product = get_product(product_id, connection).map_err(|error| match error {
        Error::NotFound => Error::DeleteMissingProduct,
        other => other,
    })?;

    connection.execute("DELETE FROM product WHERE id = ?1", [product_id])?;

    Ok(product)
}

/// Initialize the product table.
///
/// The category reference is deliberately not a foreign key: deleting a
/// category leaves dangling references in place.
pub fn create_product_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS product (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT,
            price REAL NOT NULL,
            category_id INTEGER,
            in_stock INTEGER NOT NULL DEFAULT 1
        );",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Product, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let name = ProductName::new_unchecked(&raw_name);
    let description = row.get(2)?;
    let price = row.get(3)?;
    let category = row.get(4)?;
    let in_stock = row.get(5)?;

    Ok(Product {
        id,
        name,
        description,
        price,
        category,
        in_stock,
    })
}

fn map_joined_row(row: &Row) -> Result<ProductWithCategory, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let name = ProductName::new_unchecked(&raw_name);
    let description = row.get(2)?;
    let price = row.get(3)?;
    let in_stock = row.get(4)?;

    let category_id: Option<i64> = row.get(5)?;
    let category = match category_id {
        Some(category_id) => {
            let raw_category_name: String = row.get(6)?;

            Some(Category {
                id: category_id,
                name: CategoryName::new_unchecked(&raw_category_name),
                description: row.get(7)?,
                order: row.get(8)?,
            })
        }
        None => None,
    };

    Ok(ProductWithCategory {
        id,
        name,
        description,
        price,
        category,
        in_stock,
    })
}
