//! Database operations for categories.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    category::{Category, CategoryId, CategoryName, CategoryUpdate, NewCategory},
};

/// Create a category and return it with its generated ID.
pub fn create_category(
    new_category: NewCategory,
    connection: &Connection,
) -> Result<Category, Error> {
    connection.execute(
        "INSERT INTO category (name, description, \"order\") VALUES (?1, ?2, ?3);",
        (
            new_category.name.as_ref(),
            &new_category.description,
            new_category.order,
        ),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Category {
        id,
        name: new_category.name,
        description: new_category.description,
        order: new_category.order,
    })
}

/// Retrieve a single category by ID.
pub fn get_category(category_id: CategoryId, connection: &Connection) -> Result<Category, Error> {
    connection
        .prepare("SELECT id, name, description, \"order\" FROM category WHERE id = :id;")?
        .query_row(&[(":id", &category_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all categories, ordered by the `order` field descending.
///
/// Categories without an `order` value sort last.
pub fn get_all_categories(connection: &Connection) -> Result<Vec<Category>, Error> {
    connection
        .prepare("SELECT id, name, description, \"order\" FROM category ORDER BY \"order\" DESC;")?
        .query_map([], map_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Retrieve the 1-based page `page_number` of categories, ordered by the
/// `order` field descending.
pub fn get_category_page(
    page_number: u64,
    page_size: u64,
    connection: &Connection,
) -> Result<Vec<Category>, Error> {
    let offset = page_number.saturating_sub(1) * page_size;
    let limit = page_size as i64;
    let offset = offset as i64;

    connection
        .prepare(
            "SELECT id, name, description, \"order\" FROM category
            ORDER BY \"order\" DESC LIMIT :limit OFFSET :offset;",
        )?
        .query_map(&[(":limit", &limit), (":offset", &offset)], map_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Retrieve the categories whose name contains `name_query`, ignoring ASCII
/// case, ordered by the `order` field descending.
pub fn search_categories(
    name_query: &str,
    connection: &Connection,
) -> Result<Vec<Category>, Error> {
    let pattern = like_pattern(name_query);

    connection
        .prepare(
            "SELECT id, name, description, \"order\" FROM category
            WHERE name LIKE :pattern ESCAPE '\\' ORDER BY \"order\" DESC;",
        )?
        .query_map(&[(":pattern", &pattern)], map_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Build a LIKE pattern that matches `name_query` as a literal substring.
fn like_pattern(name_query: &str) -> String {
    let escaped = name_query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");

    format!("%{escaped}%")
}

/// Overwrite the fields present in `update` on the category with `category_id`
/// and return the updated record.
///
/// # Errors
/// Returns an [Error::UpdateMissingCategory] if the category doesn't exist.
pub fn update_category(
    category_id: CategoryId,
    update: CategoryUpdate,
    connection: &Connection,
) -> Result<Category, Error> {
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

    if let Some(order) = update.order {
        values.push(Box::new(order));
        assignments.push(format!("\"order\" = ?{}", values.len()));
    }

    if assignments.is_empty() {
        return get_category(category_id, connection).map_err(|error| match error {
            Error::NotFound => Error::UpdateMissingCategory,
            other => other,
        });
    }

    values.push(Box::new(category_id));
    let query = format!(
        "UPDATE category SET {} WHERE id = ?{}",
        assignments.join(", "),
        values.len()
    );

    let params = rusqlite::params_from_iter(values.iter().map(|value| value.as_ref()));
    let rows_affected = connection.execute(&query, params)?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingCategory);
    }

    get_category(category_id, connection)
}

/// Delete a category by ID and return a snapshot of the deleted record.
///
/// Products that referenced the category keep their dangling reference.
///
/// # Errors
/// Returns an [Error::DeleteMissingCategory] if the category doesn't exist.
pub fn delete_category(
    category_id: CategoryId,
    connection: &Connection,
) -> Result<Category, Error> {
    let category = get_category(category_id, connection).map_err(|error| match error {
        Error::NotFound => Error::DeleteMissingCategory,
        other => other,
    })?;

    connection.execute("DELETE FROM category WHERE id = ?1", [category_id])?;

    Ok(category)
}

/// Initialize the category table.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT,
            \"order\" REAL
        );",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let name = CategoryName::new_unchecked(&raw_name);
    let description = row.get(2)?;
    let order = row.get(3)?;

    Ok(Category {
        id,
        name,
        description,
        order,
    })
}

#[cfg(test)]
mod category_query_tests {
    use rusqlite::Connection;

    use crate::{
        Error,
        category::{CategoryName, CategoryUpdate, NewCategory},
    };

    use super::{
        create_category, create_category_table, delete_category, get_all_categories,
        get_category, get_category_page, search_categories, update_category,
    };

    fn get_test_db_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        create_category_table(&connection).expect("Could not create category table");
        connection
    }

    fn new_category(name: &str, order: Option<f64>) -> NewCategory {
        NewCategory {
            name: CategoryName::new_unchecked(name),
            description: None,
            order,
        }
    }

    #[test]
    fn create_category_succeeds() {
        let connection = get_test_db_connection();
        let name = CategoryName::new("Everyday Banking").unwrap();

        let category = create_category(
            NewCategory {
                name: name.clone(),
                description: Some("Cheques and savings".to_string()),
                order: Some(2.0),
            },
            &connection,
        )
        .expect("Could not create category");

        assert!(category.id > 0);
        assert_eq!(category.name, name);
        assert_eq!(category.description.as_deref(), Some("Cheques and savings"));
        assert_eq!(category.order, Some(2.0));
    }

    #[test]
    fn get_category_succeeds() {
        let connection = get_test_db_connection();
        let inserted = create_category(new_category("Loans", Some(1.0)), &connection)
            .expect("Could not create test category");

        let selected = get_category(inserted.id, &connection);

        assert_eq!(Ok(inserted), selected);
    }

    #[test]
    fn get_category_fails_on_missing_id() {
        let connection = get_test_db_connection();

        let selected = get_category(999, &connection);

        assert_eq!(selected, Err(Error::NotFound));
    }

    #[test]
    fn get_all_sorts_by_order_descending() {
        let connection = get_test_db_connection();
        for (name, order) in [("low", Some(1.0)), ("high", Some(3.0)), ("mid", Some(2.0))] {
            create_category(new_category(name, order), &connection).unwrap();
        }

        let categories = get_all_categories(&connection).unwrap();

        let names: Vec<&str> = categories
            .iter()
            .map(|category| category.name.as_ref())
            .collect();
        assert_eq!(names, vec!["high", "mid", "low"]);
    }

    #[test]
    fn get_all_sorts_missing_order_last() {
        let connection = get_test_db_connection();
        create_category(new_category("unordered", None), &connection).unwrap();
        create_category(new_category("ordered", Some(1.0)), &connection).unwrap();

        let categories = get_all_categories(&connection).unwrap();

        assert_eq!(categories[0].name.as_ref(), "ordered");
        assert_eq!(categories[1].name.as_ref(), "unordered");
    }

    #[test]
    fn second_page_returns_records_ranked_fourth_to_sixth() {
        let connection = get_test_db_connection();
        // Orders 1 to 10: descending rank 1 is order 10, rank 4 is order 7.
        for i in 1..=10 {
            create_category(new_category(&format!("category {i}"), Some(i as f64)), &connection)
                .unwrap();
        }

        let page = get_category_page(2, 3, &connection).unwrap();

        let orders: Vec<f64> = page.iter().filter_map(|category| category.order).collect();
        assert_eq!(orders, vec![7.0, 6.0, 5.0]);
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let connection = get_test_db_connection();
        create_category(new_category("only", Some(1.0)), &connection).unwrap();

        let page = get_category_page(5, 3, &connection).unwrap();

        assert!(page.is_empty());
    }

    #[test]
    fn search_matches_substring_ignoring_case() {
        let connection = get_test_db_connection();
        for (name, order) in [
            ("Catering", Some(1.0)),
            ("Scatter cushions", Some(3.0)),
            ("Dogs", Some(2.0)),
        ] {
            create_category(new_category(name, order), &connection).unwrap();
        }

        let matches = search_categories("cAt", &connection).unwrap();

        let names: Vec<&str> = matches
            .iter()
            .map(|category| category.name.as_ref())
            .collect();
        assert_eq!(names, vec!["Scatter cushions", "Catering"]);
    }

    #[test]
    fn search_treats_wildcards_as_literals() {
        let connection = get_test_db_connection();
        create_category(new_category("100% cotton", Some(1.0)), &connection).unwrap();
        create_category(new_category("100 degrees", Some(2.0)), &connection).unwrap();

        let matches = search_categories("100%", &connection).unwrap();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name.as_ref(), "100% cotton");
    }

    #[test]
    fn update_category_overwrites_provided_fields() {
        let connection = get_test_db_connection();
        let inserted = create_category(
            NewCategory {
                name: CategoryName::new_unchecked("Old name"),
                description: Some("Old description".to_string()),
                order: Some(1.0),
            },
            &connection,
        )
        .unwrap();

        let updated = update_category(
            inserted.id,
            CategoryUpdate {
                name: Some("New name".to_string()),
                description: None,
                order: Some(9.0),
            },
            &connection,
        )
        .expect("Could not update category");

        assert_eq!(updated.id, inserted.id);
        assert_eq!(updated.name.as_ref(), "New name");
        // A field absent from the update keeps its stored value.
        assert_eq!(updated.description.as_deref(), Some("Old description"));
        assert_eq!(updated.order, Some(9.0));
    }

    #[test]
    fn update_is_idempotent() {
        let connection = get_test_db_connection();
        let inserted = create_category(new_category("Original", Some(1.0)), &connection).unwrap();
        let update = CategoryUpdate {
            name: Some("Renamed".to_string()),
            description: Some("With description".to_string()),
            order: Some(2.0),
        };

        let first = update_category(inserted.id, update.clone(), &connection).unwrap();
        let second = update_category(inserted.id, update, &connection).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn update_missing_category_fails() {
        let connection = get_test_db_connection();

        let result = update_category(
            999,
            CategoryUpdate {
                name: Some("Ghost".to_string()),
                ..Default::default()
            },
            &connection,
        );

        assert_eq!(result, Err(Error::UpdateMissingCategory));
        assert!(get_all_categories(&connection).unwrap().is_empty());
    }

    #[test]
    fn delete_category_returns_snapshot() {
        let connection = get_test_db_connection();
        let inserted = create_category(new_category("Doomed", Some(1.0)), &connection).unwrap();

        let deleted = delete_category(inserted.id, &connection).unwrap();

        assert_eq!(deleted, inserted);
        assert_eq!(get_category(inserted.id, &connection), Err(Error::NotFound));
    }

    #[test]
    fn delete_missing_category_fails_and_leaves_collection_unchanged() {
        let connection = get_test_db_connection();
        create_category(new_category("Survivor", Some(1.0)), &connection).unwrap();

        let result = delete_category(999, &connection);

        assert_eq!(result, Err(Error::DeleteMissingCategory));
        assert_eq!(get_all_categories(&connection).unwrap().len(), 1);
    }
}
