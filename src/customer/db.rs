//! Database operations for customers.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    customer::{Customer, CustomerId, CustomerName, CustomerUpdate, MemberNumber, NewCustomer},
};

/// Create a customer and return it with its generated ID.
///
/// # Errors
/// Returns an [Error::DuplicateMemberNumber] if the member number is already
/// in use; the UNIQUE constraint is enforced by the store, not here.
pub fn create_customer(
    new_customer: NewCustomer,
    connection: &Connection,
) -> Result<Customer, Error> {
    connection.execute(
        "INSERT INTO customer (name, date_of_birth, member_number, interests)
        VALUES (?1, ?2, ?3, ?4);",
        (
            new_customer.name.as_ref(),
            new_customer.date_of_birth,
            new_customer.member_number.as_ref(),
            &new_customer.interests,
        ),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Customer {
        id,
        name: new_customer.name,
        date_of_birth: new_customer.date_of_birth,
        member_number: new_customer.member_number,
        interests: new_customer.interests,
    })
}

/// Retrieve a single customer by ID.
pub fn get_customer(customer_id: CustomerId, connection: &Connection) -> Result<Customer, Error> {
    connection
        .prepare(
            "SELECT id, name, date_of_birth, member_number, interests
            FROM customer WHERE id = :id;",
        )?
        .query_row(&[(":id", &customer_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all customers in insertion order.
///
/// The customer list has no pagination or search; callers always receive the
/// entire collection.
pub fn get_all_customers(connection: &Connection) -> Result<Vec<Customer>, Error> {
    connection
        .prepare("SELECT id, name, date_of_birth, member_number, interests FROM customer;")?
        .query_map([], map_row)?
        .map(|maybe_customer| maybe_customer.map_err(|error| error.into()))
        .collect()
}

/// Overwrite the fields present in `update` on the customer with
/// `customer_id` and return the updated record.
///
/// PUT and PATCH share these semantics: a shallow overwrite of the provided
/// fields, never a deep merge.
///
/// # Errors
/// Returns an [Error::UpdateMissingCustomer] if the customer doesn't exist.
pub fn update_customer(
    customer_id: CustomerId,
    update: CustomerUpdate,
    connection: &Connection,
) -> Result<Customer, Error> {
    let mut assignments: Vec<String> = Vec::new();
    let mut values: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

    if let Some(name) = update.name {
        values.push(Box::new(name));
        assignments.push(format!("name = ?{}", values.len()));
    }

    if let Some(date_of_birth) = update.date_of_birth {
        values.push(Box::new(date_of_birth));
        assignments.push(format!("date_of_birth = ?{}", values.len()));
    }

    if let Some(member_number) = update.member_number {
        values.push(Box::new(member_number.as_ref().to_string()));
        assignments.push(format!("member_number = ?{}", values.len()));
    }

    if let Some(interests) = update.interests {
        values.push(Box::new(interests));
        assignments.push(format!("interests = ?{}", values.len()));
    }

    if assignments.is_empty() {
        return get_customer(customer_id, connection).map_err(|error| match error {
            Error::NotFound => Error::UpdateMissingCustomer,
            other => other,
        });
    }

    values.push(Box::new(customer_id));
    let query = format!(
        "UPDATE customer SET {} WHERE id = ?{}",
        assignments.join(", "),
        values.len()
    );

    let params = rusqlite::params_from_iter(values.iter().map(|value| value.as_ref()));
    let rows_affected = connection.execute(&query, params)?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingCustomer);
    }

    get_customer(customer_id, connection)
}

/// Delete a customer by ID and return a snapshot of the deleted record.
///
/// # Errors
/// Returns an [Error::DeleteMissingCustomer] if the customer doesn't exist.
pub fn delete_customer(
    customer_id: CustomerId,
    connection: &Connection,
) -> Result<Customer, Error> {
    let customer = get_customer(customer_id, connection).map_err(|error| match error {
        Error::NotFound => Error::DeleteMissingCustomer,
        other => other,
    })?;

    connection.execute("DELETE FROM customer WHERE id = ?1", [customer_id])?;

    Ok(customer)
}

/// Initialize the customer table.
pub fn create_customer_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS customer (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            date_of_birth TEXT NOT NULL,
            member_number TEXT NOT NULL UNIQUE,
            interests TEXT
        );",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Customer, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let name = CustomerName::new_unchecked(&raw_name);
    let date_of_birth = row.get(2)?;
    let raw_member_number: String = row.get(3)?;
    let member_number = MemberNumber::new(raw_member_number);
    let interests = row.get(4)?;

    Ok(Customer {
        id,
        name,
        date_of_birth,
        member_number,
        interests,
    })
}
