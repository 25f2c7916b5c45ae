//! Database operations for account categories.

use rusqlite::{Connection, OptionalExtension, Row};

use crate::{
    Error,
    account_category::{AccountCategory, AccountCategoryId, AccountCategorySummary, AccountType},
    error::is_unique_violation,
};

const RESOURCE: &str = "AccountCategory";

/// Initialize the account category table.
pub fn create_account_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS account_category (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            type TEXT NOT NULL DEFAULT 'ASSET' CHECK (type IN ('ASSET', 'DEBT')),
            is_default INTEGER NOT NULL DEFAULT 0
        )",
        (),
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<AccountCategory, rusqlite::Error> {
    Ok(AccountCategory {
        id: row.get(0)?,
        name: row.get(1)?,
        account_type: row.get(2)?,
        is_default: row.get(3)?,
    })
}

fn map_unique_violation(error: rusqlite::Error) -> Error {
    if is_unique_violation(&error) {
        Error::conflict("An account category with this name already exists", RESOURCE)
    } else {
        error.into()
    }
}

/// Retrieve a single account category by ID.
///
/// # Errors
/// Returns [Error::NotFound] if there is no category with `id`.
pub fn get_account_category(
    id: AccountCategoryId,
    connection: &Connection,
) -> Result<AccountCategory, Error> {
    connection
        .prepare("SELECT id, name, type, is_default FROM account_category WHERE id = :id")?
        .query_row(&[(":id", &id)], map_row)
        .optional()?
        .ok_or_else(|| Error::not_found(RESOURCE, id))
}

/// Retrieve every account category ordered by name, with how many accounts use each.
pub fn get_account_category_summaries(
    connection: &Connection,
) -> Result<Vec<AccountCategorySummary>, Error> {
    connection
        .prepare(
            "SELECT c.id, c.name, c.type, c.is_default, COUNT(a.id)
            FROM account_category c
            LEFT JOIN account a ON a.category_id = c.id
            GROUP BY c.id
            ORDER BY c.name ASC",
        )?
        .query_map([], |row| {
            Ok(AccountCategorySummary {
                category: map_row(row)?,
                account_count: row.get(4)?,
            })
        })?
        .map(|maybe_summary| maybe_summary.map_err(Error::from))
        .collect()
}

/// Create a user defined account category.
///
/// # Errors
/// Returns [Error::Conflict] if the name is already taken.
pub fn create_account_category(
    name: &str,
    account_type: AccountType,
    connection: &Connection,
) -> Result<AccountCategory, Error> {
    connection
        .execute(
            "INSERT INTO account_category (name, type, is_default) VALUES (?1, ?2, 0)",
            (name, account_type),
        )
        .map_err(map_unique_violation)?;

    Ok(AccountCategory {
        id: connection.last_insert_rowid(),
        name: name.to_owned(),
        account_type,
        is_default: false,
    })
}

/// Rename a category and set its type.
///
/// # Errors
/// Returns [Error::NotFound] if the category does not exist or
/// [Error::Conflict] if the new name is already taken.
pub fn update_account_category(
    id: AccountCategoryId,
    name: &str,
    account_type: AccountType,
    connection: &Connection,
) -> Result<AccountCategory, Error> {
    let rows_affected = connection
        .execute(
            "UPDATE account_category SET name = ?1, type = ?2 WHERE id = ?3",
            (name, account_type, id),
        )
        .map_err(map_unique_violation)?;

    if rows_affected == 0 {
        return Err(Error::not_found(RESOURCE, id));
    }

    get_account_category(id, connection)
}

/// Delete a user defined category that no account uses.
///
/// # Errors
/// Returns [Error::NotFound] if the category does not exist, or
/// [Error::Constraint] if it is a default category or still has accounts.
pub fn delete_account_category(id: AccountCategoryId, connection: &Connection) -> Result<(), Error> {
    let category = get_account_category(id, connection)?;

    if category.is_default {
        return Err(Error::constraint(
            "Default categories cannot be deleted",
            "account_category_is_default",
        ));
    }

    let account_count: i64 = connection.query_row(
        "SELECT COUNT(*) FROM account WHERE category_id = ?1",
        [id],
        |row| row.get(0),
    )?;

    if account_count > 0 {
        return Err(Error::constraint(
            &format!(
                "Cannot delete category with {account_count} account(s). \
                Move or delete the accounts first."
            ),
            "account_category_has_accounts",
        ));
    }

    connection.execute("DELETE FROM account_category WHERE id = ?1", [id])?;

    Ok(())
}
