//! Database operations for budget categories.

use rusqlite::{Connection, OptionalExtension, Row};

use crate::{
    Error,
    budget_category::{
        BudgetCategory, BudgetCategoryChanges, BudgetCategoryId, BudgetCategorySummary,
        BudgetCategoryType,
    },
    error::is_unique_violation,
};

const RESOURCE: &str = "BudgetCategory";

/// Initialize the budget category table.
pub fn create_budget_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS budget_category (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            type TEXT NOT NULL DEFAULT 'WANT' CHECK (type IN ('NEED', 'WANT', 'SAVING')),
            is_active INTEGER NOT NULL DEFAULT 1,
            sort_order INTEGER NOT NULL DEFAULT 0
        )",
        (),
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<BudgetCategory, rusqlite::Error> {
    Ok(BudgetCategory {
        id: row.get(0)?,
        name: row.get(1)?,
        category_type: row.get(2)?,
        is_active: row.get(3)?,
        sort_order: row.get(4)?,
    })
}

fn map_unique_violation(error: rusqlite::Error) -> Error {
    if is_unique_violation(&error) {
        Error::conflict("Category name already exists", RESOURCE)
    } else {
        error.into()
    }
}

/// Retrieve a single budget category by ID.
///
/// # Errors
/// Returns [Error::NotFound] if there is no category with `id`.
pub fn get_budget_category(
    id: BudgetCategoryId,
    connection: &Connection,
) -> Result<BudgetCategory, Error> {
    connection
        .prepare(
            "SELECT id, name, type, is_active, sort_order FROM budget_category WHERE id = :id",
        )?
        .query_row(&[(":id", &id)], map_row)
        .optional()?
        .ok_or_else(|| Error::not_found(RESOURCE, id))
}

/// Retrieve the active budget categories in display order.
pub fn get_active_budget_categories(connection: &Connection) -> Result<Vec<BudgetCategory>, Error> {
    connection
        .prepare(
            "SELECT id, name, type, is_active, sort_order FROM budget_category
            WHERE is_active = 1
            ORDER BY sort_order ASC, name ASC",
        )?
        .query_map([], map_row)?
        .map(|maybe_category| maybe_category.map_err(Error::from))
        .collect()
}

/// Retrieve the active budget categories in display order with their entry counts.
pub fn get_budget_category_summaries(
    connection: &Connection,
) -> Result<Vec<BudgetCategorySummary>, Error> {
    connection
        .prepare(
            "SELECT c.id, c.name, c.type, c.is_active, c.sort_order, COUNT(e.id)
            FROM budget_category c
            LEFT JOIN budget_entry e ON e.category_id = c.id
            WHERE c.is_active = 1
            GROUP BY c.id
            ORDER BY c.sort_order ASC, c.name ASC",
        )?
        .query_map([], |row| {
            Ok(BudgetCategorySummary {
                category: map_row(row)?,
                entry_count: row.get(5)?,
            })
        })?
        .map(|maybe_summary| maybe_summary.map_err(Error::from))
        .collect()
}

/// Create an active budget category at the end of the display order.
///
/// # Errors
/// Returns [Error::Conflict] if the name is already taken.
pub fn create_budget_category(
    name: &str,
    category_type: BudgetCategoryType,
    connection: &Connection,
) -> Result<BudgetCategory, Error> {
    let sort_order: i64 = connection.query_row(
        "SELECT COALESCE(MAX(sort_order), 0) + 1 FROM budget_category",
        [],
        |row| row.get(0),
    )?;

    connection
        .execute(
            "INSERT INTO budget_category (name, type, is_active, sort_order) VALUES (?1, ?2, 1, ?3)",
            (name, category_type, sort_order),
        )
        .map_err(map_unique_violation)?;

    Ok(BudgetCategory {
        id: connection.last_insert_rowid(),
        name: name.to_owned(),
        category_type,
        is_active: true,
        sort_order,
    })
}

/// Apply `changes` to a budget category.
///
/// # Errors
/// Returns [Error::NotFound] if the category does not exist or
/// [Error::Conflict] if the new name is already taken.
pub fn update_budget_category(
    id: BudgetCategoryId,
    changes: &BudgetCategoryChanges,
    connection: &Connection,
) -> Result<BudgetCategory, Error> {
    let category = get_budget_category(id, connection)?;

    connection
        .execute(
            "UPDATE budget_category SET name = ?1, is_active = ?2, type = ?3 WHERE id = ?4",
            (
                changes.name.as_deref().unwrap_or(&category.name),
                changes.is_active.unwrap_or(category.is_active),
                changes.category_type.unwrap_or(category.category_type),
                id,
            ),
        )
        .map_err(map_unique_violation)?;

    get_budget_category(id, connection)
}

/// Delete a budget category that no budget entry or transaction references.
///
/// # Errors
/// Returns [Error::NotFound] if the category does not exist, or
/// [Error::Constraint] if it is still referenced.
pub fn delete_budget_category(id: BudgetCategoryId, connection: &Connection) -> Result<(), Error> {
    get_budget_category(id, connection)?;

    let entry_count: i64 = connection.query_row(
        "SELECT COUNT(*) FROM budget_entry WHERE category_id = ?1",
        [id],
        |row| row.get(0),
    )?;

    if entry_count > 0 {
        return Err(Error::constraint(
            "Cannot delete category with existing budget entries. Deactivate it instead.",
            "budget_category_has_entries",
        ));
    }

    let transaction_count: i64 = connection.query_row(
        "SELECT COUNT(*) FROM \"transaction\" WHERE category_id = ?1",
        [id],
        |row| row.get(0),
    )?;

    if transaction_count > 0 {
        return Err(Error::constraint(
            "Cannot delete category with existing transactions. Deactivate it instead.",
            "budget_category_has_transactions",
        ));
    }

    connection.execute("DELETE FROM budget_category WHERE id = ?1", [id])?;

    Ok(())
}

/// Set the display order so that `ordered_ids[i]` gets sort order `i + 1`.
///
/// All updates happen in one transaction.
///
/// # Errors
/// Returns [Error::NotFound] for the first unknown ID, in which case no
/// category is changed.
pub fn reorder_budget_categories(
    ordered_ids: &[BudgetCategoryId],
    connection: &Connection,
) -> Result<(), Error> {
    let transaction = connection.unchecked_transaction()?;

    {
        let mut update =
            transaction.prepare("UPDATE budget_category SET sort_order = ?1 WHERE id = ?2")?;

        for (sort_order, id) in (1_i64..).zip(ordered_ids) {
            if update.execute((sort_order, id))? == 0 {
                return Err(Error::not_found(RESOURCE, id));
            }
        }
    }

    transaction.commit()?;

    Ok(())
}
