//! Database operations for transactions.

use std::{collections::HashMap, ops::RangeInclusive};

use rusqlite::{Connection, OptionalExtension, Row, named_params};
use rust_decimal::Decimal;
use time::Date;

use crate::{
    Error,
    budget_category::{BudgetCategory, BudgetCategoryId, get_budget_category},
    money::{read_decimal, total},
    scope::MonthScope,
    transaction::{
        NewTransaction, Transaction, TransactionChanges, TransactionFilter, TransactionId,
        TransactionWithCategory,
    },
};

const RESOURCE: &str = "Transaction";

const SELECT_TRANSACTION_WITH_CATEGORY: &str = "SELECT t.id, t.date, t.amount, t.vendor, t.description, t.category_id, t.is_recurring,
        c.id, c.name, c.type, c.is_active, c.sort_order
    FROM \"transaction\" t
    INNER JOIN budget_category c ON c.id = t.category_id";

/// Initialize the transaction table and its indexes.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
            id INTEGER PRIMARY KEY,
            date TEXT NOT NULL,
            amount TEXT NOT NULL,
            vendor TEXT,
            description TEXT,
            category_id INTEGER NOT NULL REFERENCES budget_category(id),
            is_recurring INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_transaction_date ON \"transaction\"(date);
        CREATE INDEX IF NOT EXISTS idx_transaction_category_date
            ON \"transaction\"(category_id, date);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        date: row.get(1)?,
        amount: read_decimal(row, 2)?,
        vendor: row.get(3)?,
        description: row.get(4)?,
        category_id: row.get(5)?,
        is_recurring: row.get(6)?,
    })
}

fn map_row_with_category(row: &Row) -> Result<TransactionWithCategory, rusqlite::Error> {
    Ok(TransactionWithCategory {
        transaction: map_row(row)?,
        category: BudgetCategory {
            id: row.get(7)?,
            name: row.get(8)?,
            category_type: row.get(9)?,
            is_active: row.get(10)?,
            sort_order: row.get(11)?,
        },
    })
}

/// Retrieve a transaction with its category.
///
/// # Errors
/// Returns [Error::NotFound] if there is no transaction with `id`.
pub fn get_transaction(
    id: TransactionId,
    connection: &Connection,
) -> Result<TransactionWithCategory, Error> {
    connection
        .prepare(&format!("{SELECT_TRANSACTION_WITH_CATEGORY} WHERE t.id = :id"))?
        .query_row(&[(":id", &id)], map_row_with_category)
        .optional()?
        .ok_or_else(|| Error::not_found(RESOURCE, id))
}

/// List the transactions in `scope` that match `filter`, newest first.
pub fn list_transactions(
    scope: MonthScope,
    filter: &TransactionFilter,
    connection: &Connection,
) -> Result<Vec<TransactionWithCategory>, Error> {
    let range = scope.date_range();

    connection
        .prepare(&format!(
            "{SELECT_TRANSACTION_WITH_CATEGORY}
            WHERE t.date BETWEEN :start AND :end
                AND (:category_id IS NULL OR t.category_id = :category_id)
                AND (:search IS NULL
                    OR instr(lower(coalesce(t.vendor, '')), lower(:search)) > 0
                    OR instr(lower(coalesce(t.description, '')), lower(:search)) > 0)
            ORDER BY t.date DESC, t.id DESC"
        ))?
        .query_map(
            named_params! {
                ":start": range.start(),
                ":end": range.end(),
                ":category_id": filter.category_id,
                ":search": filter.search,
            },
            map_row_with_category,
        )?
        .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
        .collect()
}

/// Get the transactions dated within `range`, newest first.
///
/// With `recurring_only`, only transactions flagged as recurring are returned.
pub fn get_transactions_in_range(
    range: &RangeInclusive<Date>,
    recurring_only: bool,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, date, amount, vendor, description, category_id, is_recurring
            FROM \"transaction\"
            WHERE date BETWEEN :start AND :end AND (:recurring_only = 0 OR is_recurring = 1)
            ORDER BY date DESC, id DESC",
        )?
        .query_map(
            named_params! {
                ":start": range.start(),
                ":end": range.end(),
                ":recurring_only": recurring_only,
            },
            map_row,
        )?
        .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
        .collect()
}

/// Sum the transactions dated within `range` for each category.
///
/// Categories without transactions in the range are absent from the map.
pub fn get_spent_by_category(
    range: &RangeInclusive<Date>,
    connection: &Connection,
) -> Result<HashMap<BudgetCategoryId, Decimal>, Error> {
    let mut amounts: HashMap<BudgetCategoryId, Vec<Decimal>> = HashMap::new();

    let mut statement = connection.prepare(
        "SELECT category_id, amount FROM \"transaction\" WHERE date BETWEEN ?1 AND ?2",
    )?;
    let rows = statement.query_map((range.start(), range.end()), |row| {
        Ok((row.get::<_, BudgetCategoryId>(0)?, read_decimal(row, 1)?))
    })?;

    for row in rows {
        let (category_id, amount) = row?;
        amounts.entry(category_id).or_default().push(amount);
    }

    amounts
        .into_iter()
        .map(|(category_id, amounts)| Ok((category_id, total(&amounts)?)))
        .collect()
}

/// Insert a transaction in an existing category.
///
/// # Errors
/// Returns [Error::NotFound] if the category does not exist.
pub fn create_transaction(
    transaction: &NewTransaction,
    connection: &Connection,
) -> Result<TransactionWithCategory, Error> {
    get_budget_category(transaction.category_id, connection)?;

    connection.execute(
        "INSERT INTO \"transaction\" (date, amount, vendor, description, category_id, is_recurring)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        (
            transaction.date,
            transaction.amount.normalize().to_string(),
            &transaction.vendor,
            &transaction.description,
            transaction.category_id,
            transaction.is_recurring,
        ),
    )?;

    get_transaction(connection.last_insert_rowid(), connection)
}

/// Apply `changes` to a transaction.
///
/// # Errors
/// Returns [Error::NotFound] if the transaction or the new category does not exist.
pub fn update_transaction(
    id: TransactionId,
    changes: &TransactionChanges,
    connection: &Connection,
) -> Result<TransactionWithCategory, Error> {
    let current = get_transaction(id, connection)?.transaction;

    if let Some(category_id) = changes.category_id {
        get_budget_category(category_id, connection)?;
    }

    connection.execute(
        "UPDATE \"transaction\"
        SET date = ?1, amount = ?2, vendor = ?3, description = ?4, category_id = ?5, is_recurring = ?6
        WHERE id = ?7",
        (
            changes.date.unwrap_or(current.date),
            changes
                .amount
                .unwrap_or(current.amount)
                .normalize()
                .to_string(),
            changes.vendor.as_ref().unwrap_or(&current.vendor),
            changes.description.as_ref().unwrap_or(&current.description),
            changes.category_id.unwrap_or(current.category_id),
            changes.is_recurring.unwrap_or(current.is_recurring),
            id,
        ),
    )?;

    get_transaction(id, connection)
}

/// Delete a transaction.
///
/// # Errors
/// Returns [Error::NotFound] if there is no transaction with `id`.
pub fn delete_transaction(id: TransactionId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM \"transaction\" WHERE id = ?1", [id])?;

    if rows_affected == 0 {
        return Err(Error::not_found(RESOURCE, id));
    }

    Ok(())
}
