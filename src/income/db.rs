//! Database operations for monthly income.

use rusqlite::{Connection, OptionalExtension, Row};
use rust_decimal::Decimal;

use crate::{
    Error,
    income::MonthlyIncome,
    money::read_decimal,
    scope::{MonthScope, YearScope},
};

/// Initialize the monthly income table, holding at most one row per month.
pub fn create_monthly_income_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS monthly_income (
            id INTEGER PRIMARY KEY,
            month INTEGER NOT NULL CHECK (month BETWEEN 1 AND 12),
            year INTEGER NOT NULL,
            amount TEXT NOT NULL,
            note TEXT,
            UNIQUE (month, year)
        )",
        (),
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<MonthlyIncome, rusqlite::Error> {
    Ok(MonthlyIncome {
        id: row.get(0)?,
        month: row.get(1)?,
        year: row.get(2)?,
        amount: read_decimal(row, 3)?,
        note: row.get(4)?,
    })
}

/// Get the income recorded for `scope`, if any.
pub fn get_income(
    scope: MonthScope,
    connection: &Connection,
) -> Result<Option<MonthlyIncome>, Error> {
    connection
        .prepare(
            "SELECT id, month, year, amount, note FROM monthly_income
            WHERE month = ?1 AND year = ?2",
        )?
        .query_row((scope.month(), scope.year()), map_row)
        .optional()
        .map_err(Error::from)
}

/// Get `(month, amount)` for every month of `year` with recorded income.
pub fn get_income_for_year(
    year: YearScope,
    connection: &Connection,
) -> Result<Vec<(u8, Decimal)>, Error> {
    connection
        .prepare("SELECT month, amount FROM monthly_income WHERE year = ?1")?
        .query_map([year.year()], |row| Ok((row.get(0)?, read_decimal(row, 1)?)))?
        .map(|maybe_income| maybe_income.map_err(Error::from))
        .collect()
}

/// Insert or replace the income for `scope`.
pub fn save_income(
    scope: MonthScope,
    amount: Decimal,
    note: Option<&str>,
    connection: &Connection,
) -> Result<MonthlyIncome, Error> {
    connection
        .prepare(
            "INSERT INTO monthly_income (month, year, amount, note) VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT (month, year) DO UPDATE SET amount = excluded.amount, note = excluded.note
            RETURNING id, month, year, amount, note",
        )?
        .query_row(
            (
                scope.month(),
                scope.year(),
                amount.normalize().to_string(),
                note,
            ),
            map_row,
        )
        .map_err(Error::from)
}
