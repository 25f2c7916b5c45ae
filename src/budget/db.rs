//! Database operations for budget entries.

use std::collections::HashMap;

use rusqlite::Connection;
use rust_decimal::Decimal;

use crate::{
    Error,
    budget::BudgetEntryValue,
    budget_category::{BudgetCategoryId, get_budget_category},
    money::read_decimal,
    scope::{MonthScope, YearScope},
};

/// Initialize the budget entry table.
///
/// There is at most one entry per category per month. The `spent` column is
/// kept for older databases, spending is always summed from transactions.
pub fn create_budget_entry_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS budget_entry (
            id INTEGER PRIMARY KEY,
            category_id INTEGER NOT NULL REFERENCES budget_category(id),
            month INTEGER NOT NULL CHECK (month BETWEEN 1 AND 12),
            year INTEGER NOT NULL,
            budgeted TEXT NOT NULL,
            spent TEXT NOT NULL DEFAULT '0',
            UNIQUE (category_id, month, year)
        );

        CREATE INDEX IF NOT EXISTS idx_budget_entry_month_year ON budget_entry(year, month);",
    )?;

    Ok(())
}

/// Get the budgeted amount of each category with an entry for `scope`.
pub fn get_budgeted_by_category(
    scope: MonthScope,
    connection: &Connection,
) -> Result<HashMap<BudgetCategoryId, Decimal>, Error> {
    connection
        .prepare("SELECT category_id, budgeted FROM budget_entry WHERE month = ?1 AND year = ?2")?
        .query_map((scope.month(), scope.year()), |row| {
            Ok((row.get(0)?, read_decimal(row, 1)?))
        })?
        .map(|maybe_entry| maybe_entry.map_err(Error::from))
        .collect()
}

/// Get `(month, budgeted)` for every budget entry in `year`.
pub fn get_budgeted_for_year(
    year: YearScope,
    connection: &Connection,
) -> Result<Vec<(u8, Decimal)>, Error> {
    connection
        .prepare("SELECT month, budgeted FROM budget_entry WHERE year = ?1")?
        .query_map([year.year()], |row| Ok((row.get(0)?, read_decimal(row, 1)?)))?
        .map(|maybe_entry| maybe_entry.map_err(Error::from))
        .collect()
}

/// Insert or update the budget entry of each of `entries` in `scope`.
///
/// All entries are written in one transaction. If any category does not
/// exist, nothing is written.
///
/// # Errors
/// Returns [Error::NotFound] for the first unknown category.
pub fn save_budget_entries(
    scope: MonthScope,
    entries: &[BudgetEntryValue],
    connection: &Connection,
) -> Result<usize, Error> {
    let transaction = connection.unchecked_transaction()?;

    {
        let mut upsert = transaction.prepare(
            "INSERT INTO budget_entry (category_id, month, year, budgeted, spent)
            VALUES (?1, ?2, ?3, ?4, '0')
            ON CONFLICT (category_id, month, year) DO UPDATE SET budgeted = excluded.budgeted",
        )?;

        for entry in entries {
            get_budget_category(entry.category_id, &transaction)?;

            upsert.execute((
                entry.category_id,
                scope.month(),
                scope.year(),
                entry.budgeted.normalize().to_string(),
            ))?;
        }
    }

    transaction.commit()?;

    Ok(entries.len())
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use rust_decimal::Decimal;

    use crate::{
        Error,
        budget::BudgetEntryValue,
        budget_category::{BudgetCategoryType, create_budget_category},
        db::initialize,
        scope::{MonthScope, YearScope},
    };

    use super::{get_budgeted_by_category, get_budgeted_for_year, save_budget_entries};

    fn dec(text: &str) -> Decimal {
        text.parse().unwrap()
    }

    fn get_test_connection() -> (Connection, i64) {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let groceries =
            create_budget_category("Groceries", BudgetCategoryType::Need, &connection).unwrap();
        (connection, groceries.id)
    }

    fn count_entries(connection: &Connection) -> i64 {
        connection
            .query_row("SELECT COUNT(*) FROM budget_entry", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn saving_twice_keeps_one_entry_with_final_value() {
        let (connection, groceries) = get_test_connection();
        let march = MonthScope::new(3, 2024).unwrap();

        for budgeted in ["450", "500"] {
            save_budget_entries(
                march,
                &[BudgetEntryValue {
                    category_id: groceries,
                    budgeted: dec(budgeted),
                }],
                &connection,
            )
            .unwrap();
        }

        assert_eq!(count_entries(&connection), 1);
        let budgeted = get_budgeted_by_category(march, &connection).unwrap();
        assert_eq!(budgeted[&groceries], dec("500"));
    }

    #[test]
    fn unknown_category_rolls_back_the_batch() {
        let (connection, groceries) = get_test_connection();
        let march = MonthScope::new(3, 2024).unwrap();

        let result = save_budget_entries(
            march,
            &[
                BudgetEntryValue {
                    category_id: groceries,
                    budgeted: dec("500"),
                },
                BudgetEntryValue {
                    category_id: 404,
                    budgeted: dec("20"),
                },
            ],
            &connection,
        );

        assert_eq!(result, Err(Error::not_found("BudgetCategory", 404)));
        assert_eq!(count_entries(&connection), 0);
    }

    #[test]
    fn year_entries_skip_other_years() {
        let (connection, groceries) = get_test_connection();
        for (month, year) in [(1, 2024), (12, 2023)] {
            save_budget_entries(
                MonthScope::new(month, year).unwrap(),
                &[BudgetEntryValue {
                    category_id: groceries,
                    budgeted: dec("100"),
                }],
                &connection,
            )
            .unwrap();
        }

        let entries = get_budgeted_for_year(YearScope::new(2024).unwrap(), &connection).unwrap();

        assert_eq!(entries, vec![(1, dec("100"))]);
    }
}
