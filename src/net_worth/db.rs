//! Database operations for net worth snapshots.

use rusqlite::{Connection, Row};
use rust_decimal::Decimal;

use crate::{
    Error,
    account::get_account,
    account_category::AccountType,
    money::{read_decimal, read_optional_decimal},
    net_worth::{
        MonthWithData, NetWorthAccountRow, NetWorthSummary, NetWorthTotals, SnapshotValue,
        aggregation::sum_by_account_type,
    },
    scope::{MonthScope, YearScope},
};

/// Initialize the net worth snapshot table.
///
/// There is at most one snapshot per account per month.
pub fn create_net_worth_snapshot_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS net_worth_snapshot (
            id INTEGER PRIMARY KEY,
            account_id INTEGER NOT NULL REFERENCES account(id) ON DELETE CASCADE,
            month INTEGER NOT NULL CHECK (month BETWEEN 1 AND 12),
            year INTEGER NOT NULL,
            value TEXT NOT NULL,
            UNIQUE (account_id, month, year)
        );

        CREATE INDEX IF NOT EXISTS idx_net_worth_snapshot_month_year
            ON net_worth_snapshot(year, month);",
    )?;

    Ok(())
}

fn map_account_row(row: &Row) -> Result<NetWorthAccountRow, rusqlite::Error> {
    let current_value = read_optional_decimal(row, 5)?;

    Ok(NetWorthAccountRow {
        id: row.get(0)?,
        name: row.get(1)?,
        account_type: row.get(2)?,
        category: row.get(3)?,
        category_id: row.get(4)?,
        has_snapshot: current_value.is_some(),
        current_value,
    })
}

/// Get every active account ordered by name with its balance for `scope`.
pub fn get_net_worth_rows(
    scope: MonthScope,
    connection: &Connection,
) -> Result<Vec<NetWorthAccountRow>, Error> {
    connection
        .prepare(
            "SELECT a.id, a.name, a.type, c.name, a.category_id, s.value
            FROM account a
            INNER JOIN account_category c ON c.id = a.category_id
            LEFT JOIN net_worth_snapshot s
                ON s.account_id = a.id AND s.month = ?1 AND s.year = ?2
            WHERE a.is_active = 1
            ORDER BY a.name ASC",
        )?
        .query_map((scope.month(), scope.year()), map_account_row)?
        .map(|maybe_row| maybe_row.map_err(Error::from))
        .collect()
}

/// Total the snapshots of active accounts for `scope`.
///
/// Accounts without a snapshot for the month contribute zero.
pub fn get_net_worth_totals(
    scope: MonthScope,
    connection: &Connection,
) -> Result<NetWorthTotals, Error> {
    let balances = connection
        .prepare(
            "SELECT a.type, s.value
            FROM net_worth_snapshot s
            INNER JOIN account a ON a.id = s.account_id
            WHERE a.is_active = 1 AND s.month = ?1 AND s.year = ?2",
        )?
        .query_map((scope.month(), scope.year()), |row| {
            Ok((row.get::<_, AccountType>(0)?, read_decimal(row, 1)?))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    sum_by_account_type(&balances)
}

/// Get `(month, account type, value)` for every snapshot in `year`,
/// including those of inactive accounts.
pub fn get_snapshot_balances_for_year(
    year: YearScope,
    connection: &Connection,
) -> Result<Vec<(u8, AccountType, Decimal)>, Error> {
    connection
        .prepare(
            "SELECT s.month, a.type, s.value
            FROM net_worth_snapshot s
            INNER JOIN account a ON a.id = s.account_id
            WHERE s.year = ?1
            ORDER BY s.month ASC",
        )?
        .query_map([year.year()], |row| {
            Ok((row.get(0)?, row.get(1)?, read_decimal(row, 2)?))
        })?
        .map(|maybe_balance| maybe_balance.map_err(Error::from))
        .collect()
}

/// Get the distinct months and years that have snapshots, newest first.
pub fn get_net_worth_summary(connection: &Connection) -> Result<NetWorthSummary, Error> {
    let months_with_data = connection
        .prepare(
            "SELECT DISTINCT month, year FROM net_worth_snapshot
            ORDER BY year DESC, month DESC",
        )?
        .query_map([], |row| {
            Ok(MonthWithData {
                month: row.get(0)?,
                year: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut years: Vec<i32> = months_with_data.iter().map(|month| month.year).collect();
    years.dedup();

    Ok(NetWorthSummary {
        months_with_data,
        years,
    })
}

/// Insert or update a snapshot for each of `snapshots` in `scope`.
///
/// All snapshots are written in one transaction. If any account does not
/// exist, nothing is written.
///
/// # Errors
/// Returns [Error::NotFound] for the first unknown account.
pub fn save_snapshots(
    scope: MonthScope,
    snapshots: &[SnapshotValue],
    connection: &Connection,
) -> Result<usize, Error> {
    let transaction = connection.unchecked_transaction()?;

    {
        let mut upsert = transaction.prepare(
            "INSERT INTO net_worth_snapshot (account_id, month, year, value)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT (account_id, month, year) DO UPDATE SET value = excluded.value",
        )?;

        for snapshot in snapshots {
            get_account(snapshot.account_id, &transaction)?;

            upsert.execute((
                snapshot.account_id,
                scope.month(),
                scope.year(),
                snapshot.value.normalize().to_string(),
            ))?;
        }
    }

    transaction.commit()?;

    Ok(snapshots.len())
}
