//! Sets up the SQLite schema and seeds default and sample data.

use rusqlite::{Connection, OptionalExtension, Transaction as SqlTransaction, TransactionBehavior};
use rust_decimal::Decimal;

use crate::{
    Error,
    account::{create_account, create_account_table},
    account_category::{AccountType, create_account_category_table},
    budget::{BudgetEntryValue, create_budget_entry_table, save_budget_entries},
    budget_category::{BudgetCategoryId, create_budget_category_table},
    income::{create_monthly_income_table, save_income},
    net_worth::{SnapshotValue, create_net_worth_snapshot_table, save_snapshots},
    scope::MonthScope,
    transaction::{NewTransaction, create_transaction, create_transaction_table},
};

/// The account categories every database starts with.
pub const DEFAULT_ACCOUNT_CATEGORIES: [(&str, AccountType); 6] = [
    ("Bank", AccountType::Asset),
    ("Investment", AccountType::Asset),
    ("Property", AccountType::Asset),
    ("Credit Card", AccountType::Debt),
    ("Loan", AccountType::Debt),
    ("Mortgage", AccountType::Debt),
];

/// The budget categories every database starts with, in display order.
pub const DEFAULT_BUDGET_CATEGORIES: [&str; 13] = [
    "Baby Care",
    "Car Care",
    "Debt",
    "Eating Out",
    "Entertainment",
    "Gas",
    "Groceries",
    "House Care",
    "Miscellaneous",
    "Mortgage",
    "Self Care",
    "Streaming Services",
    "Utilities",
];

/// Create the tables for every domain model.
///
/// Foreign keys are switched on for `connection` and the tables are created in
/// one exclusive transaction. Calling this on an initialized database is a no-op.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    // Has no effect inside a transaction, so it must run first.
    connection.pragma_update(None, "foreign_keys", "ON")?;

    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_account_category_table(&transaction)?;
    create_account_table(&transaction)?;
    create_net_worth_snapshot_table(&transaction)?;
    create_budget_category_table(&transaction)?;
    create_budget_entry_table(&transaction)?;
    create_monthly_income_table(&transaction)?;
    create_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

/// Insert the default account and budget categories.
///
/// Categories whose name already exists are left untouched, so this is safe
/// to run on every start up.
pub fn seed_default_categories(connection: &Connection) -> Result<(), Error> {
    let transaction = connection.unchecked_transaction()?;

    {
        let mut insert_account_category = transaction.prepare(
            "INSERT INTO account_category (name, type, is_default) VALUES (?1, ?2, 1)
            ON CONFLICT (name) DO NOTHING",
        )?;

        for (name, account_type) in DEFAULT_ACCOUNT_CATEGORIES {
            insert_account_category.execute((name, account_type))?;
        }

        let mut insert_budget_category = transaction.prepare(
            "INSERT INTO budget_category (name, type, is_active, sort_order) VALUES (?1, 'WANT', 1, ?2)
            ON CONFLICT (name) DO NOTHING",
        )?;

        for (index, name) in DEFAULT_BUDGET_CATEGORIES.iter().enumerate() {
            insert_budget_category.execute((*name, index as i64 + 1))?;
        }
    }

    transaction.commit()?;

    Ok(())
}

/// Fill the three months up to and including `latest` with accounts,
/// balances, budgets, income and transactions for manual testing.
///
/// Expects the default categories to exist.
pub fn seed_sample_data(latest: MonthScope, connection: &Connection) -> Result<(), Error> {
    let everyday = create_account(
        "Everyday",
        AccountType::Asset,
        account_category_id("Bank", connection)?,
        connection,
    )?
    .account
    .id;
    let retirement = create_account(
        "Retirement Fund",
        AccountType::Asset,
        account_category_id("Investment", connection)?,
        connection,
    )?
    .account
    .id;
    let visa = create_account(
        "Visa",
        AccountType::Debt,
        account_category_id("Credit Card", connection)?,
        connection,
    )?
    .account
    .id;

    let groceries = budget_category_id("Groceries", connection)?;
    let eating_out = budget_category_id("Eating Out", connection)?;
    let streaming = budget_category_id("Streaming Services", connection)?;
    let utilities = budget_category_id("Utilities", connection)?;

    for offset in (0..3u32).rev() {
        let scope = latest.minus_months(offset);
        let step = Decimal::from(2 - offset);

        save_snapshots(
            scope,
            &[
                SnapshotValue {
                    account_id: everyday,
                    value: Decimal::new(420_000, 2) + step * Decimal::new(350, 0),
                },
                SnapshotValue {
                    account_id: retirement,
                    value: Decimal::new(1_850_000, 2) + step * Decimal::new(275, 0),
                },
                SnapshotValue {
                    account_id: visa,
                    value: Decimal::new(64_550, 2) - step * Decimal::new(120, 0),
                },
            ],
            connection,
        )?;

        save_budget_entries(
            scope,
            &[
                BudgetEntryValue {
                    category_id: groceries,
                    budgeted: Decimal::new(600, 0),
                },
                BudgetEntryValue {
                    category_id: eating_out,
                    budgeted: Decimal::new(150, 0),
                },
                BudgetEntryValue {
                    category_id: streaming,
                    budgeted: Decimal::new(30, 0),
                },
                BudgetEntryValue {
                    category_id: utilities,
                    budgeted: Decimal::new(220, 0),
                },
            ],
            connection,
        )?;

        save_income(scope, Decimal::new(5200, 0), Some("Salary"), connection)?;

        let sample_transactions = [
            (3, Decimal::new(14287, 2), "Countdown", groceries, false),
            (10, Decimal::new(9640, 2), "Pak'nSave", groceries, false),
            (17, Decimal::new(13115, 2), "Countdown", groceries, false),
            (12, Decimal::new(4850, 2), "Burger Joint", eating_out, false),
            (15, Decimal::new(1599, 2), "Netflix", streaming, true),
            (20, Decimal::new(18462, 2), "Power Co", utilities, true),
        ];

        for (day, amount, vendor, category_id, is_recurring) in sample_transactions {
            create_transaction(
                &NewTransaction {
                    date: scope.clamped_date(day),
                    amount,
                    vendor: Some(vendor.to_owned()),
                    description: None,
                    category_id,
                    is_recurring,
                },
                connection,
            )?;
        }
    }

    Ok(())
}

fn account_category_id(name: &str, connection: &Connection) -> Result<i64, Error> {
    connection
        .query_row(
            "SELECT id FROM account_category WHERE name = ?1",
            [name],
            |row| row.get(0),
        )
        .optional()?
        .ok_or_else(|| Error::not_found("AccountCategory", name))
}

fn budget_category_id(name: &str, connection: &Connection) -> Result<BudgetCategoryId, Error> {
    connection
        .query_row(
            "SELECT id FROM budget_category WHERE name = ?1",
            [name],
            |row| row.get(0),
        )
        .optional()?
        .ok_or_else(|| Error::not_found("BudgetCategory", name))
}
