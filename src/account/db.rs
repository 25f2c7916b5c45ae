//! Database operations for accounts.

use rusqlite::{Connection, OptionalExtension, Row};

use crate::{
    Error,
    account::{Account, AccountChanges, AccountId, AccountWithDetails, LatestSnapshot},
    account_category::{AccountCategory, AccountCategoryId, AccountType, get_account_category},
    error::is_unique_violation,
    money::read_optional_decimal,
};

const RESOURCE: &str = "Account";

const SELECT_ACCOUNT_WITH_DETAILS: &str = "SELECT a.id, a.name, a.type, a.category_id, a.is_active,
        c.id, c.name, c.type, c.is_default,
        s.month, s.year, s.value
    FROM account a
    INNER JOIN account_category c ON c.id = a.category_id
    LEFT JOIN net_worth_snapshot s ON s.id = (
        SELECT latest.id FROM net_worth_snapshot latest
        WHERE latest.account_id = a.id
        ORDER BY latest.year DESC, latest.month DESC
        LIMIT 1
    )";

/// Initialize the account table.
pub fn create_account_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS account (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            type TEXT NOT NULL CHECK (type IN ('ASSET', 'DEBT')),
            category_id INTEGER NOT NULL REFERENCES account_category(id),
            is_active INTEGER NOT NULL DEFAULT 1
        );

        CREATE INDEX IF NOT EXISTS idx_account_category_id ON account(category_id);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Account, rusqlite::Error> {
    Ok(Account {
        id: row.get(0)?,
        name: row.get(1)?,
        account_type: row.get(2)?,
        category_id: row.get(3)?,
        is_active: row.get(4)?,
    })
}

fn map_row_with_details(row: &Row) -> Result<AccountWithDetails, rusqlite::Error> {
    let account = map_row(row)?;
    let category = AccountCategory {
        id: row.get(5)?,
        name: row.get(6)?,
        account_type: row.get(7)?,
        is_default: row.get(8)?,
    };

    let month: Option<u8> = row.get(9)?;
    let year: Option<i32> = row.get(10)?;
    let value = read_optional_decimal(row, 11)?;

    let latest_snapshot = match (month, year, value) {
        (Some(month), Some(year), Some(value)) => Some(LatestSnapshot { month, year, value }),
        _ => None,
    };

    Ok(AccountWithDetails {
        account,
        category,
        latest_snapshot,
    })
}

fn map_unique_violation(error: rusqlite::Error) -> Error {
    if is_unique_violation(&error) {
        Error::conflict("An account with this name already exists", RESOURCE)
    } else {
        error.into()
    }
}

/// Retrieve a single account by ID.
///
/// # Errors
/// Returns [Error::NotFound] if there is no account with `id`.
pub fn get_account(id: AccountId, connection: &Connection) -> Result<Account, Error> {
    connection
        .prepare("SELECT id, name, type, category_id, is_active FROM account WHERE id = :id")?
        .query_row(&[(":id", &id)], map_row)
        .optional()?
        .ok_or_else(|| Error::not_found(RESOURCE, id))
}

/// Retrieve an account with its category and latest snapshot.
///
/// # Errors
/// Returns [Error::NotFound] if there is no account with `id`.
pub fn get_account_with_details(
    id: AccountId,
    connection: &Connection,
) -> Result<AccountWithDetails, Error> {
    connection
        .prepare(&format!("{SELECT_ACCOUNT_WITH_DETAILS} WHERE a.id = :id"))?
        .query_row(&[(":id", &id)], map_row_with_details)
        .optional()?
        .ok_or_else(|| Error::not_found(RESOURCE, id))
}

/// Retrieve all accounts, active or not, ordered by name.
pub fn get_accounts_with_details(connection: &Connection) -> Result<Vec<AccountWithDetails>, Error> {
    connection
        .prepare(&format!("{SELECT_ACCOUNT_WITH_DETAILS} ORDER BY a.name ASC"))?
        .query_map([], map_row_with_details)?
        .map(|maybe_account| maybe_account.map_err(Error::from))
        .collect()
}

/// Create an active account in an existing category.
///
/// # Errors
/// Returns [Error::NotFound] if the category does not exist or
/// [Error::Conflict] if the name is already taken.
pub fn create_account(
    name: &str,
    account_type: AccountType,
    category_id: AccountCategoryId,
    connection: &Connection,
) -> Result<AccountWithDetails, Error> {
    let category = get_account_category(category_id, connection)?;

    connection
        .execute(
            "INSERT INTO account (name, type, category_id, is_active) VALUES (?1, ?2, ?3, 1)",
            (name, account_type, category_id),
        )
        .map_err(map_unique_violation)?;

    Ok(AccountWithDetails {
        account: Account {
            id: connection.last_insert_rowid(),
            name: name.to_owned(),
            account_type,
            category_id,
            is_active: true,
        },
        category,
        latest_snapshot: None,
    })
}

/// Apply `changes` to an account.
///
/// # Errors
/// Returns [Error::NotFound] if the account or the new category does not
/// exist, or [Error::Conflict] if the new name is already taken.
pub fn update_account(
    id: AccountId,
    changes: &AccountChanges,
    connection: &Connection,
) -> Result<AccountWithDetails, Error> {
    let account = get_account(id, connection)?;

    if let Some(category_id) = changes.category_id {
        get_account_category(category_id, connection)?;
    }

    connection
        .execute(
            "UPDATE account SET name = ?1, type = ?2, category_id = ?3, is_active = ?4 WHERE id = ?5",
            (
                &changes.name,
                changes.account_type.unwrap_or(account.account_type),
                changes.category_id.unwrap_or(account.category_id),
                changes.is_active.unwrap_or(account.is_active),
                id,
            ),
        )
        .map_err(map_unique_violation)?;

    get_account_with_details(id, connection)
}

/// Delete an account that has no recorded snapshots.
///
/// # Errors
/// Returns [Error::NotFound] if the account does not exist, or
/// [Error::Constraint] if it has snapshots.
pub fn delete_account(id: AccountId, connection: &Connection) -> Result<(), Error> {
    get_account(id, connection)?;

    let snapshot_count: i64 = connection.query_row(
        "SELECT COUNT(*) FROM net_worth_snapshot WHERE account_id = ?1",
        [id],
        |row| row.get(0),
    )?;

    if snapshot_count > 0 {
        return Err(Error::constraint(
            &format!(
                "Cannot delete account with {snapshot_count} snapshot(s). Deactivate it instead."
            ),
            "account_has_snapshots",
        ));
    }

    connection.execute("DELETE FROM account WHERE id = ?1", [id])?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use rust_decimal::Decimal;

    use crate::{
        Error,
        account::{AccountChanges, LatestSnapshot},
        account_category::{AccountCategory, AccountType, create_account_category},
        db::initialize,
    };

    use super::{
        create_account, delete_account, get_account, get_account_with_details,
        get_accounts_with_details, update_account,
    };

    fn get_test_connection() -> (Connection, AccountCategory) {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let category = create_account_category("Bank", AccountType::Asset, &connection).unwrap();
        (connection, category)
    }

    fn insert_snapshot(account_id: i64, month: u8, year: i32, value: &str, connection: &Connection) {
        connection
            .execute(
                "INSERT INTO net_worth_snapshot (account_id, month, year, value) VALUES (?1, ?2, ?3, ?4)",
                (account_id, month, year, value),
            )
            .unwrap();
    }

    #[test]
    fn create_account_in_missing_category_is_not_found() {
        let (connection, _) = get_test_connection();

        let result = create_account("Everyday", AccountType::Asset, 999, &connection);

        assert_eq!(result, Err(Error::not_found("AccountCategory", 999)));
    }

    #[test]
    fn create_account_is_active_without_snapshot() {
        let (connection, category) = get_test_connection();

        let created = create_account("Everyday", AccountType::Asset, category.id, &connection).unwrap();

        assert!(created.account.is_active);
        assert_eq!(created.category, category);
        assert_eq!(created.latest_snapshot, None);
        assert_eq!(
            get_account_with_details(created.account.id, &connection).unwrap(),
            created
        );
    }

    #[test]
    fn duplicate_account_name_is_a_conflict() {
        let (connection, category) = get_test_connection();
        create_account("Everyday", AccountType::Asset, category.id, &connection).unwrap();

        let result = create_account("Everyday", AccountType::Asset, category.id, &connection);

        assert!(matches!(result, Err(Error::Conflict { .. })));
    }

    #[test]
    fn details_include_latest_snapshot() {
        let (connection, category) = get_test_connection();
        let created = create_account("Everyday", AccountType::Asset, category.id, &connection).unwrap();
        let id = created.account.id;
        insert_snapshot(id, 12, 2023, "100", &connection);
        insert_snapshot(id, 2, 2024, "250.50", &connection);
        insert_snapshot(id, 1, 2024, "180", &connection);

        let accounts = get_accounts_with_details(&connection).unwrap();

        assert_eq!(accounts.len(), 1);
        assert_eq!(
            accounts[0].latest_snapshot,
            Some(LatestSnapshot {
                month: 2,
                year: 2024,
                value: "250.50".parse::<Decimal>().unwrap(),
            })
        );
    }

    #[test]
    fn update_keeps_unspecified_fields() {
        let (connection, category) = get_test_connection();
        let created = create_account("Visa", AccountType::Debt, category.id, &connection).unwrap();
        let changes = AccountChanges {
            name: "Visa Platinum".to_owned(),
            account_type: None,
            category_id: None,
            is_active: Some(false),
        };

        let updated = update_account(created.account.id, &changes, &connection).unwrap();

        assert_eq!(updated.account.name, "Visa Platinum");
        assert_eq!(updated.account.account_type, AccountType::Debt);
        assert_eq!(updated.account.category_id, category.id);
        assert!(!updated.account.is_active);
    }

    #[test]
    fn update_to_missing_category_is_not_found() {
        let (connection, category) = get_test_connection();
        let created = create_account("Visa", AccountType::Debt, category.id, &connection).unwrap();
        let changes = AccountChanges {
            name: "Visa".to_owned(),
            account_type: None,
            category_id: Some(404),
            is_active: None,
        };

        let result = update_account(created.account.id, &changes, &connection);

        assert_eq!(result, Err(Error::not_found("AccountCategory", 404)));
    }

    #[test]
    fn cannot_delete_account_with_snapshots() {
        let (connection, category) = get_test_connection();
        let created = create_account("Everyday", AccountType::Asset, category.id, &connection).unwrap();
        insert_snapshot(created.account.id, 1, 2024, "10", &connection);

        let result = delete_account(created.account.id, &connection);

        let Err(Error::Constraint { constraint, .. }) = result else {
            panic!("want a constraint error");
        };
        assert_eq!(constraint, "account_has_snapshots");
        assert!(get_account(created.account.id, &connection).is_ok());
    }

    #[test]
    fn delete_account_without_snapshots() {
        let (connection, category) = get_test_connection();
        let created = create_account("Everyday", AccountType::Asset, category.id, &connection).unwrap();

        delete_account(created.account.id, &connection).unwrap();

        assert_eq!(
            get_account(created.account.id, &connection),
            Err(Error::not_found("Account", created.account.id))
        );
    }

    #[test]
    fn delete_missing_account_is_not_found() {
        let (connection, _) = get_test_connection();

        assert_eq!(
            delete_account(7, &connection),
            Err(Error::not_found("Account", 7))
        );
    }
}
