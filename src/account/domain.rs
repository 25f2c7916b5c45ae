//! Account types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    account_category::{AccountCategory, AccountCategoryId, AccountType},
    database_id::DatabaseId,
};

/// Alias for the ID of an account.
pub type AccountId = DatabaseId;

/// A bank account, investment, property, card or loan whose balance is
/// recorded once a month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// The ID of the account.
    pub id: AccountId,
    /// The unique display name.
    pub name: String,
    /// Whether the balance counts towards assets or debts.
    #[serde(rename = "type")]
    pub account_type: AccountType,
    /// The category the account is listed under.
    pub category_id: AccountCategoryId,
    /// Inactive accounts are hidden from the monthly views and totals.
    pub is_active: bool,
}

/// The most recent balance recorded for an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LatestSnapshot {
    /// The month of the snapshot, 1 to 12.
    pub month: u8,
    /// The year of the snapshot.
    pub year: i32,
    /// The recorded balance.
    pub value: Decimal,
}

/// An account with its category and most recent snapshot, as listed on the
/// accounts page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountWithDetails {
    /// The account.
    #[serde(flatten)]
    pub account: Account,
    /// The category of the account.
    pub category: AccountCategory,
    /// The snapshot with the highest year and month, if any.
    pub latest_snapshot: Option<LatestSnapshot>,
}

/// The JSON body for creating an account.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountBody {
    /// The account name, surrounding whitespace is trimmed.
    pub name: Option<String>,
    /// Whether the account is an asset or a debt.
    #[serde(rename = "type")]
    pub account_type: Option<AccountType>,
    /// The category to list the account under.
    pub category_id: Option<AccountCategoryId>,
}

/// The JSON body for updating an account.
///
/// Fields other than the name are optional and left unchanged when absent.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountBody {
    /// The new name.
    pub name: Option<String>,
    /// The new type.
    #[serde(rename = "type")]
    pub account_type: Option<AccountType>,
    /// The new category.
    pub category_id: Option<AccountCategoryId>,
    /// Activate or deactivate the account.
    pub is_active: Option<bool>,
}

/// The validated changes to apply to an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountChanges {
    /// The new name.
    pub name: String,
    /// The new type, if it should change.
    pub account_type: Option<AccountType>,
    /// The new category, if it should change.
    pub category_id: Option<AccountCategoryId>,
    /// The new active flag, if it should change.
    pub is_active: Option<bool>,
}
