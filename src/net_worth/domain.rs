//! Net worth snapshot types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    account::AccountId,
    account_category::{AccountCategoryId, AccountType},
};

/// One account on the monthly net worth page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetWorthAccountRow {
    /// The ID of the account.
    pub id: AccountId,
    /// The account name.
    pub name: String,
    /// Whether the account is an asset or a debt.
    #[serde(rename = "type")]
    pub account_type: AccountType,
    /// The name of the account's category.
    pub category: String,
    /// The ID of the account's category.
    pub category_id: AccountCategoryId,
    /// The balance recorded for the month, `None` if nothing was entered.
    pub current_value: Option<Decimal>,
    /// Whether a snapshot exists for the month, which tells "0" apart from
    /// "not entered".
    pub has_snapshot: bool,
}

/// Total assets, total debts and their difference.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetWorthTotals {
    /// The sum of asset balances.
    pub total_assets: Decimal,
    /// The sum of debt balances.
    pub total_debts: Decimal,
    /// Assets minus debts.
    pub net_worth: Decimal,
}

/// One month of the yearly net worth chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetWorthTrendPoint {
    /// The short month name, e.g. "Jan".
    pub month: &'static str,
    /// The month number, 1 to 12.
    pub month_num: u8,
    /// The sum of asset snapshots for the month.
    pub assets: Decimal,
    /// The sum of debt snapshots for the month.
    pub debts: Decimal,
    /// Assets minus debts.
    pub net_worth: Decimal,
}

/// A month for which at least one snapshot exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthWithData {
    /// The month, 1 to 12.
    pub month: u8,
    /// The year.
    pub year: i32,
}

/// Which months and years have snapshots, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetWorthSummary {
    /// Distinct months with snapshots, newest first.
    pub months_with_data: Vec<MonthWithData>,
    /// Distinct years with snapshots, newest first.
    pub years: Vec<i32>,
}

/// One snapshot in the body of a save request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotInput {
    /// The account the balance belongs to.
    pub account_id: Option<AccountId>,
    /// The balance, as a JSON number or numeric string.
    pub value: Option<Decimal>,
}

/// The JSON body for saving a month of snapshots.
#[derive(Debug, Default, Deserialize)]
pub struct SaveSnapshotsBody {
    /// The month, 1 to 12.
    pub month: Option<i64>,
    /// The year.
    pub year: Option<i64>,
    /// The balances to record, must not be empty.
    pub snapshots: Option<Vec<SnapshotInput>>,
}

/// A validated balance ready to be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotValue {
    /// The account the balance belongs to.
    pub account_id: AccountId,
    /// The balance.
    pub value: Decimal,
}
