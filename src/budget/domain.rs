//! Budget entry and budget view types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::budget_category::{BudgetCategoryId, BudgetCategoryType};

/// One category on the monthly budget page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetRow {
    /// The ID of the budget category.
    pub id: BudgetCategoryId,
    /// The category name.
    pub name: String,
    /// The needs/wants/savings bucket of the category.
    #[serde(rename = "type")]
    pub category_type: BudgetCategoryType,
    /// The amount budgeted for the month, carried forward from the previous
    /// month when there is no entry for this month.
    pub budgeted: Option<Decimal>,
    /// The sum of the category's transactions in the month.
    pub spent: Decimal,
    /// Whether a budget entry was saved for this month.
    pub has_entry: bool,
}

/// One entry in the body of a save request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetEntryInput {
    /// The category the amount is budgeted for.
    pub category_id: Option<BudgetCategoryId>,
    /// The amount as a JSON number or numeric string, anything else is zero.
    pub budgeted: Option<Value>,
}

/// The JSON body for saving a month of budget entries.
#[derive(Debug, Default, Deserialize)]
pub struct SaveBudgetBody {
    /// The month, 1 to 12.
    pub month: Option<i64>,
    /// The year.
    pub year: Option<i64>,
    /// The amounts to budget, must not be empty.
    pub entries: Option<Vec<BudgetEntryInput>>,
}

/// A validated budget entry ready to be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetEntryValue {
    /// The category the amount is budgeted for.
    pub category_id: BudgetCategoryId,
    /// The amount budgeted.
    pub budgeted: Decimal,
}

/// One month of the yearly budget chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetTrendPoint {
    /// The short month name, e.g. "Jan".
    pub month: &'static str,
    /// The month number, 1 to 12.
    pub month_num: u8,
    /// The sum of budget entries for the month.
    pub budgeted: Decimal,
    /// The sum of transactions in the month.
    pub spent: Decimal,
    /// The income recorded for the month, zero if none.
    pub income: Decimal,
    /// Income minus spent.
    pub savings: Decimal,
}
