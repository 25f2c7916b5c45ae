//! Monthly income types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::database_id::DatabaseId;

/// The income recorded for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyIncome {
    /// The ID of the income row.
    pub id: DatabaseId,
    /// The month, 1 to 12.
    pub month: u8,
    /// The year.
    pub year: i32,
    /// The total income for the month.
    pub amount: Decimal,
    /// An optional note, e.g. "includes bonus".
    pub note: Option<String>,
}

/// The income of a month, or empty fields if none was recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum IncomeResponse {
    /// Income was recorded for the month.
    Recorded(MonthlyIncome),
    /// Nothing was recorded, both fields serialize as `null`.
    Missing {
        /// Always `None`.
        amount: Option<Decimal>,
        /// Always `None`.
        note: Option<String>,
    },
}

impl From<Option<MonthlyIncome>> for IncomeResponse {
    fn from(income: Option<MonthlyIncome>) -> Self {
        match income {
            Some(income) => IncomeResponse::Recorded(income),
            None => IncomeResponse::Missing {
                amount: None,
                note: None,
            },
        }
    }
}

/// The JSON body for saving a month's income.
#[derive(Debug, Default, Deserialize)]
pub struct SaveIncomeBody {
    /// The month, 1 to 12.
    pub month: Option<i64>,
    /// The year.
    pub year: Option<i64>,
    /// The income, as a JSON number or numeric string.
    pub amount: Option<Decimal>,
    /// An optional note, blank notes are stored as `null`.
    pub note: Option<String>,
}
