//! Budget category types.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};

use crate::database_id::DatabaseId;

/// Alias for the ID of a budget category.
pub type BudgetCategoryId = DatabaseId;

/// The needs/wants/savings bucket a category's spending falls into.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BudgetCategoryType {
    /// Essential spending, e.g. groceries or utilities.
    Need,
    /// Discretionary spending, e.g. eating out.
    #[default]
    Want,
    /// Money put aside, e.g. a house deposit.
    Saving,
}

impl BudgetCategoryType {
    /// The string used in the database and in JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetCategoryType::Need => "NEED",
            BudgetCategoryType::Want => "WANT",
            BudgetCategoryType::Saving => "SAVING",
        }
    }
}

impl Display for BudgetCategoryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The error for text that is not one of "NEED", "WANT" or "SAVING".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0:?} is not a valid budget category type")]
pub struct ParseBudgetCategoryTypeError(String);

impl FromStr for BudgetCategoryType {
    type Err = ParseBudgetCategoryTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NEED" => Ok(BudgetCategoryType::Need),
            "WANT" => Ok(BudgetCategoryType::Want),
            "SAVING" => Ok(BudgetCategoryType::Saving),
            other => Err(ParseBudgetCategoryTypeError(other.to_owned())),
        }
    }
}

impl ToSql for BudgetCategoryType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for BudgetCategoryType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}

/// A category that money is budgeted for and spent in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetCategory {
    /// The ID of the category.
    pub id: BudgetCategoryId,
    /// The unique display name.
    pub name: String,
    /// The bucket spending in this category counts towards.
    #[serde(rename = "type")]
    pub category_type: BudgetCategoryType,
    /// Inactive categories are hidden from the budget page.
    pub is_active: bool,
    /// Position in the manually ordered list, lowest first.
    pub sort_order: i64,
}

/// A budget category with the number of budget entries that reference it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetCategorySummary {
    /// The category.
    #[serde(flatten)]
    pub category: BudgetCategory,
    /// How many months have a budget entry for the category.
    pub entry_count: i64,
}

/// The JSON body for creating a budget category.
#[derive(Debug, Default, Deserialize)]
pub struct CreateBudgetCategoryBody {
    /// The category name, surrounding whitespace is trimmed.
    pub name: Option<String>,
    /// The type, defaults to [BudgetCategoryType::Want].
    #[serde(rename = "type")]
    pub category_type: Option<BudgetCategoryType>,
}

/// The JSON body for updating a budget category, absent fields are unchanged.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBudgetCategoryBody {
    /// The new name, must not be blank if given.
    pub name: Option<String>,
    /// Activate or deactivate the category.
    pub is_active: Option<bool>,
    /// The new type.
    #[serde(rename = "type")]
    pub category_type: Option<BudgetCategoryType>,
}

/// The validated changes to apply to a budget category.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BudgetCategoryChanges {
    /// The new, trimmed name.
    pub name: Option<String>,
    /// The new active flag.
    pub is_active: Option<bool>,
    /// The new type.
    pub category_type: Option<BudgetCategoryType>,
}

/// The JSON body for reordering budget categories.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderBudgetCategoriesBody {
    /// Category IDs in their new display order.
    pub ordered_ids: Option<Vec<BudgetCategoryId>>,
}

#[cfg(test)]
mod tests {
    use super::BudgetCategoryType;

    #[test]
    fn parses_category_type() {
        assert_eq!("NEED".parse(), Ok(BudgetCategoryType::Need));
        assert_eq!("SAVING".parse(), Ok(BudgetCategoryType::Saving));
        assert!("LUXURY".parse::<BudgetCategoryType>().is_err());
    }

    #[test]
    fn defaults_to_want() {
        assert_eq!(BudgetCategoryType::default(), BudgetCategoryType::Want);
    }
}
