//! Account category types.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};

use crate::database_id::DatabaseId;

/// Alias for the ID of an account category.
pub type AccountCategoryId = DatabaseId;

/// Whether an account holds money or owes it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountType {
    /// Money held, e.g. a bank account or property.
    #[default]
    Asset,
    /// Money owed, e.g. a credit card or mortgage.
    Debt,
}

impl AccountType {
    /// The string used in the database and in JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Asset => "ASSET",
            AccountType::Debt => "DEBT",
        }
    }
}

impl Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The error for text that is neither "ASSET" nor "DEBT".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0:?} is not a valid account type")]
pub struct ParseAccountTypeError(String);

impl FromStr for AccountType {
    type Err = ParseAccountTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ASSET" => Ok(AccountType::Asset),
            "DEBT" => Ok(AccountType::Debt),
            other => Err(ParseAccountTypeError(other.to_owned())),
        }
    }
}

impl ToSql for AccountType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for AccountType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}

/// A grouping of accounts, e.g. "Bank" or "Mortgage".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountCategory {
    /// The ID of the category.
    pub id: AccountCategoryId,
    /// The unique display name.
    pub name: String,
    /// The type of account the category is meant for.
    #[serde(rename = "type")]
    pub account_type: AccountType,
    /// Built-in categories cannot be deleted.
    pub is_default: bool,
}

/// An account category with the number of accounts that use it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountCategorySummary {
    /// The category.
    #[serde(flatten)]
    pub category: AccountCategory,
    /// How many accounts, active or not, belong to the category.
    pub account_count: i64,
}

/// The JSON body for creating or updating an account category.
#[derive(Debug, Default, Deserialize)]
pub struct AccountCategoryBody {
    /// The category name, surrounding whitespace is trimmed.
    pub name: Option<String>,
    /// The account type, defaults to [AccountType::Asset].
    #[serde(rename = "type")]
    pub account_type: Option<AccountType>,
}
