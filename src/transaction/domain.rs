//! Transaction types.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, de};
use time::{
    Date, OffsetDateTime, UtcOffset, format_description::well_known::Rfc3339,
    macros::format_description,
};

use crate::{
    budget_category::{BudgetCategory, BudgetCategoryId},
    database_id::DatabaseId,
};

/// Alias for the ID of a transaction.
pub type TransactionId = DatabaseId;

/// Money spent in a budget category on a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The day the money was spent.
    pub date: Date,
    /// The amount spent.
    pub amount: Decimal,
    /// Who was paid, e.g. "Netflix".
    pub vendor: Option<String>,
    /// A free text note.
    pub description: Option<String>,
    /// The category the spending counts towards.
    pub category_id: BudgetCategoryId,
    /// Whether the transaction repeats every month.
    pub is_recurring: bool,
}

/// A transaction along with its budget category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionWithCategory {
    /// The transaction.
    #[serde(flatten)]
    pub transaction: Transaction,
    /// The category of the transaction.
    pub category: BudgetCategory,
}

/// A calendar date in a request body.
///
/// Accepts an ISO 8601 date such as `2024-03-15`, or an RFC 3339 timestamp
/// which is converted to UTC and truncated to its date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateInput(pub Date);

impl<'de> Deserialize<'de> for DateInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;

        parse_date_input(&text).map(DateInput).ok_or_else(|| {
            de::Error::custom(format!("{text:?} is not a date or an RFC 3339 timestamp"))
        })
    }
}

/// Parse `text` as an ISO date or an RFC 3339 timestamp.
pub fn parse_date_input(text: &str) -> Option<Date> {
    let text = text.trim();

    Date::parse(text, format_description!("[year]-[month]-[day]"))
        .ok()
        .or_else(|| {
            OffsetDateTime::parse(text, &Rfc3339)
                .ok()
                .map(|timestamp| timestamp.to_offset(UtcOffset::UTC).date())
        })
}

/// Deserialize a present field, even `null`, as `Some`, so that an absent
/// field stays `None` through `#[serde(default)]`.
fn deserialize_present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// The JSON body for creating a transaction.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionBody {
    /// The day the money was spent.
    pub date: Option<DateInput>,
    /// The amount, as a JSON number or numeric string.
    pub amount: Option<Decimal>,
    /// Who was paid.
    pub vendor: Option<String>,
    /// A free text note.
    pub description: Option<String>,
    /// The category the spending counts towards.
    pub category_id: Option<BudgetCategoryId>,
    /// Whether the transaction repeats monthly, defaults to false.
    pub is_recurring: Option<bool>,
}

/// The JSON body for updating a transaction.
///
/// Absent fields are left unchanged. `vendor` and `description` may be set to
/// `null` to clear them.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTransactionBody {
    /// The new date.
    pub date: Option<DateInput>,
    /// The new amount.
    pub amount: Option<Decimal>,
    /// The new vendor, `Some(None)` clears it.
    #[serde(default, deserialize_with = "deserialize_present")]
    pub vendor: Option<Option<String>>,
    /// The new description, `Some(None)` clears it.
    #[serde(default, deserialize_with = "deserialize_present")]
    pub description: Option<Option<String>>,
    /// The new category.
    pub category_id: Option<BudgetCategoryId>,
    /// The new recurring flag.
    pub is_recurring: Option<bool>,
}

/// A validated transaction ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    /// The day the money was spent.
    pub date: Date,
    /// The amount spent.
    pub amount: Decimal,
    /// Who was paid, `None` if blank.
    pub vendor: Option<String>,
    /// A free text note, `None` if blank.
    pub description: Option<String>,
    /// The category the spending counts towards.
    pub category_id: BudgetCategoryId,
    /// Whether the transaction repeats monthly.
    pub is_recurring: bool,
}

/// The validated changes to apply to a transaction.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TransactionChanges {
    /// The new date.
    pub date: Option<Date>,
    /// The new amount.
    pub amount: Option<Decimal>,
    /// The new vendor, `Some(None)` clears it.
    pub vendor: Option<Option<String>>,
    /// The new description, `Some(None)` clears it.
    pub description: Option<Option<String>>,
    /// The new category.
    pub category_id: Option<BudgetCategoryId>,
    /// The new recurring flag.
    pub is_recurring: Option<bool>,
}

/// Query parameters for listing transactions.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionListQuery {
    /// The month, 1 to 12.
    pub month: Option<i64>,
    /// The year.
    pub year: Option<i64>,
    /// Only list transactions in this category, "all" lists every category.
    pub category_id: Option<String>,
    /// Only list transactions whose vendor or description contains this text,
    /// ignoring case.
    pub search: Option<String>,
}

/// Filters applied when listing a month of transactions.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TransactionFilter {
    /// Only list transactions in this category.
    pub category_id: Option<BudgetCategoryId>,
    /// Only list transactions whose vendor or description contains this text.
    pub search: Option<String>,
}

/// A recurring transaction proposed for re-entry in the target month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringSuggestion {
    /// The most recent matching transaction from the lookback window.
    pub original_transaction: Transaction,
    /// The suggested date in the target month, at noon UTC.
    #[serde(with = "time::serde::rfc3339")]
    pub suggested_date: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use time::macros::date;

    use super::{DateInput, UpdateTransactionBody, parse_date_input};

    #[test]
    fn parses_iso_date() {
        assert_eq!(parse_date_input("2024-03-15"), Some(date!(2024 - 03 - 15)));
    }

    #[test]
    fn parses_timestamp_as_utc_date() {
        assert_eq!(
            parse_date_input("2024-03-15T23:30:00-02:00"),
            Some(date!(2024 - 03 - 16))
        );
        assert_eq!(
            parse_date_input("2024-03-15T12:00:00.000Z"),
            Some(date!(2024 - 03 - 15))
        );
    }

    #[test]
    fn rejects_garbage_date() {
        assert_eq!(parse_date_input("15/03/2024"), None);
        assert!(serde_json::from_value::<DateInput>(json!("soon")).is_err());
    }

    #[test]
    fn update_body_tells_null_from_absent() {
        let body: UpdateTransactionBody =
            serde_json::from_value(json!({"vendor": null})).unwrap();

        assert_eq!(body.vendor, Some(None));
        assert_eq!(body.description, None);
    }
}
