//! Proposes recurring transactions that have not been entered for a month yet.
//!
//! Recurring transactions from the three months before the target month are
//! grouped by category, vendor and day of month. The newest transaction of
//! each group is suggested for the same day in the target month unless a
//! matching transaction already exists there.

use std::collections::HashSet;

use rusqlite::Connection;
use time::{Date, OffsetDateTime, macros::time};

use crate::{
    Error,
    scope::MonthScope,
    transaction::{RecurringSuggestion, Transaction, get_transactions_in_range},
};

/// How many months before the target month to look for recurring transactions.
pub const LOOKBACK_MONTHS: u32 = 3;

/// Suggest the recurring transactions that are missing from `target`.
pub fn get_recurring_suggestions(
    target: MonthScope,
    connection: &Connection,
) -> Result<Vec<RecurringSuggestion>, Error> {
    let lookback_start = target.minus_months(LOOKBACK_MONTHS).first_day();
    let lookback_end = target.previous().last_day();

    let recurring = get_transactions_in_range(&(lookback_start..=lookback_end), true, connection)?;
    let existing = get_transactions_in_range(&target.date_range(), false, connection)?;

    Ok(suggest_recurring(target, &recurring, &existing))
}

/// Pick the recurring transactions to suggest for `target`.
///
/// `recurring` must be sorted newest first so that the newest transaction of
/// each (category, vendor, day) group is the one suggested. A suggestion is
/// dropped if `existing` already has a transaction with the same category and
/// vendor on the suggested day.
///
/// Days past the end of the target month are moved to its last day.
pub fn suggest_recurring(
    target: MonthScope,
    recurring: &[Transaction],
    existing: &[Transaction],
) -> Vec<RecurringSuggestion> {
    let already_entered: HashSet<_> = existing
        .iter()
        .map(|transaction| {
            (
                transaction.category_id,
                transaction.vendor.as_deref(),
                transaction.date.day(),
            )
        })
        .collect();
    let mut seen = HashSet::new();
    let mut suggestions = Vec::new();

    for transaction in recurring {
        let day = transaction.date.day();
        let group = (transaction.category_id, transaction.vendor.as_deref(), day);

        if !seen.insert(group) {
            continue;
        }

        let suggested_day = target.clamped_date(day);
        let is_entered = already_entered.contains(&group)
            || already_entered.contains(&(group.0, group.1, suggested_day.day()));

        if is_entered {
            continue;
        }

        suggestions.push(RecurringSuggestion {
            original_transaction: transaction.clone(),
            suggested_date: noon_utc(suggested_day),
        });
    }

    suggestions
}

/// Noon UTC on `date`, so the day does not shift when shown in a local timezone.
fn noon_utc(date: Date) -> OffsetDateTime {
    date.with_time(time!(12:00)).assume_utc()
}


#[cfg(test)]
mod lookback_tests {
    use rusqlite::Connection;
    use rust_decimal::Decimal;
    use time::{Date, macros::date};

    use crate::{
        budget_category::{BudgetCategoryType, create_budget_category},
        db::initialize,
        scope::MonthScope,
        transaction::{NewTransaction, create_transaction},
    };

    use super::get_recurring_suggestions;

    fn insert(date: Date, is_recurring: bool, category_id: i64, connection: &Connection) {
        create_transaction(
            &NewTransaction {
                date,
                amount: Decimal::new(2500, 2),
                vendor: Some("Gym".to_owned()),
                description: None,
                category_id,
                is_recurring,
            },
            connection,
        )
        .unwrap();
    }

    #[test]
    fn looks_back_three_months_across_the_year_boundary() {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let category = create_budget_category("Health", BudgetCategoryType::Need, &connection)
            .unwrap()
            .id;
        insert(date!(2023 - 10 - 31), true, category, &connection);
        insert(date!(2023 - 11 - 01), true, category, &connection);
        insert(date!(2024 - 01 - 20), false, category, &connection);
        insert(date!(2024 - 02 - 05), true, category, &connection);

        let suggestions =
            get_recurring_suggestions(MonthScope::new(2, 2024).unwrap(), &connection).unwrap();

        let days: Vec<_> = suggestions
            .iter()
            .map(|suggestion| suggestion.original_transaction.date)
            .collect();
        assert_eq!(days, vec![date!(2023 - 11 - 01)]);
    }
}
