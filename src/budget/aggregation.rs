//! Builds the monthly budget page and the yearly budget chart.

use std::collections::HashMap;

use rusqlite::Connection;
use rust_decimal::Decimal;

use crate::{
    Error,
    budget::{BudgetRow, BudgetTrendPoint, get_budgeted_by_category},
    budget_category::{BudgetCategory, BudgetCategoryId, get_active_budget_categories},
    money::{difference, total},
    scope::{MonthScope, YearScope},
    transaction::get_spent_by_category,
};

/// Build the budget rows for `categories`, in the order given.
///
/// `current` and `previous` map category IDs to their budgeted amounts for
/// the month and the month before it. A category without an entry this month
/// shows last month's amount but `has_entry` stays false. `spent` maps
/// category IDs to their transaction totals for the month.
pub fn build_budget_view(
    categories: Vec<BudgetCategory>,
    current: &HashMap<BudgetCategoryId, Decimal>,
    previous: &HashMap<BudgetCategoryId, Decimal>,
    spent: &HashMap<BudgetCategoryId, Decimal>,
) -> Vec<BudgetRow> {
    categories
        .into_iter()
        .map(|category| {
            let entry = current.get(&category.id);

            BudgetRow {
                budgeted: entry.or_else(|| previous.get(&category.id)).copied(),
                spent: spent.get(&category.id).copied().unwrap_or(Decimal::ZERO),
                has_entry: entry.is_some(),
                id: category.id,
                name: category.name,
                category_type: category.category_type,
            }
        })
        .collect()
}

/// Get the budget page for `scope`: every active category in display order
/// with its budgeted and spent amounts.
pub fn get_budget_view(scope: MonthScope, connection: &Connection) -> Result<Vec<BudgetRow>, Error> {
    let categories = get_active_budget_categories(connection)?;
    let current = get_budgeted_by_category(scope, connection)?;
    let previous = get_budgeted_by_category(scope.previous(), connection)?;
    let spent = get_spent_by_category(&scope.date_range(), connection)?;

    Ok(build_budget_view(categories, &current, &previous, &spent))
}

/// Build the twelve monthly points of the budget chart for `year`.
///
/// Each slice holds `(month, amount)` pairs which are summed per month.
/// Months without data are zero.
///
/// # Errors
/// Returns [Error::Validation] if a monthly sum does not fit in a [Decimal].
pub fn build_budget_trend(
    year: YearScope,
    budgeted: &[(u8, Decimal)],
    spent: &[(u8, Decimal)],
    income: &[(u8, Decimal)],
) -> Result<Vec<BudgetTrendPoint>, Error> {
    let sum_month = |amounts: &[(u8, Decimal)], month: u8| {
        total(
            amounts
                .iter()
                .filter(|(month_num, _)| *month_num == month)
                .map(|(_, amount)| amount),
        )
    };

    year.months()
        .map(|month| {
            let month_num = month.month();
            let spent = sum_month(spent, month_num)?;
            let income = sum_month(income, month_num)?;

            Ok(BudgetTrendPoint {
                month: month.label(),
                month_num,
                budgeted: sum_month(budgeted, month_num)?,
                spent,
                income,
                savings: difference(income, spent)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod view_tests {
    use std::collections::HashMap;

    use rust_decimal::Decimal;

    use crate::budget_category::{BudgetCategory, BudgetCategoryType};

    use super::build_budget_view;

    fn dec(text: &str) -> Decimal {
        text.parse().unwrap()
    }

    fn category(id: i64, name: &str) -> BudgetCategory {
        BudgetCategory {
            id,
            name: name.to_owned(),
            category_type: BudgetCategoryType::Need,
            is_active: true,
            sort_order: id,
        }
    }

    #[test]
    fn current_entry_wins_over_previous() {
        let current = HashMap::from([(1, dec("600"))]);
        let previous = HashMap::from([(1, dec("500"))]);

        let rows = build_budget_view(
            vec![category(1, "Groceries")],
            &current,
            &previous,
            &HashMap::new(),
        );

        assert_eq!(rows[0].budgeted, Some(dec("600")));
        assert!(rows[0].has_entry);
    }

    #[test]
    fn previous_entry_is_carried_forward_without_has_entry() {
        let previous = HashMap::from([(1, dec("500"))]);

        let rows = build_budget_view(
            vec![category(1, "Groceries")],
            &HashMap::new(),
            &previous,
            &HashMap::new(),
        );

        assert_eq!(rows[0].budgeted, Some(dec("500")));
        assert!(!rows[0].has_entry);
    }

    #[test]
    fn no_entries_leave_budgeted_empty_and_spent_zero() {
        let rows = build_budget_view(
            vec![category(1, "Groceries")],
            &HashMap::new(),
            &HashMap::new(),
            &HashMap::new(),
        );

        assert_eq!(rows[0].budgeted, None);
        assert_eq!(rows[0].spent, Decimal::ZERO);
        assert!(!rows[0].has_entry);
    }

    #[test]
    fn keeps_category_order() {
        let rows = build_budget_view(
            vec![category(3, "Rent"), category(1, "Groceries")],
            &HashMap::new(),
            &HashMap::new(),
            &HashMap::new(),
        );

        let ids: Vec<_> = rows.iter().map(|row| row.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }
}

#[cfg(test)]
mod trend_tests {
    use rust_decimal::Decimal;

    use crate::scope::YearScope;

    use super::build_budget_trend;

    fn dec(text: &str) -> Decimal {
        text.parse().unwrap()
    }

    #[test]
    fn sums_each_month_and_derives_savings() {
        let budgeted = [(1, dec("300")), (1, dec("200")), (6, dec("50"))];
        let spent = [(1, dec("120.50")), (1, dec("100"))];
        let income = [(1, dec("1000"))];

        let trend =
            build_budget_trend(YearScope::new(2024).unwrap(), &budgeted, &spent, &income).unwrap();

        assert_eq!(trend.len(), 12);
        assert_eq!(trend[0].month, "Jan");
        assert_eq!(trend[0].budgeted, dec("500"));
        assert_eq!(trend[0].spent, dec("220.5"));
        assert_eq!(trend[0].income, dec("1000"));
        assert_eq!(trend[0].savings, dec("779.5"));
        assert_eq!(trend[5].budgeted, dec("50"));
        assert_eq!(trend[5].savings, Decimal::ZERO);
        assert_eq!(trend[11].month_num, 12);
    }

    #[test]
    fn spending_without_income_is_negative_savings() {
        let trend = build_budget_trend(
            YearScope::new(2024).unwrap(),
            &[],
            &[(3, dec("80"))],
            &[],
        )
        .unwrap();

        assert_eq!(trend[2].savings, dec("-80"));
    }
}
