//! Folds a month of ledger reads into the dashboard summary.

use std::collections::HashMap;

use rusqlite::Connection;
use rust_decimal::Decimal;

use crate::{
    Error,
    budget::get_budgeted_by_category,
    budget_category::{BudgetCategoryId, BudgetCategoryType},
    dashboard::{BudgetSummary, DashboardSummary, SpendingBreakdown, db::get_category_types},
    income::get_income,
    money::{difference, percentage_of, total},
    net_worth::get_net_worth_totals,
    scope::MonthScope,
    transaction::get_spent_by_category,
};

/// Summarize a month of income, budgeting and spending.
///
/// `budgeted` and `spent` map category IDs to amounts. Every category in
/// `spent` counts towards the breakdown, whether or not it was budgeted.
/// Spending in a category missing from `category_types` is only counted in
/// the total.
///
/// # Errors
/// Returns [Error::Validation] if a total does not fit in a [Decimal].
pub fn summarize_budget(
    income: Decimal,
    budgeted: &HashMap<BudgetCategoryId, Decimal>,
    spent: &HashMap<BudgetCategoryId, Decimal>,
    category_types: &HashMap<BudgetCategoryId, BudgetCategoryType>,
) -> Result<BudgetSummary, Error> {
    let total_budgeted = total(budgeted.values())?;
    let total_spent = total(spent.values())?;

    let mut needs = Vec::new();
    let mut wants = Vec::new();
    let mut savings = Vec::new();

    for (category_id, amount) in spent {
        match category_types.get(category_id) {
            Some(BudgetCategoryType::Need) => needs.push(*amount),
            Some(BudgetCategoryType::Want) => wants.push(*amount),
            Some(BudgetCategoryType::Saving) => savings.push(*amount),
            None => {}
        }
    }

    let actual_savings = difference(income, total_spent)?;

    Ok(BudgetSummary {
        income: income.normalize(),
        total_budgeted,
        total_spent,
        planned_savings: difference(income, total_budgeted)?,
        actual_savings,
        savings_rate: percentage_of(actual_savings, income)?,
        breakdown: SpendingBreakdown {
            needs: total(&needs)?,
            wants: total(&wants)?,
            savings: total(&savings)?,
        },
    })
}

/// Get the dashboard for `scope`.
pub fn get_dashboard_summary(
    scope: MonthScope,
    connection: &Connection,
) -> Result<DashboardSummary, Error> {
    let net_worth = get_net_worth_totals(scope, connection)?;
    let budgeted = get_budgeted_by_category(scope, connection)?;
    let spent = get_spent_by_category(&scope.date_range(), connection)?;
    let category_types = get_category_types(connection)?;
    let income = get_income(scope, connection)?
        .map(|income| income.amount)
        .unwrap_or(Decimal::ZERO);

    Ok(DashboardSummary {
        net_worth,
        budget: summarize_budget(income, &budgeted, &spent, &category_types)?,
    })
}

#[cfg(test)]
mod summarize_budget_tests {
    use std::collections::HashMap;

    use rust_decimal::Decimal;

    use crate::{Error, budget_category::BudgetCategoryType};

    use super::summarize_budget;

    fn dec(text: &str) -> Decimal {
        text.parse().unwrap()
    }

    #[test]
    fn savings_and_rate_from_income() {
        let budgeted = HashMap::from([(1, dec("3000")), (2, dec("1200"))]);
        let spent = HashMap::from([(1, dec("2900")), (2, dec("1000"))]);
        let types = HashMap::from([
            (1, BudgetCategoryType::Need),
            (2, BudgetCategoryType::Want),
        ]);

        let summary = summarize_budget(dec("5000"), &budgeted, &spent, &types).unwrap();

        assert_eq!(summary.total_budgeted, dec("4200"));
        assert_eq!(summary.total_spent, dec("3900"));
        assert_eq!(summary.planned_savings, dec("800"));
        assert_eq!(summary.actual_savings, dec("1100"));
        assert_eq!(summary.savings_rate, dec("22"));
    }

    #[test]
    fn zero_income_has_zero_savings_rate() {
        let spent = HashMap::from([(1, dec("250"))]);
        let types = HashMap::from([(1, BudgetCategoryType::Want)]);

        let summary = summarize_budget(Decimal::ZERO, &HashMap::new(), &spent, &types).unwrap();

        assert_eq!(summary.savings_rate, Decimal::ZERO);
        assert_eq!(summary.actual_savings, dec("-250"));
    }

    #[test]
    fn breakdown_includes_unbudgeted_categories() {
        let budgeted = HashMap::from([(1, dec("100"))]);
        let spent = HashMap::from([(1, dec("80")), (2, dec("40")), (3, dec("25.5"))]);
        let types = HashMap::from([
            (1, BudgetCategoryType::Need),
            (2, BudgetCategoryType::Need),
            (3, BudgetCategoryType::Saving),
        ]);

        let summary = summarize_budget(dec("1000"), &budgeted, &spent, &types).unwrap();

        assert_eq!(summary.breakdown.needs, dec("120"));
        assert_eq!(summary.breakdown.wants, Decimal::ZERO);
        assert_eq!(summary.breakdown.savings, dec("25.5"));
    }

    #[test]
    fn savings_rate_past_decimal_range_is_an_error() {
        let spent = HashMap::from([(1, dec("-50000000000000000000000000000"))]);
        let types = HashMap::from([(1, BudgetCategoryType::Want)]);

        let result = summarize_budget(Decimal::new(1, 28), &HashMap::new(), &spent, &types);

        assert_eq!(result, Err(Error::amount_overflow()));
    }
}
