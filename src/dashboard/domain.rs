//! Dashboard summary types.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::net_worth::NetWorthTotals;

/// Spending split by the needs/wants/savings bucket of each category.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpendingBreakdown {
    /// Spending in NEED categories.
    pub needs: Decimal,
    /// Spending in WANT categories.
    pub wants: Decimal,
    /// Spending in SAVING categories.
    pub savings: Decimal,
}

/// Income, budget and spending totals for one month.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    /// The income recorded for the month, zero if none.
    pub income: Decimal,
    /// The sum of the budget entries saved for the month.
    pub total_budgeted: Decimal,
    /// The sum of every transaction in the month.
    pub total_spent: Decimal,
    /// Income minus the total budgeted.
    pub planned_savings: Decimal,
    /// Income minus the total spent.
    pub actual_savings: Decimal,
    /// Actual savings as a percentage of income, zero without income.
    pub savings_rate: Decimal,
    /// The total spent split by category type.
    pub breakdown: SpendingBreakdown,
}

/// The dashboard for one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Asset, debt and net worth totals.
    pub net_worth: NetWorthTotals,
    /// Income, budget and spending totals.
    pub budget: BudgetSummary,
}
