//! The API endpoint URIs.
//!
//! Tests fill in parameters, e.g. '{id}' in '/api/accounts/{id}', with `format_endpoint`.

/// The monthly budget view and the route for saving budget entries.
pub const BUDGET: &str = "/api/budget";
/// The yearly budget chart.
pub const BUDGET_TRENDS: &str = "/api/budget/trends";
/// The monthly dashboard summary.
pub const DASHBOARD: &str = "/api/dashboard";
/// The monthly net worth view and the route for saving snapshots.
pub const NET_WORTH: &str = "/api/net-worth";
/// The yearly net worth chart.
pub const NET_WORTH_TRENDS: &str = "/api/net-worth/trends";
/// The months and years that have net worth snapshots.
pub const NET_WORTH_SUMMARY: &str = "/api/net-worth/summary";
/// The route to read and save monthly income.
pub const INCOME: &str = "/api/income";
/// The route to list and create transactions.
pub const TRANSACTIONS: &str = "/api/transactions";
/// The recurring transactions missing from a month.
pub const RECURRING_SUGGESTIONS: &str = "/api/transactions/recurring-suggestions";
/// The route to read, update or delete a single transaction.
pub const TRANSACTION: &str = "/api/transactions/{id}";
/// The route to list and create accounts.
pub const ACCOUNTS: &str = "/api/accounts";
/// The route to update or delete an account.
pub const ACCOUNT: &str = "/api/accounts/{id}";
/// The route to list and create account categories.
pub const ACCOUNT_CATEGORIES: &str = "/api/account-categories";
/// The route to update or delete an account category.
pub const ACCOUNT_CATEGORY: &str = "/api/account-categories/{id}";
/// The route to list and create budget categories.
pub const BUDGET_CATEGORIES: &str = "/api/budget-categories";
/// The route to change the display order of budget categories.
pub const REORDER_BUDGET_CATEGORIES: &str = "/api/budget-categories/reorder";
/// The route to update or delete a budget category.
pub const BUDGET_CATEGORY: &str = "/api/budget-categories/{id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter starts with a left brace and ends with a right brace, e.g.
/// '{id}' in '/api/accounts/{id}'. Only the first parameter is replaced.
///
/// If no parameter is found in `endpoint_path`, the original path is returned.
#[cfg(test)]
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let end = endpoint_path[start..]
        .find('}')
        .map(|offset| start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!("{}{}{}", &endpoint_path[..start], id, &endpoint_path[end..])
}
