//! The monthly dashboard: net worth totals next to income, budget and spending.

mod aggregation;
mod db;
mod domain;
mod view;

pub use aggregation::get_dashboard_summary;
pub use domain::{BudgetSummary, DashboardSummary, SpendingBreakdown};
pub use view::get_dashboard_endpoint;
