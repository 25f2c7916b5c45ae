//! Monthly budget entries, the budget page and the yearly budget chart.

mod aggregation;
mod db;
mod domain;
mod save;
mod trend;
mod view;

pub use aggregation::{build_budget_trend, get_budget_view};
pub use db::{
    create_budget_entry_table, get_budgeted_by_category, get_budgeted_for_year,
    save_budget_entries,
};
pub use domain::{BudgetEntryInput, BudgetEntryValue, BudgetRow, BudgetTrendPoint, SaveBudgetBody};
pub use save::save_budget_endpoint;
pub use trend::get_budget_trend_endpoint;
pub use view::get_budget_endpoint;
