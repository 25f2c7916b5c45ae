//! Monthly income, the base for planned and actual savings.

mod db;
mod domain;
mod get;
mod save;

pub use db::{create_monthly_income_table, get_income, get_income_for_year, save_income};
pub use domain::{IncomeResponse, MonthlyIncome, SaveIncomeBody};
pub use get::get_income_endpoint;
pub use save::save_income_endpoint;
