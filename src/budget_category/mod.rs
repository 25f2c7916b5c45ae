//! Budget categories and their manual display order.

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod list;
mod reorder;

pub use create::create_budget_category_endpoint;
pub use db::{
    create_budget_category, create_budget_category_table, delete_budget_category,
    get_active_budget_categories, get_budget_category, get_budget_category_summaries,
    reorder_budget_categories, update_budget_category,
};
pub use delete::delete_budget_category_endpoint;
pub use domain::{
    BudgetCategory, BudgetCategoryChanges, BudgetCategoryId, BudgetCategorySummary,
    BudgetCategoryType, CreateBudgetCategoryBody,
    ReorderBudgetCategoriesBody, UpdateBudgetCategoryBody,
};
pub use edit::update_budget_category_endpoint;
pub use list::list_budget_categories_endpoint;
pub use reorder::reorder_budget_categories_endpoint;
