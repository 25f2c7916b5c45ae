//! Account categories group accounts on the net worth page.

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod list;

pub use create::create_account_category_endpoint;
pub use db::{
    create_account_category, create_account_category_table, delete_account_category,
    get_account_category, get_account_category_summaries, update_account_category,
};
pub use delete::delete_account_category_endpoint;
pub use domain::{
    AccountCategory, AccountCategoryBody, AccountCategoryId, AccountCategorySummary,
    AccountType,
};
pub use edit::update_account_category_endpoint;
pub use list::list_account_categories_endpoint;
