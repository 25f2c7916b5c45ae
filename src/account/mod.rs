//! Accounts whose balances make up net worth.

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod list;

pub use create::create_account_endpoint;
pub use db::{
    create_account, create_account_table, delete_account, get_account, get_accounts_with_details,
    update_account,
};
pub use delete::delete_account_endpoint;
pub use domain::{
    Account, AccountChanges, AccountId, AccountWithDetails, CreateAccountBody, LatestSnapshot,
    UpdateAccountBody,
};
pub use edit::update_account_endpoint;
pub use list::list_accounts_endpoint;
