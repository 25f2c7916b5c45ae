//! Transactions, the source of every "spent" figure, and recurring suggestions.

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod get;
mod list;
mod recurring;
mod suggestions;

pub use create::create_transaction_endpoint;
pub use db::{
    create_transaction, create_transaction_table, delete_transaction, get_spent_by_category,
    get_transaction, get_transactions_in_range, list_transactions, update_transaction,
};
pub use delete::delete_transaction_endpoint;
pub use domain::{
    CreateTransactionBody, NewTransaction, RecurringSuggestion, Transaction,
    TransactionChanges, TransactionFilter, TransactionId, TransactionListQuery,
    TransactionWithCategory, UpdateTransactionBody,
};
pub use edit::update_transaction_endpoint;
pub use get::get_transaction_endpoint;
pub use list::list_transactions_endpoint;
pub use recurring::get_recurring_suggestions;
pub use suggestions::get_recurring_suggestions_endpoint;
