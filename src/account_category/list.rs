//! Endpoint for listing account categories.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    account_category::{AccountCategorySummary, get_account_category_summaries},
    app_state::lock_connection,
};

/// The state needed to list account categories.
#[derive(Debug, Clone)]
pub struct ListAccountCategoriesState {
    /// The database connection for reading categories.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ListAccountCategoriesState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that returns every account category with its account count.
pub async fn list_account_categories_endpoint(
    State(state): State<ListAccountCategoriesState>,
) -> Result<Json<Vec<AccountCategorySummary>>, Error> {
    lock_connection(&state.db_connection)
        .and_then(|connection| get_account_category_summaries(&connection))
        .map(Json)
        .inspect_err(|error| error.log("list account categories"))
}
