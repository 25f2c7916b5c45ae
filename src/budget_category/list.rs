//! Endpoint for listing budget categories.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    app_state::lock_connection,
    budget_category::{BudgetCategorySummary, get_budget_category_summaries},
};

/// The state needed to list budget categories.
#[derive(Debug, Clone)]
pub struct ListBudgetCategoriesState {
    /// The database connection for reading categories.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ListBudgetCategoriesState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that returns the active budget categories in display order.
pub async fn list_budget_categories_endpoint(
    State(state): State<ListBudgetCategoriesState>,
) -> Result<Json<Vec<BudgetCategorySummary>>, Error> {
    lock_connection(&state.db_connection)
        .and_then(|connection| get_budget_category_summaries(&connection))
        .map(Json)
        .inspect_err(|error| error.log("list budget categories"))
}
