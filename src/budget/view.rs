//! Endpoint for the monthly budget page.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State, rejection::QueryRejection},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    app_state::lock_connection,
    budget::{BudgetRow, get_budget_view},
    scope::{MonthScope, MonthYearQuery},
};

/// The state needed to build the budget view.
#[derive(Debug, Clone)]
pub struct BudgetViewState {
    /// The database connection for reading categories, entries and transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for BudgetViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that returns one row per active budget category for a month.
pub async fn get_budget_endpoint(
    State(state): State<BudgetViewState>,
    query: Result<Query<MonthYearQuery>, QueryRejection>,
) -> Result<Json<Vec<BudgetRow>>, Error> {
    get_rows(&state, query)
        .map(Json)
        .inspect_err(|error| error.log("get budget"))
}

fn get_rows(
    state: &BudgetViewState,
    query: Result<Query<MonthYearQuery>, QueryRejection>,
) -> Result<Vec<BudgetRow>, Error> {
    let Query(query) = query?;
    let scope = MonthScope::try_from(query)?;
    let connection = lock_connection(&state.db_connection)?;

    get_budget_view(scope, &connection)
}
