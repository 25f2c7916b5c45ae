//! Endpoint for reading a month's income.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State, rejection::QueryRejection},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    app_state::lock_connection,
    income::{IncomeResponse, MonthlyIncome, get_income},
    scope::{MonthScope, MonthYearQuery},
};

/// The state needed to read income.
#[derive(Debug, Clone)]
pub struct GetIncomeState {
    /// The database connection for reading income.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for GetIncomeState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that returns the income of a month, or null fields if none was saved.
pub async fn get_income_endpoint(
    State(state): State<GetIncomeState>,
    query: Result<Query<MonthYearQuery>, QueryRejection>,
) -> Result<Json<IncomeResponse>, Error> {
    get(&state, query)
        .map(|income| Json(income.into()))
        .inspect_err(|error| error.log("get income"))
}

fn get(
    state: &GetIncomeState,
    query: Result<Query<MonthYearQuery>, QueryRejection>,
) -> Result<Option<MonthlyIncome>, Error> {
    let Query(query) = query?;
    let scope = MonthScope::try_from(query)?;
    let connection = lock_connection(&state.db_connection)?;

    get_income(scope, &connection)
}
