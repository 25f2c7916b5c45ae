//! Endpoint for the monthly net worth page.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State, rejection::QueryRejection},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    app_state::lock_connection,
    net_worth::{NetWorthAccountRow, get_net_worth_rows},
    scope::{MonthScope, MonthYearQuery},
};

/// The state needed to read a month of net worth data.
#[derive(Debug, Clone)]
pub struct NetWorthViewState {
    /// The database connection for reading snapshots.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for NetWorthViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that returns every active account with its balance for the month.
pub async fn get_net_worth_endpoint(
    State(state): State<NetWorthViewState>,
    query: Result<Query<MonthYearQuery>, QueryRejection>,
) -> Result<Json<Vec<NetWorthAccountRow>>, Error> {
    get_rows(&state, query)
        .map(Json)
        .inspect_err(|error| error.log("get net worth"))
}

fn get_rows(
    state: &NetWorthViewState,
    query: Result<Query<MonthYearQuery>, QueryRejection>,
) -> Result<Vec<NetWorthAccountRow>, Error> {
    let Query(query) = query?;
    let scope = MonthScope::try_from(query)?;
    let connection = lock_connection(&state.db_connection)?;

    get_net_worth_rows(scope, &connection)
}
