//! Endpoint for the monthly dashboard.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State, rejection::QueryRejection},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    app_state::lock_connection,
    dashboard::{DashboardSummary, get_dashboard_summary},
    scope::{MonthScope, MonthYearQuery},
};

/// The state needed to build the dashboard.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading the month's data.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that returns the net worth and budget summary for a month.
pub async fn get_dashboard_endpoint(
    State(state): State<DashboardState>,
    query: Result<Query<MonthYearQuery>, QueryRejection>,
) -> Result<Json<DashboardSummary>, Error> {
    get_summary(&state, query)
        .map(Json)
        .inspect_err(|error| error.log("get dashboard"))
}

fn get_summary(
    state: &DashboardState,
    query: Result<Query<MonthYearQuery>, QueryRejection>,
) -> Result<DashboardSummary, Error> {
    let Query(query) = query?;
    let scope = MonthScope::try_from(query)?;
    let connection = lock_connection(&state.db_connection)?;

    get_dashboard_summary(scope, &connection)
}
