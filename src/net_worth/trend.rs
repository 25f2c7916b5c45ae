//! Endpoint for the yearly net worth chart.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State, rejection::QueryRejection},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    app_state::lock_connection,
    net_worth::{
        NetWorthTrendPoint, aggregation::build_net_worth_trend, get_snapshot_balances_for_year,
    },
    scope::{YearQuery, YearScope},
};

/// The state needed to build the net worth trend.
#[derive(Debug, Clone)]
pub struct NetWorthTrendState {
    /// The database connection for reading snapshots.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for NetWorthTrendState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that returns twelve monthly net worth points for a year.
///
/// The year defaults to the current year.
pub async fn get_net_worth_trend_endpoint(
    State(state): State<NetWorthTrendState>,
    query: Result<Query<YearQuery>, QueryRejection>,
) -> Result<Json<Vec<NetWorthTrendPoint>>, Error> {
    get_trend(&state, query)
        .map(Json)
        .inspect_err(|error| error.log("get net worth trend"))
}

fn get_trend(
    state: &NetWorthTrendState,
    query: Result<Query<YearQuery>, QueryRejection>,
) -> Result<Vec<NetWorthTrendPoint>, Error> {
    let Query(query) = query?;
    let year = YearScope::try_from(query)?;
    let connection = lock_connection(&state.db_connection)?;

    let balances = get_snapshot_balances_for_year(year, &connection)?;

    build_net_worth_trend(year, &balances)
}
