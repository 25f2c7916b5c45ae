//! Endpoint listing the months that have net worth data.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    app_state::lock_connection,
    net_worth::{NetWorthSummary, get_net_worth_summary},
};

/// The state needed to summarise the recorded months.
#[derive(Debug, Clone)]
pub struct NetWorthSummaryState {
    /// The database connection for reading snapshots.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for NetWorthSummaryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that returns the months and years with snapshots, newest first.
pub async fn get_net_worth_summary_endpoint(
    State(state): State<NetWorthSummaryState>,
) -> Result<Json<NetWorthSummary>, Error> {
    lock_connection(&state.db_connection)
        .and_then(|connection| get_net_worth_summary(&connection))
        .map(Json)
        .inspect_err(|error| error.log("get net worth summary"))
}
