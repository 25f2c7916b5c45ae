//! Endpoint for listing accounts.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    account::{AccountWithDetails, get_accounts_with_details},
    app_state::lock_connection,
};

/// The state needed to list accounts.
#[derive(Debug, Clone)]
pub struct ListAccountsState {
    /// The database connection for reading accounts.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ListAccountsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that returns every account with its category and latest snapshot.
pub async fn list_accounts_endpoint(
    State(state): State<ListAccountsState>,
) -> Result<Json<Vec<AccountWithDetails>>, Error> {
    lock_connection(&state.db_connection)
        .and_then(|connection| get_accounts_with_details(&connection))
        .map(Json)
        .inspect_err(|error| error.log("list accounts"))
}
