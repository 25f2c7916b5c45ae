//! Endpoint for deleting an account.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State, rejection::PathRejection},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    account::{AccountId, delete_account},
    api_response::SuccessResponse,
    app_state::lock_connection,
};

/// The state needed to delete an account.
#[derive(Debug, Clone)]
pub struct DeleteAccountState {
    db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteAccountState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting an account.
///
/// Accounts with snapshots are rejected and have to be deactivated instead.
pub async fn delete_account_endpoint(
    State(state): State<DeleteAccountState>,
    id: Result<Path<AccountId>, PathRejection>,
) -> Result<Json<SuccessResponse>, Error> {
    let result = id.map_err(Error::from).and_then(|Path(id)| {
        let connection = lock_connection(&state.db_connection)?;
        delete_account(id, &connection)
    });

    result
        .map(|_| Json(SuccessResponse::ok()))
        .inspect_err(|error| error.log("delete account"))
}
