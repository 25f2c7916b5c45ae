//! Endpoint for fetching a single transaction.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State, rejection::PathRejection},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    app_state::lock_connection,
    transaction::{TransactionId, TransactionWithCategory, get_transaction},
};

/// The state needed to fetch a transaction.
#[derive(Debug, Clone)]
pub struct GetTransactionState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for GetTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that returns a transaction with its category.
pub async fn get_transaction_endpoint(
    State(state): State<GetTransactionState>,
    id: Result<Path<TransactionId>, PathRejection>,
) -> Result<Json<TransactionWithCategory>, Error> {
    let result = id.map_err(Error::from).and_then(|Path(id)| {
        let connection = lock_connection(&state.db_connection)?;
        get_transaction(id, &connection)
    });

    result
        .map(Json)
        .inspect_err(|error| error.log("get transaction"))
}
