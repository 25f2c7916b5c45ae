//! Endpoint for deleting a transaction.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State, rejection::PathRejection},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    api_response::SuccessResponse,
    app_state::lock_connection,
    transaction::{TransactionId, delete_transaction},
};

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting a transaction.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    id: Result<Path<TransactionId>, PathRejection>,
) -> Result<Json<SuccessResponse>, Error> {
    let result = id.map_err(Error::from).and_then(|Path(id)| {
        let connection = lock_connection(&state.db_connection)?;
        delete_transaction(id, &connection)
    });

    result
        .map(|_| Json(SuccessResponse::ok()))
        .inspect_err(|error| error.log("delete transaction"))
}
