//! Endpoint for updating a transaction.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{
        FromRef, Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    app_state::lock_connection,
    transaction::{
        TransactionChanges, TransactionId, TransactionWithCategory, UpdateTransactionBody,
        update_transaction,
    },
    validation::optional_text,
};

/// The state needed to update a transaction.
#[derive(Debug, Clone)]
pub struct UpdateTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for changing some fields of a transaction.
pub async fn update_transaction_endpoint(
    State(state): State<UpdateTransactionState>,
    id: Result<Path<TransactionId>, PathRejection>,
    body: Result<Json<UpdateTransactionBody>, JsonRejection>,
) -> Result<Json<TransactionWithCategory>, Error> {
    update(&state, id, body)
        .map(Json)
        .inspect_err(|error| error.log("update transaction"))
}

fn update(
    state: &UpdateTransactionState,
    id: Result<Path<TransactionId>, PathRejection>,
    body: Result<Json<UpdateTransactionBody>, JsonRejection>,
) -> Result<TransactionWithCategory, Error> {
    let Path(id) = id?;
    let Json(body) = body?;
    let changes = TransactionChanges {
        date: body.date.map(|date| date.0),
        amount: body.amount,
        vendor: body.vendor.map(optional_text),
        description: body.description.map(optional_text),
        category_id: body.category_id,
        is_recurring: body.is_recurring,
    };
    let connection = lock_connection(&state.db_connection)?;

    update_transaction(id, &changes, &connection)
}
