//! Endpoint for creating a transaction.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State, rejection::JsonRejection},
    http::StatusCode,
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    app_state::lock_connection,
    transaction::{CreateTransactionBody, NewTransaction, TransactionWithCategory, create_transaction},
    validation::{optional_text, required},
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for recording a transaction, responds with the new transaction.
///
/// Applying a recurring suggestion is an ordinary call to this endpoint.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    body: Result<Json<CreateTransactionBody>, JsonRejection>,
) -> Result<(StatusCode, Json<TransactionWithCategory>), Error> {
    create(&state, body)
        .map(|transaction| (StatusCode::CREATED, Json(transaction)))
        .inspect_err(|error| error.log("create transaction"))
}

fn create(
    state: &CreateTransactionState,
    body: Result<Json<CreateTransactionBody>, JsonRejection>,
) -> Result<TransactionWithCategory, Error> {
    let Json(body) = body?;
    let transaction = NewTransaction {
        date: required(body.date, "date")?.0,
        amount: required(body.amount, "amount")?,
        vendor: optional_text(body.vendor),
        description: optional_text(body.description),
        category_id: required(body.category_id, "categoryId")?,
        is_recurring: body.is_recurring.unwrap_or(false),
    };
    let connection = lock_connection(&state.db_connection)?;

    create_transaction(&transaction, &connection)
}
