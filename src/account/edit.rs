//! Endpoint for updating an account.

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
    account::{AccountChanges, AccountId, AccountWithDetails, UpdateAccountBody, update_account},
    app_state::lock_connection,
    validation::required_name,
};

/// The state needed to update an account.
#[derive(Debug, Clone)]
pub struct UpdateAccountState {
    /// The database connection for managing accounts.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdateAccountState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for renaming, recategorising or (de)activating an account.
pub async fn update_account_endpoint(
    State(state): State<UpdateAccountState>,
    id: Result<Path<AccountId>, PathRejection>,
    body: Result<Json<UpdateAccountBody>, JsonRejection>,
) -> Result<Json<AccountWithDetails>, Error> {
    update(&state, id, body)
        .map(Json)
        .inspect_err(|error| error.log("update account"))
}

fn update(
    state: &UpdateAccountState,
    id: Result<Path<AccountId>, PathRejection>,
    body: Result<Json<UpdateAccountBody>, JsonRejection>,
) -> Result<AccountWithDetails, Error> {
    let Path(id) = id?;
    let Json(body) = body?;
    let changes = AccountChanges {
        name: required_name(body.name.as_deref())?,
        account_type: body.account_type,
        category_id: body.category_id,
        is_active: body.is_active,
    };
    let connection = lock_connection(&state.db_connection)?;

    update_account(id, &changes, &connection)
}
