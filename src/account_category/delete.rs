//! Endpoint for deleting an account category.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State, rejection::PathRejection},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    account_category::{AccountCategoryId, delete_account_category},
    api_response::SuccessResponse,
    app_state::lock_connection,
};

/// The state needed to delete an account category.
#[derive(Debug, Clone)]
pub struct DeleteAccountCategoryState {
    db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteAccountCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting an unused, user defined account category.
pub async fn delete_account_category_endpoint(
    State(state): State<DeleteAccountCategoryState>,
    id: Result<Path<AccountCategoryId>, PathRejection>,
) -> Result<Json<SuccessResponse>, Error> {
    let result = id.map_err(Error::from).and_then(|Path(id)| {
        let connection = lock_connection(&state.db_connection)?;
        delete_account_category(id, &connection)
    });

    result
        .map(|_| Json(SuccessResponse::ok()))
        .inspect_err(|error| error.log("delete account category"))
}
