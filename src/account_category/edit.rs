//! Endpoint for updating an account category.

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
    account_category::{
        AccountCategory, AccountCategoryBody, AccountCategoryId, update_account_category,
    },
    app_state::lock_connection,
    validation::required_name,
};

/// The state needed to update an account category.
#[derive(Debug, Clone)]
pub struct UpdateAccountCategoryState {
    /// The database connection for managing categories.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdateAccountCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for renaming an account category and setting its type.
pub async fn update_account_category_endpoint(
    State(state): State<UpdateAccountCategoryState>,
    id: Result<Path<AccountCategoryId>, PathRejection>,
    body: Result<Json<AccountCategoryBody>, JsonRejection>,
) -> Result<Json<AccountCategory>, Error> {
    update(&state, id, body)
        .map(Json)
        .inspect_err(|error| error.log("update account category"))
}

fn update(
    state: &UpdateAccountCategoryState,
    id: Result<Path<AccountCategoryId>, PathRejection>,
    body: Result<Json<AccountCategoryBody>, JsonRejection>,
) -> Result<AccountCategory, Error> {
    let Path(id) = id?;
    let Json(body) = body?;
    let name = required_name(body.name.as_deref())?;
    let connection = lock_connection(&state.db_connection)?;

    update_account_category(id, &name, body.account_type.unwrap_or_default(), &connection)
}
