//! Endpoint for deleting a budget category.

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
    budget_category::{BudgetCategoryId, delete_budget_category},
};

/// The state needed to delete a budget category.
#[derive(Debug, Clone)]
pub struct DeleteBudgetCategoryState {
    db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteBudgetCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting a budget category that nothing references.
pub async fn delete_budget_category_endpoint(
    State(state): State<DeleteBudgetCategoryState>,
    id: Result<Path<BudgetCategoryId>, PathRejection>,
) -> Result<Json<SuccessResponse>, Error> {
    let result = id.map_err(Error::from).and_then(|Path(id)| {
        let connection = lock_connection(&state.db_connection)?;
        delete_budget_category(id, &connection)
    });

    result
        .map(|_| Json(SuccessResponse::ok()))
        .inspect_err(|error| error.log("delete budget category"))
}
