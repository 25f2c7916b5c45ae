//! Endpoint for changing the display order of budget categories.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State, rejection::JsonRejection},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    api_response::SuccessResponse,
    app_state::lock_connection,
    budget_category::{ReorderBudgetCategoriesBody, reorder_budget_categories},
};

/// The state needed to reorder budget categories.
#[derive(Debug, Clone)]
pub struct ReorderBudgetCategoriesState {
    db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ReorderBudgetCategoriesState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that sets the display order from a list of category IDs.
pub async fn reorder_budget_categories_endpoint(
    State(state): State<ReorderBudgetCategoriesState>,
    body: Result<Json<ReorderBudgetCategoriesBody>, JsonRejection>,
) -> Result<Json<SuccessResponse>, Error> {
    reorder(&state, body)
        .map(|_| Json(SuccessResponse::ok()))
        .inspect_err(|error| error.log("reorder budget categories"))
}

fn reorder(
    state: &ReorderBudgetCategoriesState,
    body: Result<Json<ReorderBudgetCategoriesBody>, JsonRejection>,
) -> Result<(), Error> {
    let Json(body) = body?;
    let ordered_ids = body.ordered_ids.unwrap_or_default();

    if ordered_ids.is_empty() {
        return Err(Error::validation(
            "orderedIds",
            "orderedIds must be a non-empty array",
        ));
    }

    let connection = lock_connection(&state.db_connection)?;

    reorder_budget_categories(&ordered_ids, &connection)
}
