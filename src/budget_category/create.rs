//! Endpoint for creating a budget category.

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
    budget_category::{BudgetCategory, CreateBudgetCategoryBody, create_budget_category},
    validation::required_name,
};

/// The state needed to create a budget category.
#[derive(Debug, Clone)]
pub struct CreateBudgetCategoryState {
    /// The database connection for managing categories.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateBudgetCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for creating a budget category at the end of the display order.
pub async fn create_budget_category_endpoint(
    State(state): State<CreateBudgetCategoryState>,
    body: Result<Json<CreateBudgetCategoryBody>, JsonRejection>,
) -> Result<(StatusCode, Json<BudgetCategory>), Error> {
    create(&state, body)
        .map(|category| (StatusCode::CREATED, Json(category)))
        .inspect_err(|error| error.log("create budget category"))
}

fn create(
    state: &CreateBudgetCategoryState,
    body: Result<Json<CreateBudgetCategoryBody>, JsonRejection>,
) -> Result<BudgetCategory, Error> {
    let Json(body) = body?;
    let name = required_name(body.name.as_deref())?;
    let connection = lock_connection(&state.db_connection)?;

    create_budget_category(&name, body.category_type.unwrap_or_default(), &connection)
}
