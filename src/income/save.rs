//! Endpoint for saving a month's income.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State, rejection::JsonRejection},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    app_state::lock_connection,
    income::{MonthlyIncome, SaveIncomeBody, save_income},
    scope::{MonthScope, MonthYearQuery},
    validation::{optional_text, required},
};

/// The state needed to save income.
#[derive(Debug, Clone)]
pub struct SaveIncomeState {
    /// The database connection for writing income.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for SaveIncomeState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that records the income for a month, replacing any previous value.
pub async fn save_income_endpoint(
    State(state): State<SaveIncomeState>,
    body: Result<Json<SaveIncomeBody>, JsonRejection>,
) -> Result<Json<MonthlyIncome>, Error> {
    save(&state, body)
        .map(Json)
        .inspect_err(|error| error.log("save income"))
}

fn save(
    state: &SaveIncomeState,
    body: Result<Json<SaveIncomeBody>, JsonRejection>,
) -> Result<MonthlyIncome, Error> {
    let Json(body) = body?;
    let scope = MonthScope::try_from(MonthYearQuery {
        month: body.month,
        year: body.year,
    })?;
    let amount = required(body.amount, "amount")?;
    let note = optional_text(body.note);
    let connection = lock_connection(&state.db_connection)?;

    save_income(scope, amount, note.as_deref(), &connection)
}
