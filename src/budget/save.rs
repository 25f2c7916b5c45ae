//! Endpoint for saving a month of budget entries.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State, rejection::JsonRejection},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    api_response::SavedResponse,
    app_state::lock_connection,
    budget::{BudgetEntryInput, BudgetEntryValue, SaveBudgetBody, save_budget_entries},
    error::ValidationIssue,
    money::parse_or_zero,
    scope::{MonthScope, MonthYearQuery},
};

/// The state needed to save budget entries.
#[derive(Debug, Clone)]
pub struct SaveBudgetState {
    /// The database connection for writing budget entries.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for SaveBudgetState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that upserts the budgeted amount of each category for one month.
///
/// Either every entry is saved or none are.
pub async fn save_budget_endpoint(
    State(state): State<SaveBudgetState>,
    body: Result<Json<SaveBudgetBody>, JsonRejection>,
) -> Result<Json<SavedResponse>, Error> {
    save(&state, body)
        .map(|count| Json(SavedResponse::saved(count)))
        .inspect_err(|error| error.log("save budget"))
}

fn save(
    state: &SaveBudgetState,
    body: Result<Json<SaveBudgetBody>, JsonRejection>,
) -> Result<usize, Error> {
    let Json(body) = body?;
    let scope = MonthScope::try_from(MonthYearQuery {
        month: body.month,
        year: body.year,
    })?;
    let entries = validate_entries(body.entries)?;
    let connection = lock_connection(&state.db_connection)?;

    save_budget_entries(scope, &entries, &connection)
}

/// Check that there is at least one entry and that each names a category.
///
/// Amounts that do not parse are saved as zero.
fn validate_entries(entries: Option<Vec<BudgetEntryInput>>) -> Result<Vec<BudgetEntryValue>, Error> {
    let entries = entries.unwrap_or_default();

    if entries.is_empty() {
        return Err(Error::validation(
            "entries",
            "Entries must be a non-empty array",
        ));
    }

    let mut issues = Vec::new();
    let mut values = Vec::with_capacity(entries.len());

    for (index, entry) in entries.into_iter().enumerate() {
        match entry.category_id {
            Some(category_id) => values.push(BudgetEntryValue {
                category_id,
                budgeted: parse_or_zero(entry.budgeted.as_ref()),
            }),
            None => issues.push(ValidationIssue {
                path: format!("entries.{index}.categoryId"),
                message: "Category ID is required".to_owned(),
            }),
        }
    }

    if issues.is_empty() {
        Ok(values)
    } else {
        Err(Error::validation_issues(issues))
    }
}

#[cfg(test)]
mod tests {
    use axum::{Router, http::StatusCode, routing::post};
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::json;

    use crate::{
        AppState,
        app_state::lock_connection,
        budget::get_budgeted_by_category,
        budget_category::{BudgetCategoryType, create_budget_category},
        scope::MonthScope,
    };

    use super::save_budget_endpoint;

    fn get_test_server() -> (TestServer, AppState, i64) {
        let state = AppState::new(Connection::open_in_memory().unwrap()).unwrap();
        let category_id = {
            let connection = lock_connection(&state.db_connection).unwrap();
            create_budget_category("Groceries", BudgetCategoryType::Need, &connection)
                .unwrap()
                .id
        };
        let app = Router::new()
            .route("/", post(save_budget_endpoint))
            .with_state(state.clone());

        (
            TestServer::new(app).expect("Could not create test server."),
            state,
            category_id,
        )
    }

    fn count_entries(state: &AppState) -> i64 {
        lock_connection(&state.db_connection)
            .unwrap()
            .query_row("SELECT COUNT(*) FROM budget_entry", [], |row| row.get(0))
            .unwrap()
    }

    #[tokio::test]
    async fn saves_entries() {
        let (server, state, category_id) = get_test_server();

        let response = server
            .post("/")
            .json(&json!({
                "month": 3,
                "year": 2024,
                "entries": [{"categoryId": category_id, "budgeted": "500"}]
            }))
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({"success": true, "count": 1}));
        assert_eq!(count_entries(&state), 1);
    }

    #[tokio::test]
    async fn unparseable_amount_is_saved_as_zero() {
        let (server, state, category_id) = get_test_server();

        server
            .post("/")
            .json(&json!({
                "month": 3,
                "year": 2024,
                "entries": [{"categoryId": category_id, "budgeted": "lots"}]
            }))
            .await
            .assert_status_ok();

        let connection = lock_connection(&state.db_connection).unwrap();
        let budgeted =
            get_budgeted_by_category(MonthScope::new(3, 2024).unwrap(), &connection).unwrap();
        assert_eq!(budgeted[&category_id], rust_decimal::Decimal::ZERO);
    }

    #[tokio::test]
    async fn empty_entries_are_rejected() {
        let (server, _, _) = get_test_server();

        let response = server
            .post("/")
            .json(&json!({"month": 3, "year": 2024, "entries": []}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn entry_without_category_is_reported_by_index() {
        let (server, state, category_id) = get_test_server();

        let response = server
            .post("/")
            .json(&json!({
                "month": 3,
                "year": 2024,
                "entries": [
                    {"categoryId": category_id, "budgeted": 10},
                    {"budgeted": 20}
                ]
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"]["issues"][0]["path"], "entries.1.categoryId");
        assert_eq!(count_entries(&state), 0);
    }

    #[tokio::test]
    async fn unknown_category_saves_nothing() {
        let (server, state, category_id) = get_test_server();

        let response = server
            .post("/")
            .json(&json!({
                "month": 3,
                "year": 2024,
                "entries": [
                    {"categoryId": category_id, "budgeted": 10},
                    {"categoryId": 9999, "budgeted": 20}
                ]
            }))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(count_entries(&state), 0);
    }
}
