//! Endpoint for updating a budget category.

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
    budget_category::{
        BudgetCategory, BudgetCategoryChanges, BudgetCategoryId, UpdateBudgetCategoryBody,
        update_budget_category,
    },
    validation::required_name,
};

/// The state needed to update a budget category.
#[derive(Debug, Clone)]
pub struct UpdateBudgetCategoryState {
    /// The database connection for managing categories.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdateBudgetCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for renaming, retyping or (de)activating a budget category.
pub async fn update_budget_category_endpoint(
    State(state): State<UpdateBudgetCategoryState>,
    id: Result<Path<BudgetCategoryId>, PathRejection>,
    body: Result<Json<UpdateBudgetCategoryBody>, JsonRejection>,
) -> Result<Json<BudgetCategory>, Error> {
    update(&state, id, body)
        .map(Json)
        .inspect_err(|error| error.log("update budget category"))
}

fn update(
    state: &UpdateBudgetCategoryState,
    id: Result<Path<BudgetCategoryId>, PathRejection>,
    body: Result<Json<UpdateBudgetCategoryBody>, JsonRejection>,
) -> Result<BudgetCategory, Error> {
    let Path(id) = id?;
    let Json(body) = body?;
    let name = match body.name {
        Some(name) => Some(required_name(Some(&name))?),
        None => None,
    };
    let changes = BudgetCategoryChanges {
        name,
        is_active: body.is_active,
        category_type: body.category_type,
    };
    let connection = lock_connection(&state.db_connection)?;

    update_budget_category(id, &changes, &connection)
}

#[cfg(test)]
mod tests {
    use axum::{Router, http::StatusCode, routing::put};
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::json;

    use crate::{
        AppState,
        app_state::lock_connection,
        budget_category::{BudgetCategoryType, create_budget_category},
    };

    use super::update_budget_category_endpoint;

    fn get_test_server() -> (TestServer, i64) {
        let state = AppState::new(Connection::open_in_memory().unwrap()).unwrap();
        let id = {
            let connection = lock_connection(&state.db_connection).unwrap();
            create_budget_category("Rent", BudgetCategoryType::Need, &connection)
                .unwrap()
                .id
        };
        let app = Router::new()
            .route("/{id}", put(update_budget_category_endpoint))
            .with_state(state);

        (TestServer::new(app).expect("Could not create test server."), id)
    }

    #[tokio::test]
    async fn changes_only_given_fields() {
        let (server, id) = get_test_server();

        let response = server
            .put(&format!("/{id}"))
            .json(&json!({"type": "SAVING"}))
            .await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["name"], "Rent");
        assert_eq!(body["type"], "SAVING");
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let (server, id) = get_test_server();

        let response = server
            .put(&format!("/{id}"))
            .json(&json!({"name": "  "}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
