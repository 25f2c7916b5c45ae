//! Endpoint for creating an account category.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State, rejection::JsonRejection},
    http::StatusCode,
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    account_category::{AccountCategory, AccountCategoryBody, create_account_category},
    app_state::lock_connection,
    validation::required_name,
};

/// The state needed to create an account category.
#[derive(Debug, Clone)]
pub struct CreateAccountCategoryState {
    /// The database connection for managing categories.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateAccountCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for creating an account category, responds with the new category.
pub async fn create_account_category_endpoint(
    State(state): State<CreateAccountCategoryState>,
    body: Result<Json<AccountCategoryBody>, JsonRejection>,
) -> Result<(StatusCode, Json<AccountCategory>), Error> {
    create(&state, body)
        .map(|category| (StatusCode::CREATED, Json(category)))
        .inspect_err(|error| error.log("create account category"))
}

fn create(
    state: &CreateAccountCategoryState,
    body: Result<Json<AccountCategoryBody>, JsonRejection>,
) -> Result<AccountCategory, Error> {
    let Json(body) = body?;
    let name = required_name(body.name.as_deref())?;
    let connection = lock_connection(&state.db_connection)?;

    create_account_category(&name, body.account_type.unwrap_or_default(), &connection)
}

#[cfg(test)]
mod tests {
    use axum::{Router, http::StatusCode, routing::post};
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::json;

    use crate::AppState;

    use super::create_account_category_endpoint;

    fn get_test_server() -> TestServer {
        let state = AppState::new(Connection::open_in_memory().unwrap()).unwrap();
        let app = Router::new()
            .route("/", post(create_account_category_endpoint))
            .with_state(state);

        TestServer::new(app).unwrap()
    }

    #[tokio::test]
    async fn creates_category_with_default_type() {
        let server = get_test_server();

        let response = server.post("/").json(&json!({"name": "  Crypto "})).await;

        response.assert_status(StatusCode::CREATED);
        let body: serde_json::Value = response.json();
        assert_eq!(body["name"], "Crypto");
        assert_eq!(body["type"], "ASSET");
        assert_eq!(body["isDefault"], false);
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let server = get_test_server();

        let response = server.post("/").json(&json!({"name": "   "})).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"]["_tag"], "ValidationError");
    }

    #[tokio::test]
    async fn invalid_type_is_rejected() {
        let server = get_test_server();

        let response = server
            .post("/")
            .json(&json!({"name": "Crypto", "type": "SAVING"}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn duplicate_name_is_a_conflict() {
        let server = get_test_server();
        server.post("/").json(&json!({"name": "Crypto"})).await;

        let response = server.post("/").json(&json!({"name": "Crypto"})).await;

        response.assert_status(StatusCode::CONFLICT);
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"]["_tag"], "ConflictError");
    }
}
