//! Endpoint for creating an account.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State, rejection::JsonRejection},
    http::StatusCode,
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    account::{AccountWithDetails, CreateAccountBody, create_account},
    app_state::lock_connection,
    validation::{required, required_name},
};

/// The state needed to create an account.
#[derive(Debug, Clone)]
pub struct CreateAccountState {
    /// The database connection for managing accounts.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateAccountState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for creating a new account, responds with the account and its category.
pub async fn create_account_endpoint(
    State(state): State<CreateAccountState>,
    body: Result<Json<CreateAccountBody>, JsonRejection>,
) -> Result<(StatusCode, Json<AccountWithDetails>), Error> {
    create(&state, body)
        .map(|account| (StatusCode::CREATED, Json(account)))
        .inspect_err(|error| error.log("create account"))
}

fn create(
    state: &CreateAccountState,
    body: Result<Json<CreateAccountBody>, JsonRejection>,
) -> Result<AccountWithDetails, Error> {
    let Json(body) = body?;
    let name = required_name(body.name.as_deref())?;
    let account_type = required(body.account_type, "type")?;
    let category_id = required(body.category_id, "categoryId")?;
    let connection = lock_connection(&state.db_connection)?;

    create_account(&name, account_type, category_id, &connection)
}

#[cfg(test)]
mod tests {
    use axum::{Router, http::StatusCode, routing::post};
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::json;

    use crate::{
        AppState,
        account_category::{AccountType, create_account_category},
        app_state::lock_connection,
    };

    use super::create_account_endpoint;

    fn get_test_server() -> (TestServer, i64) {
        let state = AppState::new(Connection::open_in_memory().unwrap()).unwrap();
        let category_id = {
            let connection = lock_connection(&state.db_connection).unwrap();
            create_account_category("Bank", AccountType::Asset, &connection)
                .unwrap()
                .id
        };
        let app = Router::new()
            .route("/", post(create_account_endpoint))
            .with_state(state);

        (
            TestServer::new(app).expect("Could not create test server."),
            category_id,
        )
    }

    #[tokio::test]
    async fn creates_account() {
        let (server, category_id) = get_test_server();

        let response = server
            .post("/")
            .json(&json!({"name": "Everyday", "type": "ASSET", "categoryId": category_id}))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: serde_json::Value = response.json();
        assert_eq!(body["name"], "Everyday");
        assert_eq!(body["isActive"], true);
        assert_eq!(body["category"]["name"], "Bank");
        assert_eq!(body["latestSnapshot"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn missing_type_is_rejected() {
        let (server, category_id) = get_test_server();

        let response = server
            .post("/")
            .json(&json!({"name": "Everyday", "categoryId": category_id}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"]["issues"][0]["path"], "type");
    }

    #[tokio::test]
    async fn unknown_category_is_not_found() {
        let (server, _) = get_test_server();

        let response = server
            .post("/")
            .json(&json!({"name": "Everyday", "type": "ASSET", "categoryId": 999}))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"]["_tag"], "NotFoundError");
        assert_eq!(body["error"]["resource"], "AccountCategory");
    }
}
