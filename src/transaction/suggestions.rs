//! Endpoint for recurring transaction suggestions.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State, rejection::QueryRejection},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    app_state::lock_connection,
    scope::{MonthScope, MonthYearQuery},
    transaction::{RecurringSuggestion, get_recurring_suggestions},
};

/// The state needed to suggest recurring transactions.
#[derive(Debug, Clone)]
pub struct RecurringSuggestionsState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for RecurringSuggestionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that suggests recurring transactions missing from a month.
pub async fn get_recurring_suggestions_endpoint(
    State(state): State<RecurringSuggestionsState>,
    query: Result<Query<MonthYearQuery>, QueryRejection>,
) -> Result<Json<Vec<RecurringSuggestion>>, Error> {
    suggest(&state, query)
        .map(Json)
        .inspect_err(|error| error.log("get recurring suggestions"))
}

fn suggest(
    state: &RecurringSuggestionsState,
    query: Result<Query<MonthYearQuery>, QueryRejection>,
) -> Result<Vec<RecurringSuggestion>, Error> {
    let Query(query) = query?;
    let scope = MonthScope::try_from(query)?;
    let connection = lock_connection(&state.db_connection)?;

    get_recurring_suggestions(scope, &connection)
}

#[cfg(test)]
mod tests {
    use axum::{Router, http::StatusCode, routing::get};
    use axum_test::TestServer;
    use rusqlite::Connection;
    use rust_decimal::Decimal;
    use time::macros::date;

    use crate::{
        AppState,
        app_state::lock_connection,
        budget_category::{BudgetCategoryType, create_budget_category},
        transaction::{NewTransaction, create_transaction},
    };

    use super::get_recurring_suggestions_endpoint;

    fn server_with_state(state: AppState) -> TestServer {
        let app = Router::new()
            .route("/", get(get_recurring_suggestions_endpoint))
            .with_state(state);

        TestServer::new(app).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn suggests_last_months_recurring_transaction() {
        let state = AppState::new(Connection::open_in_memory().unwrap()).unwrap();
        {
            let connection = lock_connection(&state.db_connection).unwrap();
            let category =
                create_budget_category("Streaming", BudgetCategoryType::Want, &connection)
                    .unwrap();
            create_transaction(
                &NewTransaction {
                    date: date!(2024 - 03 - 15),
                    amount: Decimal::new(1599, 2),
                    vendor: Some("Netflix".to_owned()),
                    description: None,
                    category_id: category.id,
                    is_recurring: true,
                },
                &connection,
            )
            .unwrap();
        }
        let server = server_with_state(state);

        let response = server
            .get("/")
            .add_query_param("month", 4)
            .add_query_param("year", 2024)
            .await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["suggestedDate"], "2024-04-15T12:00:00Z");
        assert_eq!(body[0]["originalTransaction"]["vendor"], "Netflix");
        assert_eq!(body[0]["originalTransaction"]["amount"], "15.99");
    }

    #[tokio::test]
    async fn missing_month_is_a_validation_error() {
        let state = AppState::new(Connection::open_in_memory().unwrap()).unwrap();
        let server = server_with_state(state);

        let response = server.get("/").add_query_param("year", 2024).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"]["_tag"], "ValidationError");
    }
}
