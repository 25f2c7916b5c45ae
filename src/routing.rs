//! Application router configuration.

use axum::{
    Router, middleware,
    routing::{get, put},
};

use crate::{
    AppState,
    account::{
        create_account_endpoint, delete_account_endpoint, list_accounts_endpoint,
        update_account_endpoint,
    },
    account_category::{
        create_account_category_endpoint, delete_account_category_endpoint,
        list_account_categories_endpoint, update_account_category_endpoint,
    },
    budget::{get_budget_endpoint, get_budget_trend_endpoint, save_budget_endpoint},
    budget_category::{
        create_budget_category_endpoint, delete_budget_category_endpoint,
        list_budget_categories_endpoint, reorder_budget_categories_endpoint,
        update_budget_category_endpoint,
    },
    dashboard::get_dashboard_endpoint,
    endpoints,
    income::{get_income_endpoint, save_income_endpoint},
    logging::logging_middleware,
    net_worth::{
        get_net_worth_endpoint, get_net_worth_summary_endpoint, get_net_worth_trend_endpoint,
        save_snapshots_endpoint,
    },
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint,
        get_recurring_suggestions_endpoint, get_transaction_endpoint, list_transactions_endpoint,
        update_transaction_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            endpoints::BUDGET,
            get(get_budget_endpoint).post(save_budget_endpoint),
        )
        .route(endpoints::BUDGET_TRENDS, get(get_budget_trend_endpoint))
        .route(endpoints::DASHBOARD, get(get_dashboard_endpoint))
        .route(
            endpoints::NET_WORTH,
            get(get_net_worth_endpoint).post(save_snapshots_endpoint),
        )
        .route(
            endpoints::NET_WORTH_TRENDS,
            get(get_net_worth_trend_endpoint),
        )
        .route(
            endpoints::NET_WORTH_SUMMARY,
            get(get_net_worth_summary_endpoint),
        )
        .route(
            endpoints::INCOME,
            get(get_income_endpoint).post(save_income_endpoint),
        )
        .route(
            endpoints::TRANSACTIONS,
            get(list_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(
            endpoints::RECURRING_SUGGESTIONS,
            get(get_recurring_suggestions_endpoint),
        )
        .route(
            endpoints::TRANSACTION,
            get(get_transaction_endpoint)
                .put(update_transaction_endpoint)
                .delete(delete_transaction_endpoint),
        )
        .route(
            endpoints::ACCOUNTS,
            get(list_accounts_endpoint).post(create_account_endpoint),
        )
        .route(
            endpoints::ACCOUNT,
            put(update_account_endpoint).delete(delete_account_endpoint),
        )
        .route(
            endpoints::ACCOUNT_CATEGORIES,
            get(list_account_categories_endpoint).post(create_account_category_endpoint),
        )
        .route(
            endpoints::ACCOUNT_CATEGORY,
            put(update_account_category_endpoint).delete(delete_account_category_endpoint),
        )
        .route(
            endpoints::BUDGET_CATEGORIES,
            get(list_budget_categories_endpoint).post(create_budget_category_endpoint),
        )
        .route(
            endpoints::REORDER_BUDGET_CATEGORIES,
            put(reorder_budget_categories_endpoint),
        )
        .route(
            endpoints::BUDGET_CATEGORY,
            put(update_budget_category_endpoint).delete(delete_budget_category_endpoint),
        )
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::{Value, json};

    use crate::{AppState, db::seed_default_categories, endpoints, endpoints::format_endpoint};

    use super::build_router;

    fn get_test_server() -> TestServer {
        let connection = Connection::open_in_memory().unwrap();
        let state = AppState::new(connection).unwrap();
        {
            let connection = state.db_connection.lock().unwrap();
            seed_default_categories(&connection).unwrap();
        }

        TestServer::new(build_router(state)).expect("Could not create test server.")
    }

    async fn budget_category_id(server: &TestServer, name: &str) -> i64 {
        let categories: Value = server.get(endpoints::BUDGET_CATEGORIES).await.json();

        categories
            .as_array()
            .unwrap()
            .iter()
            .find(|category| category["name"] == name)
            .and_then(|category| category["id"].as_i64())
            .unwrap()
    }

    #[tokio::test]
    async fn budget_carries_forward_and_derives_spending() {
        let server = get_test_server();
        let groceries = budget_category_id(&server, "Groceries").await;

        server
            .post(endpoints::BUDGET)
            .json(&json!({
                "month": 2,
                "year": 2024,
                "entries": [{"categoryId": groceries, "budgeted": 500}]
            }))
            .await
            .assert_status_ok();
        for (date, amount) in [("2024-03-04", "300"), ("2024-03-25", "123.50")] {
            server
                .post(endpoints::TRANSACTIONS)
                .json(&json!({"date": date, "amount": amount, "categoryId": groceries}))
                .await
                .assert_status(StatusCode::CREATED);
        }

        let rows: Value = server
            .get(endpoints::BUDGET)
            .add_query_param("month", 3)
            .add_query_param("year", 2024)
            .await
            .json();

        let row = rows
            .as_array()
            .unwrap()
            .iter()
            .find(|row| row["id"] == groceries)
            .unwrap();
        assert_eq!(
            *row,
            json!({
                "id": groceries,
                "name": "Groceries",
                "type": "WANT",
                "budgeted": "500",
                "spent": "423.5",
                "hasEntry": false
            })
        );
    }

    #[tokio::test]
    async fn net_worth_round_trip_through_dashboard() {
        let server = get_test_server();
        let categories: Value = server.get(endpoints::ACCOUNT_CATEGORIES).await.json();
        let bank = categories
            .as_array()
            .unwrap()
            .iter()
            .find(|category| category["name"] == "Bank")
            .and_then(|category| category["id"].as_i64())
            .unwrap();
        let account: Value = server
            .post(endpoints::ACCOUNTS)
            .json(&json!({"name": "Everyday", "type": "ASSET", "categoryId": bank}))
            .await
            .json();

        server
            .post(endpoints::NET_WORTH)
            .json(&json!({
                "month": 5,
                "year": 2024,
                "snapshots": [{"accountId": account["id"], "value": "2500"}]
            }))
            .await
            .assert_status_ok();

        let dashboard: Value = server
            .get(endpoints::DASHBOARD)
            .add_query_param("month", 5)
            .add_query_param("year", 2024)
            .await
            .json();

        assert_eq!(
            dashboard["netWorth"],
            json!({"totalAssets": "2500", "totalDebts": "0", "netWorth": "2500"})
        );

        let response = server
            .delete(&format_endpoint(endpoints::ACCOUNT, account["id"].as_i64().unwrap()))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["error"]["_tag"], "ConstraintError");
    }

    #[tokio::test]
    async fn dashboard_rejects_totals_too_large_to_add_up() {
        let server = get_test_server();
        let groceries = budget_category_id(&server, "Groceries").await;
        for day in ["2024-03-04", "2024-03-05"] {
            server
                .post(endpoints::TRANSACTIONS)
                .json(&json!({
                    "date": day,
                    "amount": "50000000000000000000000000000",
                    "categoryId": groceries
                }))
                .await
                .assert_status(StatusCode::CREATED);
        }

        let response = server
            .get(endpoints::DASHBOARD)
            .add_query_param("month", 3)
            .add_query_param("year", 2024)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["error"]["_tag"], "ValidationError");
        server
            .get(endpoints::BUDGET_CATEGORIES)
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn missing_transaction_is_not_found() {
        let server = get_test_server();

        let response = server
            .get(&format_endpoint(endpoints::TRANSACTION, 404))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.json::<Value>()["error"]["_tag"], "NotFoundError");
    }

    #[tokio::test]
    async fn reorder_route_is_not_shadowed_by_id_route() {
        let server = get_test_server();
        let groceries = budget_category_id(&server, "Groceries").await;
        let utilities = budget_category_id(&server, "Utilities").await;

        server
            .put(endpoints::REORDER_BUDGET_CATEGORIES)
            .json(&json!({"orderedIds": [utilities, groceries]}))
            .await
            .assert_status_ok();

        let categories: Value = server.get(endpoints::BUDGET_CATEGORIES).await.json();
        let position = |name: &str| {
            categories
                .as_array()
                .unwrap()
                .iter()
                .position(|category| category["name"] == name)
                .unwrap()
        };
        assert!(position("Utilities") < position("Groceries"));
    }
}
