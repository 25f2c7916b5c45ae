//! Endpoint for the yearly budget chart.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State, rejection::QueryRejection},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    app_state::lock_connection,
    budget::{BudgetTrendPoint, build_budget_trend, get_budgeted_for_year},
    income::get_income_for_year,
    scope::{YearQuery, YearScope},
    transaction::get_transactions_in_range,
};

/// The state needed to build the budget trend.
#[derive(Debug, Clone)]
pub struct BudgetTrendState {
    /// The database connection for reading entries, transactions and income.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for BudgetTrendState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that returns twelve monthly budget points for a year.
///
/// The year defaults to the current year.
pub async fn get_budget_trend_endpoint(
    State(state): State<BudgetTrendState>,
    query: Result<Query<YearQuery>, QueryRejection>,
) -> Result<Json<Vec<BudgetTrendPoint>>, Error> {
    get_trend(&state, query)
        .map(Json)
        .inspect_err(|error| error.log("get budget trend"))
}

fn get_trend(
    state: &BudgetTrendState,
    query: Result<Query<YearQuery>, QueryRejection>,
) -> Result<Vec<BudgetTrendPoint>, Error> {
    let Query(query) = query?;
    let year = YearScope::try_from(query)?;
    let connection = lock_connection(&state.db_connection)?;

    let budgeted = get_budgeted_for_year(year, &connection)?;
    let spent: Vec<_> = get_transactions_in_range(&year.date_range(), false, &connection)?
        .into_iter()
        .map(|transaction| (transaction.date.month() as u8, transaction.amount))
        .collect();
    let income = get_income_for_year(year, &connection)?;

    build_budget_trend(year, &budgeted, &spent, &income)
}

#[cfg(test)]
mod tests {
    use axum::{Router, http::StatusCode, routing::get};
    use axum_test::TestServer;
    use rusqlite::Connection;
    use rust_decimal::Decimal;
    use serde_json::json;
    use time::macros::date;

    use crate::{
        AppState,
        app_state::lock_connection,
        budget_category::{BudgetCategoryType, create_budget_category},
        income::save_income,
        scope::MonthScope,
        transaction::{NewTransaction, create_transaction},
    };

    use super::get_budget_trend_endpoint;

    fn get_test_server() -> TestServer {
        let state = AppState::new(Connection::open_in_memory().unwrap()).unwrap();
        {
            let connection = lock_connection(&state.db_connection).unwrap();
            let category =
                create_budget_category("Rent", BudgetCategoryType::Need, &connection).unwrap();
            create_transaction(
                &NewTransaction {
                    date: date!(2024 - 02 - 01),
                    amount: Decimal::new(1200, 0),
                    vendor: Some("Landlord".to_owned()),
                    description: None,
                    category_id: category.id,
                    is_recurring: true,
                },
                &connection,
            )
            .unwrap();
            save_income(
                MonthScope::new(2, 2024).unwrap(),
                Decimal::new(5000, 0),
                None,
                &connection,
            )
            .unwrap();
        }
        let app = Router::new()
            .route("/", get(get_budget_trend_endpoint))
            .with_state(state);

        TestServer::new(app).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn february_has_spending_and_savings() {
        let server = get_test_server();

        let response = server.get("/").add_query_param("year", 2024).await;

        response.assert_status_ok();
        let points: serde_json::Value = response.json();
        assert_eq!(points.as_array().unwrap().len(), 12);
        assert_eq!(
            points[1],
            json!({
                "month": "Feb",
                "monthNum": 2,
                "budgeted": "0",
                "spent": "1200",
                "income": "5000",
                "savings": "3800"
            })
        );
        assert_eq!(points[0]["spent"], json!("0"));
    }

    #[tokio::test]
    async fn year_out_of_range_is_rejected() {
        let server = get_test_server();

        let response = server.get("/").add_query_param("year", 1850).await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
