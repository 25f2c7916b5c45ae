//! Endpoint for listing a month of transactions.

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
    transaction::{
        TransactionFilter, TransactionListQuery, TransactionWithCategory, list_transactions,
    },
    validation::optional_text,
};

/// The state needed to list transactions.
#[derive(Debug, Clone)]
pub struct ListTransactionsState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ListTransactionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that lists the transactions of a month, newest first.
pub async fn list_transactions_endpoint(
    State(state): State<ListTransactionsState>,
    query: Result<Query<TransactionListQuery>, QueryRejection>,
) -> Result<Json<Vec<TransactionWithCategory>>, Error> {
    list(&state, query)
        .map(Json)
        .inspect_err(|error| error.log("list transactions"))
}

fn list(
    state: &ListTransactionsState,
    query: Result<Query<TransactionListQuery>, QueryRejection>,
) -> Result<Vec<TransactionWithCategory>, Error> {
    let Query(query) = query?;
    let scope = MonthScope::try_from(MonthYearQuery {
        month: query.month,
        year: query.year,
    })?;
    let filter = TransactionFilter {
        category_id: parse_category_filter(query.category_id.as_deref())?,
        search: optional_text(query.search),
    };
    let connection = lock_connection(&state.db_connection)?;

    list_transactions(scope, &filter, &connection)
}

/// Parse the `categoryId` filter, where blank or "all" means no filter.
fn parse_category_filter(category_id: Option<&str>) -> Result<Option<i64>, Error> {
    match category_id.map(str::trim) {
        None | Some("") | Some("all") => Ok(None),
        Some(category_id) => category_id
            .parse()
            .map(Some)
            .map_err(|_| Error::validation("categoryId", "categoryId must be an integer")),
    }
}
