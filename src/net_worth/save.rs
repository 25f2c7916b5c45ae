//! Endpoint for saving a month of account balances.

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
    error::ValidationIssue,
    net_worth::{SaveSnapshotsBody, SnapshotInput, SnapshotValue, save_snapshots},
    scope::{MonthScope, MonthYearQuery},
};

/// The state needed to save snapshots.
#[derive(Debug, Clone)]
pub struct SaveSnapshotsState {
    /// The database connection for writing snapshots.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for SaveSnapshotsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that upserts a balance per account for one month.
///
/// Either every snapshot is saved or none are.
pub async fn save_snapshots_endpoint(
    State(state): State<SaveSnapshotsState>,
    body: Result<Json<SaveSnapshotsBody>, JsonRejection>,
) -> Result<Json<SavedResponse>, Error> {
    save(&state, body)
        .map(|count| Json(SavedResponse::saved(count)))
        .inspect_err(|error| error.log("save net worth snapshots"))
}

fn save(
    state: &SaveSnapshotsState,
    body: Result<Json<SaveSnapshotsBody>, JsonRejection>,
) -> Result<usize, Error> {
    let Json(body) = body?;
    let scope = MonthScope::try_from(MonthYearQuery {
        month: body.month,
        year: body.year,
    })?;
    let snapshots = validate_snapshots(body.snapshots)?;
    let connection = lock_connection(&state.db_connection)?;

    save_snapshots(scope, &snapshots, &connection)
}

/// Check that there is at least one snapshot and that each has an account and a value.
fn validate_snapshots(snapshots: Option<Vec<SnapshotInput>>) -> Result<Vec<SnapshotValue>, Error> {
    let snapshots = snapshots.unwrap_or_default();

    if snapshots.is_empty() {
        return Err(Error::validation(
            "snapshots",
            "Snapshots must be a non-empty array",
        ));
    }

    let mut issues = Vec::new();
    let mut values = Vec::with_capacity(snapshots.len());

    for (index, snapshot) in snapshots.into_iter().enumerate() {
        if snapshot.account_id.is_none() {
            issues.push(ValidationIssue {
                path: format!("snapshots.{index}.accountId"),
                message: "Account ID is required".to_owned(),
            });
        }

        if snapshot.value.is_none() {
            issues.push(ValidationIssue {
                path: format!("snapshots.{index}.value"),
                message: "Value is required".to_owned(),
            });
        }

        if let (Some(account_id), Some(value)) = (snapshot.account_id, snapshot.value) {
            values.push(SnapshotValue { account_id, value });
        }
    }

    if issues.is_empty() {
        Ok(values)
    } else {
        Err(Error::validation_issues(issues))
    }
}
