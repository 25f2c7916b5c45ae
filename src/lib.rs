//! Ledgerwise is a personal finance tracker.
//!
//! This library provides a JSON REST API over a SQLite ledger of account
//! balances, budgets, income and transactions, along with the dashboards and
//! yearly trends derived from them.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod account;
mod account_category;
mod api_response;
mod app_state;
mod budget;
mod budget_category;
mod dashboard;
mod database_id;
mod db;
mod endpoints;
mod error;
mod income;
mod logging;
mod money;
mod net_worth;
mod routing;
mod scope;
mod transaction;
mod validation;

pub use app_state::{AppState, lock_connection};
pub use db::{initialize as initialize_db, seed_default_categories, seed_sample_data};
pub use error::{Error, ValidationIssue};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use scope::{MonthScope, YearScope};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install the terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
