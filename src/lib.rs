//! Expense Tracker records and queries personal expenses.
//!
//! This library provides a small REST API backed by a SQLite (or in-memory)
//! store. The core is [ExpenseService], which validates new expenses against
//! a [Clock] and translates an [ExpenseFilter] into a store query.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod app_state;
mod category;
pub mod clock;
pub mod dates;
mod db;
pub mod endpoints;
mod error;
mod expense;
mod logging;
mod routing;
pub mod stores;
mod timezone;

pub use app_state::AppState;
pub use category::Category;
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::Error;
pub use expense::{
    CSV_HEADER, CreateExpenseRequest, CreatedExpenseView, Expense, ExpenseFilter, ExpenseId,
    ExpenseQueryParams, ExpenseService, ExpenseView, MAX_DESCRIPTION_LENGTH, StoredExpense,
    render_csv,
};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
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
                tracing::error!("failed to install signal handler: {error}");
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
