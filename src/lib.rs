//! Horizon Bank is a small web app for depositing, withdrawing and transferring money at a
//! bank whose ledger lives in a separate REST backend.
//!
//! This library serves HTML pages directly. htmx in the browser swaps in the fragments the
//! endpoints return, and every read of or write to the ledger goes through [BankApi].

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod account;
mod amount;
mod app_state;
mod client;
mod controller;
mod endpoints;
mod error;
mod history;
mod home_page;
mod html;
mod navigation;
mod not_found;
mod pay_page;
mod routing;
mod theme;
mod timezone;
mod transaction;
mod transfer_page;

#[cfg(test)]
mod test_utils;

pub use account::AccountId;
pub use app_state::AppState;
pub use client::{BankApi, BankClient, DEFAULT_API_URL};
pub use error::Error;
pub use routing::build_router;
pub use timezone::DEFAULT_TIMEZONE;

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
