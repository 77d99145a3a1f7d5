//! navmenu Server
//!
//! Thin HTTP service holding one menu document in memory.
//!
//! # Modules
//!
//! - [`config`]: Flags and environment fallbacks
//! - [`store`]: Lock-guarded document store
//! - [`routes`]: warp filters for the four endpoints
//! - [`telemetry`]: tracing subscriber setup
//!
//! The server stores what it is sent. Keys are assigned by the client
//! before posting, never here.

#![warn(unreachable_pub)]

use std::future::Future;
use std::net::SocketAddr;

pub mod config;
pub mod routes;
pub mod store;
pub mod telemetry;

pub use config::{LogFormat, ServerConfig};
pub use store::MenuStore;

/// Errors starting the server
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Listening socket could not be bound
    #[error("failed to bind: {0}")]
    Bind(#[from] warp::Error),
}

/// Bind the routes for `store` on `config.addr`
///
/// Returns the bound address and the server future, which completes once
/// `shutdown` resolves.
///
/// # Errors
///
/// Returns [`ServerError::Bind`] when the address is unavailable.
pub fn bind(
    config: &ServerConfig,
    store: MenuStore,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(SocketAddr, impl Future<Output = ()>), ServerError> {
    let routes = routes::routes(store, config.body_limit);
    let bound = warp::serve(routes).try_bind_with_graceful_shutdown(config.addr, shutdown)?;
    Ok(bound)
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
