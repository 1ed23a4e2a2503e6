//! Relay server: keyword lookup and the streaming download endpoint.
mod config;
mod cors;
pub mod logging;
mod routes;

pub use config::{LogDestination, ServerConfig};
pub use routes::{router, ServerState};
