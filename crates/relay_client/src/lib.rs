//! Command-line client for the relay server.
mod api;
pub mod commands;
mod session;

pub use api::{ApiClient, ApiError, UrlLookup};
pub use session::ClientSession;
