//! HTTP surface of the EU funding analytics backend.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::{ConfigError, ServerConfig};
pub use error::ApiError;
pub use routes::{app, App};
pub use state::AppState;
