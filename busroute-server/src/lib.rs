//! HTTP front end for the bus router.
//!
//! Loads a catalogue once at startup and answers route, bus and stop
//! queries over the shared read-only model.

pub mod cli;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use error::{AppError, ServerError};
pub use routes::create_router;
pub use state::AppState;
