//! HTTP surface for RNDM: configuration, application state, identity
//! extraction, route handlers, and router assembly.

pub mod entry_handlers;
pub mod identity;
pub mod infra;
pub mod routes;
pub mod search_handlers;
pub mod social_handlers;

pub use infra::app_state::AppState;
pub use infra::config::Config;
pub use infra::errors::{AppError, AppResult};
pub use routes::create_app;
