//! Core library for RNDM - storage repositories, external media search, and
//! shared API types.

pub mod api_types;
pub mod application;
pub mod database;
pub mod error;
pub mod search;

pub use api_types::ApiResponse;
pub use application::unit_of_work::AppUnitOfWork;
pub use database::postgres::PostgresDatabase;
pub use error::{Result, StorageError};
