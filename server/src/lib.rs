//! Data-access layer for the concert and theater ticketing service: entity
//! schemas with structural validation, and scoped database sessions over a
//! single PostgreSQL pool.

pub mod config;
pub mod db;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod utils;

pub use db::{ConnectionProvider, Session};
pub use utils::error::{AppError, AppResult};
