//! Database module for the geodata server.
//!
//! This module provides database connectivity, RDS IAM authentication,
//! models, and queries for PostgreSQL using SQLx.

pub mod auth;
pub mod models;
pub mod pool;
pub mod queries;
pub mod storage;

pub use pool::{create_pool, DbPool};
pub use storage::Storage;
