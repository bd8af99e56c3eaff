//! Geodata Company Data Server
//!
//! This crate provides the company data API server: a thin HTTP layer over
//! an RDS PostgreSQL instance holding per-company records keyed by company
//! registration number (CRN).
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading from environment variables
//! - [`db`]: Database connectivity, IAM authentication, models, and queries
//! - [`error`]: Custom error types with Axum integration
//! - [`handlers`]: HTTP route handlers
//! - [`services`]: Business logic between handlers and queries
//! - [`state`]: Shared application state

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod result_ext;
pub mod services;
pub mod state;

pub use error::{AppError, AppResult};
pub use result_ext::ResultExt;
