//! HTTP handlers for the geodata server API.

pub mod company;
pub mod health;

pub use health::{api_health, health_check};
