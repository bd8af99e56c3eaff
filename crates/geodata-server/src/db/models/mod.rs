//! Database models for the geodata server.

mod company;

pub use company::{CompanyRecord, CompanyResponse, DnbMetrics, PrimaryTrade};
