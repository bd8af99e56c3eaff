//! Business logic services for the geodata server.

mod company;

pub use company::CompanyService;
