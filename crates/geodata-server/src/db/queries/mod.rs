//! Database queries for the geodata server.

pub mod company;
