//! Core types for the JPK_VAT sales register.
//!
//! Invoices, orders and products as read from the shop backend, the
//! [`TaxRate`] enumeration, Polish money formatting, reporting periods,
//! and the repository and clock seams the report generator depends on.

mod amount;
mod builder;
mod clock;
mod error;
mod period;
mod repository;
mod types;

pub use amount::{format_amount, parse_amount, round_amount};
pub use builder::*;
pub use clock::*;
pub use error::*;
pub use period::ReportingPeriod;
pub use repository::*;
pub use types::*;
