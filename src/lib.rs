//! # jpk-vat
//!
//! Generates the Polish JPK_VAT (3) sales register — the monthly VAT report
//! filed as XML with the Ministry of Finance — from shop invoices and orders.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//! Amounts in the report are written the Polish way: `1.234,56`.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::{FixedOffset, NaiveDate, TimeZone};
//! use jpk_vat::core::*;
//! use jpk_vat::jpk::{JpkConfigBuilder, JpkVatGenerator};
//! use rust_decimal_macros::dec;
//!
//! let repo = InMemoryInvoiceRepository::new(vec![
//!     InvoiceBuilder::new(1, "FV/2021/03/001", NaiveDate::from_ymd_opt(2021, 3, 15).unwrap())
//!         .order(OrderBuilder::new("Anna Nowak")
//!             .product(dec!(100.00), "23")
//!             .product(dec!(50.00), "zw")
//!             .build())
//!         .build(),
//! ]);
//! let config = JpkConfigBuilder::new(" 123-456-78-90 ", "Sklep Sp. z o.o.").build();
//! let now = FixedOffset::east_opt(3600).unwrap().with_ymd_and_hms(2021, 4, 1, 9, 0, 0).unwrap();
//!
//! let xml = JpkVatGenerator::new(repo, config)
//!     .with_clock(FixedClock(now))
//!     .generate(NaiveDate::from_ymd_opt(2021, 3, 15).unwrap())
//!     .unwrap();
//!
//! assert!(xml.contains("<tns:NIP>123-456-78-90</tns:NIP>"));
//! assert!(xml.contains("<tns:K_10>50,00</tns:K_10>"));
//! assert!(xml.contains("<tns:PodatekNalezny>23,00</tns:PodatekNalezny>"));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Invoice/order types, tax rates, money formatting, periods, repository |
//! | `jpk` (default) | JPK_VAT document generation |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "jpk")]
pub mod jpk;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
