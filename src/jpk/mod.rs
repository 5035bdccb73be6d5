//! JPK_VAT (3) sales register export.
//!
//! Builds the monthly JPK_VAT document from the invoices of one calendar
//! month. The document is assembled from four blocks:
//! - `tns:Naglowek` — form identifiers, generation time, period, system name
//! - `tns:Podmiot1` — the filer (NIP, full name, email)
//! - `tns:SprzedazWiersz` — one row per invoice with net and tax due per rate
//! - `tns:SprzedazCtrl` — row count and total tax due
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use jpk_vat::core::*;
//! use jpk_vat::jpk::*;
//! use rust_decimal_macros::dec;
//!
//! let repo = InMemoryInvoiceRepository::new(vec![
//!     InvoiceBuilder::new(1, "FV/2021/03/001", NaiveDate::from_ymd_opt(2021, 3, 15).unwrap())
//!         .order(OrderBuilder::new("Jan Kowalski").product(dec!(100), "23").build())
//!         .build(),
//! ]);
//! let config = JpkConfigBuilder::new("123-456-78-90", "Sklep Sp. z o.o.")
//!     .email("jpk@sklep.pl")
//!     .system_name("Sklep")
//!     .build();
//!
//! let xml = JpkVatGenerator::new(repo, config)
//!     .generate(NaiveDate::from_ymd_opt(2021, 3, 1).unwrap())
//!     .unwrap();
//! assert!(xml.contains("<tns:K_20>23,00</tns:K_20>"));
//! ```

pub mod control;
mod encoder;
mod fields;
pub mod header;
pub mod sales;
pub mod subject;

pub use control::{SalesControl, prepare_control};
pub use encoder::{DocumentSerializer, EncoderOptions, XmlEncoder};
pub use fields::{ATTRIBUTE_PREFIX, FieldMap, FieldValue, TEXT_KEY};
pub use header::prepare_header;
pub use sales::{SalesRow, TaxBuckets, prepare_row, prepare_sales};
pub use subject::{normalize_nip, prepare_subject};

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::{
    Clock, Invoice, InvoiceRepository, JpkError, ReportingPeriod, SystemClock,
};

/// Namespace of the shared e-Deklaracje type definitions (`etd` prefix).
pub const NS_ETD: &str = "http://crd.gov.pl/xml/schematy/dziedzinowe/mf/2016/01/25/eD/DefinicjeTypy/";
/// Namespace of the JPK_VAT (3) schema (`tns` prefix).
pub const NS_TNS: &str = "http://jpk.mf.gov.pl/wzor/2017/11/13/1113/";

/// Root element name the serializer is asked to produce before patching.
pub const PLACEHOLDER_ROOT: &str = "JPK";
/// Opening root tag required by the schema.
pub const ROOT_OPEN_TAG: &str = "<tns:JPK xmlns:etd=\"http://crd.gov.pl/xml/schematy/dziedzinowe/mf/2016/01/25/eD/DefinicjeTypy/\" xmlns:tns=\"http://jpk.mf.gov.pl/wzor/2017/11/13/1113/\">";
/// Closing root tag required by the schema.
pub const ROOT_CLOSE_TAG: &str = "</tns:JPK>";

pub const FORM_CODE: &str = "JPK_VAT";
pub const SYSTEM_CODE: &str = "JPK_VAT (3)";
pub const SCHEMA_VERSION: &str = "1-1";
pub const FORM_VARIANT: &str = "3";
/// CelZlozenia: 0 for a first submission.
pub const SUBMISSION_PURPOSE: &str = "0";
/// NrKontrahenta placeholder for buyers without a NIP.
pub const COUNTERPARTY_NONE: &str = "brak";

/// Filer configuration for JPK_VAT export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JpkConfig {
    /// NazwaSystemu — name of the generating system.
    pub system_name: String,
    /// Contact email of the filer.
    pub email: String,
    /// PelnaNazwa — full legal name of the seller.
    pub seller_name: String,
    /// Seller NIP. Whitespace is stripped on output.
    pub seller_nip: String,
}

/// Builder for [`JpkConfig`].
///
/// ```
/// use jpk_vat::jpk::JpkConfigBuilder;
///
/// let config = JpkConfigBuilder::new("525 000 12 34", "Firma Sp. z o.o.")
///     .email("biuro@firma.pl")
///     .system_name("Firma ERP")
///     .build();
/// assert_eq!(config.seller_name, "Firma Sp. z o.o.");
/// ```
pub struct JpkConfigBuilder {
    config: JpkConfig,
}

impl JpkConfigBuilder {
    /// Create a new builder with the seller NIP and legal name.
    pub fn new(seller_nip: impl Into<String>, seller_name: impl Into<String>) -> Self {
        Self {
            config: JpkConfig {
                seller_nip: seller_nip.into(),
                seller_name: seller_name.into(),
                ..Default::default()
            },
        }
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.config.email = email.into();
        self
    }

    pub fn system_name(mut self, name: impl Into<String>) -> Self {
        self.config.system_name = name.into();
        self
    }

    pub fn build(self) -> JpkConfig {
        self.config
    }
}

/// Generates JPK_VAT documents from a repository of invoices.
pub struct JpkVatGenerator<R, C = SystemClock, S = XmlEncoder> {
    repository: R,
    clock: C,
    serializer: S,
    config: JpkConfig,
}

impl<R: InvoiceRepository> JpkVatGenerator<R> {
    /// Generator using the system clock and the built-in XML encoder.
    pub fn new(repository: R, config: JpkConfig) -> Self {
        Self {
            repository,
            clock: SystemClock,
            serializer: XmlEncoder,
            config,
        }
    }
}

impl<R, C, S> JpkVatGenerator<R, C, S> {
    /// Replace the clock used for the generation timestamp.
    pub fn with_clock<C2: Clock>(self, clock: C2) -> JpkVatGenerator<R, C2, S> {
        JpkVatGenerator {
            repository: self.repository,
            clock,
            serializer: self.serializer,
            config: self.config,
        }
    }

    /// Replace the document serializer.
    pub fn with_serializer<S2: DocumentSerializer>(self, serializer: S2) -> JpkVatGenerator<R, C, S2> {
        JpkVatGenerator {
            repository: self.repository,
            clock: self.clock,
            serializer,
            config: self.config,
        }
    }

    pub fn config(&self) -> &JpkConfig {
        &self.config
    }
}

impl<R, C, S> JpkVatGenerator<R, C, S>
where
    R: InvoiceRepository,
    C: Clock,
    S: DocumentSerializer,
{
    /// Generate the JPK_VAT document for the month containing `reference`.
    pub fn generate(&self, reference: NaiveDate) -> Result<String, JpkError> {
        let period = ReportingPeriod::containing(reference)?;
        let generated_at = self.clock.now();
        tracing::debug!(%period, "generating JPK_VAT");

        let invoices = self
            .repository
            .find_all_by_date_range(reference)
            .map_err(JpkError::Repository)?;

        let xml = render(&self.serializer, &invoices, &period, &generated_at, &self.config)?;
        tracing::debug!(%period, rows = invoices.len(), bytes = xml.len(), "JPK_VAT generated");
        Ok(xml)
    }

    /// Like [`generate`](Self::generate), with the reference date given as `YYYY-MM-DD`.
    pub fn generate_for_str(&self, reference: &str) -> Result<String, JpkError> {
        let period = ReportingPeriod::parse(reference)?;
        self.generate(period.start())
    }
}

/// Generate a JPK_VAT document from already fetched invoices with the built-in encoder.
pub fn to_jpk_vat(
    invoices: &[Invoice],
    period: &ReportingPeriod,
    generated_at: &DateTime<FixedOffset>,
    config: &JpkConfig,
) -> Result<String, JpkError> {
    render(&XmlEncoder, invoices, period, generated_at, config)
}

/// Assemble the ordered field mapping of the whole document (without the root element).
pub fn build_document(
    invoices: &[Invoice],
    period: &ReportingPeriod,
    generated_at: &DateTime<FixedOffset>,
    config: &JpkConfig,
) -> FieldMap {
    let rows = prepare_sales(invoices);
    let control = prepare_control(&rows);
    let row_fields: Vec<FieldMap> = rows.iter().map(SalesRow::to_fields).collect();

    FieldMap::new()
        .with(
            "tns:Naglowek",
            prepare_header(period, generated_at, &config.system_name),
        )
        .with("tns:Podmiot1", prepare_subject(config))
        .with("tns:SprzedazWiersz", row_fields)
        .with("tns:SprzedazCtrl", control.to_fields())
}

fn render<S: DocumentSerializer>(
    serializer: &S,
    invoices: &[Invoice],
    period: &ReportingPeriod,
    generated_at: &DateTime<FixedOffset>,
    config: &JpkConfig,
) -> Result<String, JpkError> {
    let document = build_document(invoices, period, generated_at, config);
    let options = EncoderOptions::default();
    let xml = serializer.serialize(&document, &options)?;
    patch_root_tag(&xml, &options.root_node_name)
}

/// Swap the placeholder root element for the namespaced `tns:JPK` root.
///
/// The serialized text must contain exactly one `<{placeholder}>` and one
/// `</{placeholder}>`.
pub fn patch_root_tag(xml: &str, placeholder: &str) -> Result<String, JpkError> {
    let open = format!("<{placeholder}>");
    let close = format!("</{placeholder}>");

    let opens = xml.matches(&open).count();
    let closes = xml.matches(&close).count();
    if opens != 1 || closes != 1 {
        return Err(JpkError::RootTag(format!(
            "expected one {open} and one {close}, found {opens} and {closes}"
        )));
    }

    Ok(xml
        .replacen(&open, ROOT_OPEN_TAG, 1)
        .replacen(&close, ROOT_CLOSE_TAG, 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_open_tag_carries_both_namespaces() {
        assert!(ROOT_OPEN_TAG.contains(&format!("xmlns:etd=\"{NS_ETD}\"")));
        assert!(ROOT_OPEN_TAG.contains(&format!("xmlns:tns=\"{NS_TNS}\"")));
    }

    #[test]
    fn patch_replaces_placeholder() {
        let xml = "<?xml version=\"1.0\"?>\n<JPK>\n  <a>1</a>\n</JPK>";
        let patched = patch_root_tag(xml, "JPK").unwrap();
        assert_eq!(
            patched,
            format!("<?xml version=\"1.0\"?>\n{ROOT_OPEN_TAG}\n  <a>1</a>\n{ROOT_CLOSE_TAG}")
        );
    }

    #[test]
    fn patch_rejects_missing_or_repeated_root() {
        assert!(matches!(
            patch_root_tag("<Other></Other>", "JPK"),
            Err(JpkError::RootTag(_))
        ));
        assert!(matches!(
            patch_root_tag("<JPK><JPK></JPK></JPK>", "JPK"),
            Err(JpkError::RootTag(_))
        ));
        assert!(matches!(patch_root_tag("<JPK/>", "JPK"), Err(JpkError::RootTag(_))));
    }

    #[test]
    fn config_builder() {
        let c = JpkConfigBuilder::new("1", "A").email("e").system_name("s").build();
        assert_eq!(
            c,
            JpkConfig {
                system_name: "s".into(),
                email: "e".into(),
                seller_name: "A".into(),
                seller_nip: "1".into(),
            }
        );
    }
}
