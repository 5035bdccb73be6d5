use thiserror::Error;

/// Error type returned by [`InvoiceRepository`](super::InvoiceRepository) implementations.
///
/// Repository failures are passed through to the caller untouched, so any
/// error type the backing store produces can be boxed into this.
pub type RepositoryError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while generating a JPK_VAT report.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum JpkError {
    /// The reference date could not be parsed or has no representable month.
    #[error("invalid reference date: {0}")]
    InvalidDate(String),

    /// The invoice lookup failed.
    #[error("invoice lookup failed: {0}")]
    Repository(#[source] RepositoryError),

    /// XML generation error.
    #[error("XML error: {0}")]
    Xml(String),

    /// The serializer output did not contain the expected placeholder root element.
    #[error("root tag error: {0}")]
    RootTag(String),
}

impl From<RepositoryError> for JpkError {
    fn from(e: RepositoryError) -> Self {
        JpkError::Repository(e)
    }
}
