//! Filer identity (Podmiot1).

use super::JpkConfig;
use super::fields::FieldMap;

/// Build the `tns:Podmiot1` block from the configured seller identity.
pub fn prepare_subject(config: &JpkConfig) -> FieldMap {
    FieldMap::new()
        .with("tns:NIP", normalize_nip(&config.seller_nip))
        .with("tns:PelnaNazwa", config.seller_name.as_str())
        .with("tns:Email", config.email.as_str())
}

/// Strip all whitespace from a NIP. Dashes and other punctuation are kept.
pub fn normalize_nip(nip: &str) -> String {
    nip.chars().filter(|c| !c.is_whitespace()).collect()
}
