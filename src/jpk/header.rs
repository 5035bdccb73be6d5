//! Report header (Naglowek).

use chrono::{DateTime, FixedOffset};

use super::fields::FieldMap;
use crate::core::ReportingPeriod;

/// Build the `tns:Naglowek` block.
pub fn prepare_header(
    period: &ReportingPeriod,
    generated_at: &DateTime<FixedOffset>,
    system_name: &str,
) -> FieldMap {
    let form_code = FieldMap::new()
        .with("@kodSystemowy", super::SYSTEM_CODE)
        .with("@wersjaSchemy", super::SCHEMA_VERSION)
        .with("#", super::FORM_CODE);

    FieldMap::new()
        .with("tns:KodFormularza", form_code)
        .with("tns:WariantFormularza", super::FORM_VARIANT)
        .with("tns:CelZlozenia", super::SUBMISSION_PURPOSE)
        .with("tns:DataWytworzeniaJPK", format_timestamp(generated_at))
        .with("tns:DataOd", period.start().format("%Y-%m-%d").to_string())
        .with("tns:DataDo", period.end().format("%Y-%m-%d").to_string())
        .with("tns:NazwaSystemu", system_name)
}

/// ISO 8601 timestamp with a numeric offset, e.g. `2021-04-02T10:15:00+02:00`.
pub fn format_timestamp(ts: &DateTime<FixedOffset>) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
}
