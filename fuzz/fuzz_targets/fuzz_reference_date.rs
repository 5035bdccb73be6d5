#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Must not panic — errors are fine, panics are bugs.
        if let Ok(period) = jpk_vat::core::ReportingPeriod::parse(s) {
            assert!(period.start() <= period.end());
        }
    }
});
