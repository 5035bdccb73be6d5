#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Any amount that parses must survive a format/parse round-trip.
        if let Some(amount) = jpk_vat::core::parse_amount(s) {
            let formatted = jpk_vat::core::format_amount(amount);
            assert_eq!(
                jpk_vat::core::parse_amount(&formatted),
                Some(jpk_vat::core::round_amount(amount))
            );
        }
    }
});
