//! Fuzz target for expiry date parsing.
//!
//! Tests that expiry parsing never panics on arbitrary input.

#![no_main]

use cc_form::expiry::{self, YearMonth};
use cc_form::validate::expiry_status;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let today = YearMonth::new(2025, 1).unwrap();

    // These should never panic
    let _ = expiry::validate_expiry(data, today, Some(20));
    let _ = expiry::validate_expiry(data, today, None);
    let _ = expiry_status(data, today, Some(20));

    // If parsing succeeds, test other methods
    if let Ok(exp) = expiry::parse_expiry(data) {
        let _ = exp.is_expired_at(today);
        let _ = exp.is_too_far_future_at(today, 20);
        let _ = exp.months_until(today);
        let _ = exp.format_long();
        assert_eq!(expiry::parse_expiry(&exp.format_short()), Ok(exp));
    }
});
