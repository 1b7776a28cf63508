//! Fuzz target for field formatting.
//!
//! Tests that formatting never panics and that formatting twice changes nothing.

#![no_main]

use cc_form::{detect, format, FieldKind, FormConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let config = FormConfig::default();
    let brand = detect::detect_brand_str(&config.brands, data);

    for field in FieldKind::ALL {
        let once = format::format(field, data, brand, &config);
        let twice = format::format(field, &once, brand, &config);
        assert_eq!(once, twice, "formatting should be idempotent for {}", field);
    }

    // Number formatting keeps a prefix of the input digits
    let formatted = format::format_number(data, brand, &config.brands);
    let kept = format::strip_formatting(&formatted);
    assert!(format::strip_formatting(data).starts_with(&kept));
});
