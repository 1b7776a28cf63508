//! Fuzz target for CVC validation.
//!
//! Tests that CVC validation never panics and respects brand lengths.

#![no_main]

use cc_form::brand::BrandTable;
use cc_form::{cvc, CardBrand};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let table = BrandTable::default();

    for brand in CardBrand::ALL {
        if let Ok(valid) = cvc::validate_cvc(data, brand, &table) {
            assert_eq!(valid.digits().len(), table.cvc_length(brand));
        }
    }

    let _ = cvc::validate_cvc_length(data, 3);
    let _ = cvc::validate_cvc_length(data, 4);
});
