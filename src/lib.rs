//! # cc_form
//!
//! Payment card entry form engine: formats each field as the user types,
//! detects the card brand, validates every field and the form as a whole,
//! and suggests where focus should go next.
//!
//! The crate has no view of its own. A view layer feeds raw text into a
//! [`CardForm`] and renders the [`FormSnapshot`] it gets back.
//!
//! ## Features
//!
//! - As-you-type formatting for number, expiry, CVC, postal code and name
//! - Card brand detection from a data-driven brand table (14 brands)
//! - Per-field `Incomplete` / `Valid` / `Invalid` status and form validity
//! - Lifecycle notifications and focus auto-advance
//! - Card data masked in `Debug` and logs, zeroized on drop
//!
//! ## Quick Start
//!
//! ```rust
//! use cc_form::expiry::{FixedClock, YearMonth};
//! use cc_form::{CardBrand, CardForm, FieldKind, FieldStatus, FormConfig};
//!
//! let clock = FixedClock(YearMonth::new(2025, 1).unwrap());
//! let mut form = CardForm::new(FormConfig::default()).with_clock(clock);
//!
//! let snapshot = form.on_field_change(FieldKind::Number, "378282246310005");
//! assert_eq!(snapshot.value(FieldKind::Number), "3782 822463 10005");
//! assert_eq!(snapshot.detected_brand, CardBrand::Amex);
//!
//! form.on_field_change(FieldKind::Expiry, "0"); // "0"
//! form.on_field_change(FieldKind::Expiry, "04"); // "04"
//! form.on_field_change(FieldKind::Expiry, "042"); // "04/2"
//! let snapshot = form.on_field_change(FieldKind::Expiry, "04/28");
//! assert_eq!(snapshot.status(FieldKind::Expiry), FieldStatus::Valid);
//!
//! // Amex CVCs have four digits.
//! let snapshot = form.on_field_change(FieldKind::Cvc, "123");
//! assert_eq!(snapshot.status(FieldKind::Cvc), FieldStatus::Incomplete);
//! let snapshot = form.on_field_change(FieldKind::Cvc, "1234");
//! assert!(snapshot.form_valid);
//! ```
//!
//! ## Observing Changes
//!
//! ```rust
//! use cc_form::{CardForm, FieldKind, FormConfig, FormObserver};
//!
//! #[derive(Default)]
//! struct Log(Vec<String>);
//!
//! impl FormObserver for Log {
//!     fn on_become_valid(&mut self, field: FieldKind) {
//!         self.0.push(format!("{} valid", field));
//!     }
//!     fn on_suggest_focus(&mut self, field: FieldKind) {
//!         self.0.push(format!("go to {}", field));
//!     }
//! }
//!
//! let mut form = CardForm::new(FormConfig::default()).with_observer(Log::default());
//! form.on_field_change(FieldKind::Number, "4242424242424242");
//! assert_eq!(form.observer().0, ["number valid", "go to expiry"]);
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use cc_form::{FieldKind, FormConfig, PostalAlphabet};
//!
//! let config = FormConfig::builder()
//!     .requires_name(true)
//!     .requires_postal_code(true)
//!     .postal_code_alphabet(PostalAlphabet::Numeric)
//!     .postal_code_max_length(5)
//!     .build()
//!     .unwrap();
//! assert_eq!(
//!     config.required_fields().collect::<Vec<_>>(),
//!     [FieldKind::Name, FieldKind::Number, FieldKind::Expiry, FieldKind::Cvc, FieldKind::PostalCode]
//! );
//! ```
//!
//! ## Supported Card Brands
//!
//! | Brand | Prefix | Length | CVC |
//! |-------|--------|--------|-----|
//! | Visa | 4 | 13, 16, 19 | 3 |
//! | Mastercard | 51-55, 2221-2720 | 16 | 3 |
//! | American Express | 34, 37 | 15 | 4 |
//! | Discover | 6011, 644-649, 65 | 16-19 | 3 |
//! | Diners Club | 300-305, 309, 36, 38 | 14-19 | 3 |
//! | JCB | 3528-3589 | 16-19 | 3 |
//! | UnionPay | 62 | 16-19 | 3 |
//! | Maestro | 50, 56-58, 60-61, 63, 66-69 | 12-19 | 3 |
//! | Mir | 2200-2204 | 16-19 | 3 |
//! | RuPay | 81, 82 | 16 | 3 |
//! | Verve | 506, 507 | 16-19 | 3 |
//! | Elo | 509, 6362-6363 | 16 | 3 |
//! | Troy | 9792 | 16 | 3 |
//! | BC Card | 94 | 16 | 3 |
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | Serde support for configuration, brand tables, events and snapshots |
//! | `json` | `FormSnapshot::to_json` |
//! | `brand-json` | Load brand tables from JSON |
//! | `generate` | Random test card generation |
//! | `wasm` | WebAssembly bindings |
//!
//! ## Security
//!
//! - Raw and formatted values are zeroized when replaced or dropped
//! - `Debug` output masks card numbers and CVCs
//! - Log events carry masked values only
//! - No unsafe code (`#![deny(unsafe_code)]`)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod brand;
pub mod card;
pub mod config;
pub mod cvc;
pub mod detect;
pub mod error;
pub mod expiry;
pub mod focus;
pub mod form;
pub mod format;
pub mod generate;
pub mod luhn;
pub mod mask;
pub mod snapshot;
pub mod stream;
pub mod validate;

#[cfg(feature = "wasm")]
mod wasm;

// Re-export main types at crate root
pub use brand::{BrandDescriptor, BrandTable, PrefixRange};
pub use card::{CardBrand, FieldKind, FieldStatus, UnknownName, MAX_CARD_DIGITS, MIN_CARD_DIGITS};
pub use config::{FieldText, FormConfig, FormConfigBuilder, PostalAlphabet, PostalCodeRule};
pub use error::{ConfigError, FormError};
pub use expiry::{Clock, FixedClock, SystemClock, YearMonth};
pub use focus::{FieldViewport, FocusCoordinator};
pub use form::{CardForm, FieldState, FormObserver};
pub use snapshot::{FieldView, FormSnapshot};
pub use stream::FieldEvent;

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> CardForm<(), FixedClock> {
        form_at(2025, 1)
    }

    fn form_at(year: u16, month: u8) -> CardForm<(), FixedClock> {
        CardForm::new(FormConfig::default())
            .with_clock(FixedClock(YearMonth::new(year, month).unwrap()))
    }

    #[test]
    fn test_valid_visa_number() {
        let snapshot = form().on_field_change(FieldKind::Number, "4242424242424242");
        assert_eq!(snapshot.value(FieldKind::Number), "4242 4242 4242 4242");
        assert_eq!(snapshot.detected_brand, CardBrand::Visa);
        assert_eq!(snapshot.status(FieldKind::Number), FieldStatus::Valid);
    }

    #[test]
    fn test_luhn_failure() {
        let snapshot = form().on_field_change(FieldKind::Number, "4242424242424241");
        assert_eq!(snapshot.status(FieldKind::Number), FieldStatus::Invalid);
    }

    #[test]
    fn test_invalid_month() {
        let snapshot = form().on_field_change(FieldKind::Expiry, "13/29");
        assert_eq!(snapshot.value(FieldKind::Expiry), "13/29");
        assert_eq!(snapshot.status(FieldKind::Expiry), FieldStatus::Invalid);
    }

    #[test]
    fn test_expired() {
        let snapshot = form().on_field_change(FieldKind::Expiry, "12/24");
        assert_eq!(snapshot.status(FieldKind::Expiry), FieldStatus::Invalid);

        let snapshot = form_at(2031, 1).on_field_change(FieldKind::Expiry, "1230");
        assert_eq!(snapshot.status(FieldKind::Expiry), FieldStatus::Invalid);

        let snapshot = form().on_field_change(FieldKind::Expiry, "1230");
        assert_eq!(snapshot.status(FieldKind::Expiry), FieldStatus::Valid);
    }

    #[test]
    fn test_cvc_length() {
        let mut form = form();
        form.on_field_change(FieldKind::Number, "4242");
        let snapshot = form.on_field_change(FieldKind::Cvc, "12");
        assert_eq!(snapshot.status(FieldKind::Cvc), FieldStatus::Incomplete);
        let snapshot = form.on_field_change(FieldKind::Cvc, "123");
        assert_eq!(snapshot.status(FieldKind::Cvc), FieldStatus::Valid);
    }

    #[test]
    fn test_form_valid_without_optional_fields() {
        let mut form = form();
        form.on_field_change(FieldKind::Number, "4242424242424242");
        form.on_field_change(FieldKind::Expiry, "12/29");
        let snapshot = form.on_field_change(FieldKind::Cvc, "123");
        assert_eq!(snapshot.status(FieldKind::Name), FieldStatus::Incomplete);
        assert_eq!(snapshot.status(FieldKind::PostalCode), FieldStatus::Incomplete);
        assert!(snapshot.form_valid);
        assert_eq!(snapshot.missing_fields().count(), 0);
    }

    #[test]
    fn test_snapshot_carries_text_and_requirements() {
        let snapshot = form().snapshot();
        let number = snapshot.field(FieldKind::Number);
        assert_eq!(number.label, "CARD NUMBER");
        assert_eq!(number.placeholder, "1234 5678 1234 5678");
        assert!(number.required);
        assert!(!snapshot.field(FieldKind::PostalCode).required);
        assert_eq!(
            snapshot.missing_fields().collect::<Vec<_>>(),
            [FieldKind::Number, FieldKind::Expiry, FieldKind::Cvc]
        );
    }

    #[test]
    fn test_snapshot_debug_is_safe() {
        let mut form = form();
        form.on_field_change(FieldKind::Number, "4111111111111111");
        let debug = format!("{:?}", form.snapshot());
        assert!(!debug.contains("4111 1111 1111 1111"));
        assert!(debug.contains("1111"));
    }

    #[test]
    fn test_thread_safety() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CardBrand>();
        assert_send_sync::<FieldKind>();
        assert_send_sync::<FieldStatus>();
        assert_send_sync::<FormConfig>();
        assert_send_sync::<FormSnapshot>();
        assert_send_sync::<FieldEvent>();
        assert_send_sync::<ConfigError>();
        assert_send_sync::<FormError>();
        assert_send_sync::<CardForm<(), FixedClock>>();
    }
}
