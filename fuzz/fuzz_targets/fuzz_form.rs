//! Fuzz target for the form pipeline.
//!
//! Feeds arbitrary edits and focus changes to a form and checks that it never
//! panics and that its snapshot stays consistent.

#![no_main]

use arbitrary::Arbitrary;
use cc_form::expiry::{FixedClock, YearMonth};
use cc_form::{format, CardForm, FieldKind, FieldStatus, FormConfig};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Action {
    Change(u8, String),
    Focus(u8),
    Named(String, String),
}

fn field(index: u8) -> FieldKind {
    FieldKind::ALL[index as usize % FieldKind::ALL.len()]
}

fuzz_target!(|actions: Vec<Action>| {
    let config = FormConfig::builder().strict(false).build().unwrap();
    let clock = FixedClock(YearMonth::new(2025, 1).unwrap());
    let mut form = CardForm::new(config).with_clock(clock);

    for action in actions {
        match action {
            Action::Change(index, text) => {
                let field = field(index);
                let snapshot = form.on_field_change(field, &text);
                let expected = format::format(field, &text, snapshot.detected_brand, form.config());
                assert_eq!(snapshot.value(field), expected);
            }
            Action::Focus(index) => form.on_field_focus(field(index)),
            Action::Named(name, text) => {
                let _ = form.on_named_field_change(&name, &text);
            }
        }

        let snapshot = form.snapshot();
        let all_required_valid = form
            .config()
            .required_fields()
            .all(|f| snapshot.status(f) == FieldStatus::Valid);
        assert_eq!(snapshot.form_valid, all_required_valid);
    }
});
