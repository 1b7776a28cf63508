//! A simulated checkout session.
//!
//! Types a card into the form key by key, following focus suggestions the
//! way a view layer would, and prints each notification.
//!
//! Run with: `RUST_LOG=cc_form=debug cargo run --example form_session`

use cc_form::mask::mask_value;
use cc_form::stream::{typing, DispatchExt};
use cc_form::{
    CardForm, FieldKind, FieldView, FieldViewport, FocusCoordinator, FormConfig, FormObserver,
    FormSnapshot,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Prints notifications as they arrive.
struct Printer;

impl FormObserver for Printer {
    fn on_change(&mut self, snapshot: &FormSnapshot) {
        let row: Vec<String> = snapshot
            .fields
            .iter()
            .filter(|view| !view.display_value.is_empty())
            .map(|view| format!("{}={:?}", view.field, view.status))
            .collect();
        println!(
            "  [{}] brand={} valid={}",
            row.join(" "),
            snapshot.detected_brand.name(),
            snapshot.form_valid
        );
    }

    fn on_become_empty(&mut self, field: FieldKind) {
        println!("  -> {} is incomplete again", field);
    }

    fn on_become_valid(&mut self, field: FieldKind) {
        println!("  -> {} is valid", field);
    }

    fn on_focus(&mut self, field: FieldKind) {
        println!("  -> focused {}", field);
    }

    fn on_suggest_focus(&mut self, field: FieldKind) {
        println!("  -> suggest moving to {}", field);
    }
}

/// A screen with nothing to scroll.
struct Terminal;

impl FieldViewport for Terminal {
    fn bring_field_into_view(&mut self, _field: FieldKind) {}

    fn focus(&mut self, field: FieldKind) {
        println!("\n[{}]", field.as_str());
    }
}

/// One row of the result table. Card number and CVC are masked.
fn result_line(view: &FieldView) -> String {
    let shown = mask_value(view.field, &view.display_value);
    format!("  {:<12} {:<20} {:?}", view.label, shown, view.status)
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Card Form Session ===");

    let config = FormConfig::builder()
        .requires_postal_code(true)
        .build()
        .expect("default brand table is valid");
    let mut form = CardForm::new(config).with_observer(Printer);
    let mut screen = Terminal;
    let coordinator = FocusCoordinator::new();

    coordinator.mount(&mut form, &mut screen);

    // A typo in the last digit, then a correction.
    typing(FieldKind::Number, "378282246310006").replay(&mut form);
    form.on_field_change(FieldKind::Number, "37828224631000");
    form.on_field_change(FieldKind::Number, "378282246310005");
    coordinator.advance(&mut form, &mut screen);

    typing(FieldKind::Expiry, "0430").replay(&mut form);
    coordinator.advance(&mut form, &mut screen);

    typing(FieldKind::Cvc, "7373").replay(&mut form);
    coordinator.advance(&mut form, &mut screen);

    let snapshot = typing(FieldKind::PostalCode, "10001").replay(&mut form);

    println!("\n=== Result ===");
    for view in snapshot.fields.iter() {
        println!("{}", result_line(view));
    }
    println!("  Form valid: {}", snapshot.form_valid);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_lines_hide_card_data() {
        let mut form = CardForm::new(FormConfig::default());
        form.on_field_change(FieldKind::Number, "378282246310005");
        let snapshot = form.on_field_change(FieldKind::Cvc, "7373");

        let number = result_line(snapshot.field(FieldKind::Number));
        assert!(number.contains("0005"));
        assert!(!number.contains("3782"));

        let cvc = result_line(snapshot.field(FieldKind::Cvc));
        assert!(cvc.contains("****"));
        assert!(!cvc.contains("7373"));
    }
}
