//! WebAssembly bindings for hosting the form in a JavaScript view layer.
//!
//! Field names are the wire names (`name`, `number`, `expiry`, `cvc`,
//! `postalCode`) and snapshots cross the boundary as JSON strings.
//!
//! # Usage from JavaScript
//!
//! ```javascript
//! import init, { WasmCardForm } from 'cc_form';
//!
//! await init();
//!
//! const form = new WasmCardForm(JSON.stringify({ requiresPostalCode: true }));
//! form.set_on_change((json) => render(JSON.parse(json)));
//! form.set_on_event((kind, field) => {
//!     if (kind === 'suggestFocus') focusInput(field);
//! });
//!
//! input.addEventListener('input', (e) => form.change('number', e.target.value));
//! ```
//!
//! Misuse never panics here: unknown field names come back as rejected
//! promises / thrown errors.

#![cfg(feature = "wasm")]

use crate::form::{CardForm, FormObserver};
use crate::stream::FieldEvent;
use crate::{CardBrand, FieldKind, FormConfig, FormSnapshot};
use wasm_bindgen::prelude::*;

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn parse_field(name: &str) -> Result<FieldKind, JsValue> {
    name.parse::<FieldKind>().map_err(js_error)
}

/// Forwards notifications to JavaScript callbacks.
#[derive(Default)]
struct JsObserver {
    on_change: Option<js_sys::Function>,
    on_event: Option<js_sys::Function>,
}

impl JsObserver {
    fn event(&self, kind: &str, field: FieldKind) {
        if let Some(callback) = &self.on_event {
            let _ = callback.call2(
                &JsValue::NULL,
                &JsValue::from_str(kind),
                &JsValue::from_str(field.as_str()),
            );
        }
    }
}

impl FormObserver for JsObserver {
    fn on_change(&mut self, snapshot: &FormSnapshot) {
        let Some(callback) = &self.on_change else {
            return;
        };
        if let Ok(json) = snapshot.to_json() {
            let _ = callback.call1(&JsValue::NULL, &JsValue::from_str(&json));
        }
    }

    fn on_become_empty(&mut self, field: FieldKind) {
        self.event("becomeEmpty", field);
    }

    fn on_become_valid(&mut self, field: FieldKind) {
        self.event("becomeValid", field);
    }

    fn on_focus(&mut self, field: FieldKind) {
        self.event("focus", field);
    }

    fn on_suggest_focus(&mut self, field: FieldKind) {
        self.event("suggestFocus", field);
    }
}

/// A card form driven from JavaScript.
#[wasm_bindgen]
pub struct WasmCardForm {
    inner: CardForm<JsObserver>,
}

#[wasm_bindgen]
impl WasmCardForm {
    /// Creates a form from an optional JSON configuration.
    ///
    /// Missing keys take their defaults; the function postal code rule is
    /// not available from JavaScript.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<WasmCardForm, JsValue> {
        let mut config = match config_json {
            Some(json) => serde_json::from_str::<FormConfig>(&json).map_err(js_error)?,
            None => FormConfig::default(),
        };
        config.strict = false;
        let inner = CardForm::try_new(config)
            .map_err(js_error)?
            .with_observer(JsObserver::default());
        Ok(WasmCardForm { inner })
    }

    /// Registers `callback(snapshotJson)`, called after every change.
    pub fn set_on_change(&mut self, callback: js_sys::Function) {
        self.inner.observer_mut().on_change = Some(callback);
    }

    /// Registers `callback(kind, field)` for `becomeEmpty`, `becomeValid`,
    /// `focus` and `suggestFocus` notifications.
    pub fn set_on_event(&mut self, callback: js_sys::Function) {
        self.inner.observer_mut().on_event = Some(callback);
    }

    /// Handles new text in `field`, returning the snapshot as JSON.
    pub fn change(&mut self, field: &str, text: &str) -> Result<String, JsValue> {
        let snapshot = self
            .inner
            .on_named_field_change(field, text)
            .map_err(js_error)?;
        snapshot.to_json().map_err(js_error)
    }

    /// Records that `field` received focus.
    pub fn focus(&mut self, field: &str) -> Result<(), JsValue> {
        self.inner.on_named_field_focus(field).map_err(js_error)
    }

    /// Applies a JSON event such as `{"type":"changed","field":"cvc","text":"12"}`.
    pub fn dispatch(&mut self, event_json: &str) -> Result<String, JsValue> {
        let event: FieldEvent = serde_json::from_str(event_json).map_err(js_error)?;
        self.inner.dispatch(event).to_json().map_err(js_error)
    }

    /// The current snapshot as JSON.
    pub fn snapshot(&self) -> Result<String, JsValue> {
        self.inner.snapshot().to_json().map_err(js_error)
    }

    /// True when every required field is valid.
    pub fn is_valid(&self) -> bool {
        self.inner.compute_form_validity()
    }

    /// The detected brand id, e.g. `"visa"`.
    pub fn detected_brand(&self) -> String {
        self.inner.detected_brand().id().to_string()
    }

    /// The field focus should move to next, if any.
    pub fn suggested_next_field(&self) -> Option<String> {
        self.inner
            .suggested_next_field()
            .map(|field| field.as_str().to_string())
    }

    /// The field to focus when the form is first shown.
    pub fn first_field(&self) -> String {
        self.inner.first_field().as_str().to_string()
    }
}

/// Detects the brand id of a (partial) card number.
///
/// ```javascript
/// detect_brand("4111");  // "visa"
/// ```
#[wasm_bindgen]
pub fn detect_brand(number: &str) -> String {
    let table = crate::brand::BrandTable::default();
    crate::detect::detect_brand_str(&table, number)
        .id()
        .to_string()
}

/// Formats `raw` for `field` with the default configuration.
///
/// ```javascript
/// format_field("number", "378282246310005", "amex");  // "3782 822463 10005"
/// ```
#[wasm_bindgen]
pub fn format_field(field: &str, raw: &str, brand: &str) -> Result<String, JsValue> {
    let field = parse_field(field)?;
    let brand = brand.parse::<CardBrand>().map_err(js_error)?;
    Ok(crate::format::format(field, raw, brand, &FormConfig::default()))
}

/// Generates a valid test card number for the brand id.
#[wasm_bindgen]
pub fn generate_test_card(brand: &str) -> Result<String, JsValue> {
    let brand = brand.parse::<CardBrand>().map_err(js_error)?;
    crate::generate::generate_number(&crate::brand::BrandTable::default(), brand)
        .ok_or_else(|| JsValue::from_str(&format!("no test number for {}", brand.id())))
}
