//! The form state controller.
//!
//! [`CardForm`] owns the five fields and is their only mutator. Every change
//! runs the same pipeline: format the raw text, detect the brand (card number
//! only), validate, then notify the [`FormObserver`] about status transitions
//! and hand out a fresh [`FormSnapshot`].
//!
//! # Example
//!
//! ```
//! use cc_form::expiry::{FixedClock, YearMonth};
//! use cc_form::{CardBrand, CardForm, FieldKind, FieldStatus, FormConfig};
//!
//! let clock = FixedClock(YearMonth::new(2025, 1).unwrap());
//! let mut form = CardForm::new(FormConfig::default()).with_clock(clock);
//!
//! let snapshot = form.on_field_change(FieldKind::Number, "4242424242424242");
//! assert_eq!(snapshot.value(FieldKind::Number), "4242 4242 4242 4242");
//! assert_eq!(snapshot.detected_brand, CardBrand::Visa);
//! assert_eq!(snapshot.status(FieldKind::Number), FieldStatus::Valid);
//! assert_eq!(snapshot.suggested_next_field, Some(FieldKind::Expiry));
//!
//! form.on_field_change(FieldKind::Expiry, "1229");
//! let snapshot = form.on_field_change(FieldKind::Cvc, "123");
//! assert!(snapshot.form_valid);
//! ```

use crate::config::FormConfig;
use crate::detect::detect_brand_str;
use crate::error::{ConfigError, FormError};
use crate::expiry::{Clock, SystemClock};
use crate::format::format;
use crate::mask::mask_value;
use crate::snapshot::{FieldView, FormSnapshot};
use crate::stream::FieldEvent;
use crate::validate::{validate, ValidationContext};
use crate::{CardBrand, FieldKind, FieldStatus};
use std::fmt;
use tracing::{debug, warn};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// The state of one field.
///
/// The display value is always the formatted raw value; both are wiped from
/// memory when replaced or dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct FieldState {
    #[zeroize(skip)]
    field: FieldKind,
    raw: String,
    display: String,
    #[zeroize(skip)]
    status: FieldStatus,
}

impl FieldState {
    fn empty(field: FieldKind) -> Self {
        Self {
            field,
            raw: String::new(),
            display: String::new(),
            status: FieldStatus::Incomplete,
        }
    }

    /// The field this state belongs to.
    #[inline]
    pub fn field(&self) -> FieldKind {
        self.field
    }

    /// Text as last reported by the view.
    #[inline]
    pub fn raw_value(&self) -> &str {
        &self.raw
    }

    /// Formatted text to display.
    #[inline]
    pub fn display_value(&self) -> &str {
        &self.display
    }

    /// Current validation status.
    #[inline]
    pub fn status(&self) -> FieldStatus {
        self.status
    }

    /// Returns true if nothing has been entered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.display.is_empty()
    }

    fn replace(&mut self, raw: String, display: String, status: FieldStatus) {
        self.raw.zeroize();
        self.display.zeroize();
        self.raw = raw;
        self.display = display;
        self.status = status;
    }

    fn take_raw(&mut self) -> String {
        std::mem::take(&mut self.raw)
    }
}

impl fmt::Debug for FieldState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldState")
            .field("field", &self.field)
            .field("raw", &mask_value(self.field, &self.raw))
            .field("display", &mask_value(self.field, &self.display))
            .field("status", &self.status)
            .finish()
    }
}

/// Receives form lifecycle notifications.
///
/// All methods default to doing nothing, so implementors pick what they need.
/// Notifications for one event arrive in field display order, followed by a
/// single [`on_change`](Self::on_change).
pub trait FormObserver {
    /// Called once after every change, with the resulting snapshot.
    fn on_change(&mut self, _snapshot: &FormSnapshot) {}

    /// A field went from valid or invalid back to incomplete.
    fn on_become_empty(&mut self, _field: FieldKind) {}

    /// A field became valid.
    fn on_become_valid(&mut self, _field: FieldKind) {}

    /// A field received focus.
    fn on_focus(&mut self, _field: FieldKind) {}

    /// Focus should move to `field`.
    fn on_suggest_focus(&mut self, _field: FieldKind) {}
}

impl FormObserver for () {}

impl<O: FormObserver + ?Sized> FormObserver for &mut O {
    fn on_change(&mut self, snapshot: &FormSnapshot) {
        (**self).on_change(snapshot)
    }

    fn on_become_empty(&mut self, field: FieldKind) {
        (**self).on_become_empty(field)
    }

    fn on_become_valid(&mut self, field: FieldKind) {
        (**self).on_become_valid(field)
    }

    fn on_focus(&mut self, field: FieldKind) {
        (**self).on_focus(field)
    }

    fn on_suggest_focus(&mut self, field: FieldKind) {
        (**self).on_suggest_focus(field)
    }
}

impl<O: FormObserver + ?Sized> FormObserver for Box<O> {
    fn on_change(&mut self, snapshot: &FormSnapshot) {
        (**self).on_change(snapshot)
    }

    fn on_become_empty(&mut self, field: FieldKind) {
        (**self).on_become_empty(field)
    }

    fn on_become_valid(&mut self, field: FieldKind) {
        (**self).on_become_valid(field)
    }

    fn on_focus(&mut self, field: FieldKind) {
        (**self).on_focus(field)
    }

    fn on_suggest_focus(&mut self, field: FieldKind) {
        (**self).on_suggest_focus(field)
    }
}

/// A pending request to move focus, raised when `from` became valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Suggestion {
    from: FieldKind,
    to: FieldKind,
}

/// The card entry form.
///
/// `O` receives notifications; `C` supplies the current month for expiry
/// checks. Both default to no-ops suitable for simple use.
pub struct CardForm<O: FormObserver = (), C: Clock = SystemClock> {
    config: FormConfig,
    fields: [FieldState; 5],
    brand: CardBrand,
    focused: Option<FieldKind>,
    suggestion: Option<Suggestion>,
    observer: O,
    clock: C,
}

impl CardForm {
    /// Creates an empty form.
    pub fn new(config: FormConfig) -> Self {
        Self {
            config,
            fields: FieldKind::ALL.map(FieldState::empty),
            brand: CardBrand::Unknown,
            focused: None,
            suggestion: None,
            observer: (),
            clock: SystemClock,
        }
    }

    /// Creates an empty form after checking the configuration.
    pub fn try_new(config: FormConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }
}

impl Default for CardForm {
    fn default() -> Self {
        Self::new(FormConfig::default())
    }
}

impl<O: FormObserver, C: Clock> CardForm<O, C> {
    /// Replaces the observer.
    pub fn with_observer<P: FormObserver>(self, observer: P) -> CardForm<P, C> {
        CardForm {
            config: self.config,
            fields: self.fields,
            brand: self.brand,
            focused: self.focused,
            suggestion: self.suggestion,
            observer,
            clock: self.clock,
        }
    }

    /// Replaces the clock.
    pub fn with_clock<D: Clock>(self, clock: D) -> CardForm<O, D> {
        CardForm {
            config: self.config,
            fields: self.fields,
            brand: self.brand,
            focused: self.focused,
            suggestion: self.suggestion,
            observer: self.observer,
            clock,
        }
    }

    /// The configuration the form was built with.
    #[inline]
    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    /// The observer.
    #[inline]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// The observer, mutably.
    #[inline]
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// The state of `field`.
    #[inline]
    pub fn field(&self, field: FieldKind) -> &FieldState {
        &self.fields[field.index()]
    }

    /// The brand detected from the current card number.
    #[inline]
    pub fn detected_brand(&self) -> CardBrand {
        self.brand
    }

    /// The field that last received focus.
    #[inline]
    pub fn focused(&self) -> Option<FieldKind> {
        self.focused
    }

    /// The field focus should move to next, if any.
    #[inline]
    pub fn suggested_next_field(&self) -> Option<FieldKind> {
        self.suggestion.map(|s| s.to)
    }

    /// The field whose completion raised the current suggestion.
    #[inline]
    pub fn suggestion_source(&self) -> Option<FieldKind> {
        self.suggestion.map(|s| s.from)
    }

    /// Drops the pending focus suggestion.
    pub fn dismiss_suggestion(&mut self) {
        self.suggestion = None;
    }

    /// The field to focus when the form is first shown.
    pub fn first_field(&self) -> FieldKind {
        if self.config.requires_name {
            FieldKind::Name
        } else {
            FieldKind::Number
        }
    }

    /// Returns true when every required field is valid.
    pub fn compute_form_validity(&self) -> bool {
        self.config
            .required_fields()
            .all(|field| self.fields[field.index()].status.is_valid())
    }

    /// Takes a snapshot of the current state.
    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            fields: FieldKind::ALL.map(|field| {
                let state = &self.fields[field.index()];
                FieldView {
                    field,
                    display_value: state.display.clone(),
                    status: state.status,
                    label: self.config.labels.get(field).to_string(),
                    placeholder: self.config.placeholders.get(field).to_string(),
                    required: self.config.is_required(field),
                }
            }),
            detected_brand: self.brand,
            form_valid: self.compute_form_validity(),
            focused: self.focused,
            suggested_next_field: self.suggested_next_field(),
        }
    }

    /// Handles new text in `field`.
    ///
    /// Notifies the observer about every status transition the change
    /// caused, then calls `on_change` exactly once.
    pub fn on_field_change(&mut self, field: FieldKind, raw: &str) -> FormSnapshot {
        let before = self.statuses();
        self.update(field, raw.to_string());
        self.finish(before, &[field])
    }

    /// Handles new text in the field named `name` (`"number"`, `"postalCode"`, ...).
    ///
    /// # Panics
    ///
    /// Panics on an unknown name when the form is strict. Otherwise the
    /// change is ignored and [`FormError::UnknownField`] returned.
    pub fn on_named_field_change(
        &mut self,
        name: &str,
        raw: &str,
    ) -> Result<FormSnapshot, FormError> {
        let field = self.resolve(name)?;
        Ok(self.on_field_change(field, raw))
    }

    /// Records that `field` received focus.
    ///
    /// Validation is untouched. A pending suggestion to focus `field` is
    /// cleared.
    pub fn on_field_focus(&mut self, field: FieldKind) {
        self.focused = Some(field);
        if self.suggested_next_field() == Some(field) {
            self.suggestion = None;
        }
        self.observer.on_focus(field);
    }

    /// Focuses the field named `name`, with the same misuse handling as
    /// [`on_named_field_change`](Self::on_named_field_change).
    pub fn on_named_field_focus(&mut self, name: &str) -> Result<(), FormError> {
        let field = self.resolve(name)?;
        self.on_field_focus(field);
        Ok(())
    }

    /// Applies an event from the view layer and returns the new snapshot.
    pub fn dispatch(&mut self, event: FieldEvent) -> FormSnapshot {
        match event {
            FieldEvent::Changed { field, text } => {
                let before = self.statuses();
                self.update(field, text);
                self.finish(before, &[field])
            }
            FieldEvent::Focused { field } => {
                self.on_field_focus(field);
                self.snapshot()
            }
        }
    }

    /// Prefills several fields at once.
    ///
    /// Values are applied in display order whatever order they are given in;
    /// a later value for the same field wins. Observers see one `on_change`.
    pub fn set_values<I, S>(&mut self, values: I) -> FormSnapshot
    where
        I: IntoIterator<Item = (FieldKind, S)>,
        S: Into<String>,
    {
        let mut pending: [Option<String>; 5] = Default::default();
        for (field, value) in values {
            if let Some(mut old) = pending[field.index()].replace(value.into()) {
                old.zeroize();
            }
        }

        let before = self.statuses();
        let mut edited = Vec::with_capacity(pending.len());
        for field in FieldKind::ALL {
            if let Some(raw) = pending[field.index()].take() {
                self.update(field, raw);
                edited.push(field);
            }
        }
        self.finish(before, &edited)
    }

    fn resolve(&self, name: &str) -> Result<FieldKind, FormError> {
        match name.parse::<FieldKind>() {
            Ok(field) => Ok(field),
            Err(unknown) => {
                if self.config.strict {
                    panic!("card form has no field named {:?}", unknown.0);
                }
                warn!(field = %unknown.0.escape_default(), "ignoring event for unknown field");
                Err(FormError::UnknownField(unknown.0))
            }
        }
    }

    fn statuses(&self) -> [FieldStatus; 5] {
        FieldKind::ALL.map(|field| self.fields[field.index()].status)
    }

    /// Stores `raw` in `field` and re-derives whatever depends on the brand.
    fn update(&mut self, field: FieldKind, raw: String) {
        if field == FieldKind::Number {
            let brand = detect_brand_str(&self.config.brands, &raw);
            if brand != self.brand {
                debug!(from = %self.brand, to = %brand, "card brand changed");
                self.brand = brand;
                let cvc = self.fields[FieldKind::Cvc.index()].take_raw();
                self.store(FieldKind::Cvc, cvc);
            }
        }
        self.store(field, raw);
    }

    fn store(&mut self, field: FieldKind, raw: String) {
        let formatted = format(field, &raw, self.brand, &self.config);
        let ctx = ValidationContext::new(&self.config, self.clock.today());
        let status = validate(field, &formatted, self.brand, &ctx);
        debug!(
            field = %field,
            value = %mask_value(field, &formatted),
            status = %status,
            "field updated"
        );
        self.fields[field.index()].replace(raw, formatted, status);
    }

    /// Raises notifications for every status transition since `before`.
    fn finish(&mut self, before: [FieldStatus; 5], edited: &[FieldKind]) -> FormSnapshot {
        for field in FieldKind::ALL {
            let (old, new) = (before[field.index()], self.fields[field.index()].status);
            if old == new {
                continue;
            }
            debug!(field = %field, from = %old, to = %new, "field status changed");

            if self.suggestion.map_or(false, |s| s.from == field) {
                self.suggestion = None;
            }

            match new {
                FieldStatus::Incomplete => self.observer.on_become_empty(field),
                FieldStatus::Valid => {
                    self.observer.on_become_valid(field);
                    if edited.contains(&field) {
                        self.suggest_after(field);
                    }
                }
                FieldStatus::Invalid => {}
            }
        }

        let snapshot = self.snapshot();
        self.observer.on_change(&snapshot);
        snapshot
    }

    fn suggest_after(&mut self, field: FieldKind) {
        let Some(next) = self.next_after(field) else {
            return;
        };
        debug!(from = %field, to = %next, "suggesting focus");
        self.suggestion = Some(Suggestion { from: field, to: next });
        self.observer.on_suggest_focus(next);
    }

    fn next_after(&self, field: FieldKind) -> Option<FieldKind> {
        let required = |f: &FieldKind| self.config.is_required(*f);
        match field {
            FieldKind::Number => Some(FieldKind::Expiry),
            FieldKind::Expiry => [FieldKind::Cvc, FieldKind::PostalCode]
                .into_iter()
                .find(required),
            FieldKind::Cvc => Some(FieldKind::PostalCode).filter(required),
            FieldKind::Name | FieldKind::PostalCode => None,
        }
    }
}

impl<O: FormObserver, C: Clock> fmt::Debug for CardForm<O, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardForm")
            .field("fields", &self.fields)
            .field("brand", &self.brand)
            .field("focused", &self.focused)
            .field("suggested_next_field", &self.suggested_next_field())
            .finish_non_exhaustive()
    }
}
