//! Moving focus between fields.
//!
//! The form only says which field should be focused next. Scrolling a field
//! into view and giving it keyboard focus belong to the view layer, which
//! exposes them through [`FieldViewport`]. [`FocusCoordinator`] connects the
//! two.
//!
//! # Example
//!
//! ```
//! use cc_form::expiry::{FixedClock, YearMonth};
//! use cc_form::focus::{FieldViewport, FocusCoordinator};
//! use cc_form::{CardForm, FieldKind, FormConfig};
//!
//! #[derive(Default)]
//! struct Screen {
//!     focused: Option<FieldKind>,
//! }
//!
//! impl FieldViewport for Screen {
//!     fn bring_field_into_view(&mut self, _field: FieldKind) {}
//!     fn focus(&mut self, field: FieldKind) {
//!         self.focused = Some(field);
//!     }
//! }
//!
//! let clock = FixedClock(YearMonth::new(2025, 1).unwrap());
//! let mut form = CardForm::new(FormConfig::default()).with_clock(clock);
//! let mut screen = Screen::default();
//! let coordinator = FocusCoordinator::new();
//!
//! coordinator.mount(&mut form, &mut screen);
//! assert_eq!(screen.focused, Some(FieldKind::Number));
//!
//! form.on_field_change(FieldKind::Number, "4242424242424242");
//! coordinator.advance(&mut form, &mut screen);
//! assert_eq!(screen.focused, Some(FieldKind::Expiry));
//! ```

use crate::expiry::Clock;
use crate::form::{CardForm, FormObserver};
use crate::FieldKind;
use tracing::debug;

/// The view-side capability to show and focus a field.
pub trait FieldViewport {
    /// Scrolls until `field` is visible.
    fn bring_field_into_view(&mut self, field: FieldKind);

    /// Gives `field` keyboard focus.
    fn focus(&mut self, field: FieldKind);
}

impl<V: FieldViewport + ?Sized> FieldViewport for &mut V {
    fn bring_field_into_view(&mut self, field: FieldKind) {
        (**self).bring_field_into_view(field)
    }

    fn focus(&mut self, field: FieldKind) {
        (**self).focus(field)
    }
}

/// Applies the form's focus suggestions to a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusCoordinator {
    auto_advance: bool,
}

impl Default for FocusCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl FocusCoordinator {
    /// A coordinator that follows suggestions.
    #[inline]
    pub const fn new() -> Self {
        Self { auto_advance: true }
    }

    /// A coordinator that only moves focus when asked to.
    #[inline]
    pub const fn manual() -> Self {
        Self {
            auto_advance: false,
        }
    }

    /// Returns true if suggestions are followed.
    #[inline]
    pub const fn auto_advance(&self) -> bool {
        self.auto_advance
    }

    /// Focuses the form's first field. Call once when the form is shown.
    pub fn mount<O, C, V>(&self, form: &mut CardForm<O, C>, viewport: &mut V) -> FieldKind
    where
        O: FormObserver,
        C: Clock,
        V: FieldViewport + ?Sized,
    {
        let first = form.first_field();
        self.focus(form, viewport, first);
        first
    }

    /// Moves focus to `field` on the user's request.
    pub fn focus<O, C, V>(&self, form: &mut CardForm<O, C>, viewport: &mut V, field: FieldKind)
    where
        O: FormObserver,
        C: Clock,
        V: FieldViewport + ?Sized,
    {
        viewport.bring_field_into_view(field);
        viewport.focus(field);
        form.on_field_focus(field);
    }

    /// Follows the pending suggestion, if any.
    ///
    /// The suggestion is dropped instead when the user has already moved
    /// away from the field that raised it. Returns the newly focused field.
    pub fn advance<O, C, V>(
        &self,
        form: &mut CardForm<O, C>,
        viewport: &mut V,
    ) -> Option<FieldKind>
    where
        O: FormObserver,
        C: Clock,
        V: FieldViewport + ?Sized,
    {
        if !self.auto_advance {
            return None;
        }

        let next = form.suggested_next_field()?;
        let source = form.suggestion_source();
        if form.focused().is_some() && form.focused() != source {
            debug!(suggested = %next, "focus moved elsewhere, dropping suggestion");
            form.dismiss_suggestion();
            return None;
        }

        self.focus(form, viewport, next);
        Some(next)
    }
}
