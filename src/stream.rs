//! Input events and iterator adapters for feeding them to a form.
//!
//! Views never mutate form state: they send [`FieldEvent`]s and render the
//! [`FormSnapshot`] that comes back. The adapters here make it easy to
//! replay a typing session, one keystroke at a time.
//!
//! # Example
//!
//! ```
//! use cc_form::expiry::{FixedClock, YearMonth};
//! use cc_form::stream::{typing, DispatchExt};
//! use cc_form::{CardForm, FieldKind, FieldStatus, FormConfig};
//!
//! let clock = FixedClock(YearMonth::new(2025, 1).unwrap());
//! let mut form = CardForm::new(FormConfig::default()).with_clock(clock);
//!
//! let statuses: Vec<_> = typing(FieldKind::Cvc, "123")
//!     .dispatch_into(&mut form)
//!     .map(|snapshot| snapshot.status(FieldKind::Cvc))
//!     .collect();
//!
//! assert_eq!(
//!     statuses,
//!     [FieldStatus::Incomplete, FieldStatus::Incomplete, FieldStatus::Valid]
//! );
//! ```

use crate::expiry::Clock;
use crate::form::{CardForm, FormObserver};
use crate::mask::mask_value;
use crate::{FieldKind, FormSnapshot};
use std::fmt;

/// Something the view layer reports.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "type", rename_all = "camelCase")
)]
pub enum FieldEvent {
    /// The text box of `field` now holds `text`.
    Changed {
        /// The edited field.
        field: FieldKind,
        /// Full, unformatted contents of the text box.
        text: String,
    },
    /// `field` received focus.
    Focused {
        /// The focused field.
        field: FieldKind,
    },
}

impl FieldEvent {
    /// Creates a change event.
    pub fn changed(field: FieldKind, text: impl Into<String>) -> Self {
        Self::Changed {
            field,
            text: text.into(),
        }
    }

    /// Creates a focus event.
    #[inline]
    pub const fn focused(field: FieldKind) -> Self {
        Self::Focused { field }
    }

    /// The field the event concerns.
    #[inline]
    pub const fn field(&self) -> FieldKind {
        match self {
            Self::Changed { field, .. } | Self::Focused { field } => *field,
        }
    }
}

impl fmt::Debug for FieldEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Changed { field, text } => f
                .debug_struct("Changed")
                .field("field", field)
                .field("text", &mask_value(*field, text))
                .finish(),
            Self::Focused { field } => f.debug_struct("Focused").field("field", field).finish(),
        }
    }
}

/// Change events for typing `text` into a field one character at a time.
///
/// Created by [`typing`]. Each event carries the text typed so far.
#[derive(Debug, Clone)]
pub struct Keystrokes<'a> {
    field: FieldKind,
    text: &'a str,
    ends: std::str::CharIndices<'a>,
}

impl<'a> Keystrokes<'a> {
    /// Creates a keystroke sequence for `text`.
    #[inline]
    pub fn new(field: FieldKind, text: &'a str) -> Self {
        Self {
            field,
            text,
            ends: text.char_indices(),
        }
    }
}

impl Iterator for Keystrokes<'_> {
    type Item = FieldEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let (start, c) = self.ends.next()?;
        let end = start + c.len_utf8();
        Some(FieldEvent::changed(self.field, &self.text[..end]))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ends.size_hint()
    }
}

/// Returns the change events produced by typing `text` into `field`.
///
/// ```
/// use cc_form::stream::{typing, FieldEvent};
/// use cc_form::FieldKind;
///
/// let events: Vec<_> = typing(FieldKind::Expiry, "12").collect();
/// assert_eq!(
///     events,
///     [
///         FieldEvent::changed(FieldKind::Expiry, "1"),
///         FieldEvent::changed(FieldKind::Expiry, "12"),
///     ]
/// );
/// ```
#[inline]
pub fn typing(field: FieldKind, text: &str) -> Keystrokes<'_> {
    Keystrokes::new(field, text)
}

/// Feeds events to a form, yielding the snapshot after each one.
///
/// Created by [`DispatchExt::dispatch_into`].
pub struct DispatchStream<'f, I, O: FormObserver, C: Clock> {
    inner: I,
    form: &'f mut CardForm<O, C>,
}

impl<'f, I, O: FormObserver, C: Clock> DispatchStream<'f, I, O, C> {
    /// Creates a stream dispatching `inner` into `form`.
    #[inline]
    pub fn new(inner: I, form: &'f mut CardForm<O, C>) -> Self {
        Self { inner, form }
    }

    /// Consumes the stream and returns the remaining events.
    #[inline]
    pub fn into_inner(self) -> I {
        self.inner
    }
}

impl<I, O, C> Iterator for DispatchStream<'_, I, O, C>
where
    I: Iterator<Item = FieldEvent>,
    O: FormObserver,
    C: Clock,
{
    type Item = FormSnapshot;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|event| self.form.dispatch(event))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Extension trait for dispatching any iterator of events into a form.
pub trait DispatchExt: Iterator<Item = FieldEvent> + Sized {
    /// Dispatches each event into `form`, yielding the resulting snapshots.
    fn dispatch_into<O: FormObserver, C: Clock>(
        self,
        form: &mut CardForm<O, C>,
    ) -> DispatchStream<'_, Self, O, C>;

    /// Dispatches every event and returns the final snapshot.
    ///
    /// Returns the current snapshot if there are no events.
    fn replay<O: FormObserver, C: Clock>(self, form: &mut CardForm<O, C>) -> FormSnapshot {
        let mut last = None;
        for snapshot in self.dispatch_into(form) {
            last = Some(snapshot);
        }
        match last {
            Some(snapshot) => snapshot,
            None => form.snapshot(),
        }
    }
}

impl<I: Iterator<Item = FieldEvent>> DispatchExt for I {
    #[inline]
    fn dispatch_into<O: FormObserver, C: Clock>(
        self,
        form: &mut CardForm<O, C>,
    ) -> DispatchStream<'_, Self, O, C> {
        DispatchStream::new(self, form)
    }
}
