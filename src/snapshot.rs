//! Immutable form state handed to views.

use crate::mask::mask_value;
use crate::{CardBrand, FieldKind, FieldStatus};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// What a view needs to render one field.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct FieldView {
    /// The field this view describes.
    #[zeroize(skip)]
    pub field: FieldKind,
    /// Formatted value to show in the text box.
    pub display_value: String,
    /// Validation status, rendered as an icon or colour.
    #[zeroize(skip)]
    pub status: FieldStatus,
    /// Label text.
    #[zeroize(skip)]
    pub label: String,
    /// Placeholder text.
    #[zeroize(skip)]
    pub placeholder: String,
    /// Whether the field must be valid for the form to be valid.
    #[zeroize(skip)]
    pub required: bool,
}

impl fmt::Debug for FieldView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldView")
            .field("field", &self.field)
            .field("display_value", &mask_value(self.field, &self.display_value))
            .field("status", &self.status)
            .field("label", &self.label)
            .field("placeholder", &self.placeholder)
            .field("required", &self.required)
            .finish()
    }
}

/// The whole form after an event has been processed.
///
/// Snapshots are values: later changes to the form never show up in a
/// snapshot already taken.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct FormSnapshot {
    /// One view per field, in display order.
    pub fields: [FieldView; 5],
    /// Brand detected from the card number.
    pub detected_brand: CardBrand,
    /// True when every required field is valid.
    pub form_valid: bool,
    /// The field that last received focus.
    pub focused: Option<FieldKind>,
    /// The field focus should move to next, if any.
    pub suggested_next_field: Option<FieldKind>,
}

impl FormSnapshot {
    /// The view of `field`.
    #[inline]
    pub fn field(&self, field: FieldKind) -> &FieldView {
        &self.fields[field.index()]
    }

    /// The formatted value of `field`.
    #[inline]
    pub fn value(&self, field: FieldKind) -> &str {
        &self.field(field).display_value
    }

    /// The status of `field`.
    #[inline]
    pub fn status(&self, field: FieldKind) -> FieldStatus {
        self.field(field).status
    }

    /// Required fields that are not yet valid, in display order.
    pub fn missing_fields(&self) -> impl Iterator<Item = FieldKind> + '_ {
        self.fields
            .iter()
            .filter(|view| view.required && !view.status.is_valid())
            .map(|view| view.field)
    }

    /// Serializes the snapshot to JSON.
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
