//! PCI-DSS style masking for display and logging.
//!
//! PCI-DSS allows showing at most the first 6 and last 4 digits of a card
//! number, and never the CVC. Every value the form logs or prints through
//! `Debug` goes through [`mask_value`] first.

use crate::FieldKind;
use std::borrow::Cow;

/// Masks a card number, keeping only the last 4 digits.
///
/// Format: `****-****-****-1234`. Numbers of 4 digits or fewer are fully
/// masked.
///
/// # Example
///
/// ```
/// use cc_form::mask::mask_number;
///
/// assert_eq!(mask_number("4242 4242 4242 4242"), "****-****-****-4242");
/// assert_eq!(mask_number("4242"), "****");
/// ```
pub fn mask_number(input: &str) -> String {
    let digits: Vec<char> = input.chars().filter(|c| c.is_ascii_digit()).collect();
    let len = digits.len();

    if len <= 4 {
        return "*".repeat(len);
    }

    let masked_count = len - 4;
    let mut result = String::with_capacity(len + len / 4);

    for i in 0..masked_count {
        if i > 0 && i % 4 == 0 {
            result.push('-');
        }
        result.push('*');
    }

    if masked_count % 4 == 0 {
        result.push('-');
    }

    result.extend(&digits[len - 4..]);
    result
}

/// Masks the value of `field` for logs and `Debug` output.
///
/// Numbers keep their last 4 digits; CVCs are fully masked. Other fields are
/// returned as they are.
///
/// ```
/// use cc_form::mask::mask_value;
/// use cc_form::FieldKind;
///
/// assert_eq!(mask_value(FieldKind::Cvc, "123"), "***");
/// assert_eq!(mask_value(FieldKind::Expiry, "12/29"), "12/29");
/// ```
pub fn mask_value(field: FieldKind, value: &str) -> Cow<'_, str> {
    match field {
        FieldKind::Number => Cow::Owned(mask_number(value)),
        FieldKind::Cvc => Cow::Owned("*".repeat(value.chars().count())),
        FieldKind::Name | FieldKind::Expiry | FieldKind::PostalCode => Cow::Borrowed(value),
    }
}
