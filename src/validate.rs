//! Per-field validation.
//!
//! Every check maps a formatted value to a [`FieldStatus`]. Nothing here
//! returns an error: "still typing" is [`FieldStatus::Incomplete`], "cannot
//! become valid without deleting something" is [`FieldStatus::Invalid`].
//!
//! The current month is part of the [`ValidationContext`], so validation is
//! pure and deterministic.

use crate::brand::BrandTable;
use crate::config::{PostalAlphabet, PostalCodeRule};
use crate::cvc::validate_cvc;
use crate::expiry::{validate_expiry, YearMonth};
use crate::format::GROUP_SEPARATOR;
use crate::luhn;
use crate::{CardBrand, FieldKind, FieldStatus, FormConfig};

/// Everything the validator needs besides the value itself.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    /// The current year and month.
    pub today: YearMonth,
    /// Brand descriptors for number and CVC lengths.
    pub brands: &'a BrandTable,
    /// Postal codes shorter than this are incomplete.
    pub postal_code_min_length: usize,
    /// Postal codes longer than this are invalid.
    pub postal_code_max_length: usize,
    /// Characters a postal code may contain.
    pub postal_code_alphabet: PostalAlphabet,
    /// Replaces the built-in postal code check when set.
    pub postal_code_rule: Option<PostalCodeRule>,
    /// Expiry horizon in years.
    pub max_expiry_years: Option<u16>,
}

impl<'a> ValidationContext<'a> {
    /// Builds a context from a form configuration and the current month.
    pub fn new(config: &'a FormConfig, today: YearMonth) -> Self {
        Self {
            today,
            brands: &config.brands,
            postal_code_min_length: config.postal_code_min_length,
            postal_code_max_length: config.postal_code_max_length,
            postal_code_alphabet: config.postal_code_alphabet,
            postal_code_rule: config.postal_code_rule,
            max_expiry_years: config.max_expiry_years,
        }
    }
}

/// Validates the value of `field`.
///
/// An empty value is [`FieldStatus::Incomplete`] for every field.
///
/// # Example
///
/// ```
/// use cc_form::expiry::YearMonth;
/// use cc_form::validate::{validate, ValidationContext};
/// use cc_form::{CardBrand, FieldKind, FieldStatus, FormConfig};
///
/// let config = FormConfig::default();
/// let ctx = ValidationContext::new(&config, YearMonth::new(2025, 1).unwrap());
///
/// assert_eq!(
///     validate(FieldKind::Number, "4242 4242 4242 4242", CardBrand::Visa, &ctx),
///     FieldStatus::Valid
/// );
/// assert_eq!(validate(FieldKind::Expiry, "13/29", CardBrand::Visa, &ctx), FieldStatus::Invalid);
/// assert_eq!(validate(FieldKind::Cvc, "12", CardBrand::Visa, &ctx), FieldStatus::Incomplete);
/// ```
pub fn validate(
    field: FieldKind,
    value: &str,
    brand: CardBrand,
    ctx: &ValidationContext<'_>,
) -> FieldStatus {
    if value.is_empty() {
        return FieldStatus::Incomplete;
    }

    match field {
        FieldKind::Number => number_status(value, brand, ctx.brands),
        FieldKind::Expiry => expiry_status(value, ctx.today, ctx.max_expiry_years),
        FieldKind::Cvc => cvc_status(value, brand, ctx.brands),
        FieldKind::PostalCode => match ctx.postal_code_rule {
            Some(rule) => rule(value),
            None => postal_code_status(
                value,
                ctx.postal_code_min_length,
                ctx.postal_code_max_length,
                ctx.postal_code_alphabet,
            ),
        },
        FieldKind::Name => name_status(value),
    }
}

/// Validates a card number for `brand`.
///
/// Valid when the digit count is one the brand accepts and the Luhn check
/// passes. An accepted length failing Luhn, or a number longer than the
/// brand allows, is invalid. For an undetected brand the number stays
/// incomplete only while it is shorter than the widest prefix in the table.
pub fn number_status(value: &str, brand: CardBrand, table: &BrandTable) -> FieldStatus {
    let mut digits = Vec::with_capacity(value.len());

    for c in value.chars() {
        match c {
            '0'..='9' => digits.push(c as u8 - b'0'),
            c if c == GROUP_SEPARATOR || c == '-' => {}
            _ => return FieldStatus::Invalid,
        }
    }

    let count = digits.len();
    if count == 0 {
        return FieldStatus::Incomplete;
    }

    let descriptor = match table.descriptor(brand) {
        Some(descriptor) => descriptor,
        None if count < table.widest_prefix() => return FieldStatus::Incomplete,
        None => return FieldStatus::Invalid,
    };

    if count > descriptor.max_length() {
        FieldStatus::Invalid
    } else if descriptor.accepts_length(count) {
        if luhn::validate(&digits) {
            FieldStatus::Valid
        } else {
            FieldStatus::Invalid
        }
    } else {
        FieldStatus::Incomplete
    }
}

/// Validates an `MM/YY` expiry against `today`.
pub fn expiry_status(value: &str, today: YearMonth, max_years: Option<u16>) -> FieldStatus {
    match validate_expiry(value, today, max_years) {
        Ok(_) => FieldStatus::Valid,
        Err(e) if e.is_incomplete() => FieldStatus::Incomplete,
        Err(_) => FieldStatus::Invalid,
    }
}

/// Validates a CVC against the length `brand` uses.
pub fn cvc_status(value: &str, brand: CardBrand, table: &BrandTable) -> FieldStatus {
    match validate_cvc(value, brand, table) {
        Ok(_) => FieldStatus::Valid,
        Err(e) if e.is_incomplete() => FieldStatus::Incomplete,
        Err(_) => FieldStatus::Invalid,
    }
}

/// Validates a postal code.
///
/// Characters outside `alphabet` make it invalid regardless of length.
pub fn postal_code_status(
    value: &str,
    min_length: usize,
    max_length: usize,
    alphabet: PostalAlphabet,
) -> FieldStatus {
    if !value.chars().all(|c| alphabet.allows(c)) {
        return FieldStatus::Invalid;
    }

    let length = value.chars().count();
    if length < min_length {
        FieldStatus::Incomplete
    } else if length > max_length {
        FieldStatus::Invalid
    } else {
        FieldStatus::Valid
    }
}

/// Validates a holder name: anything with a visible character is valid.
pub fn name_status(value: &str) -> FieldStatus {
    if value.chars().any(char::is_control) {
        FieldStatus::Invalid
    } else if value.trim().is_empty() {
        FieldStatus::Incomplete
    } else {
        FieldStatus::Valid
    }
}
