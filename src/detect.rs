//! Card brand detection using BIN/IIN prefix matching.
//!
//! The Bank Identification Number (BIN), also known as Issuer Identification
//! Number (IIN), is the leading digits of a card number. Detection compares
//! those digits against the prefix ranges of a [`BrandTable`].
//!
//! # Overlapping ranges
//!
//! Several brands share a leading digit (Maestro `63` and Elo `6362`, Maestro
//! `50` and Verve `506`). Every range whose full width has been typed is
//! tested; the widest match wins and ties go to the earlier table entry.
//! Detection on partial input is therefore provisional: `601` reads as
//! Maestro until the fourth digit turns it into Discover `6011`.

use crate::brand::BrandTable;
use crate::format::digits_of;
use crate::CardBrand;

/// Detects the card brand from a sequence of digits (0-9 values, not ASCII).
///
/// Total: returns `CardBrand::Unknown` for empty input or when nothing
/// matches, and never panics.
///
/// # Example
///
/// ```
/// use cc_form::brand::BrandTable;
/// use cc_form::detect::detect_brand;
/// use cc_form::CardBrand;
///
/// let table = BrandTable::default();
///
/// // Visa starts with 4
/// assert_eq!(detect_brand(&table, &[4, 2, 4, 2]), CardBrand::Visa);
///
/// // Amex starts with 34 or 37
/// assert_eq!(detect_brand(&table, &[3, 7, 8, 2]), CardBrand::Amex);
///
/// assert_eq!(detect_brand(&table, &[]), CardBrand::Unknown);
/// ```
pub fn detect_brand(table: &BrandTable, digits: &[u8]) -> CardBrand {
    if digits.is_empty() {
        return CardBrand::Unknown;
    }

    let mut best: Option<(u8, CardBrand)> = None;
    for entry in table.entries() {
        for range in &entry.prefixes {
            if !range.matches(digits) {
                continue;
            }
            // Strictly wider only: ties keep the earlier entry.
            if best.map_or(true, |(width, _)| range.width() > width) {
                best = Some((range.width(), entry.brand));
            }
        }
    }

    best.map_or(CardBrand::Unknown, |(_, brand)| brand)
}

/// Detects the brand of a number as typed, ignoring any non-digit characters.
///
/// ```
/// use cc_form::brand::BrandTable;
/// use cc_form::detect::detect_brand_str;
/// use cc_form::CardBrand;
///
/// let table = BrandTable::default();
/// assert_eq!(detect_brand_str(&table, "5500 0000"), CardBrand::Mastercard);
/// ```
pub fn detect_brand_str(table: &BrandTable, input: &str) -> CardBrand {
    detect_brand(table, &digits_of(input))
}
