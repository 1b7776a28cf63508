//! Test card numbers.
//!
//! Generated numbers pass Luhn and use a prefix and length from the brand
//! table, so the form accepts them. They are not connected to real accounts
//! and should only be used for testing and demos.
//!
//! # Example
//!
//! ```
//! use cc_form::brand::BrandTable;
//! use cc_form::generate::generate_number;
//! use cc_form::CardBrand;
//!
//! let table = BrandTable::default();
//! let number = generate_number(&table, CardBrand::Amex).unwrap();
//! assert_eq!(number, "340000000000009");
//! // Same input always produces same output
//! assert_eq!(Some(number), generate_number(&table, CardBrand::Amex));
//! ```

use crate::brand::{BrandDescriptor, BrandTable};
use crate::luhn;
use crate::CardBrand;

#[cfg(feature = "generate")]
use rand::seq::SliceRandom;
#[cfg(feature = "generate")]
use rand::Rng;

/// Digits of `value`, zero-padded to `width`.
fn prefix_digits(value: u32, width: u8) -> Vec<u8> {
    let width = width as usize;
    let mut digits = vec![0u8; width];
    let mut rest = value;
    for slot in digits.iter_mut().rev() {
        *slot = (rest % 10) as u8;
        rest /= 10;
    }
    digits
}

/// The lowest prefix of the brand's first range, e.g. `[3, 4]` for Amex.
pub fn sample_prefix(descriptor: &BrandDescriptor) -> Vec<u8> {
    descriptor
        .prefixes
        .first()
        .map(|range| prefix_digits(range.start(), range.width()))
        .unwrap_or_default()
}

/// Completes `prefix` to `length` digits: zeros, then the Luhn check digit.
///
/// Returns `None` if the prefix leaves no room for the check digit.
///
/// ```
/// use cc_form::generate::complete_number;
///
/// assert_eq!(complete_number(&[4, 2, 4, 2], 16).as_deref(), Some("4242000000000000"));
/// assert_eq!(complete_number(&[4, 2, 4, 2], 4), None);
/// ```
pub fn complete_number(prefix: &[u8], length: usize) -> Option<String> {
    if prefix.len() >= length {
        return None;
    }

    let mut digits = Vec::with_capacity(length);
    digits.extend_from_slice(prefix);
    digits.resize(length - 1, 0);
    digits.push(luhn::generate_check_digit(&digits));
    Some(to_string(&digits))
}

/// A deterministic valid number for `brand` at its shortest accepted length.
///
/// Returns `None` for brands the table does not describe, including
/// [`CardBrand::Unknown`].
pub fn generate_number(table: &BrandTable, brand: CardBrand) -> Option<String> {
    let descriptor = table.descriptor(brand)?;
    let length = *descriptor.lengths.first()? as usize;
    complete_number(&sample_prefix(descriptor), length)
}

/// A random valid number for `brand`.
///
/// Prefix and length are drawn from the brand's descriptor. The remaining
/// digits are random, so a number may start with a more specific prefix
/// belonging to another brand (Maestro `60` followed by `11` reads as
/// Discover).
#[cfg(feature = "generate")]
pub fn generate_number_with_rng<R: Rng>(
    table: &BrandTable,
    brand: CardBrand,
    rng: &mut R,
) -> Option<String> {
    let descriptor = table.descriptor(brand)?;
    let range = descriptor.prefixes.choose(rng)?;
    let length = *descriptor.lengths.choose(rng)? as usize;

    let mut digits = prefix_digits(rng.gen_range(range.start()..=range.end()), range.width());
    if digits.len() >= length {
        return None;
    }
    while digits.len() < length - 1 {
        digits.push(rng.gen_range(0..10));
    }
    digits.push(luhn::generate_check_digit(&digits));
    Some(to_string(&digits))
}

/// A random valid number for `brand`, using the thread-local RNG.
#[cfg(feature = "generate")]
pub fn generate_number_random(table: &BrandTable, brand: CardBrand) -> Option<String> {
    generate_number_with_rng(table, brand, &mut rand::thread_rng())
}

fn to_string(digits: &[u8]) -> String {
    digits.iter().map(|&d| (b'0' + d) as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::detect_brand_str;
    use crate::validate::number_status;
    use crate::FieldStatus;

    #[test]
    fn test_every_brand_generates_a_valid_number() {
        let table = BrandTable::default();
        for entry in table.entries() {
            let number = generate_number(&table, entry.brand).unwrap();
            assert_eq!(detect_brand_str(&table, &number), entry.brand, "{}", number);
            assert_eq!(
                number_status(&number, entry.brand, &table),
                FieldStatus::Valid,
                "{}",
                number
            );
        }
    }

    #[test]
    fn test_unknown_brand_has_no_number() {
        assert_eq!(generate_number(&BrandTable::default(), CardBrand::Unknown), None);
    }

    #[test]
    fn test_sample_prefix_is_padded() {
        let table = BrandTable::default();
        let diners = table.descriptor(CardBrand::DinersClub).unwrap();
        assert_eq!(sample_prefix(diners), vec![3, 0, 0]);
        assert_eq!(prefix_digits(7, 3), vec![0, 0, 7]);
    }

    #[test]
    fn test_complete_number() {
        let number = complete_number(&[5, 1], 16).unwrap();
        assert_eq!(number.len(), 16);
        assert!(number.starts_with("51"));
        let digits: Vec<u8> = number.bytes().map(|b| b - b'0').collect();
        assert!(luhn::validate(&digits));
    }

    #[cfg(feature = "generate")]
    #[test]
    fn test_random_numbers_pass_luhn() {
        let table = BrandTable::default();
        for entry in table.entries() {
            for _ in 0..20 {
                let number = generate_number_random(&table, entry.brand).unwrap();
                let digits: Vec<u8> = number.bytes().map(|b| b - b'0').collect();
                assert!(luhn::validate(&digits));
                assert!(entry.accepts_length(number.len()));
            }
        }
    }
}
