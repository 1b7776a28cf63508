//! As-you-type formatting for every form field.
//!
//! Each formatter maps whatever the text box currently holds to the canonical
//! display string for that field. Formatters are pure and idempotent:
//! formatting an already formatted value returns it unchanged.
//!
//! # Format Conventions
//!
//! - **Number**: digits only, capped at the brand's longest length, grouped
//!   by the brand's pattern (`4242 4242 4242 4242`, Amex `3782 822463 10005`)
//! - **Expiry**: `MM/YY`, with a lone leading `2`-`9` read as `0d`
//! - **CVC**: digits only, capped at the brand's CVC length
//! - **Postal code**: ASCII letters and digits, capped at the configured length
//! - **Name**: control characters removed
//!
//! # Example
//!
//! ```
//! use cc_form::brand::BrandTable;
//! use cc_form::format::{format_expiry, format_number};
//! use cc_form::CardBrand;
//!
//! let table = BrandTable::default();
//! assert_eq!(format_number("4242424242424242", CardBrand::Visa, &table), "4242 4242 4242 4242");
//! assert_eq!(format_number("378282246310005", CardBrand::Amex, &table), "3782 822463 10005");
//! assert_eq!(format_expiry("1229"), "12/29");
//! ```

use crate::brand::BrandTable;
use crate::{CardBrand, FieldKind, FormConfig};

/// Separator placed between digit groups of a card number.
pub const GROUP_SEPARATOR: char = ' ';

/// Separator between month and year.
pub const EXPIRY_SEPARATOR: char = '/';

/// Formats `raw` as the display value of `field`.
///
/// `brand` only affects the number and CVC fields.
///
/// ```
/// use cc_form::format::format;
/// use cc_form::{CardBrand, FieldKind, FormConfig};
///
/// let config = FormConfig::default();
/// assert_eq!(format(FieldKind::Cvc, "12a34", CardBrand::Visa, &config), "123");
/// assert_eq!(format(FieldKind::Cvc, "12a34", CardBrand::Amex, &config), "1234");
/// assert_eq!(format(FieldKind::PostalCode, "sw1a 1aa", CardBrand::Unknown, &config), "sw1a1a");
/// ```
pub fn format(field: FieldKind, raw: &str, brand: CardBrand, config: &FormConfig) -> String {
    match field {
        FieldKind::Number => format_number(raw, brand, &config.brands),
        FieldKind::Expiry => format_expiry(raw),
        FieldKind::Cvc => format_cvc(raw, brand, &config.brands),
        FieldKind::PostalCode => format_postal_code(raw, config.postal_code_max_length),
        FieldKind::Name => format_name(raw, config.name_max_length),
    }
}

/// Formats a card number for `brand`: digits only, capped and grouped.
pub fn format_number(raw: &str, brand: CardBrand, table: &BrandTable) -> String {
    let max = table.max_length(brand);
    let digits: Vec<char> = raw.chars().filter(|c| c.is_ascii_digit()).take(max).collect();
    group(&digits, table.grouping(brand), GROUP_SEPARATOR)
}

/// Splits `digits` by `grouping`; digits past the pattern continue in fours.
fn group(digits: &[char], grouping: &[u8], separator: char) -> String {
    let mut result = String::with_capacity(digits.len() + digits.len() / 4 + 1);
    let sizes = grouping
        .iter()
        .map(|&g| g as usize)
        .chain(std::iter::repeat(4));

    let mut rest = digits;
    for size in sizes {
        if rest.is_empty() {
            break;
        }
        if !result.is_empty() {
            result.push(separator);
        }
        let (head, tail) = rest.split_at(size.min(rest.len()));
        result.extend(head);
        rest = tail;
    }
    result
}

/// Formats an expiry date as `MM/YY`.
///
/// ```
/// use cc_form::format::format_expiry;
///
/// assert_eq!(format_expiry("1"), "1");
/// assert_eq!(format_expiry("5"), "05");
/// assert_eq!(format_expiry("12"), "12");
/// assert_eq!(format_expiry("123"), "12/3");
/// assert_eq!(format_expiry("12/345"), "12/34");
/// ```
pub fn format_expiry(raw: &str) -> String {
    let digits: Vec<char> = raw.chars().filter(|c| c.is_ascii_digit()).take(4).collect();

    match digits.as_slice() {
        // A lone 2-9 can only be a single-digit month.
        [d @ '2'..='9'] => format!("0{}", d),
        [m1, m2, year @ ..] if !year.is_empty() => {
            let mut out = String::with_capacity(5);
            out.push(*m1);
            out.push(*m2);
            out.push(EXPIRY_SEPARATOR);
            out.extend(year);
            out
        }
        _ => digits.into_iter().collect(),
    }
}

/// Formats a CVC: digits only, capped at the brand's CVC length.
pub fn format_cvc(raw: &str, brand: CardBrand, table: &BrandTable) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit())
        .take(table.cvc_length(brand))
        .collect()
}

/// Formats a postal code: ASCII letters and digits, capped at `max_length`.
pub fn format_postal_code(raw: &str, max_length: usize) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(max_length)
        .collect()
}

/// Formats a holder name: control characters removed, optionally capped.
///
/// ```
/// use cc_form::format::format_name;
///
/// assert_eq!(format_name("Ada\u{0}Lovelace\n", None), "AdaLovelace");
/// assert_eq!(format_name("José Ñúñez", Some(4)), "José");
/// ```
pub fn format_name(raw: &str, max_length: Option<usize>) -> String {
    raw.chars()
        .filter(|c| !c.is_control())
        .take(max_length.unwrap_or(usize::MAX))
        .collect()
}

/// Strips everything but ASCII digits.
///
/// ```
/// use cc_form::format::strip_formatting;
///
/// assert_eq!(strip_formatting("4242 4242-4242.4242"), "4242424242424242");
/// ```
pub fn strip_formatting(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Extracts digit values (0-9, not ASCII) from `input`.
pub fn digits_of(input: &str) -> Vec<u8> {
    input
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(raw: &str) -> String {
        let table = BrandTable::default();
        let brand = crate::detect::detect_brand_str(&table, raw);
        format_number(raw, brand, &table)
    }

    #[test]
    fn test_format_visa_16() {
        assert_eq!(number("4242424242424242"), "4242 4242 4242 4242");
    }

    #[test]
    fn test_format_visa_19() {
        assert_eq!(number("4111111111111111111"), "4111 1111 1111 1111 111");
    }

    #[test]
    fn test_format_amex() {
        assert_eq!(number("378282246310005"), "3782 822463 10005");
    }

    #[test]
    fn test_format_diners_14() {
        assert_eq!(number("30569309025904"), "3056 930902 5904");
    }

    #[test]
    fn test_format_partial() {
        assert_eq!(number("4"), "4");
        assert_eq!(number("4242"), "4242");
        assert_eq!(number("42424"), "4242 4");
        assert_eq!(number("3782822"), "3782 822");
    }

    #[test]
    fn test_number_capped_at_brand_length() {
        // Mastercard accepts 16 digits only
        assert_eq!(number("55000000000000049999"), "5500 0000 0000 0004");
        // Amex accepts 15
        assert_eq!(number("3782822463100059"), "3782 822463 10005");
        // Unknown brands are capped at 19
        assert_eq!(number("99999999999999999999999"), "9999 9999 9999 9999 999");
    }

    #[test]
    fn test_number_strips_non_digits() {
        assert_eq!(number("4242-4242 abc 4242.4242"), "4242 4242 4242 4242");
        assert_eq!(number("   "), "");
        assert_eq!(number(""), "");
    }

    #[test]
    fn test_format_expiry() {
        assert_eq!(format_expiry(""), "");
        assert_eq!(format_expiry("0"), "0");
        assert_eq!(format_expiry("1"), "1");
        assert_eq!(format_expiry("3"), "03");
        assert_eq!(format_expiry("12"), "12");
        assert_eq!(format_expiry("12/"), "12");
        assert_eq!(format_expiry("1229"), "12/29");
        assert_eq!(format_expiry("13/29"), "13/29");
        assert_eq!(format_expiry("12/2029"), "12/20");
        assert_eq!(format_expiry("ab"), "");
    }

    #[test]
    fn test_format_cvc() {
        let table = BrandTable::default();
        assert_eq!(format_cvc("12", CardBrand::Visa, &table), "12");
        assert_eq!(format_cvc("12345", CardBrand::Visa, &table), "123");
        assert_eq!(format_cvc("12345", CardBrand::Amex, &table), "1234");
        assert_eq!(format_cvc("1x2", CardBrand::Unknown, &table), "12");
    }

    #[test]
    fn test_format_postal_code() {
        assert_eq!(format_postal_code("94103", 6), "94103");
        assert_eq!(format_postal_code("SW1A 1AA", 6), "SW1A1A");
        assert_eq!(format_postal_code("K1A-0B1", 6), "K1A0B1");
        assert_eq!(format_postal_code("1234567", 5), "12345");
        assert_eq!(format_postal_code("ü12", 6), "12");
    }

    #[test]
    fn test_format_name() {
        assert_eq!(format_name("  Ada Lovelace ", None), "  Ada Lovelace ");
        assert_eq!(format_name("Ada\tLovelace", None), "AdaLovelace");
        assert_eq!(format_name("\u{7f}", None), "");
    }

    #[test]
    fn test_group_continues_in_fours() {
        let digits: Vec<char> = "3056930902590412345".chars().collect();
        assert_eq!(group(&digits, &[4, 6, 4], ' '), "3056 930902 5904 1234 5");
        assert_eq!(group(&[], &[4, 6, 4], ' '), "");
    }

    #[test]
    fn test_idempotent() {
        let config = FormConfig::default();
        for (field, raw, brand) in [
            (FieldKind::Number, "4242424242424242", CardBrand::Visa),
            (FieldKind::Number, "37828224631000599", CardBrand::Amex),
            (FieldKind::Expiry, "7", CardBrand::Unknown),
            (FieldKind::Expiry, "122", CardBrand::Unknown),
            (FieldKind::Cvc, "98765", CardBrand::Amex),
            (FieldKind::PostalCode, "a b c 1 2 3 4", CardBrand::Unknown),
            (FieldKind::Name, "Grace\u{1b}Hopper", CardBrand::Unknown),
        ] {
            let once = format(field, raw, brand, &config);
            assert_eq!(format(field, &once, brand, &config), once, "{:?} {:?}", field, raw);
        }
    }

    #[test]
    fn test_digits_of() {
        assert_eq!(digits_of("4 2-x9"), vec![4, 2, 9]);
        assert!(digits_of("").is_empty());
    }
}
