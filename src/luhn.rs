//! Luhn (mod 10) checksum.
//!
//! Starting from the rightmost digit, every second digit is doubled (and 9
//! subtracted when the result is 10 or more); the number is valid when the
//! total is divisible by 10.

/// Doubled digit with 9 subtracted when >= 10, indexed by digit.
const DOUBLE_TABLE: [u8; 10] = [0, 2, 4, 6, 8, 1, 3, 5, 7, 9];

/// Validates a digit sequence (0-9 values, not ASCII).
///
/// Empty input is never valid.
///
/// # Example
///
/// ```
/// use cc_form::luhn::validate;
///
/// assert!(validate(&[4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2]));
/// assert!(!validate(&[4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 1]));
/// ```
#[inline]
pub fn validate(digits: &[u8]) -> bool {
    !digits.is_empty() && compute_checksum(digits) % 10 == 0
}

/// Computes the Luhn sum (not reduced modulo 10).
///
/// The rightmost digit is position 0 and is not doubled.
#[inline]
pub fn compute_checksum(digits: &[u8]) -> u32 {
    weighted_sum(digits, false)
}

/// Computes the check digit that makes `digits` followed by it pass Luhn.
///
/// ```
/// use cc_form::luhn::generate_check_digit;
///
/// assert_eq!(generate_check_digit(&[4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4]), 2);
/// ```
#[inline]
pub fn generate_check_digit(digits: &[u8]) -> u8 {
    // Appending a digit shifts every position left by one, so the current
    // rightmost digit is the first one doubled.
    let sum = weighted_sum(digits, true);
    ((10 - (sum % 10)) % 10) as u8
}

fn weighted_sum(digits: &[u8], double_first: bool) -> u32 {
    digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            let d = d.min(9);
            if (i % 2 == 1) != double_first {
                DOUBLE_TABLE[d as usize] as u32
            } else {
                d as u32
            }
        })
        .sum()
}
