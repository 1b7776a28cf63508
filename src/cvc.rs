//! CVC/CVV/CID checks.
//!
//! The expected length comes from the brand table: 4 digits for American
//! Express (printed on the front), 3 for everything else including
//! undetected brands.
//!
//! # Example
//!
//! ```
//! use cc_form::brand::BrandTable;
//! use cc_form::cvc::{validate_cvc, CvcError};
//! use cc_form::CardBrand;
//!
//! let table = BrandTable::default();
//!
//! assert!(validate_cvc("123", CardBrand::Visa, &table).is_ok());
//! assert!(validate_cvc("1234", CardBrand::Amex, &table).is_ok());
//!
//! assert!(matches!(
//!     validate_cvc("12", CardBrand::Visa, &table),
//!     Err(CvcError::TooShort { length: 2, expected: 3 })
//! ));
//! ```

use crate::brand::BrandTable;
use crate::CardBrand;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Longest CVC any brand uses.
const MAX_CVC_LENGTH: usize = 4;

/// A CVC of exactly the expected length.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ValidatedCvc {
    digits: [u8; MAX_CVC_LENGTH],
    length: u8,
}

impl ValidatedCvc {
    /// Returns the number of digits.
    #[inline]
    pub const fn length(&self) -> usize {
        self.length as usize
    }

    /// Returns the CVC digits as a slice.
    pub fn digits(&self) -> &[u8] {
        &self.digits[..self.length as usize]
    }
}

impl fmt::Debug for ValidatedCvc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedCvc")
            .field("value", &"***")
            .field("length", &self.length)
            .finish()
    }
}

impl fmt::Display for ValidatedCvc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", "*".repeat(self.length as usize))
    }
}

/// Errors that can occur during CVC validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CvcError {
    /// The input is empty.
    Empty,
    /// The CVC contains a non-digit character.
    InvalidCharacter {
        /// The invalid character found.
        character: char,
        /// Position of the invalid character.
        position: usize,
    },
    /// Fewer digits than the brand expects.
    TooShort {
        /// Digits entered.
        length: usize,
        /// Length the brand expects.
        expected: usize,
    },
    /// More digits than the brand expects.
    TooLong {
        /// Digits entered.
        length: usize,
        /// Length the brand expects.
        expected: usize,
    },
}

impl CvcError {
    /// Returns true for errors that more typing could fix.
    #[inline]
    pub const fn is_incomplete(&self) -> bool {
        matches!(self, Self::Empty | Self::TooShort { .. })
    }
}

impl fmt::Display for CvcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "CVC is empty"),
            Self::InvalidCharacter { character, position } => {
                write!(f, "invalid character '{}' at position {}", character, position)
            }
            Self::TooShort { length, expected } => {
                write!(f, "CVC must be {} digits, got {}", expected, length)
            }
            Self::TooLong { length, expected } => {
                write!(f, "CVC must be {} digits, got {}", expected, length)
            }
        }
    }
}

impl std::error::Error for CvcError {}

/// Validates a CVC against the length `brand` uses in `table`.
pub fn validate_cvc(
    input: &str,
    brand: CardBrand,
    table: &BrandTable,
) -> Result<ValidatedCvc, CvcError> {
    validate_cvc_length(input, table.cvc_length(brand))
}

/// Validates a CVC of exactly `expected` digits.
pub fn validate_cvc_length(input: &str, expected: usize) -> Result<ValidatedCvc, CvcError> {
    if input.is_empty() {
        return Err(CvcError::Empty);
    }

    let mut cvc = ValidatedCvc {
        digits: [0; MAX_CVC_LENGTH],
        length: 0,
    };
    let mut count = 0usize;

    for (position, character) in input.chars().enumerate() {
        if !character.is_ascii_digit() {
            return Err(CvcError::InvalidCharacter {
                character,
                position,
            });
        }
        if count < MAX_CVC_LENGTH {
            cvc.digits[count] = character as u8 - b'0';
        }
        count += 1;
    }

    if count < expected {
        return Err(CvcError::TooShort {
            length: count,
            expected,
        });
    }
    if count > expected || count > MAX_CVC_LENGTH {
        return Err(CvcError::TooLong {
            length: count,
            expected,
        });
    }

    cvc.length = count as u8;
    Ok(cvc)
}
