//! Error types for form configuration and misuse.
//!
//! Validation outcomes are never errors: they are reported as
//! [`FieldStatus`](crate::FieldStatus). The types here cover programmer
//! mistakes only: malformed brand tables, inconsistent configuration and
//! events naming fields that do not exist.

use crate::CardBrand;
use std::fmt;

/// Errors raised while building a [`BrandTable`](crate::brand::BrandTable)
/// or a [`FormConfig`](crate::FormConfig).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The brand table has no entries.
    EmptyBrandTable,

    /// The same brand appears twice in the table.
    DuplicateBrand(CardBrand),

    /// `CardBrand::Unknown` cannot be given a table entry.
    UnknownBrandEntry,

    /// A descriptor lists no accepted lengths.
    NoLengths(CardBrand),

    /// A descriptor accepts a length outside the card number range.
    LengthOutOfRange {
        /// The offending brand.
        brand: CardBrand,
        /// The rejected length.
        length: u8,
    },

    /// A descriptor has no prefix ranges.
    NoPrefixes(CardBrand),

    /// A prefix range is empty, too wide, or has bounds with more digits than its width.
    InvalidPrefix {
        /// The offending brand.
        brand: CardBrand,
        /// Range start.
        start: u32,
        /// Range end.
        end: u32,
        /// Number of leading digits compared.
        width: u8,
    },

    /// CVC length must be 3 or 4.
    InvalidCvcLength {
        /// The offending brand.
        brand: CardBrand,
        /// The rejected length.
        length: u8,
    },

    /// A grouping pattern is empty or contains a zero-sized group.
    InvalidGrouping(CardBrand),

    /// The postal code limits are inconsistent (zero max, or min above max).
    InvalidPostalLength {
        /// Configured minimum.
        min: usize,
        /// Configured maximum.
        max: usize,
    },

    /// The brand table could not be parsed.
    Parse(String),

    /// The brand table file could not be read.
    Io(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyBrandTable => write!(f, "brand table is empty"),

            Self::DuplicateBrand(brand) => {
                write!(f, "brand {} appears more than once in the table", brand)
            }

            Self::UnknownBrandEntry => {
                write!(f, "the unknown brand cannot have a table entry")
            }

            Self::NoLengths(brand) => write!(f, "{} lists no accepted lengths", brand),

            Self::LengthOutOfRange { brand, length } => {
                write!(
                    f,
                    "{} accepts length {}, outside {}..={}",
                    brand,
                    length,
                    crate::MIN_CARD_DIGITS,
                    crate::MAX_CARD_DIGITS
                )
            }

            Self::NoPrefixes(brand) => write!(f, "{} lists no prefix ranges", brand),

            Self::InvalidPrefix {
                brand,
                start,
                end,
                width,
            } => {
                write!(
                    f,
                    "{} has an invalid prefix range {}-{} over {} digits",
                    brand, start, end, width
                )
            }

            Self::InvalidCvcLength { brand, length } => {
                write!(f, "{} has CVC length {}, expected 3 or 4", brand, length)
            }

            Self::InvalidGrouping(brand) => {
                write!(f, "{} has an empty grouping or a zero-sized group", brand)
            }

            Self::InvalidPostalLength { min, max } => {
                write!(
                    f,
                    "postal code length limits are inconsistent: min {}, max {}",
                    min, max
                )
            }

            Self::Parse(msg) => write!(f, "brand table parse error: {}", msg),

            Self::Io(msg) => write!(f, "brand table read error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Errors raised by the form controller for events it cannot apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// An event named a field that does not exist.
    UnknownField(String),
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownField(name) => {
                write!(f, "unknown form field '{}'", name.escape_default())
            }
        }
    }
}

impl std::error::Error for FormError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(ConfigError::EmptyBrandTable.to_string(), "brand table is empty");

        assert_eq!(
            ConfigError::InvalidCvcLength {
                brand: CardBrand::Visa,
                length: 5
            }
            .to_string(),
            "Visa has CVC length 5, expected 3 or 4"
        );

        assert_eq!(
            ConfigError::LengthOutOfRange {
                brand: CardBrand::Amex,
                length: 25
            }
            .to_string(),
            "American Express accepts length 25, outside 12..=19"
        );

        assert_eq!(
            FormError::UnknownField("zip".to_string()).to_string(),
            "unknown form field 'zip'"
        );
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ConfigError>();
        assert_send_sync::<FormError>();
    }
}
