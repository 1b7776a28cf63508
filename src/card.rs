//! Card networks and the form's field vocabulary.
//!
//! This module provides the `CardBrand` enum identifying card networks,
//! the `FieldKind` enum naming the five form fields, and `FieldStatus`,
//! the per-field validation state views render as icons and colors.

use std::fmt;
use std::str::FromStr;

/// Supported credit card brands/networks.
///
/// The prefix ranges, accepted lengths, CVC length and display grouping of
/// each brand live in a [`BrandTable`](crate::brand::BrandTable), not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CardBrand {
    /// Visa
    Visa,
    /// Mastercard
    Mastercard,
    /// American Express
    Amex,
    /// Discover
    Discover,
    /// Diners Club
    #[cfg_attr(feature = "serde", serde(rename = "diners"))]
    DinersClub,
    /// JCB
    Jcb,
    /// UnionPay
    UnionPay,
    /// Maestro
    Maestro,
    /// Mir - Russian payment system
    Mir,
    /// RuPay - Indian payment system
    RuPay,
    /// Verve - Nigerian payment system
    Verve,
    /// Elo - Brazilian payment system
    Elo,
    /// Troy - Turkish payment system
    Troy,
    /// BC Card - South Korean payment system
    BcCard,
    /// No table entry matched (or nothing has been typed yet).
    Unknown,
}

impl CardBrand {
    /// Every brand, `Unknown` last.
    pub const ALL: [CardBrand; 15] = [
        Self::Visa,
        Self::Mastercard,
        Self::Amex,
        Self::Discover,
        Self::DinersClub,
        Self::Jcb,
        Self::UnionPay,
        Self::Maestro,
        Self::Mir,
        Self::RuPay,
        Self::Verve,
        Self::Elo,
        Self::Troy,
        Self::BcCard,
        Self::Unknown,
    ];

    /// Returns a human-readable name for the card brand.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Visa => "Visa",
            Self::Mastercard => "Mastercard",
            Self::Amex => "American Express",
            Self::Discover => "Discover",
            Self::DinersClub => "Diners Club",
            Self::Jcb => "JCB",
            Self::UnionPay => "UnionPay",
            Self::Maestro => "Maestro",
            Self::Mir => "Mir",
            Self::RuPay => "RuPay",
            Self::Verve => "Verve",
            Self::Elo => "Elo",
            Self::Troy => "Troy",
            Self::BcCard => "BC Card",
            Self::Unknown => "Unknown",
        }
    }

    /// Returns the short identifier views use to pick a brand icon.
    #[inline]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Visa => "visa",
            Self::Mastercard => "mastercard",
            Self::Amex => "amex",
            Self::Discover => "discover",
            Self::DinersClub => "diners",
            Self::Jcb => "jcb",
            Self::UnionPay => "unionpay",
            Self::Maestro => "maestro",
            Self::Mir => "mir",
            Self::RuPay => "rupay",
            Self::Verve => "verve",
            Self::Elo => "elo",
            Self::Troy => "troy",
            Self::BcCard => "bccard",
            Self::Unknown => "unknown",
        }
    }

    /// Returns true for `CardBrand::Unknown`.
    #[inline]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}

impl fmt::Display for CardBrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for CardBrand {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|b| b.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownName(s.to_string()))
    }
}

/// Maximum number of digits in a credit card number.
pub const MAX_CARD_DIGITS: usize = 19;

/// Minimum number of digits in a credit card number.
pub const MIN_CARD_DIGITS: usize = 12;

/// The five fields of the card form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum FieldKind {
    /// Card holder name.
    Name,
    /// Card number.
    Number,
    /// Expiry date, `MM/YY`.
    Expiry,
    /// Card verification code.
    Cvc,
    /// Billing postal code.
    PostalCode,
}

impl FieldKind {
    /// All fields in display order.
    pub const ALL: [FieldKind; 5] = [
        Self::Name,
        Self::Number,
        Self::Expiry,
        Self::Cvc,
        Self::PostalCode,
    ];

    /// Wire name used by view layers (`postalCode`, not `postal_code`).
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Number => "number",
            Self::Expiry => "expiry",
            Self::Cvc => "cvc",
            Self::PostalCode => "postalCode",
        }
    }

    #[inline]
    pub(crate) const fn index(&self) -> usize {
        *self as usize
    }

    /// Returns true for fields that carry card data which must never be logged.
    #[inline]
    pub const fn is_sensitive(&self) -> bool {
        matches!(self, Self::Number | Self::Cvc)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownName(s.to_string()))
    }
}

/// A name that matched no `FieldKind` or `CardBrand`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownName(pub String);

impl fmt::Display for UnknownName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown name '{}'", self.0.escape_default())
    }
}

impl std::error::Error for UnknownName {}

/// Validation state of a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FieldStatus {
    /// Empty or still being typed.
    #[default]
    Incomplete,
    /// Complete and correct.
    Valid,
    /// Cannot become valid without deleting input.
    Invalid,
}

impl FieldStatus {
    /// Lowercase name, as rendered by view layers.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Incomplete => "incomplete",
            Self::Valid => "valid",
            Self::Invalid => "invalid",
        }
    }

    /// Returns true for `FieldStatus::Valid`.
    #[inline]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

impl fmt::Display for FieldStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_brand_names() {
        assert_eq!(CardBrand::Visa.name(), "Visa");
        assert_eq!(CardBrand::Amex.name(), "American Express");
        assert_eq!(CardBrand::Mastercard.to_string(), "Mastercard");
        assert_eq!(CardBrand::DinersClub.id(), "diners");
    }

    #[test]
    fn test_card_brand_from_str() {
        assert_eq!("visa".parse::<CardBrand>().unwrap(), CardBrand::Visa);
        assert_eq!("AMEX".parse::<CardBrand>().unwrap(), CardBrand::Amex);
        assert_eq!("diners".parse::<CardBrand>().unwrap(), CardBrand::DinersClub);
        assert!("hipercard".parse::<CardBrand>().is_err());
    }

    #[test]
    fn test_field_kind_wire_names() {
        for kind in FieldKind::ALL {
            assert_eq!(kind.as_str().parse::<FieldKind>().unwrap(), kind);
        }
        assert_eq!(FieldKind::PostalCode.to_string(), "postalCode");
        assert!("postal_code".parse::<FieldKind>().is_err());
    }

    #[test]
    fn test_field_kind_index_matches_display_order() {
        for (i, kind) in FieldKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn test_status_default_is_incomplete() {
        assert_eq!(FieldStatus::default(), FieldStatus::Incomplete);
        assert!(FieldStatus::Valid.is_valid());
        assert!(!FieldStatus::Invalid.is_valid());
    }

    #[test]
    fn test_types_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CardBrand>();
        assert_send_sync::<FieldKind>();
        assert_send_sync::<FieldStatus>();
    }
}
