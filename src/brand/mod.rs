//! Brand descriptor tables.
//!
//! Each card network is described by data rather than branching logic: the
//! prefix ranges that identify it, the number lengths it accepts, its CVC
//! length and how its number is grouped for display. A [`BrandTable`] is an
//! ordered list of such descriptors; detection, formatting and validation all
//! read from it, so adding or adjusting a brand never touches control flow.
//!
//! # Default table
//!
//! | Brand | Prefix | Length | CVC | Grouping |
//! |-------|--------|--------|-----|----------|
//! | Visa | 4 | 13, 16, 19 | 3 | 4-4-4-4 |
//! | Mastercard | 51-55, 2221-2720 | 16 | 3 | 4-4-4-4 |
//! | American Express | 34, 37 | 15 | 4 | 4-6-5 |
//! | Discover | 6011, 644-649, 65 | 16-19 | 3 | 4-4-4-4 |
//! | Diners Club | 300-305, 309, 36, 38 | 14-19 | 3 | 4-6-4 |
//! | JCB | 3528-3589 | 16-19 | 3 | 4-4-4-4 |
//! | UnionPay | 62 | 16-19 | 3 | 4-4-4-4 |
//! | Maestro | 50, 56-58, 60-61, 63, 66-69 | 12-19 | 3 | 4-4-4-4 |
//! | Mir | 2200-2204 | 16-19 | 3 | 4-4-4-4 |
//! | RuPay | 81-82 | 16 | 3 | 4-4-4-4 |
//! | Verve | 506-507 | 16-19 | 3 | 4-4-4-4 |
//! | Elo | 509, 6362-6363 | 16 | 3 | 4-4-4-4 |
//! | Troy | 9792 | 16 | 3 | 4-4-4-4 |
//! | BC Card | 94 | 16 | 3 | 4-4-4-4 |
//!
//! Digits past the end of a grouping pattern continue in groups of four.
//!
//! # Example
//!
//! ```
//! use cc_form::brand::{BrandDescriptor, BrandTable, PrefixRange};
//! use cc_form::CardBrand;
//!
//! let table = BrandTable::default();
//! assert_eq!(table.cvc_length(CardBrand::Amex), 4);
//! assert_eq!(table.max_length(CardBrand::Mastercard), 16);
//!
//! // A table with a single, custom brand.
//! let custom = BrandTable::new(vec![BrandDescriptor::new(
//!     CardBrand::Troy,
//!     vec!["9792".parse::<PrefixRange>().unwrap()],
//!     vec![16],
//!     3,
//!     vec![4, 4, 4, 4],
//! )])
//! .unwrap();
//! assert_eq!(custom.len(), 1);
//! ```

#[cfg(feature = "brand-json")]
mod json;

use crate::error::ConfigError;
use crate::{CardBrand, MAX_CARD_DIGITS, MIN_CARD_DIGITS};
use std::fmt;
use std::str::FromStr;

/// CVC length assumed while the brand is unknown.
pub const UNKNOWN_CVC_LENGTH: usize = 3;

/// Widest prefix a range may compare.
pub const MAX_PREFIX_WIDTH: u8 = 6;

const POW10: [u32; 7] = [1, 10, 100, 1_000, 10_000, 100_000, 1_000_000];

/// A range of leading digits, e.g. `2221-2720` over the first 4 digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct PrefixRange {
    start: u32,
    end: u32,
    width: u8,
}

impl PrefixRange {
    /// Creates a range over the first `width` digits.
    ///
    /// Returns `None` if the range is empty, wider than [`MAX_PREFIX_WIDTH`],
    /// or if `end` has more than `width` digits.
    pub fn new(start: u32, end: u32, width: u8) -> Option<Self> {
        if width == 0 || width > MAX_PREFIX_WIDTH || start > end || end >= POW10[width as usize] {
            return None;
        }
        Some(Self { start, end, width })
    }

    /// Creates a range matching one exact prefix, e.g. `single(6011, 4)`.
    pub fn single(prefix: u32, width: u8) -> Option<Self> {
        Self::new(prefix, prefix, width)
    }

    /// Number of leading digits compared.
    #[inline]
    pub const fn width(&self) -> u8 {
        self.width
    }

    /// Range start.
    #[inline]
    pub const fn start(&self) -> u32 {
        self.start
    }

    /// Range end (inclusive).
    #[inline]
    pub const fn end(&self) -> u32 {
        self.end
    }

    /// Returns true if the first `width` digits fall inside the range.
    ///
    /// Inputs shorter than the width never match.
    #[inline]
    pub fn matches(&self, digits: &[u8]) -> bool {
        let width = self.width as usize;
        if digits.len() < width {
            return false;
        }
        let mut value: u32 = 0;
        for &d in &digits[..width] {
            value = value * 10 + d as u32;
        }
        (self.start..=self.end).contains(&value)
    }
}

impl fmt::Display for PrefixRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let w = self.width as usize;
        if self.start == self.end {
            write!(f, "{:0w$}", self.start, w = w)
        } else {
            write!(f, "{:0w$}-{:0w$}", self.start, self.end, w = w)
        }
    }
}

/// Parses `"4"`, `"6011"` or `"2221-2720"`. The width is the digit count of
/// the first bound; both bounds must have the same number of digits.
impl FromStr for PrefixRange {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (lo, hi) = s.split_once('-').unwrap_or((s, s));
        let (lo, hi) = (lo.trim(), hi.trim());
        let bad = || ConfigError::Parse(format!("invalid prefix range '{}'", s.escape_default()));

        if lo.is_empty()
            || lo.len() != hi.len()
            || !lo.bytes().chain(hi.bytes()).all(|b| b.is_ascii_digit())
        {
            return Err(bad());
        }
        let width = u8::try_from(lo.len()).map_err(|_| bad())?;
        let start: u32 = lo.parse().map_err(|_| bad())?;
        let end: u32 = hi.parse().map_err(|_| bad())?;
        Self::new(start, end, width).ok_or_else(bad)
    }
}

impl TryFrom<String> for PrefixRange {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PrefixRange> for String {
    fn from(range: PrefixRange) -> Self {
        range.to_string()
    }
}

/// Everything the form needs to know about one card brand.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BrandDescriptor {
    /// The brand this entry describes.
    pub brand: CardBrand,
    /// Leading-digit ranges identifying the brand.
    pub prefixes: Vec<PrefixRange>,
    /// Accepted number lengths, ascending.
    pub lengths: Vec<u8>,
    /// Required CVC length.
    pub cvc_length: u8,
    /// Display group sizes, e.g. `[4, 6, 5]` for Amex.
    pub grouping: Vec<u8>,
}

impl BrandDescriptor {
    /// Creates a descriptor. Lengths are sorted; nothing else is checked
    /// until the descriptor is placed in a [`BrandTable`].
    pub fn new(
        brand: CardBrand,
        prefixes: Vec<PrefixRange>,
        mut lengths: Vec<u8>,
        cvc_length: u8,
        grouping: Vec<u8>,
    ) -> Self {
        lengths.sort_unstable();
        lengths.dedup();
        Self {
            brand,
            prefixes,
            lengths,
            cvc_length,
            grouping,
        }
    }

    /// Longest accepted number length.
    #[inline]
    pub fn max_length(&self) -> usize {
        self.lengths.last().map_or(MAX_CARD_DIGITS, |&l| l as usize)
    }

    /// Returns true if `length` is one of the accepted lengths.
    #[inline]
    pub fn accepts_length(&self, length: usize) -> bool {
        self.lengths.iter().any(|&l| l as usize == length)
    }

    /// Widest prefix range of this brand.
    #[inline]
    pub fn widest_prefix(&self) -> u8 {
        self.prefixes.iter().map(|p| p.width).max().unwrap_or(0)
    }

    fn check(&self) -> Result<(), ConfigError> {
        let brand = self.brand;
        if brand.is_unknown() {
            return Err(ConfigError::UnknownBrandEntry);
        }
        if self.prefixes.is_empty() {
            return Err(ConfigError::NoPrefixes(brand));
        }
        if let Some(bad) = self
            .prefixes
            .iter()
            .find(|p| PrefixRange::new(p.start, p.end, p.width).is_none())
        {
            return Err(ConfigError::InvalidPrefix {
                brand,
                start: bad.start,
                end: bad.end,
                width: bad.width,
            });
        }
        if self.lengths.is_empty() {
            return Err(ConfigError::NoLengths(brand));
        }
        if let Some(&length) = self
            .lengths
            .iter()
            .find(|&&l| !(MIN_CARD_DIGITS..=MAX_CARD_DIGITS).contains(&(l as usize)))
        {
            return Err(ConfigError::LengthOutOfRange { brand, length });
        }
        if !(3..=4).contains(&self.cvc_length) {
            return Err(ConfigError::InvalidCvcLength {
                brand,
                length: self.cvc_length,
            });
        }
        if self.grouping.is_empty() || self.grouping.contains(&0) {
            return Err(ConfigError::InvalidGrouping(brand));
        }
        Ok(())
    }
}

/// An ordered, validated list of brand descriptors.
///
/// Order matters only for ties: when two ranges of the same width match, the
/// earlier entry wins. Wider ranges always beat narrower ones.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<BrandDescriptor>", into = "Vec<BrandDescriptor>")
)]
pub struct BrandTable {
    entries: Vec<BrandDescriptor>,
    widest_prefix: u8,
}

impl BrandTable {
    /// Builds a table, rejecting malformed or duplicate entries.
    pub fn new(mut entries: Vec<BrandDescriptor>) -> Result<Self, ConfigError> {
        if entries.is_empty() {
            return Err(ConfigError::EmptyBrandTable);
        }
        for entry in entries.iter_mut() {
            entry.lengths.sort_unstable();
            entry.lengths.dedup();
            entry.check()?;
        }
        for (i, entry) in entries.iter().enumerate() {
            if entries[..i].iter().any(|e| e.brand == entry.brand) {
                return Err(ConfigError::DuplicateBrand(entry.brand));
            }
        }
        let widest_prefix = entries.iter().map(|e| e.widest_prefix()).max().unwrap_or(0);
        Ok(Self {
            entries,
            widest_prefix,
        })
    }

    /// Descriptors in table order.
    #[inline]
    pub fn entries(&self) -> &[BrandDescriptor] {
        &self.entries
    }

    /// Number of brands in the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: an empty table cannot be built.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Widest prefix range across all brands. Once this many digits have been
    /// typed without a match, no brand can match any more.
    #[inline]
    pub fn widest_prefix(&self) -> usize {
        self.widest_prefix as usize
    }

    /// Looks up the descriptor for a brand.
    #[inline]
    pub fn descriptor(&self, brand: CardBrand) -> Option<&BrandDescriptor> {
        self.entries.iter().find(|e| e.brand == brand)
    }

    /// Longest number accepted for `brand`; [`MAX_CARD_DIGITS`] when the
    /// brand is unknown or missing from the table.
    #[inline]
    pub fn max_length(&self, brand: CardBrand) -> usize {
        self.descriptor(brand)
            .map_or(MAX_CARD_DIGITS, BrandDescriptor::max_length)
    }

    /// CVC length for `brand`; [`UNKNOWN_CVC_LENGTH`] when unknown.
    #[inline]
    pub fn cvc_length(&self, brand: CardBrand) -> usize {
        self.descriptor(brand)
            .map_or(UNKNOWN_CVC_LENGTH, |d| d.cvc_length as usize)
    }

    /// Display grouping for `brand`; groups of four when unknown.
    #[inline]
    pub fn grouping(&self, brand: CardBrand) -> &[u8] {
        self.descriptor(brand)
            .map_or(&STANDARD_GROUPING[..], |d| d.grouping.as_slice())
    }
}

impl Default for BrandTable {
    fn default() -> Self {
        let entries = default_entries();
        let widest_prefix = entries.iter().map(|e| e.widest_prefix()).max().unwrap_or(0);
        Self {
            entries,
            widest_prefix,
        }
    }
}

impl TryFrom<Vec<BrandDescriptor>> for BrandTable {
    type Error = ConfigError;

    fn try_from(entries: Vec<BrandDescriptor>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<BrandTable> for Vec<BrandDescriptor> {
    fn from(table: BrandTable) -> Self {
        table.entries
    }
}

const STANDARD_GROUPING: [u8; 4] = [4, 4, 4, 4];

const fn range(start: u32, end: u32, width: u8) -> PrefixRange {
    PrefixRange { start, end, width }
}

fn entry(
    brand: CardBrand,
    prefixes: &[PrefixRange],
    lengths: &[u8],
    cvc_length: u8,
    grouping: &[u8],
) -> BrandDescriptor {
    BrandDescriptor {
        brand,
        prefixes: prefixes.to_vec(),
        lengths: lengths.to_vec(),
        cvc_length,
        grouping: grouping.to_vec(),
    }
}

fn default_entries() -> Vec<BrandDescriptor> {
    const LONG: &[u8] = &[16, 17, 18, 19];
    let fours = &STANDARD_GROUPING[..];
    vec![
        entry(CardBrand::Visa, &[range(4, 4, 1)], &[13, 16, 19], 3, fours),
        entry(
            CardBrand::Mastercard,
            &[range(51, 55, 2), range(2221, 2720, 4)],
            &[16],
            3,
            fours,
        ),
        entry(CardBrand::Amex, &[range(34, 34, 2), range(37, 37, 2)], &[15], 4, &[4, 6, 5]),
        entry(
            CardBrand::Discover,
            &[range(6011, 6011, 4), range(644, 649, 3), range(65, 65, 2)],
            LONG,
            3,
            fours,
        ),
        entry(
            CardBrand::DinersClub,
            &[range(300, 305, 3), range(309, 309, 3), range(36, 36, 2), range(38, 38, 2)],
            &[14, 15, 16, 17, 18, 19],
            3,
            &[4, 6, 4],
        ),
        entry(CardBrand::Jcb, &[range(3528, 3589, 4)], LONG, 3, fours),
        entry(CardBrand::UnionPay, &[range(62, 62, 2)], LONG, 3, fours),
        entry(
            CardBrand::Maestro,
            &[
                range(50, 50, 2),
                range(56, 58, 2),
                range(60, 61, 2),
                range(63, 63, 2),
                range(66, 69, 2),
            ],
            &[12, 13, 14, 15, 16, 17, 18, 19],
            3,
            fours,
        ),
        entry(CardBrand::Mir, &[range(2200, 2204, 4)], LONG, 3, fours),
        entry(CardBrand::RuPay, &[range(81, 82, 2)], &[16], 3, fours),
        entry(CardBrand::Verve, &[range(506, 507, 3)], LONG, 3, fours),
        entry(
            CardBrand::Elo,
            &[range(509, 509, 3), range(6362, 6363, 4)],
            &[16],
            3,
            fours,
        ),
        entry(CardBrand::Troy, &[range(9792, 9792, 4)], &[16], 3, fours),
        entry(CardBrand::BcCard, &[range(94, 94, 2)], &[16], 3, fours),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_is_well_formed() {
        let table = BrandTable::default();
        assert_eq!(BrandTable::new(table.entries().to_vec()).unwrap(), table);
        assert_eq!(table.len(), 14);
        assert_eq!(table.widest_prefix(), 4);
    }

    #[test]
    fn test_brand_lengths() {
        let table = BrandTable::default();
        let visa = table.descriptor(CardBrand::Visa).unwrap();
        assert!(visa.accepts_length(16));
        assert!(visa.accepts_length(19));
        assert!(!visa.accepts_length(15));
        assert!(visa.accepts_length(13));
        assert!(!visa.accepts_length(18));

        let amex = table.descriptor(CardBrand::Amex).unwrap();
        assert!(amex.accepts_length(15));
        assert!(!amex.accepts_length(16));

        assert_eq!(table.max_length(CardBrand::Mastercard), 16);
        assert_eq!(table.max_length(CardBrand::Unknown), MAX_CARD_DIGITS);
    }

    #[test]
    fn test_cvc_lengths() {
        let table = BrandTable::default();
        assert_eq!(table.cvc_length(CardBrand::Amex), 4);
        assert_eq!(table.cvc_length(CardBrand::Visa), 3);
        assert_eq!(table.cvc_length(CardBrand::Unknown), UNKNOWN_CVC_LENGTH);
    }

    #[test]
    fn test_grouping() {
        let table = BrandTable::default();
        assert_eq!(table.grouping(CardBrand::Amex), &[4, 6, 5]);
        assert_eq!(table.grouping(CardBrand::Unknown), &[4, 4, 4, 4]);
    }

    #[test]
    fn test_prefix_range_parse() {
        let r: PrefixRange = "2221-2720".parse().unwrap();
        assert_eq!((r.start(), r.end(), r.width()), (2221, 2720, 4));
        assert_eq!(r.to_string(), "2221-2720");

        let r: PrefixRange = "4".parse().unwrap();
        assert_eq!((r.start(), r.end(), r.width()), (4, 4, 1));
        assert_eq!(r.to_string(), "4");

        assert!("".parse::<PrefixRange>().is_err());
        assert!("55-51".parse::<PrefixRange>().is_err());
        assert!("5-55".parse::<PrefixRange>().is_err());
        assert!("4a".parse::<PrefixRange>().is_err());
        assert!("1234567".parse::<PrefixRange>().is_err());
    }

    #[test]
    fn test_prefix_range_leading_zero_display() {
        let r = PrefixRange::new(1, 9, 2).unwrap();
        assert_eq!(r.to_string(), "01-09");
    }

    #[test]
    fn test_prefix_range_matches() {
        let r = PrefixRange::new(2221, 2720, 4).unwrap();
        assert!(r.matches(&[2, 2, 2, 1]));
        assert!(r.matches(&[2, 7, 2, 0, 9, 9]));
        assert!(!r.matches(&[2, 7, 2, 1]));
        // Too short to compare.
        assert!(!r.matches(&[2, 2, 2]));
    }

    #[test]
    fn test_rejects_empty_table() {
        assert_eq!(BrandTable::new(vec![]), Err(ConfigError::EmptyBrandTable));
    }

    #[test]
    fn test_rejects_duplicate_brand() {
        let visa = BrandTable::default().descriptor(CardBrand::Visa).unwrap().clone();
        let err = BrandTable::new(vec![visa.clone(), visa]).unwrap_err();
        assert_eq!(err, ConfigError::DuplicateBrand(CardBrand::Visa));
    }

    #[test]
    fn test_rejects_malformed_descriptors() {
        let base = BrandDescriptor::new(
            CardBrand::Troy,
            vec![PrefixRange::single(9792, 4).unwrap()],
            vec![16],
            3,
            vec![4, 4, 4, 4],
        );

        let mut d = base.clone();
        d.lengths.clear();
        assert_eq!(BrandTable::new(vec![d]), Err(ConfigError::NoLengths(CardBrand::Troy)));

        let mut d = base.clone();
        d.lengths = vec![25];
        assert!(matches!(
            BrandTable::new(vec![d]),
            Err(ConfigError::LengthOutOfRange { length: 25, .. })
        ));

        let mut d = base.clone();
        d.cvc_length = 5;
        assert!(matches!(
            BrandTable::new(vec![d]),
            Err(ConfigError::InvalidCvcLength { length: 5, .. })
        ));

        let mut d = base.clone();
        d.grouping = vec![4, 0, 4];
        assert_eq!(
            BrandTable::new(vec![d]),
            Err(ConfigError::InvalidGrouping(CardBrand::Troy))
        );

        let mut d = base.clone();
        d.prefixes.clear();
        assert_eq!(BrandTable::new(vec![d]), Err(ConfigError::NoPrefixes(CardBrand::Troy)));

        let mut d = base;
        d.brand = CardBrand::Unknown;
        assert_eq!(BrandTable::new(vec![d]), Err(ConfigError::UnknownBrandEntry));
    }
}
