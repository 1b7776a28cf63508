//! JSON brand table loader.
//!
//! Loads a [`BrandTable`] from JSON so new brands or adjusted ranges can
//! ship as data.
//!
//! # Feature
//!
//! Requires the `brand-json` feature.
//!
//! # Supported Formats
//!
//! ## Array format
//!
//! ```json
//! [
//!   {
//!     "brand": "visa",
//!     "prefixes": ["4"],
//!     "lengths": [13, 16, 19],
//!     "cvc_length": 3,
//!     "grouping": [4, 4, 4, 4]
//!   }
//! ]
//! ```
//!
//! ## Object format (keyed by brand)
//!
//! ```json
//! {
//!   "amex": {
//!     "prefixes": ["34", "37"],
//!     "lengths": [15],
//!     "cvc_length": 4,
//!     "grouping": [4, 6, 5]
//!   }
//! }
//! ```
//!
//! Object keys are applied in document order, so tie-breaking between
//! equally wide prefixes follows the file.

use super::{BrandDescriptor, BrandTable, PrefixRange};
use crate::error::ConfigError;
use crate::CardBrand;
use serde::Deserialize;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Entry shape used by the object format, where the brand is the key.
#[derive(Debug, Deserialize)]
struct KeyedEntry {
    prefixes: Vec<PrefixRange>,
    lengths: Vec<u8>,
    cvc_length: u8,
    #[serde(default = "default_grouping")]
    grouping: Vec<u8>,
}

fn default_grouping() -> Vec<u8> {
    vec![4, 4, 4, 4]
}

impl BrandTable {
    /// Loads a brand table from a JSON file.
    ///
    /// Automatically detects the JSON format (array or object).
    ///
    /// ```rust,ignore
    /// use cc_form::brand::BrandTable;
    ///
    /// let table = BrandTable::from_json_file("brands.json")?;
    /// ```
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<BrandTable, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Loads a brand table from a reader.
    pub fn from_json_reader<R: Read>(mut reader: R) -> Result<BrandTable, ConfigError> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Self::from_json(&content)
    }

    /// Loads a brand table from a JSON string.
    pub fn from_json(json: &str) -> Result<BrandTable, ConfigError> {
        let trimmed = json.trim();

        if trimmed.starts_with('[') {
            parse_array(trimmed)
        } else if trimmed.starts_with('{') {
            parse_object(trimmed)
        } else {
            Err(ConfigError::Parse(
                "expected a JSON array or object".to_string(),
            ))
        }
    }

    /// Serializes the table in array format.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self.entries())
            .map_err(|e| ConfigError::Parse(format!("JSON encode error: {}", e)))
    }
}

fn parse_array(json: &str) -> Result<BrandTable, ConfigError> {
    let entries: Vec<BrandDescriptor> = serde_json::from_str(json)
        .map_err(|e| ConfigError::Parse(format!("JSON parse error: {}", e)))?;
    BrandTable::new(entries)
}

fn parse_object(json: &str) -> Result<BrandTable, ConfigError> {
    // serde_json::Map keeps keys sorted unless `preserve_order` is enabled,
    // so walk the document with a streaming visitor instead.
    let keyed: Vec<(String, KeyedEntry)> = ordered_entries(json)?;

    let mut entries = Vec::with_capacity(keyed.len());
    for (key, entry) in keyed {
        let brand: CardBrand = key
            .parse()
            .map_err(|e| ConfigError::Parse(format!("{}", e)))?;
        entries.push(BrandDescriptor::new(
            brand,
            entry.prefixes,
            entry.lengths,
            entry.cvc_length,
            entry.grouping,
        ));
    }
    BrandTable::new(entries)
}

fn ordered_entries(json: &str) -> Result<Vec<(String, KeyedEntry)>, ConfigError> {
    use serde::de::{Deserializer, MapAccess, Visitor};
    use std::fmt;

    struct OrderedVisitor;

    impl<'de> Visitor<'de> for OrderedVisitor {
        type Value = Vec<(String, KeyedEntry)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an object keyed by brand")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut out = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((key, value)) = map.next_entry::<String, KeyedEntry>()? {
                out.push((key, value));
            }
            Ok(out)
        }
    }

    let mut de = serde_json::Deserializer::from_str(json);
    let entries = (&mut de)
        .deserialize_map(OrderedVisitor)
        .map_err(|e| ConfigError::Parse(format!("JSON parse error: {}", e)))?;
    de.end()
        .map_err(|e| ConfigError::Parse(format!("JSON parse error: {}", e)))?;
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::detect_brand_str;

    #[test]
    fn test_parse_array_format() {
        let json = r#"[
            {"brand": "visa", "prefixes": ["4"], "lengths": [16], "cvc_length": 3, "grouping": [4, 4, 4, 4]},
            {"brand": "amex", "prefixes": ["34", "37"], "lengths": [15], "cvc_length": 4, "grouping": [4, 6, 5]}
        ]"#;

        let table = BrandTable::from_json(json).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.cvc_length(CardBrand::Amex), 4);
        assert_eq!(detect_brand_str(&table, "4111"), CardBrand::Visa);
    }

    #[test]
    fn test_parse_object_format_keeps_order() {
        let json = r#"{
            "troy": {"prefixes": ["9792"], "lengths": [16], "cvc_length": 3},
            "bccard": {"prefixes": ["94"], "lengths": [16], "cvc_length": 3}
        }"#;

        let table = BrandTable::from_json(json).unwrap();
        assert_eq!(table.entries()[0].brand, CardBrand::Troy);
        assert_eq!(table.entries()[1].brand, CardBrand::BcCard);
        assert_eq!(table.grouping(CardBrand::Troy), &[4, 4, 4, 4]);
    }

    #[test]
    fn test_round_trip_default_table() {
        let table = BrandTable::default();
        let json = table.to_json().unwrap();
        assert_eq!(BrandTable::from_json(&json).unwrap(), table);
    }

    #[test]
    fn test_malformed_entry_rejected() {
        let json = r#"[{"brand": "visa", "prefixes": ["4"], "lengths": [], "cvc_length": 3, "grouping": [4]}]"#;
        assert_eq!(
            BrandTable::from_json(json),
            Err(ConfigError::NoLengths(CardBrand::Visa))
        );

        let json = r#"[{"brand": "visa", "prefixes": ["4-"], "lengths": [16], "cvc_length": 3, "grouping": [4]}]"#;
        assert!(matches!(BrandTable::from_json(json), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_unknown_brand_key_rejected() {
        let json = r#"{"hipercard": {"prefixes": ["606282"], "lengths": [16], "cvc_length": 3}}"#;
        assert!(matches!(BrandTable::from_json(json), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_invalid_document() {
        assert!(matches!(BrandTable::from_json("42"), Err(ConfigError::Parse(_))));
        assert!(matches!(BrandTable::from_json("[{"), Err(ConfigError::Parse(_))));
    }
}
