//! Form configuration.
//!
//! A [`FormConfig`] is consumed once, when a [`CardForm`](crate::CardForm)
//! is constructed. It decides which optional fields are required, carries the
//! label and placeholder text handed to views, the brand table, and the
//! postal code and expiry options used by the validator.
//!
//! # Example
//!
//! ```
//! use cc_form::{FieldKind, FormConfig, PostalAlphabet};
//!
//! let config = FormConfig::builder()
//!     .requires_name(true)
//!     .requires_postal_code(true)
//!     .postal_code_alphabet(PostalAlphabet::Numeric)
//!     .postal_code_max_length(5)
//!     .label(FieldKind::PostalCode, "ZIP")
//!     .build()
//!     .unwrap();
//!
//! assert!(config.is_required(FieldKind::Name));
//! assert!(config.is_required(FieldKind::Number));
//! assert_eq!(config.labels.get(FieldKind::PostalCode), "ZIP");
//! assert_eq!(config.placeholders.get(FieldKind::Expiry), "MM/YY");
//! ```

use crate::brand::BrandTable;
use crate::error::ConfigError;
use crate::{FieldKind, FieldStatus};

/// Default maximum postal code length.
pub const DEFAULT_POSTAL_CODE_MAX_LENGTH: usize = 6;

/// Default horizon, in years, for accepted expiry dates.
pub const DEFAULT_MAX_EXPIRY_YEARS: u16 = 20;

/// Characters a postal code may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PostalAlphabet {
    /// ASCII letters and digits.
    #[default]
    Alphanumeric,
    /// ASCII digits only.
    Numeric,
}

impl PostalAlphabet {
    /// Returns true if `c` belongs to the alphabet.
    #[inline]
    pub const fn allows(&self, c: char) -> bool {
        match self {
            Self::Alphanumeric => c.is_ascii_alphanumeric(),
            Self::Numeric => c.is_ascii_digit(),
        }
    }
}

/// One piece of text per field, e.g. labels or placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct FieldText {
    /// Text for the name field.
    pub name: String,
    /// Text for the number field.
    pub number: String,
    /// Text for the expiry field.
    pub expiry: String,
    /// Text for the CVC field.
    pub cvc: String,
    /// Text for the postal code field.
    pub postal_code: String,
}

impl FieldText {
    /// The default field labels.
    pub fn default_labels() -> Self {
        Self {
            name: "NAME".to_string(),
            number: "CARD NUMBER".to_string(),
            expiry: "EXPIRY".to_string(),
            cvc: "CVC/CCV".to_string(),
            postal_code: "POSTAL CODE".to_string(),
        }
    }

    /// The default field placeholders.
    pub fn default_placeholders() -> Self {
        Self {
            name: "Full name".to_string(),
            number: "1234 5678 1234 5678".to_string(),
            expiry: "MM/YY".to_string(),
            cvc: "CVC".to_string(),
            postal_code: "34567".to_string(),
        }
    }

    /// Text for `field`.
    pub fn get(&self, field: FieldKind) -> &str {
        match field {
            FieldKind::Name => &self.name,
            FieldKind::Number => &self.number,
            FieldKind::Expiry => &self.expiry,
            FieldKind::Cvc => &self.cvc,
            FieldKind::PostalCode => &self.postal_code,
        }
    }

    /// Replaces the text for `field`.
    pub fn set(&mut self, field: FieldKind, text: impl Into<String>) {
        let slot = match field {
            FieldKind::Name => &mut self.name,
            FieldKind::Number => &mut self.number,
            FieldKind::Expiry => &mut self.expiry,
            FieldKind::Cvc => &mut self.cvc,
            FieldKind::PostalCode => &mut self.postal_code,
        };
        *slot = text.into();
    }
}

/// Custom postal code rule. Receives the formatted value, never empty.
pub type PostalCodeRule = fn(&str) -> FieldStatus;

/// Configuration consumed by [`CardForm::new`](crate::CardForm::new).
///
/// With the `serde` feature, missing keys take their defaults and the result
/// is checked with [`FormConfig::validate`] while deserializing.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct FormConfig {
    /// Whether the holder name must be valid for the form to be valid.
    pub requires_name: bool,
    /// Whether the CVC must be valid for the form to be valid.
    pub requires_cvc: bool,
    /// Whether the postal code must be valid for the form to be valid.
    pub requires_postal_code: bool,
    /// Field labels handed to views.
    pub labels: FieldText,
    /// Field placeholders handed to views.
    pub placeholders: FieldText,
    /// Brand descriptors used for detection, formatting and validation.
    pub brands: BrandTable,
    /// Postal codes are truncated to this many characters.
    pub postal_code_max_length: usize,
    /// Postal codes shorter than this are incomplete.
    pub postal_code_min_length: usize,
    /// Characters a postal code may contain.
    pub postal_code_alphabet: PostalAlphabet,
    /// Replaces the built-in postal code check when set.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub postal_code_rule: Option<PostalCodeRule>,
    /// Names are truncated to this many characters when set.
    pub name_max_length: Option<usize>,
    /// Expiry dates further ahead than this many years are invalid.
    pub max_expiry_years: Option<u16>,
    /// Panic on misuse (unknown field names) instead of ignoring it.
    pub strict: bool,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            requires_name: false,
            requires_cvc: true,
            requires_postal_code: false,
            labels: FieldText::default_labels(),
            placeholders: FieldText::default_placeholders(),
            brands: BrandTable::default(),
            postal_code_max_length: DEFAULT_POSTAL_CODE_MAX_LENGTH,
            postal_code_min_length: 1,
            postal_code_alphabet: PostalAlphabet::default(),
            postal_code_rule: None,
            name_max_length: None,
            max_expiry_years: Some(DEFAULT_MAX_EXPIRY_YEARS),
            strict: cfg!(debug_assertions),
        }
    }
}

impl FormConfig {
    /// Starts a builder from the defaults.
    pub fn builder() -> FormConfigBuilder {
        FormConfigBuilder {
            config: Self::default(),
        }
    }

    /// Returns true if `field` must be valid for the form to be valid.
    ///
    /// Number and expiry are always required.
    #[inline]
    pub fn is_required(&self, field: FieldKind) -> bool {
        match field {
            FieldKind::Number | FieldKind::Expiry => true,
            FieldKind::Name => self.requires_name,
            FieldKind::Cvc => self.requires_cvc,
            FieldKind::PostalCode => self.requires_postal_code,
        }
    }

    /// Required fields in display order.
    pub fn required_fields(&self) -> impl Iterator<Item = FieldKind> + '_ {
        FieldKind::ALL.into_iter().filter(|&f| self.is_required(f))
    }

    /// Checks the options that cannot be expressed by the types alone.
    ///
    /// The brand table is already validated when it is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (min, max) = (self.postal_code_min_length, self.postal_code_max_length);
        if max == 0 || min == 0 || min > max {
            return Err(ConfigError::InvalidPostalLength { min, max });
        }
        Ok(())
    }
}

/// Wire form of [`FormConfig`]: every key is optional.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct FormConfigInput {
    requires_name: Option<bool>,
    requires_cvc: Option<bool>,
    requires_postal_code: Option<bool>,
    labels: Option<FieldText>,
    placeholders: Option<FieldText>,
    brands: Option<BrandTable>,
    postal_code_max_length: Option<usize>,
    postal_code_min_length: Option<usize>,
    postal_code_alphabet: Option<PostalAlphabet>,
    name_max_length: Option<usize>,
    // `null` disables the horizon, a missing key keeps the default.
    #[serde(default = "default_max_expiry_years")]
    max_expiry_years: Option<u16>,
    strict: Option<bool>,
}

#[cfg(feature = "serde")]
fn default_max_expiry_years() -> Option<u16> {
    Some(DEFAULT_MAX_EXPIRY_YEARS)
}

#[cfg(feature = "serde")]
impl FormConfigInput {
    fn into_config(self) -> Result<FormConfig, ConfigError> {
        let defaults = FormConfig::default();
        let config = FormConfig {
            requires_name: self.requires_name.unwrap_or(defaults.requires_name),
            requires_cvc: self.requires_cvc.unwrap_or(defaults.requires_cvc),
            requires_postal_code: self
                .requires_postal_code
                .unwrap_or(defaults.requires_postal_code),
            labels: self.labels.unwrap_or(defaults.labels),
            placeholders: self.placeholders.unwrap_or(defaults.placeholders),
            brands: self.brands.unwrap_or(defaults.brands),
            postal_code_max_length: self
                .postal_code_max_length
                .unwrap_or(defaults.postal_code_max_length),
            postal_code_min_length: self
                .postal_code_min_length
                .unwrap_or(defaults.postal_code_min_length),
            postal_code_alphabet: self
                .postal_code_alphabet
                .unwrap_or(defaults.postal_code_alphabet),
            postal_code_rule: None,
            name_max_length: self.name_max_length,
            max_expiry_years: self.max_expiry_years,
            strict: self.strict.unwrap_or(defaults.strict),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for FormConfig {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <FormConfigInput as serde::Deserialize>::deserialize(deserializer)?
            .into_config()
            .map_err(serde::de::Error::custom)
    }
}

/// Builder for [`FormConfig`].
#[derive(Debug, Clone)]
pub struct FormConfigBuilder {
    config: FormConfig,
}

impl FormConfigBuilder {
    /// Requires a valid holder name.
    pub fn requires_name(mut self, yes: bool) -> Self {
        self.config.requires_name = yes;
        self
    }

    /// Requires a valid CVC.
    pub fn requires_cvc(mut self, yes: bool) -> Self {
        self.config.requires_cvc = yes;
        self
    }

    /// Requires a valid postal code.
    pub fn requires_postal_code(mut self, yes: bool) -> Self {
        self.config.requires_postal_code = yes;
        self
    }

    /// Overrides the label of one field.
    pub fn label(mut self, field: FieldKind, text: impl Into<String>) -> Self {
        self.config.labels.set(field, text);
        self
    }

    /// Overrides the placeholder of one field.
    pub fn placeholder(mut self, field: FieldKind, text: impl Into<String>) -> Self {
        self.config.placeholders.set(field, text);
        self
    }

    /// Replaces the brand table.
    pub fn brands(mut self, table: BrandTable) -> Self {
        self.config.brands = table;
        self
    }

    /// Sets the postal code truncation length.
    pub fn postal_code_max_length(mut self, length: usize) -> Self {
        self.config.postal_code_max_length = length;
        self
    }

    /// Sets the minimum complete postal code length.
    pub fn postal_code_min_length(mut self, length: usize) -> Self {
        self.config.postal_code_min_length = length;
        self
    }

    /// Sets the postal code alphabet.
    pub fn postal_code_alphabet(mut self, alphabet: PostalAlphabet) -> Self {
        self.config.postal_code_alphabet = alphabet;
        self
    }

    /// Replaces the built-in postal code check.
    pub fn postal_code_rule(mut self, rule: PostalCodeRule) -> Self {
        self.config.postal_code_rule = Some(rule);
        self
    }

    /// Truncates names to `length` characters.
    pub fn name_max_length(mut self, length: usize) -> Self {
        self.config.name_max_length = Some(length);
        self
    }

    /// Sets (or with `None`, disables) the expiry horizon.
    pub fn max_expiry_years(mut self, years: Option<u16>) -> Self {
        self.config.max_expiry_years = years;
        self
    }

    /// Panic on misuse instead of ignoring it.
    pub fn strict(mut self, strict: bool) -> Self {
        self.config.strict = strict;
        self
    }

    /// Validates and returns the configuration.
    pub fn build(self) -> Result<FormConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FormConfig::default();
        assert!(!config.requires_name);
        assert!(config.requires_cvc);
        assert!(!config.requires_postal_code);
        assert_eq!(config.postal_code_max_length, 6);
        assert_eq!(config.max_expiry_years, Some(20));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_required_fields() {
        let config = FormConfig::default();
        let required: Vec<_> = config.required_fields().collect();
        assert_eq!(
            required,
            vec![FieldKind::Number, FieldKind::Expiry, FieldKind::Cvc]
        );

        let config = FormConfig::builder()
            .requires_cvc(false)
            .requires_name(true)
            .build()
            .unwrap();
        let required: Vec<_> = config.required_fields().collect();
        assert_eq!(
            required,
            vec![FieldKind::Name, FieldKind::Number, FieldKind::Expiry]
        );
    }

    #[test]
    fn test_default_text() {
        let labels = FieldText::default_labels();
        assert_eq!(labels.get(FieldKind::Number), "CARD NUMBER");
        assert_eq!(labels.get(FieldKind::Cvc), "CVC/CCV");

        let placeholders = FieldText::default_placeholders();
        assert_eq!(placeholders.get(FieldKind::Number), "1234 5678 1234 5678");
        assert_eq!(placeholders.get(FieldKind::PostalCode), "34567");
    }

    #[test]
    fn test_text_overrides() {
        let config = FormConfig::builder()
            .label(FieldKind::Name, "CARDHOLDER")
            .placeholder(FieldKind::Name, "As printed")
            .build()
            .unwrap();
        assert_eq!(config.labels.get(FieldKind::Name), "CARDHOLDER");
        assert_eq!(config.placeholders.get(FieldKind::Name), "As printed");
        assert_eq!(config.labels.get(FieldKind::Expiry), "EXPIRY");
    }

    #[test]
    fn test_rejects_bad_postal_limits() {
        let err = FormConfig::builder()
            .postal_code_max_length(0)
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::InvalidPostalLength { min: 1, max: 0 });

        let err = FormConfig::builder()
            .postal_code_min_length(7)
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::InvalidPostalLength { min: 7, max: 6 });
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_deserialize_fills_defaults() {
        let config: FormConfig =
            serde_json::from_str(r#"{"requiresPostalCode": true, "postalCodeAlphabet": "numeric"}"#)
                .unwrap();
        assert!(config.requires_postal_code);
        assert!(config.requires_cvc);
        assert_eq!(config.postal_code_alphabet, PostalAlphabet::Numeric);
        assert_eq!(config.max_expiry_years, Some(20));
        assert_eq!(config.labels, FieldText::default_labels());

        let config: FormConfig = serde_json::from_str(r#"{"maxExpiryYears": null}"#).unwrap();
        assert_eq!(config.max_expiry_years, None);
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_deserialize_rejects_bad_postal_limits() {
        let err = serde_json::from_str::<FormConfig>(
            r#"{"postalCodeMinLength": 7, "postalCodeMaxLength": 5}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("postal"), "{}", err);

        assert!(serde_json::from_str::<FormConfig>(r#"{"postalCodeMaxLength": 0}"#).is_err());
        assert!(serde_json::from_str::<FormConfig>(r#"{"requiresZip": true}"#).is_err());
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_serialized_config_reads_back() {
        let config = FormConfig::builder()
            .requires_name(true)
            .postal_code_min_length(5)
            .build()
            .unwrap();
        let json = serde_json::to_string(&config).unwrap();
        let back: FormConfig = serde_json::from_str(&json).unwrap();
        assert!(back.requires_name);
        assert_eq!(back.postal_code_min_length, 5);
        assert_eq!(back.brands, config.brands);
    }

    #[test]
    fn test_postal_alphabet() {
        assert!(PostalAlphabet::Alphanumeric.allows('A'));
        assert!(PostalAlphabet::Alphanumeric.allows('7'));
        assert!(!PostalAlphabet::Alphanumeric.allows('-'));
        assert!(PostalAlphabet::Numeric.allows('7'));
        assert!(!PostalAlphabet::Numeric.allows('A'));
    }
}
