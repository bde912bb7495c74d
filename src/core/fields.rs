//! Form field primitives shared by every entity validator.
//!
//! A form arrives as a flat mapping of field name to raw string. Validators read it
//! through a [`FormReader`], which trims values, checks required/length rules, and
//! collects every failure so the caller can display all of them at once.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Raw form input: field name to the string the user typed
pub type RawFields = BTreeMap<String, String>;

/// Maximum length of short text fields, in characters
pub const MAX_SHORT_LEN: usize = 256;

/// Maximum length of free-text fields (notes, descriptions), in characters
pub const MAX_TEXT_LEN: usize = 1024;

/// Maximum length of city and country names
pub const MAX_PLACE_LEN: usize = 128;

/// Maximum length of company registration numbers (IČO, DIČ)
pub const MAX_REGISTRATION_LEN: usize = 32;

/// Why a single field was rejected
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum FieldError {
    /// Blank after trimming
    Required,
    /// Longer than `max` characters after trimming
    TooLong {
        /// Maximum accepted length
        max: usize,
    },
    /// Present but not in an accepted format
    Invalid,
}

impl FieldError {
    /// Suffix used to build the message-table key for this error
    #[must_use]
    pub const fn key_suffix(self) -> &'static str {
        match self {
            Self::Required => "Required",
            Self::TooLong { .. } => "TooLong",
            Self::Invalid => "Invalid",
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => f.write_str("required"),
            Self::TooLong { max } => write!(f, "longer than {max} characters"),
            Self::Invalid => f.write_str("invalid"),
        }
    }
}

/// Field-level errors of one form, keyed by field name
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<&'static str, FieldError>);

impl FieldErrors {
    /// Records `error` for `field`. The first error recorded for a field wins.
    pub fn insert(&mut self, field: &'static str, error: FieldError) {
        self.0.entry(field).or_insert(error);
    }

    /// Error recorded for `field`, if any
    #[must_use]
    pub fn get(&self, field: &str) -> Option<FieldError> {
        self.0.get(field).copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Names of the failing fields, sorted
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, FieldError)> + '_ {
        self.0.iter().map(|(field, error)| (*field, *error))
    }
}

/// Reads fields out of a [`RawFields`] mapping while collecting errors.
///
/// Accessors always return a value, even for failing fields, so a validator can read
/// every field before deciding. [`FormReader::finish`] only hands out the payload when
/// nothing failed.
pub struct FormReader<'a> {
    raw: &'a RawFields,
    errors: FieldErrors,
}

impl<'a> FormReader<'a> {
    #[must_use]
    pub fn new(raw: &'a RawFields) -> Self {
        Self {
            raw,
            errors: FieldErrors::default(),
        }
    }

    /// Trimmed value of `field`; a missing key reads as blank.
    #[must_use]
    pub fn trimmed(&self, field: &str) -> &'a str {
        self.raw.get(field).map_or("", |v| v.trim())
    }

    /// Records an error for `field`
    pub fn reject(&mut self, field: &'static str, error: FieldError) {
        self.errors.insert(field, error);
    }

    /// Required text: must be non-blank and at most `max` characters.
    pub fn required(&mut self, field: &'static str, max: usize) -> String {
        let value = self.trimmed(field);
        if value.is_empty() {
            self.reject(field, FieldError::Required);
        } else if value.chars().count() > max {
            self.reject(field, FieldError::TooLong { max });
        }
        value.to_string()
    }

    /// Optional text: blank becomes `None`, otherwise at most `max` characters.
    pub fn optional(&mut self, field: &'static str, max: usize) -> Option<String> {
        let value = self.trimmed(field);
        if value.is_empty() {
            return None;
        }
        if value.chars().count() > max {
            self.reject(field, FieldError::TooLong { max });
        }
        Some(value.to_string())
    }

    /// Checkbox-style flag. Blank reads as `false`.
    pub fn flag(&mut self, field: &'static str) -> bool {
        match self.trimmed(field).to_ascii_lowercase().as_str() {
            "" | "false" | "off" | "0" | "no" => false,
            "true" | "on" | "1" | "yes" => true,
            _ => {
                self.reject(field, FieldError::Invalid);
                false
            }
        }
    }

    /// Returns `payload` when no field failed, otherwise every recorded error.
    ///
    /// # Errors
    /// Returns the collected [`FieldErrors`] if at least one field was rejected.
    pub fn finish<T>(self, payload: T) -> Result<T, FieldErrors> {
        if self.errors.is_empty() {
            Ok(payload)
        } else {
            Err(self.errors)
        }
    }
}

/// Converts a `snake_case` field name to the `lowerCamel` form used by message keys.
#[must_use]
pub fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for ch in field.chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// Builds a [`RawFields`] mapping from `(field, value)` pairs.
pub fn raw_fields<I, K, V>(pairs: I) -> RawFields
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
