//! Canonical field keys and the label-to-key mapping

use serde::{Deserialize, Serialize};
use std::fmt;

/// The standard personal-data fields and their fixed canonical keys.
///
/// Every extractor that emits one of these labels and the aggregation
/// engine that groups by key share this table, so the mapping stays
/// injective: two distinct labels never collapse into the same key.
pub const STANDARD_FIELDS: [(&str, &str); 12] = [
    ("First name", "firstName"),
    ("Last name", "lastName"),
    ("Middle name", "middleName"),
    ("Date of birth", "dateOfBirth"),
    ("Social Security Number", "socialSecurityNumber"),
    ("Phone number", "phoneNumber"),
    ("Email address", "emailAddress"),
    ("Home address", "homeAddress"),
    ("Employment status", "employmentStatus"),
    ("Annual income", "annualIncome"),
    ("Employer name", "employerName"),
    ("Job title", "jobTitle"),
];

/// Canonical camelCase key for a tracked field
///
/// Keys are produced from human-readable labels by [`FieldKey::from_label`]:
/// the fixed table above for the standard fields, otherwise a generic
/// camelCase conversion. Canonical keys are fixed points of the conversion,
/// so re-canonicalizing a key is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldKey(String);

impl FieldKey {
    /// Wrap an already-canonical key without conversion
    ///
    /// Primarily for deserialization and tests; use [`FieldKey::from_label`]
    /// for anything that originated as a human-readable label.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Canonicalize a human-readable label into a field key
    ///
    /// Standard labels resolve through the fixed table. Anything else gets
    /// the generic conversion: lowercase the first letter, capitalize each
    /// subsequent word's first letter, and drop the whitespace between
    /// words.
    ///
    /// # Examples
    ///
    /// ```
    /// use gleaner_domain::FieldKey;
    ///
    /// assert_eq!(FieldKey::from_label("Phone number").as_str(), "phoneNumber");
    /// assert_eq!(FieldKey::from_label("Account Balance").as_str(), "accountBalance");
    /// ```
    pub fn from_label(label: &str) -> Self {
        for (fixed_label, key) in STANDARD_FIELDS {
            if label == fixed_label {
                return Self(key.to_string());
            }
        }

        let mut words = label.split_whitespace();
        let mut key = String::with_capacity(label.len());
        if let Some(first) = words.next() {
            let mut chars = first.chars();
            if let Some(c) = chars.next() {
                key.extend(c.to_lowercase());
                key.push_str(chars.as_str());
            }
        }
        for word in words {
            let mut chars = word.chars();
            if let Some(c) = chars.next() {
                key.extend(c.to_uppercase());
                key.push_str(chars.as_str());
            }
        }
        Self(key)
    }

    /// Get the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for FieldKey {
    fn from(label: &str) -> Self {
        Self::from_label(label)
    }
}
