// 🏷️ Labels & Sentinels - Typed values for every normalized column
//
// "Not Specified", "Conflicting" and "Not Mapped" are enum variants, not
// string literals, so a typo cannot invent a new category. Each type
// serializes to its display string and parses back from it.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const NOT_SPECIFIED: &str = "Not Specified";
pub const CONFLICTING: &str = "Conflicting";
pub const NOT_MAPPED: &str = "Not Mapped";

/// Action label that marks the start of an employee's tenure
pub const HIRE_ACTION: &str = "Hire";

// ============================================================================
// CANONICAL GENDER
// ============================================================================

/// Single gender value reconciled from two independently reported sources
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CanonicalGender {
    /// Both sources reported "F"
    Female,

    /// Both sources reported "M"
    Male,

    /// Passed through unexpanded (one source only, or an equal non-F/M code)
    Reported(String),

    /// Neither source reported a value
    NotSpecified,

    /// Both sources reported different values
    Conflicting,
}

impl CanonicalGender {
    pub fn as_str(&self) -> &str {
        match self {
            CanonicalGender::Female => "female",
            CanonicalGender::Male => "male",
            CanonicalGender::Reported(value) => value,
            CanonicalGender::NotSpecified => NOT_SPECIFIED,
            CanonicalGender::Conflicting => CONFLICTING,
        }
    }

    /// True for the two sentinels that need manual review
    pub fn is_unresolved(&self) -> bool {
        matches!(
            self,
            CanonicalGender::NotSpecified | CanonicalGender::Conflicting
        )
    }
}

impl fmt::Display for CanonicalGender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl From<String> for CanonicalGender {
    fn from(value: String) -> Self {
        match value.as_str() {
            "female" => CanonicalGender::Female,
            "male" => CanonicalGender::Male,
            NOT_SPECIFIED => CanonicalGender::NotSpecified,
            CONFLICTING => CanonicalGender::Conflicting,
            _ => CanonicalGender::Reported(value),
        }
    }
}

impl From<CanonicalGender> for String {
    fn from(gender: CanonicalGender) -> Self {
        gender.as_str().to_string()
    }
}

// ============================================================================
// ETHNICITY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Ethnicity {
    Reported(String),
    NotSpecified,
}

impl Ethnicity {
    /// Missing, blank or literal "Not Specified" values collapse to the sentinel
    pub fn from_optional(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if !v.is_empty() && v != NOT_SPECIFIED => Ethnicity::Reported(v.to_string()),
            _ => Ethnicity::NotSpecified,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Ethnicity::Reported(value) => value,
            Ethnicity::NotSpecified => NOT_SPECIFIED,
        }
    }

    pub fn is_specified(&self) -> bool {
        !matches!(self, Ethnicity::NotSpecified)
    }
}

impl fmt::Display for Ethnicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl From<String> for Ethnicity {
    fn from(value: String) -> Self {
        Ethnicity::from_optional(Some(&value))
    }
}

impl From<Ethnicity> for String {
    fn from(ethnicity: Ethnicity) -> Self {
        ethnicity.as_str().to_string()
    }
}

// ============================================================================
// MAPPED LABEL
// ============================================================================

/// Result of looking a raw code up in a `CodeMapping`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MappedLabel {
    Label(String),
    NotMapped,
}

impl MappedLabel {
    pub fn hire() -> Self {
        MappedLabel::Label(HIRE_ACTION.to_string())
    }

    pub fn as_str(&self) -> &str {
        match self {
            MappedLabel::Label(label) => label,
            MappedLabel::NotMapped => NOT_MAPPED,
        }
    }

    pub fn is_hire(&self) -> bool {
        matches!(self, MappedLabel::Label(label) if label == HIRE_ACTION)
    }

    pub fn is_mapped(&self) -> bool {
        matches!(self, MappedLabel::Label(_))
    }
}

impl fmt::Display for MappedLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl From<String> for MappedLabel {
    fn from(value: String) -> Self {
        if value == NOT_MAPPED || value.trim().is_empty() {
            MappedLabel::NotMapped
        } else {
            MappedLabel::Label(value)
        }
    }
}

impl From<MappedLabel> for String {
    fn from(label: MappedLabel) -> Self {
        label.as_str().to_string()
    }
}

// ============================================================================
// TESTS
// ============================================================================
