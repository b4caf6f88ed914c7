// 🗺️ Code Mapping - Raw client codes -> human-readable labels
//
// Two dictionaries per employment run: action codes (from the client's
// lookup sheet) and job family codes (fixed below). Built once, read-only
// afterwards. A code the dictionary doesn't know resolves to Not Mapped.

use crate::error::{IngestError, Result};
use crate::labels::MappedLabel;
use crate::parser::ActionCodeRow;
use std::collections::HashMap;

/// Department labels for JKU job family codes
const JOB_FAMILY_CODES: [(&str, &str); 4] = [
    ("JKU01", "Real Estate"),
    ("JKU02", "Litigation"),
    ("JKU03", "Tax"),
    // TODO: confirm the JKU04 department name with the client; passes through for now
    ("JKU04", "JKU04"),
];

#[derive(Debug, Clone, Default)]
pub struct CodeMapping {
    entries: HashMap<String, String>,
}

impl CodeMapping {
    /// Create mapping from (code, label) pairs. Later duplicates win.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entries = pairs
            .into_iter()
            .map(|(code, label)| (code.into(), label.into()))
            .collect();
        CodeMapping { entries }
    }

    /// Build the action code dictionary from the lookup sheet
    ///
    /// Rows missing either the code or the reason are skipped. A lookup with
    /// no usable rows is an error.
    pub fn action_codes(rows: &[ActionCodeRow], source: &str) -> Result<Self> {
        let mapping = CodeMapping::from_pairs(rows.iter().filter_map(|row| {
            match (row.action.as_deref(), row.reason.as_deref()) {
                (Some(code), Some(reason)) if !code.is_empty() && !reason.is_empty() => {
                    Some((code, reason))
                }
                _ => None,
            }
        }));

        if mapping.is_empty() {
            return Err(IngestError::EmptyLookup {
                file: source.to_string(),
            });
        }

        Ok(mapping)
    }

    pub fn job_family() -> Self {
        CodeMapping::from_pairs(JOB_FAMILY_CODES)
    }

    pub fn get(&self, code: &str) -> Option<&str> {
        self.entries.get(code).map(String::as_str)
    }

    /// Resolve a raw code; absent or unknown codes become `NotMapped`, and so
    /// does a lookup label that itself reads "Not Mapped"
    pub fn resolve(&self, code: Option<&str>) -> MappedLabel {
        code.and_then(|c| self.get(c))
            .map(|label| MappedLabel::from(label.to_string()))
            .unwrap_or(MappedLabel::NotMapped)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn code_row(action: Option<&str>, reason: Option<&str>) -> ActionCodeRow {
        ActionCodeRow {
            action: action.map(str::to_string),
            reason: reason.map(str::to_string),
        }
    }

    #[test]
    fn test_action_codes_resolve() {
        let rows = vec![
            code_row(Some("HIR"), Some("Hire")),
            code_row(Some("TER"), Some("Termination")),
        ];
        let mapping = CodeMapping::action_codes(&rows, "codes.csv").unwrap();

        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.resolve(Some("HIR")), MappedLabel::hire());
        assert_eq!(
            mapping.resolve(Some("TER")),
            MappedLabel::Label("Termination".to_string())
        );
    }

    #[test]
    fn test_unknown_and_absent_codes_not_mapped() {
        let mapping = CodeMapping::from_pairs([("HIR", "Hire")]);

        assert_eq!(mapping.resolve(Some("XYZ")), MappedLabel::NotMapped);
        assert_eq!(mapping.resolve(None), MappedLabel::NotMapped);
        assert_eq!(mapping.resolve(Some("XYZ")).to_string(), "Not Mapped");
    }

    #[test]
    fn test_not_mapped_label_in_lookup_is_sentinel() {
        let mapping = CodeMapping::from_pairs([("HIR", "Hire"), ("UNK", "Not Mapped")]);

        assert_eq!(mapping.resolve(Some("UNK")), MappedLabel::NotMapped);
        assert_eq!(mapping.resolve(Some("UNK")), mapping.resolve(Some("ZZZ")));
    }

    #[test]
    fn test_empty_lookup_is_error() {
        let err = CodeMapping::action_codes(&[], "codes.csv").unwrap_err();
        assert!(matches!(err, IngestError::EmptyLookup { .. }));
    }

    #[test]
    fn test_lookup_with_only_blank_rows_is_error() {
        let rows = vec![code_row(None, Some("Hire")), code_row(Some("HIR"), None)];
        assert!(CodeMapping::action_codes(&rows, "codes.csv").is_err());
    }

    #[test]
    fn test_duplicate_codes_last_wins() {
        let rows = vec![
            code_row(Some("HIR"), Some("Rehire")),
            code_row(Some("HIR"), Some("Hire")),
        ];
        let mapping = CodeMapping::action_codes(&rows, "codes.csv").unwrap();
        assert_eq!(mapping.get("HIR"), Some("Hire"));
    }

    #[test]
    fn test_job_family_mapping() {
        let mapping = CodeMapping::job_family();

        assert_eq!(mapping.get("JKU01"), Some("Real Estate"));
        assert_eq!(mapping.get("JKU02"), Some("Litigation"));
        assert_eq!(mapping.get("JKU03"), Some("Tax"));
        assert_eq!(mapping.get("JKU04"), Some("JKU04"));
        assert_eq!(mapping.resolve(Some("JKU99")), MappedLabel::NotMapped);
    }
}
