// 🔍 Deduplication Engine - Drop exact duplicate output rows
//
// Full-row equality on the projected output schema, nothing fuzzier. Two
// records that only differ in their raw codes but resolve to the same labels
// collapse into one; that is the intended behavior.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;

// ============================================================================
// DUPLICATE MATCH RESULT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateMatch {
    /// Index of the first occurrence (kept)
    pub kept_index: usize,

    /// Index of the later, identical row (dropped)
    pub duplicate_index: usize,
}

// ============================================================================
// DEDUPLICATION ENGINE
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct DeduplicationEngine;

impl DeduplicationEngine {
    pub fn new() -> Self {
        DeduplicationEngine
    }

    /// Find every row that repeats an earlier one
    pub fn find_duplicates<T: Eq + Hash>(&self, rows: &[T]) -> Vec<DuplicateMatch> {
        let mut first_seen: HashMap<&T, usize> = HashMap::with_capacity(rows.len());
        let mut matches = Vec::new();

        for (index, row) in rows.iter().enumerate() {
            match first_seen.get(row) {
                Some(&kept_index) => matches.push(DuplicateMatch {
                    kept_index,
                    duplicate_index: index,
                }),
                None => {
                    first_seen.insert(row, index);
                }
            }
        }

        matches
    }

    /// Keep the first occurrence of each row, preserving order
    pub fn deduplicate<T: Eq + Hash + Clone>(&self, rows: Vec<T>) -> Vec<T> {
        let duplicates = self.find_duplicates(&rows);
        if duplicates.is_empty() {
            return rows;
        }

        let mut drop = vec![false; rows.len()];
        for m in &duplicates {
            drop[m.duplicate_index] = true;
        }

        rows.into_iter()
            .zip(drop)
            .filter_map(|(row, dropped)| if dropped { None } else { Some(row) })
            .collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_duplicates_detected() {
        let engine = DeduplicationEngine::new();
        let rows = vec!["a", "b", "a", "c", "a"];

        let matches = engine.find_duplicates(&rows);

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0], DuplicateMatch { kept_index: 0, duplicate_index: 2 });
        assert_eq!(matches[1], DuplicateMatch { kept_index: 0, duplicate_index: 4 });
    }

    #[test]
    fn test_deduplicate_preserves_first_order() {
        let engine = DeduplicationEngine::new();
        let rows = vec![3, 1, 3, 2, 1];

        assert_eq!(engine.deduplicate(rows), vec![3, 1, 2]);
    }

    #[test]
    fn test_no_duplicates_untouched() {
        let engine = DeduplicationEngine::new();
        let rows = vec![("1", "Hire"), ("1", "Termination")];

        assert!(engine.find_duplicates(&rows).is_empty());
        assert_eq!(engine.deduplicate(rows.clone()), rows);
    }
}
