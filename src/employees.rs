// 👥 Employee Pipeline - Merge the two demographics exports
//
// Inner join on EMPLID, one canonical gender from the two reported values,
// ethnicity sentinel fill, unique key `{client}{employee_id}`. Employees
// present in only one export are dropped (logged, not an error).

use crate::config::IngestConfig;
use crate::deduplication::DeduplicationEngine;
use crate::error::Result;
use crate::export::write_table;
use crate::labels::{CanonicalGender, Ethnicity};
use crate::parser::{load_employee_table, EmployeeSourceRow};
use crate::schema::EMPLOYEE_OUTPUT_HEADERS;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, info, warn};

// ============================================================================
// RECORD TYPES
// ============================================================================

/// One employee after the join, before reconciliation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedEmployee {
    pub employee_id: String,
    /// GENDER as reported by the first export
    pub gender_x: Option<String>,
    /// GENDER as reported by the second export
    pub gender_y: Option<String>,
    pub ethnicity: Option<String>,
}

/// Cleaned employee row, in output column order
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub employee_id: String,

    #[serde(rename = "Gender")]
    pub gender: CanonicalGender,

    pub ethnicity: Ethnicity,
    pub unique_key: String,
}

impl EmployeeRecord {
    pub fn from_merged(merged: &MergedEmployee, client: &str) -> Self {
        EmployeeRecord {
            employee_id: merged.employee_id.clone(),
            gender: reconcile_gender(merged.gender_x.as_deref(), merged.gender_y.as_deref()),
            ethnicity: Ethnicity::from_optional(merged.ethnicity.as_deref()),
            unique_key: unique_key(client, &merged.employee_id),
        }
    }

    /// Gender or ethnicity could not be resolved from the sources
    pub fn needs_review(&self) -> bool {
        self.gender.is_unresolved() || !self.ethnicity.is_specified()
    }
}

// ============================================================================
// PURE TRANSFORMS
// ============================================================================

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Reconcile two independently reported gender codes
///
/// Precedence:
/// 1. both missing -> `NotSpecified`
/// 2. equal -> "F" => `Female`, "M" => `Male`, anything else unchanged
/// 3. one missing -> the other value, unexpanded
/// 4. both present and different -> `Conflicting`
///
/// Passed-through values that spell a sentinel ("Not Specified",
/// "Conflicting") or an expanded label map onto that variant.
pub fn reconcile_gender(gender_x: Option<&str>, gender_y: Option<&str>) -> CanonicalGender {
    match (present(gender_x), present(gender_y)) {
        (None, None) => CanonicalGender::NotSpecified,
        (Some(x), Some(y)) if x == y => match x {
            "F" => CanonicalGender::Female,
            "M" => CanonicalGender::Male,
            other => CanonicalGender::from(other.to_string()),
        },
        (None, Some(value)) | (Some(value), None) => CanonicalGender::from(value.to_string()),
        (Some(_), Some(_)) => CanonicalGender::Conflicting,
    }
}

/// `{client}{employee_id}`
pub fn unique_key(client: &str, employee_id: &str) -> String {
    format!("{}{}", client, employee_id)
}

/// Inner join of the two exports on employee id
///
/// Output follows the order of `file_one`. An id repeated in either file
/// yields one row per matching pair. Ethnicity comes from `file_one`, or
/// from `file_two` when the first export has none.
pub fn merge_datasets(
    file_one: &[EmployeeSourceRow],
    file_two: &[EmployeeSourceRow],
) -> Vec<MergedEmployee> {
    let mut right: HashMap<&str, Vec<&EmployeeSourceRow>> = HashMap::new();
    for row in file_two {
        let id = row.employee_id.trim();
        if !id.is_empty() {
            right.entry(id).or_default().push(row);
        }
    }

    let mut merged = Vec::new();
    for left in file_one {
        let id = left.employee_id.trim();
        let Some(matches) = right.get(id) else {
            continue;
        };

        for other in matches {
            merged.push(MergedEmployee {
                employee_id: id.to_string(),
                gender_x: left.gender.clone(),
                gender_y: other.gender.clone(),
                ethnicity: present(left.ethnicity.as_deref())
                    .or_else(|| present(other.ethnicity.as_deref()))
                    .map(str::to_string),
            });
        }
    }

    let dropped = unmatched_ids(file_one, file_two);
    if dropped > 0 {
        warn!(
            dropped,
            "employees present in only one export were dropped by the merge"
        );
    }

    merged
}

/// Distinct non-blank ids present in exactly one of the two exports
pub fn unmatched_ids(file_one: &[EmployeeSourceRow], file_two: &[EmployeeSourceRow]) -> usize {
    let ids = |rows: &[EmployeeSourceRow]| -> HashSet<String> {
        rows.iter()
            .map(|r| r.employee_id.trim())
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect()
    };

    ids(file_one).symmetric_difference(&ids(file_two)).count()
}

// ============================================================================
// EMPLOYEE PROCESSOR
// ============================================================================

pub struct EmployeeProcessor {
    client: String,
    file_one: Vec<EmployeeSourceRow>,
    file_two: Vec<EmployeeSourceRow>,
    records: Vec<EmployeeRecord>,
}

impl EmployeeProcessor {
    pub fn new(
        client: impl Into<String>,
        file_one: Vec<EmployeeSourceRow>,
        file_two: Vec<EmployeeSourceRow>,
    ) -> Self {
        EmployeeProcessor {
            client: client.into(),
            file_one,
            file_two,
            records: Vec::new(),
        }
    }

    /// Load both exports named in the config
    pub fn from_config(config: &IngestConfig) -> Result<Self> {
        let file_one = load_employee_table(&config.employees_file_one)?;
        let file_two = load_employee_table(&config.employees_file_two)?;

        info!(
            file_one = file_one.len(),
            file_two = file_two.len(),
            "loaded employee exports"
        );

        Ok(EmployeeProcessor::new(config.client.clone(), file_one, file_two))
    }

    /// Run merge -> reconcile -> key -> dedup and keep the result
    pub fn process(&mut self) -> &[EmployeeRecord] {
        let merged = merge_datasets(&self.file_one, &self.file_two);
        debug!(rows = merged.len(), "merged employee exports");

        let records: Vec<EmployeeRecord> = merged
            .iter()
            .map(|m| EmployeeRecord::from_merged(m, &self.client))
            .collect();

        self.records = DeduplicationEngine::new().deduplicate(records);

        let conflicting = self
            .records
            .iter()
            .filter(|r| r.gender == CanonicalGender::Conflicting)
            .count();
        if conflicting > 0 {
            warn!(conflicting, "employees have conflicting entries for gender");
        }

        info!(rows = self.records.len(), "employee data ready for ingestion");
        &self.records
    }

    pub fn records(&self) -> &[EmployeeRecord] {
        &self.records
    }

    /// Employees with unspecified or conflicting gender, or unspecified ethnicity
    pub fn review_subset(&self) -> Vec<EmployeeRecord> {
        self.records
            .iter()
            .filter(|r| r.needs_review())
            .cloned()
            .collect()
    }

    pub fn save_data(&self, path: &Path) -> Result<()> {
        write_table(path, &EMPLOYEE_OUTPUT_HEADERS, &self.records)
    }

    /// Write the review subset and return it
    pub fn save_review(&self, path: &Path) -> Result<Vec<EmployeeRecord>> {
        let review = self.review_subset();
        write_table(path, &EMPLOYEE_OUTPUT_HEADERS, &review)?;
        info!(rows = review.len(), "employees with unspecified gender or ethnicity");
        Ok(review)
    }
}

// ============================================================================
// TESTS
// ============================================================================
