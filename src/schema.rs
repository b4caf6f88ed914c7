// 📐 Shape Layer - Expected headers for every input table
//
// Source exports are only schema'd by convention. Checking headers up front
// turns a missing column into a named error instead of a confusing
// deserialization failure several rows in.

use crate::error::{IngestError, Result};

// ============================================================================
// COLUMN NAMES
// ============================================================================

pub const EMPLOYEE_ID: &str = "EMPLID";
pub const GENDER: &str = "GENDER";
pub const ETHNICITY: &str = "ETHNIC_DESC";
pub const ACTION: &str = "ACTION";
pub const JOB_FAMILY: &str = "JOB_FAMILY";
pub const EFFECTIVE_DATE: &str = "EFFDT";
pub const LOOKUP_CODE: &str = "action";
pub const LOOKUP_LABEL: &str = "action reason";

/// Output headers for the cleaned employee tables
pub const EMPLOYEE_OUTPUT_HEADERS: [&str; 4] = ["employee_id", "Gender", "ethnicity", "unique_key"];

/// Output headers for the cleaned employment table
pub const EMPLOYMENT_OUTPUT_HEADERS: [&str; 5] =
    ["Employee ID", "Action", "Date", "Department", "Unique Key"];

// ============================================================================
// TABLE SCHEMA
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    pub name: &'static str,
    pub required: &'static [&'static str],
}

/// Demographics export. GENDER and ETHNIC_DESC may be absent from either file.
pub const EMPLOYEE_TABLE: TableSchema = TableSchema {
    name: "employees",
    required: &[EMPLOYEE_ID],
};

pub const JOB_TABLE: TableSchema = TableSchema {
    name: "jobs",
    required: &[EMPLOYEE_ID, ACTION, JOB_FAMILY, EFFECTIVE_DATE],
};

pub const ACTION_CODE_TABLE: TableSchema = TableSchema {
    name: "action codes",
    required: &[LOOKUP_CODE, LOOKUP_LABEL],
};

pub const EMPLOYMENT_OUTPUT_TABLE: TableSchema = TableSchema {
    name: "employment output",
    required: &EMPLOYMENT_OUTPUT_HEADERS,
};

impl TableSchema {
    /// Fail on the first required column the header row does not contain
    pub fn validate_headers(&self, file: &str, headers: &csv::StringRecord) -> Result<()> {
        for column in self.required {
            if !headers.iter().any(|h| h.trim() == *column) {
                return Err(IngestError::MissingColumn {
                    file: file.to_string(),
                    column: column.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_headers_valid() {
        let headers =
            csv::StringRecord::from(vec!["EMPLID", "ACTION", "JOB_FAMILY", "EFFDT", "EXTRA"]);
        assert!(JOB_TABLE.validate_headers("jobs.csv", &headers).is_ok());
    }

    #[test]
    fn test_missing_column_is_named() {
        let headers = csv::StringRecord::from(vec!["EMPLID", "ACTION", "EFFDT"]);
        let err = JOB_TABLE.validate_headers("jobs.csv", &headers).unwrap_err();

        match err {
            IngestError::MissingColumn { file, column } => {
                assert_eq!(file, "jobs.csv");
                assert_eq!(column, "JOB_FAMILY");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_employee_table_only_requires_id() {
        let headers = csv::StringRecord::from(vec!["EMPLID"]);
        assert!(EMPLOYEE_TABLE.validate_headers("e.csv", &headers).is_ok());
    }
}
