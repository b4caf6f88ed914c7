// 🏗️ Parser - Read the client CSV exports into typed source rows
//
// Every table goes through the same path: open, check headers against its
// schema, deserialize each record. Values are trimmed on read and blank
// cells come through as `None`.

use crate::error::{IngestError, Result};
use crate::schema::{TableSchema, ACTION_CODE_TABLE, EMPLOYEE_TABLE, JOB_TABLE};
use chrono::NaiveDate;
use csv::{Reader, ReaderBuilder, Trim};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

// ============================================================================
// SOURCE ROWS
// ============================================================================

/// One row of an employee demographics export
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EmployeeSourceRow {
    #[serde(rename = "EMPLID")]
    pub employee_id: String,

    #[serde(rename = "GENDER", default)]
    pub gender: Option<String>,

    #[serde(rename = "ETHNIC_DESC", default)]
    pub ethnicity: Option<String>,
}

impl EmployeeSourceRow {
    pub fn new(employee_id: &str, gender: Option<&str>, ethnicity: Option<&str>) -> Self {
        EmployeeSourceRow {
            employee_id: employee_id.to_string(),
            gender: gender.map(str::to_string),
            ethnicity: ethnicity.map(str::to_string),
        }
    }
}

/// Raw job export row, before the effective date is parsed
#[derive(Debug, Clone, Deserialize)]
struct JobSourceRow {
    #[serde(rename = "EMPLID")]
    employee_id: String,

    #[serde(rename = "ACTION", default)]
    action: Option<String>,

    #[serde(rename = "JOB_FAMILY", default)]
    job_family: Option<String>,

    #[serde(rename = "EFFDT", default)]
    effective_date: String,
}

/// One job/action record with its effective date parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRecord {
    pub employee_id: String,
    pub action_code: Option<String>,
    pub job_family_code: Option<String>,
    pub effective_date: NaiveDate,
}

impl JobRecord {
    pub fn new(
        employee_id: &str,
        action_code: Option<&str>,
        job_family_code: Option<&str>,
        effective_date: NaiveDate,
    ) -> Self {
        JobRecord {
            employee_id: employee_id.to_string(),
            action_code: action_code.map(str::to_string),
            job_family_code: job_family_code.map(str::to_string),
            effective_date,
        }
    }
}

/// One row of the action code lookup sheet
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ActionCodeRow {
    #[serde(rename = "action", default)]
    pub action: Option<String>,

    #[serde(rename = "action reason", default)]
    pub reason: Option<String>,
}

// ============================================================================
// GENERIC TABLE READER
// ============================================================================

fn reader_builder() -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder.has_headers(true).trim(Trim::All);
    builder
}

fn open(path: &Path) -> Result<Reader<File>> {
    reader_builder()
        .from_path(path)
        .map_err(|source| IngestError::Open {
            path: path.display().to_string(),
            source,
        })
}

fn source_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown.csv")
        .to_string()
}

/// Read every record of a table, paired with its 1-indexed line number
pub fn read_table<R: Read, T: DeserializeOwned>(
    reader: &mut Reader<R>,
    source: &str,
    schema: &TableSchema,
) -> Result<Vec<(usize, T)>> {
    let headers = reader.headers()?.clone();
    schema.validate_headers(source, &headers)?;

    let mut rows = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(index + 2); // +2 because: 1-indexed + header row
        let row: T = record.deserialize(Some(&headers))?;
        rows.push((line, row));
    }

    debug!(source, table = schema.name, rows = rows.len(), "table loaded");
    Ok(rows)
}

/// Parse the EFFDT column (MM/DD/YYYY, ISO dates from re-exported sheets also accepted)
pub fn parse_effective_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, "%m/%d/%Y") {
        return Some(date);
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

// ============================================================================
// TABLE LOADERS
// ============================================================================

pub fn employee_table_from_reader<R: Read>(
    reader: R,
    source: &str,
) -> Result<Vec<EmployeeSourceRow>> {
    let mut rdr = reader_builder().from_reader(reader);
    employee_rows(&mut rdr, source)
}

pub fn load_employee_table(path: &Path) -> Result<Vec<EmployeeSourceRow>> {
    let mut rdr = open(path)?;
    employee_rows(&mut rdr, &source_name(path))
}

fn employee_rows<R: Read>(rdr: &mut Reader<R>, source: &str) -> Result<Vec<EmployeeSourceRow>> {
    let rows = read_table::<R, EmployeeSourceRow>(rdr, source, &EMPLOYEE_TABLE)?;
    Ok(rows.into_iter().map(|(_, row)| row).collect())
}

pub fn job_table_from_reader<R: Read>(reader: R, source: &str) -> Result<Vec<JobRecord>> {
    let mut rdr = reader_builder().from_reader(reader);
    job_records(&mut rdr, source)
}

pub fn load_job_table(path: &Path) -> Result<Vec<JobRecord>> {
    let mut rdr = open(path)?;
    job_records(&mut rdr, &source_name(path))
}

fn job_records<R: Read>(rdr: &mut Reader<R>, source: &str) -> Result<Vec<JobRecord>> {
    let rows = read_table::<R, JobSourceRow>(rdr, source, &JOB_TABLE)?;

    rows.into_iter()
        .map(|(line, row)| {
            let effective_date = parse_effective_date(&row.effective_date).ok_or_else(|| {
                IngestError::InvalidDate {
                    file: source.to_string(),
                    line,
                    value: row.effective_date.clone(),
                }
            })?;

            Ok(JobRecord {
                employee_id: row.employee_id,
                action_code: row.action,
                job_family_code: row.job_family,
                effective_date,
            })
        })
        .collect()
}

pub fn action_codes_from_reader<R: Read>(reader: R, source: &str) -> Result<Vec<ActionCodeRow>> {
    let mut rdr = reader_builder().from_reader(reader);
    let rows = read_table::<R, ActionCodeRow>(&mut rdr, source, &ACTION_CODE_TABLE)?;
    Ok(rows.into_iter().map(|(_, row)| row).collect())
}

pub fn load_action_codes(path: &Path) -> Result<Vec<ActionCodeRow>> {
    let mut rdr = open(path)?;
    let rows = read_table::<File, ActionCodeRow>(&mut rdr, &source_name(path), &ACTION_CODE_TABLE)?;
    Ok(rows.into_iter().map(|(_, row)| row).collect())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_table_blank_cells_are_none() {
        let csv = "EMPLID,GENDER,ETHNIC_DESC\n100,F,Asian\n101,,\n102, M ,White\n";
        let rows = employee_table_from_reader(csv.as_bytes(), "employees.csv").unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], EmployeeSourceRow::new("100", Some("F"), Some("Asian")));
        assert_eq!(rows[1].gender, None);
        assert_eq!(rows[1].ethnicity, None);
        assert_eq!(rows[2].gender, Some("M".to_string()));
    }

    #[test]
    fn test_employee_table_optional_columns_absent() {
        let csv = "EMPLID,GENDER\n100,F\n";
        let rows = employee_table_from_reader(csv.as_bytes(), "employees2.csv").unwrap();

        assert_eq!(rows[0].ethnicity, None);
        assert_eq!(rows[0].gender, Some("F".to_string()));
    }

    #[test]
    fn test_employee_table_missing_id_column() {
        let csv = "ID,GENDER\n100,F\n";
        let err = employee_table_from_reader(csv.as_bytes(), "employees.csv").unwrap_err();
        assert!(matches!(err, IngestError::MissingColumn { .. }));
    }

    #[test]
    fn test_job_table_parses_dates() {
        let csv = "EMPLID,ACTION,JOB_FAMILY,EFFDT\n\
                   12345,HIR,JKU01,03/07/2021\n\
                   12345,TER,JKU02,1/15/2022\n";
        let rows = job_table_from_reader(csv.as_bytes(), "jobs.csv").unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].effective_date, NaiveDate::from_ymd_opt(2021, 3, 7).unwrap());
        assert_eq!(rows[1].effective_date, NaiveDate::from_ymd_opt(2022, 1, 15).unwrap());
        assert_eq!(rows[0].action_code, Some("HIR".to_string()));
    }

    #[test]
    fn test_job_table_invalid_date_reports_line() {
        let csv = "EMPLID,ACTION,JOB_FAMILY,EFFDT\n\
                   1,HIR,JKU01,03/07/2021\n\
                   2,HIR,JKU01,not-a-date\n";
        let err = job_table_from_reader(csv.as_bytes(), "jobs.csv").unwrap_err();

        match err {
            IngestError::InvalidDate { file, line, value } => {
                assert_eq!(file, "jobs.csv");
                assert_eq!(line, 3);
                assert_eq!(value, "not-a-date");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_effective_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2021, 3, 7).unwrap();
        assert_eq!(parse_effective_date("03/07/2021"), Some(expected));
        assert_eq!(parse_effective_date("2021-03-07"), Some(expected));
        assert_eq!(parse_effective_date(""), None);
        assert_eq!(parse_effective_date("13/45/2021"), None);
    }

    #[test]
    fn test_action_codes_reader() {
        let csv = "action,action reason\nHIR,Hire\nTER,Termination\n";
        let rows = action_codes_from_reader(csv.as_bytes(), "codes.csv").unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].action, Some("TER".to_string()));
        assert_eq!(rows[1].reason, Some("Termination".to_string()));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_job_table(Path::new("does/not/exist.csv")).unwrap_err();
        assert!(matches!(err, IngestError::Open { .. }));
    }
}
