// 📋 Employment Pipeline - Normalize job/action history
//
// Action and job family codes are mapped to labels, each record gets a
// `{client}{employee_id}-{YYYYMMDD}` key, and every employee without a Hire
// record gets one synthesized from their earliest record. The earliest
// record is only an approximation of the real hire date.

use crate::config::IngestConfig;
use crate::data_quality::{check_all_employees_have_a_hire_record, HireCoverageReport};
use crate::deduplication::DeduplicationEngine;
use crate::error::Result;
use crate::export::write_table;
use crate::labels::MappedLabel;
use crate::mapping::CodeMapping;
use crate::parser::{load_action_codes, load_job_table, read_table, JobRecord};
use crate::schema::{EMPLOYMENT_OUTPUT_HEADERS, EMPLOYMENT_OUTPUT_TABLE};
use chrono::NaiveDate;
use csv::{ReaderBuilder, Trim};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

// ============================================================================
// RECORD TYPES
// ============================================================================

/// Employment record with raw codes and resolved labels side by side
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmploymentRecord {
    pub employee_id: String,
    pub action_code: Option<String>,
    pub action: MappedLabel,
    pub job_family_code: Option<String>,
    pub department: MappedLabel,
    pub effective_date: NaiveDate,
    pub unique_key: String,

    /// Back-filled Hire record, not present in the source export
    pub synthesized: bool,
}

impl EmploymentRecord {
    pub fn from_job(
        job: &JobRecord,
        actions: &CodeMapping,
        departments: &CodeMapping,
        client: &str,
    ) -> Self {
        EmploymentRecord {
            employee_id: job.employee_id.clone(),
            action_code: job.action_code.clone(),
            action: actions.resolve(job.action_code.as_deref()),
            job_family_code: job.job_family_code.clone(),
            department: departments.resolve(job.job_family_code.as_deref()),
            effective_date: job.effective_date,
            unique_key: employment_key(client, &job.employee_id, job.effective_date),
            synthesized: false,
        }
    }

    /// Hire record cloned from an employee's earliest record
    pub fn synthesized_hire(template: &EmploymentRecord, client: &str) -> Self {
        EmploymentRecord {
            employee_id: template.employee_id.clone(),
            action_code: None,
            action: MappedLabel::hire(),
            job_family_code: template.job_family_code.clone(),
            department: template.department.clone(),
            effective_date: template.effective_date,
            unique_key: employment_key(client, &template.employee_id, template.effective_date),
            synthesized: true,
        }
    }

    pub fn to_row(&self) -> EmploymentRow {
        EmploymentRow {
            employee_id: self.employee_id.clone(),
            action: self.action.clone(),
            effective_date: self.effective_date,
            department: self.department.clone(),
            unique_key: self.unique_key.clone(),
        }
    }
}

/// Projected output row; also what `employment.csv` reads back into
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmploymentRow {
    #[serde(rename = "Employee ID")]
    pub employee_id: String,

    #[serde(rename = "Action")]
    pub action: MappedLabel,

    #[serde(rename = "Date")]
    pub effective_date: NaiveDate,

    #[serde(rename = "Department")]
    pub department: MappedLabel,

    #[serde(rename = "Unique Key")]
    pub unique_key: String,
}

// ============================================================================
// PURE TRANSFORMS
// ============================================================================

/// `{client}{employee_id}-{YYYYMMDD}`
pub fn employment_key(client: &str, employee_id: &str, date: NaiveDate) -> String {
    format!("{}{}-{}", client, employee_id, date.format("%Y%m%d"))
}

/// Zero or one synthetic Hire record per employee lacking one
///
/// Records are grouped by employee (first-appearance order) and each group is
/// stable-sorted by effective date. Groups with no Hire label contribute a
/// Hire copied from their earliest record.
pub fn synthesize_hire_records(
    records: &[EmploymentRecord],
    client: &str,
) -> Vec<EmploymentRecord> {
    let (groups, _) = records.iter().fold(
        (Vec::<Vec<&EmploymentRecord>>::new(), HashMap::<&str, usize>::new()),
        |(mut groups, mut index), record| {
            match index.get(record.employee_id.as_str()) {
                Some(&slot) => groups[slot].push(record),
                None => {
                    index.insert(record.employee_id.as_str(), groups.len());
                    groups.push(vec![record]);
                }
            }
            (groups, index)
        },
    );

    groups
        .into_iter()
        .filter_map(|mut history| {
            history.sort_by_key(|r| r.effective_date);
            if history.iter().any(|r| r.action.is_hire()) {
                return None;
            }
            let earliest = history.first()?;
            Some(EmploymentRecord::synthesized_hire(earliest, client))
        })
        .collect()
}

/// Read a previously written `employment.csv`
pub fn load_employment_output(path: &Path) -> Result<Vec<EmploymentRow>> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_path(path)?;
    let source = path.display().to_string();
    let rows = read_table::<_, EmploymentRow>(&mut rdr, &source, &EMPLOYMENT_OUTPUT_TABLE)?;
    Ok(rows.into_iter().map(|(_, row)| row).collect())
}

// ============================================================================
// EMPLOYMENT PROCESSOR
// ============================================================================

pub struct EmploymentProcessor {
    client: String,
    jobs: Vec<JobRecord>,
    action_codes: CodeMapping,
    job_family_codes: CodeMapping,
    records: Vec<EmploymentRecord>,
    rows: Vec<EmploymentRow>,
}

impl EmploymentProcessor {
    pub fn new(client: impl Into<String>, jobs: Vec<JobRecord>, action_codes: CodeMapping) -> Self {
        EmploymentProcessor {
            client: client.into(),
            jobs,
            action_codes,
            job_family_codes: CodeMapping::job_family(),
            records: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Load the job export and the code lookup named in the config
    pub fn from_config(config: &IngestConfig) -> Result<Self> {
        let jobs = load_job_table(&config.jobs_file)?;
        let code_rows = load_action_codes(&config.code_mapping_file)?;
        let action_codes =
            CodeMapping::action_codes(&code_rows, &config.code_mapping_file.display().to_string())?;

        info!(
            jobs = jobs.len(),
            action_codes = action_codes.len(),
            "loaded employment exports"
        );

        Ok(EmploymentProcessor::new(config.client.clone(), jobs, action_codes))
    }

    /// Swap the hard-coded job family dictionary for another client's
    pub fn with_job_family_codes(mut self, mapping: CodeMapping) -> Self {
        self.job_family_codes = mapping;
        self
    }

    /// Map codes, derive keys, back-fill Hire records, project and dedup
    pub fn process(&mut self) -> &[EmploymentRow] {
        let mut records: Vec<EmploymentRecord> = self
            .jobs
            .iter()
            .map(|job| {
                EmploymentRecord::from_job(
                    job,
                    &self.action_codes,
                    &self.job_family_codes,
                    &self.client,
                )
            })
            .collect();

        let unmapped = records
            .iter()
            .filter(|r| !r.action.is_mapped() || !r.department.is_mapped())
            .count();
        debug!(unmapped, "records with at least one unmapped code");

        let hires = synthesize_hire_records(&records, &self.client);
        info!(synthesized = hires.len(), "created missing hire records");
        records.extend(hires);

        let rows: Vec<EmploymentRow> = records.iter().map(EmploymentRecord::to_row).collect();
        self.rows = DeduplicationEngine::new().deduplicate(rows);
        self.records = records;

        info!(rows = self.rows.len(), "employment data ready for ingestion");
        &self.rows
    }

    /// Every record after synthesis, before projection and dedup
    pub fn records(&self) -> &[EmploymentRecord] {
        &self.records
    }

    pub fn rows(&self) -> &[EmploymentRow] {
        &self.rows
    }

    pub fn hire_coverage(&self) -> HireCoverageReport {
        check_all_employees_have_a_hire_record(&self.rows)
    }

    pub fn save_data(&self, path: &Path) -> Result<()> {
        write_table(path, &EMPLOYMENT_OUTPUT_HEADERS, &self.rows)
    }
}

// ============================================================================
// TESTS
// ============================================================================
