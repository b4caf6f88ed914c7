// HR Ingest - Core Library
// Employee and employment pipelines, shared by the CLI and the tests

pub mod config;
pub mod data_quality;
pub mod deduplication;
pub mod employees;
pub mod employment;
pub mod error;
pub mod export;
pub mod labels;
pub mod logging;
pub mod mapping;
pub mod parser;
pub mod schema;

// Re-export commonly used types
pub use config::{IngestConfig, EMPLOYEES_OUTPUT, EMPLOYEES_REVIEW_OUTPUT, EMPLOYMENT_OUTPUT};
pub use data_quality::{check_all_employees_have_a_hire_record, HireCoverageReport};
pub use deduplication::{DeduplicationEngine, DuplicateMatch};
pub use employees::{
    merge_datasets, reconcile_gender, unique_key, EmployeeProcessor, EmployeeRecord,
    MergedEmployee,
};
pub use employment::{
    employment_key, load_employment_output, synthesize_hire_records, EmploymentProcessor,
    EmploymentRecord, EmploymentRow,
};
pub use error::{IngestError, Result};
pub use labels::{CanonicalGender, Ethnicity, MappedLabel};
pub use mapping::CodeMapping;
pub use parser::{
    load_action_codes, load_employee_table, load_job_table, ActionCodeRow, EmployeeSourceRow,
    JobRecord,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
