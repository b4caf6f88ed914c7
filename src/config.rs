// ⚙️ Configuration - Where the inputs live and which client they belong to
//
// Loaded from a JSON file; any field left out falls back to the JKU defaults.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const EMPLOYEES_OUTPUT: &str = "employees.csv";
pub const EMPLOYEES_REVIEW_OUTPUT: &str = "employees_unspecified_data.csv";
pub const EMPLOYMENT_OUTPUT: &str = "employment.csv";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Client tag prefixed to every unique key
    pub client: String,

    /// First employee demographics export
    pub employees_file_one: PathBuf,

    /// Second employee demographics export
    pub employees_file_two: PathBuf,

    /// Job/action records export
    pub jobs_file: PathBuf,

    /// Action code -> action reason lookup
    pub code_mapping_file: PathBuf,

    /// Directory the CSV outputs are written to
    pub output_dir: PathBuf,
}

impl Default for IngestConfig {
    fn default() -> Self {
        IngestConfig {
            client: "jku".to_string(),
            employees_file_one: PathBuf::from("JKU_employees.csv"),
            employees_file_two: PathBuf::from("JKU_employees2.csv"),
            jobs_file: PathBuf::from("JKU_jobs.csv"),
            code_mapping_file: PathBuf::from("JKU_code_mapping.csv"),
            output_dir: PathBuf::from("."),
        }
    }
}

impl IngestConfig {
    /// Load config from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn with_client(mut self, client: impl Into<String>) -> Self {
        self.client = client.into();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }
}
