// ⚠️ Error Types - Everything that can abort an ingestion run
//
// Unmapped codes and join drops are NOT errors: they become sentinels or
// log lines. Only unreadable or structurally broken inputs land here.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("{file}: missing required column '{column}'")]
    MissingColumn { file: String, column: String },

    #[error("{file}: code lookup table is empty - cannot map values")]
    EmptyLookup { file: String },

    #[error("{file}: line {line}: invalid effective date '{value}' (expected MM/DD/YYYY)")]
    InvalidDate {
        file: String,
        line: usize,
        value: String,
    },
}

pub type Result<T> = std::result::Result<T, IngestError>;
