//! Trace file operations - append, read, check
//!
//! A trace file is append-only JSONL: one observation record per line,
//! wrapped in an envelope carrying an id and timestamp. The kind tag is
//! validated before a line is trusted; an unknown tag is surfaced as an
//! error with its line number, never coerced to a default kind.
//!
//! ```text
//! {"id":"...","timestamp":"...","observation":"chat","content":"hi"}
//! {"id":"...","timestamp":"...","observation":"run","command":"ls","exit_code":0,"content":"..."}
//! ```

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use lookout_events::{compat, is_valid_kind, Observation};

#[derive(Error, Debug)]
pub enum TraceError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("trace line {line}: {source}")]
    Record {
        line: usize,
        #[source]
        source: lookout_events::Error,
    },

    #[error("trace line {line}: malformed record: {message}")]
    Malformed { line: usize, message: String },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TraceError>;

/// One persisted observation with its envelope.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TraceRecord {
    pub id: String,
    pub timestamp: String,
    #[serde(flatten)]
    pub observation: Observation,
}

impl TraceRecord {
    /// Wrap an observation with a fresh id and the current time.
    pub fn new(observation: Observation) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            observation,
        }
    }
}

/// A problem found in one line of a trace file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceIssue {
    pub line: usize,
    pub message: String,
}

/// Result of scanning a whole trace file.
#[derive(Clone, Debug, Default)]
pub struct TraceReport {
    pub records: usize,
    pub issues: Vec<TraceIssue>,
}

impl TraceReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Append-only JSONL store for observation records.
pub struct TraceStore {
    path: PathBuf,
}

impl TraceStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record as a single JSONL line, creating the file and
    /// its parent directory on first write.
    pub fn append(&self, record: &TraceRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let line = serde_json::to_string(record)?;
        let mut f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(f, "{}", line)?;
        tracing::debug!(path = %self.path.display(), kind = %record.observation.kind(), "appended trace record");
        Ok(())
    }

    /// Read every record, failing on the first bad line.
    pub fn read_all(&self) -> Result<Vec<TraceRecord>> {
        let text = fs::read_to_string(&self.path)?;
        let mut records = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            records.push(parse_line(idx + 1, line)?);
        }
        Ok(records)
    }

    /// Scan the whole file, collecting an issue per bad line instead of
    /// stopping at the first one. Only I/O failures abort the scan.
    pub fn check(&self) -> Result<TraceReport> {
        let text = fs::read_to_string(&self.path)?;
        let mut report = TraceReport::default();
        for (idx, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match parse_line(idx + 1, line) {
                Ok(_) => report.records += 1,
                Err(err) => report.issues.push(TraceIssue {
                    line: idx + 1,
                    message: err.to_string(),
                }),
            }
        }
        Ok(report)
    }
}

/// Parse one JSONL line, validating the kind tag before deserializing
/// the full record.
fn parse_line(line_no: usize, line: &str) -> Result<TraceRecord> {
    let value: serde_json::Value =
        serde_json::from_str(line).map_err(|e| TraceError::Malformed {
            line: line_no,
            message: e.to_string(),
        })?;
    let tag = value
        .get("observation")
        .and_then(|v| v.as_str())
        .ok_or_else(|| TraceError::Malformed {
            line: line_no,
            message: "missing observation tag".to_string(),
        })?;
    if !is_valid_kind(tag) {
        // Distinguish a historical tag from garbage in the error text.
        let source = match compat::canonical(tag) {
            Ok(kind) => lookout_events::Error::invalid_kind(format!(
                "{} (historical tag, migrate to '{}')",
                tag, kind
            )),
            Err(err) => err,
        };
        return Err(TraceError::Record {
            line: line_no,
            source,
        });
    }
    serde_json::from_value(value).map_err(|e| TraceError::Malformed {
        line: line_no,
        message: e.to_string(),
    })
}
