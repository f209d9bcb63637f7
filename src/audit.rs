//! Submission audit log.
//!
//! Appends one JSONL record per submission run so past runs can be
//! inspected after the fact. Logging never fails the command: every
//! error path degrades to a stderr warning or is swallowed.

use crate::timesheet::SubmissionResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory (used by tests).
pub const DATA_DIR_ENV: &str = "DW_DATA_DIR";

/// File the submission records are appended to.
const LOG_FILE: &str = "submissions.log";

/// One submission run as recorded in the audit log.
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmissionRecord {
    /// When the submission finished
    pub timestamp: DateTime<Utc>,

    /// Repository the entries were derived from
    pub repo_path: String,

    /// Label of the submitted week
    pub date_range: String,

    pub created: usize,
    pub updated: usize,
    pub failed: usize,
    pub hours: f64,

    /// User who ran the submission
    pub user: String,
}

/// Append a submission record to the audit log.
pub fn log_submission(repo_path: &Path, result: &SubmissionResult) {
    let Some(path) = log_path() else {
        return;
    };

    let record = SubmissionRecord {
        timestamp: Utc::now(),
        repo_path: repo_path.to_string_lossy().to_string(),
        date_range: result.date_range.clone(),
        created: result.created,
        updated: result.updated,
        failed: result.failed,
        hours: result.hours,
        user: current_user(),
    };

    if let Err(e) = append_record(&path, &record) {
        eprintln!("Warning: failed to write submission log: {}", e);
    }
}

/// Resolve the log file path: `$DW_DATA_DIR` when set, otherwise
/// `~/.local/share/dogwatch`.
fn log_path() -> Option<PathBuf> {
    let dir = match std::env::var(DATA_DIR_ENV) {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => dirs::home_dir()?.join(".local/share/dogwatch"),
    };
    Some(dir.join(LOG_FILE))
}

fn append_record(path: &Path, record: &SubmissionRecord) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string(record)?;
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", json)?;

    Ok(())
}

/// The current user's username, best effort.
fn current_user() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string())
}
