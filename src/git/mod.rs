//! Git commit extraction.
//!
//! Pulls raw commit metadata out of `git log` one calendar day at a time.
//! Not being inside a repository is a valid outcome, not an error; a
//! failing `git` invocation surfaces as [`crate::Error::Git`] and callers
//! degrade to an empty commit set for the affected day.

pub mod summary;
pub mod week;

use crate::{Error, Result};
use chrono::{Duration, NaiveDate};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Field separator used in the `git log` pretty format (ASCII unit
/// separator, which cannot appear in a subject line).
const LOG_SEPARATOR: char = '\x1f';

/// A single commit as extracted from `git log`.
#[derive(Debug, Clone)]
pub struct Commit {
    /// Full commit hash
    pub hash: String,
    /// Subject line (first line of the message only)
    pub subject: String,
    /// Author name
    pub author_name: String,
    /// Author email
    pub author_email: String,
    /// Author date at day granularity, local time
    pub date: NaiveDate,
}

/// Find the root of the repository containing `path`, if any.
///
/// Returns `None` when `path` is not inside a git work tree or the git
/// binary cannot be run at all.
pub fn find_repo_root(path: &Path) -> Option<PathBuf> {
    let output = Command::new("git")
        .args(["rev-parse", "--show-toplevel"])
        .current_dir(path)
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if root.is_empty() {
        None
    } else {
        Some(PathBuf::from(root))
    }
}

/// Extract all commits authored on `date`, across all refs.
///
/// The window is [date 00:00:00, date 23:59:59] local time. Order follows
/// `git log` (most recent first); downstream summarization deduplicates
/// and groups, so ordering does not affect results.
pub fn commits_for_day(repo: &Path, date: NaiveDate) -> Result<Vec<Commit>> {
    // git prunes the walk by committer date; widen the window by a day on
    // each side and filter precisely on the parsed author date below.
    let since = format!("--since={} 00:00:00", date - Duration::days(1));
    let until = format!("--until={} 23:59:59", date + Duration::days(1));

    let output = Command::new("git")
        .args([
            "log",
            "--all",
            "--date=short",
            since.as_str(),
            until.as_str(),
            "--pretty=format:%H%x1f%s%x1f%an%x1f%ae%x1f%ad",
        ])
        .current_dir(repo)
        .output()
        .map_err(|e| Error::Git(format!("Failed to run git log: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::Git(format!("git log failed: {}", stderr.trim())));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let commits = stdout
        .lines()
        .filter_map(parse_log_line)
        .filter(|commit| commit.date == date)
        .collect();

    Ok(commits)
}

/// Parse one `%H%x1f%s%x1f%an%x1f%ae%x1f%ad` log line.
fn parse_log_line(line: &str) -> Option<Commit> {
    let mut fields = line.split(LOG_SEPARATOR);
    let hash = fields.next()?.trim().to_string();
    let subject = fields.next()?.trim().to_string();
    let author_name = fields.next()?.trim().to_string();
    let author_email = fields.next()?.trim().to_string();
    let date = fields.next()?.trim().parse().ok()?;

    if hash.is_empty() {
        return None;
    }

    Some(Commit {
        hash,
        subject,
        author_name,
        author_email,
        date,
    })
}
