//! Create-or-update reconciliation of intended entries against Harvest.
//!
//! Existing entries are matched by (spent date, project). A match is
//! updated in place with the new hours and notes replaced wholesale,
//! never appended; anything else is created. Re-running the pipeline
//! therefore converges on the same remote state instead of accumulating
//! duplicates.

use super::{TimeEntry, date_range_label};
use crate::Result;
use crate::harvest::{RemoteTimeEntry, TimeEntryApi};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

/// Aggregate outcome of one submission run.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionResult {
    /// Entries newly created
    pub created: usize,
    /// Existing entries updated in place
    pub updated: usize,
    /// Entries that failed to submit
    pub failed: usize,
    /// Sum of hours across successfully submitted entries
    pub hours: f64,
    /// Human-readable label spanning the submitted dates
    pub date_range: String,
    /// One `<date>: <reason>` line per failed entry
    pub errors: Vec<String>,
}

impl SubmissionResult {
    fn empty(entries: &[TimeEntry]) -> Self {
        Self {
            created: 0,
            updated: 0,
            failed: 0,
            hours: 0.0,
            date_range: date_range_label(entries),
            errors: Vec::new(),
        }
    }

    /// True when every entry was created or updated.
    pub fn success(&self) -> bool {
        self.failed == 0
    }
}

enum Outcome {
    Created,
    Updated,
}

/// Reconcile `entries` against the remote state and submit them in order.
///
/// The upfront range listing is the only fatal step: without current
/// remote state no safe write can happen. After that, each entry is
/// attempted independently; a failure is recorded and the batch
/// continues.
pub fn submit<A: TimeEntryApi>(api: &A, entries: &[TimeEntry]) -> Result<SubmissionResult> {
    let mut result = SubmissionResult::empty(entries);
    if entries.is_empty() {
        return Ok(result);
    }

    let mut dates: Vec<NaiveDate> = entries.iter().map(|entry| entry.spent_date).collect();
    dates.sort();
    let (from, to) = (dates[0], dates[dates.len() - 1]);

    // One unfiltered range query covers both the work and time-off
    // projects.
    let existing = api.list_entries(from, to, None)?;

    // First returned entry wins for each key; later duplicates are left
    // untouched.
    let mut by_key: HashMap<(NaiveDate, u64), &RemoteTimeEntry> = HashMap::new();
    for entry in &existing {
        by_key.entry((entry.spent_date, entry.project.id)).or_insert(entry);
    }

    for entry in entries {
        let outcome = match by_key.get(&(entry.spent_date, entry.project_id)) {
            Some(existing) => api
                .update_entry(existing.id, entry.hours, &entry.notes)
                .map(|_| Outcome::Updated),
            None => api.create_entry(entry).map(|_| Outcome::Created),
        };

        match outcome {
            Ok(Outcome::Created) => {
                result.created += 1;
                result.hours += entry.hours;
            }
            Ok(Outcome::Updated) => {
                result.updated += 1;
                result.hours += entry.hours;
            }
            Err(e) => {
                result.failed += 1;
                result.errors.push(format!("{}: {}", entry.spent_date, e));
            }
        }
    }

    Ok(result)
}
