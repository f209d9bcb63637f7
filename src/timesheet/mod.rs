//! Weekly time entry synthesis.
//!
//! Combines the week's commit summaries, the project configuration, and
//! the declared days off into the definitive ordered list of intended
//! time entries for the week.

pub mod reconcile;

pub use reconcile::SubmissionResult;

use crate::config::ProjectConfig;
use crate::git::week::WeekReport;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fallback notes for a day off when neither the user nor the
/// configuration supplies a reason.
const FALLBACK_TIME_OFF_REASON: &str = "Time off";

/// Days off declared for the target week, keyed by date, each with an
/// optional user-supplied reason.
pub type DaysOff = BTreeMap<NaiveDate, Option<String>>;

/// A time entry computed locally, not yet reconciled against Harvest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    /// Date the time was spent
    pub spent_date: NaiveDate,
    /// Hours to log
    pub hours: f64,
    /// Description of the work done
    pub notes: String,
    /// Harvest project ID
    pub project_id: u64,
    /// Harvest task ID
    pub task_id: u64,
}

/// Build the intended entries for the analyzed week, in weekday order.
///
/// A day off produces a time-off entry when a time-off project is
/// configured and no entry at all otherwise. A working day takes its
/// notes from the commit summary; with no commits, future days fall back
/// to the future-day notes (when set) and every other day to the default
/// notes. Hours are uniform across all entries.
pub fn synthesize(week: &WeekReport, config: &ProjectConfig, days_off: &DaysOff) -> Vec<TimeEntry> {
    let mut entries = Vec::with_capacity(week.days.len());

    for day in &week.days {
        if let Some(reason) = days_off.get(&day.date) {
            let Some(time_off) = &config.time_off else {
                // Legacy mode: without a time-off project the day is
                // simply skipped and the week total shrinks.
                continue;
            };

            let notes = reason
                .clone()
                .or_else(|| time_off.default_reason.clone())
                .unwrap_or_else(|| FALLBACK_TIME_OFF_REASON.to_string());

            entries.push(TimeEntry {
                spent_date: day.date,
                hours: config.hours_per_day,
                notes,
                project_id: time_off.project_id,
                task_id: time_off.task_id,
            });
            continue;
        }

        let notes = if !day.summary.is_empty() {
            day.summary.clone()
        } else if day.future {
            config
                .future_day_notes
                .clone()
                .unwrap_or_else(|| config.default_notes.clone())
        } else {
            config.default_notes.clone()
        };

        entries.push(TimeEntry {
            spent_date: day.date,
            hours: config.hours_per_day,
            notes,
            project_id: config.project_id,
            task_id: config.task_id,
        });
    }

    entries
}

/// Sum of hours across entries.
pub fn total_hours(entries: &[TimeEntry]) -> f64 {
    entries.iter().map(|entry| entry.hours).sum()
}

/// Human-readable date range, like `"Aug 03-07, 2026"` or
/// `"Aug 31 - Sep 04, 2026"` across a month boundary.
pub fn date_range_label(entries: &[TimeEntry]) -> String {
    let mut dates: Vec<NaiveDate> = entries.iter().map(|entry| entry.spent_date).collect();
    dates.sort();

    match (dates.first(), dates.last()) {
        (Some(start), Some(end)) => {
            if start.month() == end.month() && start.year() == end.year() {
                format!("{}-{}", start.format("%b %d"), end.format("%d, %Y"))
            } else {
                format!("{} - {}", start.format("%b %d"), end.format("%b %d, %Y"))
            }
        }
        _ => "No entries".to_string(),
    }
}
