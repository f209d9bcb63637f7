//! Week analysis: Monday through Friday commit summaries.
//!
//! Computes the weekday dates of the week containing "today", extracts
//! and summarizes commits for the days that have already happened, and
//! flags the ones that have not.

use super::summary;
use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use std::path::Path;

/// Number of working days in an analyzed week.
pub const WEEKDAYS: usize = 5;

/// The Monday through Friday dates of the week containing `today`.
pub fn weekdays_of(today: NaiveDate) -> [NaiveDate; WEEKDAYS] {
    let monday = today - Duration::days(today.weekday().num_days_from_monday() as i64);
    std::array::from_fn(|i| monday + Duration::days(i as i64))
}

/// Summary of one weekday.
#[derive(Debug, Clone, Serialize)]
pub struct DaySummary {
    /// The calendar date
    pub date: NaiveDate,
    /// Number of commits found for the day
    pub commits: usize,
    /// Bounded, categorized summary of the day's commits (empty when none)
    pub summary: String,
    /// Whether the day is strictly after "today"
    pub future: bool,
}

impl DaySummary {
    /// Whether any commits were found for this day.
    pub fn has_commits(&self) -> bool {
        self.commits > 0
    }
}

/// Result of analyzing one week.
#[derive(Debug, Clone, Serialize)]
pub struct WeekReport {
    /// One summary per weekday, Monday through Friday
    pub days: Vec<DaySummary>,
    /// Whether the analyzed directory is inside a git repository
    pub in_repo: bool,
    /// Non-fatal warnings raised during extraction
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl WeekReport {
    /// Monday of the analyzed week.
    pub fn start(&self) -> NaiveDate {
        self.days[0].date
    }

    /// Friday of the analyzed week.
    pub fn end(&self) -> NaiveDate {
        self.days[self.days.len() - 1].date
    }

    /// Total commits across the week.
    pub fn total_commits(&self) -> usize {
        self.days.iter().map(|day| day.commits).sum()
    }

    /// Number of days with at least one commit.
    pub fn days_with_commits(&self) -> usize {
        self.days.iter().filter(|day| day.has_commits()).count()
    }

    /// Number of days without any commits.
    pub fn days_without_commits(&self) -> usize {
        self.days.len() - self.days_with_commits()
    }
}

/// Analyze the Monday through Friday week containing `today`.
///
/// Future days are never extracted. When `repo` is `None` every day is
/// treated as having no commits. Extraction errors degrade to an empty
/// commit set for the affected day and are recorded as warnings; they
/// never abort the analysis.
pub fn analyze_week(repo: Option<&Path>, today: NaiveDate) -> WeekReport {
    let mut days = Vec::with_capacity(WEEKDAYS);
    let mut warnings = Vec::new();

    for date in weekdays_of(today) {
        let future = date > today;

        let subjects: Vec<String> = match repo {
            Some(repo) if !future => match super::commits_for_day(repo, date) {
                Ok(commits) => commits.into_iter().map(|commit| commit.subject).collect(),
                Err(e) => {
                    warnings.push(format!("{}: {}", date, e));
                    Vec::new()
                }
            },
            _ => Vec::new(),
        };

        days.push(DaySummary {
            date,
            commits: subjects.len(),
            summary: summary::summarize(&subjects),
            future,
        });
    }

    WeekReport {
        days,
        in_repo: repo.is_some(),
        warnings,
    }
}
