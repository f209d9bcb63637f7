//! Command implementations for the Dogwatch CLI.
//!
//! Each function owns its output: compact JSON on stdout by default,
//! human-readable text behind `-H`. Warnings always go to stderr.

use crate::config::{Credentials, ProjectConfig};
use crate::git;
use crate::git::week::{self, WEEKDAYS, WeekReport};
use crate::harvest::{HarvestClient, RemoteTimeEntry, TimeEntryApi};
use crate::timesheet::{self, DaysOff, TimeEntry, reconcile};
use crate::{Error, Result};
use chrono::{Local, NaiveDate};
use std::collections::BTreeMap;
use std::path::Path;

/// Analyze the week and submit (or preview) the intended entries.
pub fn submit(
    repo: &Path,
    date: Option<NaiveDate>,
    off_specs: &[String],
    dry_run: bool,
    human: bool,
) -> Result<()> {
    let today = date.unwrap_or_else(|| Local::now().date_naive());
    let week_dates = week::weekdays_of(today);

    // Fatal before any remote call: config problems must surface first.
    let config = ProjectConfig::load(repo)?;
    let days_off = parse_days_off(off_specs, &week_dates)?;

    let repo_root = git::find_repo_root(repo);
    if repo_root.is_none() {
        eprintln!(
            "Warning: {} is not inside a git repository; entries will use default notes",
            repo.display()
        );
    }

    let report = week::analyze_week(repo_root.as_deref(), today);
    for warning in &report.warnings {
        eprintln!("Warning: {}", warning);
    }

    let entries = timesheet::synthesize(&report, &config, &days_off);

    if dry_run {
        print_preview(&entries, human);
        return Ok(());
    }

    let credentials = Credentials::resolve()?;
    let client = HarvestClient::new(&credentials);

    // Identity check runs before any listing or write.
    let user = client.current_user()?;
    if human {
        eprintln!("Authenticated as {} {}", user.first_name, user.last_name);
    }

    let result = reconcile::submit(&client, &entries)?;
    crate::audit::log_submission(repo, &result);

    if human {
        print_submission_human(&result);
    } else {
        println!("{}", serde_json::to_string(&result)?);
    }

    Ok(())
}

/// Show the week's commit summaries and statistics.
pub fn week_report(repo: &Path, date: Option<NaiveDate>, human: bool) -> Result<()> {
    let today = date.unwrap_or_else(|| Local::now().date_naive());
    let repo_root = git::find_repo_root(repo);
    let report = week::analyze_week(repo_root.as_deref(), today);

    for warning in &report.warnings {
        eprintln!("Warning: {}", warning);
    }

    if human {
        print_week_human(&report);
    } else {
        let json = serde_json::json!({
            "week_of": report.start(),
            "in_repo": report.in_repo,
            "days": report.days,
            "total_commits": report.total_commits(),
            "days_with_commits": report.days_with_commits(),
            "days_without_commits": report.days_without_commits(),
        });
        println!("{}", serde_json::to_string(&json)?);
    }

    Ok(())
}

/// List remote entries grouped by date, defaulting to the current week.
pub fn entries(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    project: Option<u64>,
    human: bool,
) -> Result<()> {
    let week_dates = week::weekdays_of(Local::now().date_naive());
    let from = from.unwrap_or(week_dates[0]);
    let to = to.unwrap_or(week_dates[WEEKDAYS - 1]);

    if from > to {
        return Err(Error::InvalidInput(format!(
            "--from {} is after --to {}",
            from, to
        )));
    }

    let client = HarvestClient::new(&Credentials::resolve()?);
    let entries = client.list_entries(from, to, project)?;
    let total_hours: f64 = entries.iter().map(|entry| entry.hours).sum();

    if human {
        print_entries_human(&entries, from, to, total_hours);
    } else {
        let json = serde_json::json!({
            "from": from,
            "to": to,
            "entries": entries,
            "total_hours": total_hours,
        });
        println!("{}", serde_json::to_string(&json)?);
    }

    Ok(())
}

/// List Harvest projects visible to the current user.
pub fn projects(human: bool) -> Result<()> {
    let client = HarvestClient::new(&Credentials::resolve()?);
    let projects = client.projects()?;

    if human {
        for project in &projects {
            let marker = if project.is_active { "" } else { " (inactive)" };
            match &project.code {
                Some(code) => println!("{}  [{}] {}{}", project.id, code, project.name, marker),
                None => println!("{}  {}{}", project.id, project.name, marker),
            }
        }
        println!("\n{} project(s)", projects.len());
    } else {
        println!("{}", serde_json::to_string(&projects)?);
    }

    Ok(())
}

/// List task assignments for a project.
pub fn tasks(project_id: u64, human: bool) -> Result<()> {
    let client = HarvestClient::new(&Credentials::resolve()?);
    let assignments = client.project_tasks(project_id)?;

    if human {
        for assignment in &assignments {
            let marker = if assignment.is_active { "" } else { " (inactive)" };
            println!("{}  {}{}", assignment.task.id, assignment.task.name, marker);
        }
        println!("\n{} task(s) on project {}", assignments.len(), project_id);
    } else {
        println!("{}", serde_json::to_string(&assignments)?);
    }

    Ok(())
}

/// Delete one time entry by its remote ID.
pub fn delete(entry_id: u64, human: bool) -> Result<()> {
    let client = HarvestClient::new(&Credentials::resolve()?);
    client.delete_entry(entry_id)?;

    if human {
        println!("Deleted time entry {}", entry_id);
    } else {
        println!(r#"{{"deleted":{}}}"#, entry_id);
    }

    Ok(())
}

/// Verify credentials by fetching the authenticated user.
pub fn whoami(human: bool) -> Result<()> {
    let credentials = Credentials::resolve()?;
    let client = HarvestClient::new(&credentials);
    let user = client.current_user()?;

    if human {
        println!(
            "Authenticated as {} {} <{}>",
            user.first_name, user.last_name, user.email
        );
        println!("Account: {}", credentials.account_id);
        println!("Token: {}", credentials.masked_token());
    } else {
        println!("{}", serde_json::to_string(&user)?);
    }

    Ok(())
}

/// Parse repeated `--off DAY[=REASON]` declarations against the target week.
fn parse_days_off(specs: &[String], week_dates: &[NaiveDate; WEEKDAYS]) -> Result<DaysOff> {
    let mut days_off = DaysOff::new();

    for spec in specs {
        let (day_part, reason) = match spec.split_once('=') {
            Some((day, reason)) => {
                let reason = reason.trim();
                (
                    day.trim(),
                    (!reason.is_empty()).then(|| reason.to_string()),
                )
            }
            None => (spec.trim(), None),
        };

        let date = resolve_day(day_part, week_dates)?;
        days_off.insert(date, reason);
    }

    Ok(days_off)
}

/// Resolve a weekday name, abbreviation, or ISO date to a date within the
/// target week.
fn resolve_day(token: &str, week_dates: &[NaiveDate; WEEKDAYS]) -> Result<NaiveDate> {
    if let Ok(date) = token.parse::<NaiveDate>() {
        if week_dates.contains(&date) {
            return Ok(date);
        }
        return Err(Error::InvalidInput(format!(
            "{} is not a weekday of the target week ({} to {})",
            date,
            week_dates[0],
            week_dates[WEEKDAYS - 1]
        )));
    }

    let lowered = token.to_lowercase();
    if lowered.len() >= 3 {
        for date in week_dates {
            let name = date.format("%A").to_string().to_lowercase();
            if name.starts_with(&lowered) {
                return Ok(*date);
            }
        }
    }

    Err(Error::InvalidInput(format!(
        "unrecognized day \"{}\" (use a weekday name or YYYY-MM-DD)",
        token
    )))
}

fn print_preview(entries: &[TimeEntry], human: bool) {
    if human {
        println!("=== Timesheet Preview ===\n");

        if entries.is_empty() {
            println!("No entries to submit.");
            return;
        }

        for (i, entry) in entries.iter().enumerate() {
            println!(
                "{}. {} {} - {} hours",
                i + 1,
                entry.spent_date.format("%A"),
                entry.spent_date,
                entry.hours
            );
            println!("   {}\n", entry.notes);
        }

        println!("Total hours: {}", timesheet::total_hours(entries));
        println!("Date range: {}", timesheet::date_range_label(entries));
    } else {
        let json = serde_json::json!({
            "entries": entries,
            "total_hours": timesheet::total_hours(entries),
            "date_range": timesheet::date_range_label(entries),
        });
        // Serializing values built from plain data cannot fail
        println!("{}", json);
    }
}

fn print_week_human(report: &WeekReport) {
    println!(
        "Week of {} - {}",
        report.start().format("%b %d"),
        report.end().format("%b %d, %Y")
    );

    if !report.in_repo {
        println!("(not a git repository)");
    }
    println!();

    for day in &report.days {
        let label = format!("{} ({})", day.date.format("%A"), day.date);
        if day.future {
            println!("{}: (future)", label);
        } else if day.has_commits() {
            println!("{}: {} commit(s)", label, day.commits);
            println!("  {}", day.summary);
        } else {
            println!("{}: (no commits)", label);
        }
    }

    println!(
        "\nTotal commits: {} across {} day(s)",
        report.total_commits(),
        report.days_with_commits()
    );
}

fn print_entries_human(
    entries: &[RemoteTimeEntry],
    from: NaiveDate,
    to: NaiveDate,
    total_hours: f64,
) {
    if entries.is_empty() {
        println!("No time entries between {} and {}", from, to);
        return;
    }

    let mut by_date: BTreeMap<NaiveDate, Vec<&RemoteTimeEntry>> = BTreeMap::new();
    for entry in entries {
        by_date.entry(entry.spent_date).or_default().push(entry);
    }

    println!("Time entries from {} to {}:\n", from, to);
    for (date, date_entries) in &by_date {
        println!("{} - {} entry/entries:", date, date_entries.len());
        for entry in date_entries {
            let notes = entry.notes.as_deref().unwrap_or("");
            println!(
                "  {}  {}h  {} / {}  {}",
                entry.id, entry.hours, entry.project.name, entry.task.name, notes
            );
        }
        println!();
    }

    println!("Total entries: {}", entries.len());
    println!("Total hours: {}", total_hours);
}

fn print_submission_human(result: &reconcile::SubmissionResult) {
    if result.success() {
        println!("Timesheet submitted successfully!");
    } else {
        println!("Submission completed with errors:");
    }

    println!("  Created: {} entries", result.created);
    println!("  Updated: {} entries", result.updated);
    if result.failed > 0 {
        println!("  Failed: {} entries", result.failed);
    }
    println!("  Total hours: {}", result.hours);
    println!("  Date range: {}", result.date_range);

    if !result.errors.is_empty() {
        println!("\nErrors:");
        for error in &result.errors {
            println!("  - {}", error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn week_dates() -> [NaiveDate; WEEKDAYS] {
        week::weekdays_of(NaiveDate::from_ymd_opt(2026, 8, 5).unwrap())
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, d).unwrap()
    }

    #[test]
    fn test_resolve_day_full_name() {
        assert_eq!(resolve_day("friday", &week_dates()).unwrap(), date(7));
        assert_eq!(resolve_day("Monday", &week_dates()).unwrap(), date(3));
    }

    #[test]
    fn test_resolve_day_abbreviation() {
        assert_eq!(resolve_day("fri", &week_dates()).unwrap(), date(7));
        assert_eq!(resolve_day("wed", &week_dates()).unwrap(), date(5));
        assert_eq!(resolve_day("thurs", &week_dates()).unwrap(), date(6));
    }

    #[test]
    fn test_resolve_day_iso_date() {
        assert_eq!(resolve_day("2026-08-04", &week_dates()).unwrap(), date(4));
    }

    #[test]
    fn test_resolve_day_date_outside_week() {
        let err = resolve_day("2026-08-10", &week_dates()).unwrap_err();
        assert!(err.to_string().contains("not a weekday of the target week"));
    }

    #[test]
    fn test_resolve_day_garbage() {
        assert!(resolve_day("someday", &week_dates()).is_err());
        // Too short to be unambiguous
        assert!(resolve_day("fr", &week_dates()).is_err());
    }

    #[test]
    fn test_parse_days_off_with_reasons() {
        let specs = vec!["friday=Vacation".to_string(), "wed".to_string()];
        let days_off = parse_days_off(&specs, &week_dates()).unwrap();

        assert_eq!(days_off.len(), 2);
        assert_eq!(days_off[&date(7)], Some("Vacation".to_string()));
        assert_eq!(days_off[&date(5)], None);
    }

    #[test]
    fn test_parse_days_off_empty_reason_is_none() {
        let specs = vec!["friday=".to_string()];
        let days_off = parse_days_off(&specs, &week_dates()).unwrap();

        assert_eq!(days_off[&date(7)], None);
    }
}
