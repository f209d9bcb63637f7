//! CLI argument definitions for Dogwatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Dogwatch - submit weekly Harvest timesheets from git history.
///
/// Start with `dw week` to see what the week looks like, then
/// `dw submit --dry-run` to preview the entries before submitting.
#[derive(Parser, Debug)]
#[command(name = "dw")]
#[command(author, version, about = "Turn a week of git commits into Harvest time entries", long_about = None)]
pub struct Cli {
    /// Output in human-readable format instead of JSON
    #[arg(short = 'H', long = "human", global = true)]
    pub human_readable: bool,

    /// Run as if dw was started in <path> instead of the current directory.
    /// Can also be set via the DW_REPO environment variable.
    #[arg(short = 'C', long = "repo", global = true, env = "DW_REPO")]
    pub repo_path: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze the week's commits and submit time entries to Harvest
    Submit {
        /// Anchor date standing in for "today" (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Declare a day off: a weekday or date with an optional reason,
        /// e.g. "friday=Vacation", "wed", "2026-08-07=Sick"
        #[arg(long = "off", value_name = "DAY[=REASON]")]
        off: Vec<String>,

        /// Synthesize and print the entries without calling Harvest
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the week's commit summaries without touching Harvest
    Week {
        /// Anchor date standing in for "today" (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// List remote time entries grouped by date
    Entries {
        /// Start date (defaults to Monday of the current week)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// End date (defaults to Friday of the current week)
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Only list entries for this Harvest project ID
        #[arg(long)]
        project: Option<u64>,
    },

    /// List Harvest projects visible to the current user
    Projects,

    /// List task assignments for a project
    Tasks {
        /// Harvest project ID
        project_id: u64,
    },

    /// Delete a time entry by its Harvest ID
    Delete {
        /// Harvest time entry ID
        entry_id: u64,
    },

    /// Verify credentials and show the authenticated user
    Whoami,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_submit_with_days_off() {
        let cli = Cli::try_parse_from([
            "dw",
            "submit",
            "--dry-run",
            "--date",
            "2026-08-06",
            "--off",
            "friday=Vacation",
            "--off",
            "wed",
        ])
        .unwrap();

        match cli.command {
            Commands::Submit { date, off, dry_run } => {
                assert!(dry_run);
                assert_eq!(date, NaiveDate::from_ymd_opt(2026, 8, 6));
                assert_eq!(off, vec!["friday=Vacation", "wed"]);
            }
            other => panic!("expected Submit, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_bad_date() {
        let result = Cli::try_parse_from(["dw", "week", "--date", "not-a-date"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_human_flag_is_global() {
        let cli = Cli::try_parse_from(["dw", "week", "-H"]).unwrap();
        assert!(cli.human_readable);
    }
}
