//! Dogwatch CLI - submit weekly Harvest timesheets from git history.

use clap::Parser;
use dogwatch::cli::{Cli, Commands};
use dogwatch::commands;
use std::path::PathBuf;
use std::process;

fn main() {
    let cli = Cli::parse();
    let human = cli.human_readable;

    // Determine repo path: --repo flag > DW_REPO env > git root > cwd
    let repo_path = resolve_repo_path(cli.repo_path, human);

    let result = match cli.command {
        Commands::Submit { date, off, dry_run } => {
            commands::submit(&repo_path, date, &off, dry_run, human)
        }
        Commands::Week { date } => commands::week_report(&repo_path, date, human),
        Commands::Entries { from, to, project } => commands::entries(from, to, project, human),
        Commands::Projects => commands::projects(human),
        Commands::Tasks { project_id } => commands::tasks(project_id, human),
        Commands::Delete { entry_id } => commands::delete(entry_id, human),
        Commands::Whoami => commands::whoami(human),
    };

    if let Err(e) = result {
        if human {
            eprintln!("Error: {}", e);
        } else {
            eprintln!(r#"{{"error": "{}"}}"#, e);
        }
        process::exit(1);
    }
}

/// Resolve the working directory for the run.
///
/// An explicit path (via -C/--repo or DW_REPO) is used literally without
/// git root detection, which allows targeting a specific subdirectory.
/// Otherwise the git root of the current directory is auto-detected so
/// results do not depend on which subdirectory the tool runs from.
fn resolve_repo_path(explicit: Option<PathBuf>, human: bool) -> PathBuf {
    match explicit {
        Some(path) => {
            if !path.exists() {
                if human {
                    eprintln!("Error: path does not exist: {}", path.display());
                } else {
                    eprintln!(r#"{{"error": "path does not exist: {}"}}"#, path.display());
                }
                process::exit(1);
            }
            path
        }
        None => {
            let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            dogwatch::git::find_repo_root(&cwd).unwrap_or(cwd)
        }
    }
}
