//! Integration tests for the `dw week` command.
//!
//! These drive the real binary against scripted git repositories in
//! temporary directories. No Harvest credentials are needed: `dw week`
//! never touches the network.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

/// Get a Command for the dw binary running in `dir`, with credential and
/// repo-override environment stripped.
fn dw_in(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_dw"));
    cmd.current_dir(dir);
    cmd.env_remove("HARVEST_ACCESS_TOKEN");
    cmd.env_remove("HARVEST_ACCOUNT_ID");
    cmd.env_remove("DW_REPO");
    cmd.env("HOME", dir);
    cmd
}

fn git(dir: &Path, args: &[&str]) {
    let status = std::process::Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run git");
    assert!(
        status.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&status.stderr)
    );
}

fn init_repo(dir: &Path) {
    git(dir, &["init", "-q"]);
    git(dir, &["config", "user.email", "dev@example.com"]);
    git(dir, &["config", "user.name", "Dev"]);
}

/// Create an empty commit with its author and committer dates pinned to
/// noon local time on the given day.
fn commit_on(dir: &Path, date: &str, subject: &str) {
    let stamp = format!("{} 12:00:00", date);
    let output = std::process::Command::new("git")
        .args(["commit", "--allow-empty", "-q", "-m", subject])
        .env("GIT_AUTHOR_DATE", &stamp)
        .env("GIT_COMMITTER_DATE", &stamp)
        .current_dir(dir)
        .output()
        .expect("failed to run git commit");
    assert!(
        output.status.success(),
        "git commit failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn test_week_outside_repository() {
    let temp = TempDir::new().unwrap();

    dw_in(temp.path())
        .args(["week", "--date", "2026-08-05"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"in_repo\":false"))
        .stdout(predicate::str::contains("\"total_commits\":0"));
}

#[test]
fn test_week_summarizes_commits_by_day() {
    let temp = TempDir::new().unwrap();
    init_repo(temp.path());
    commit_on(temp.path(), "2026-08-03", "feat: add parser");
    commit_on(temp.path(), "2026-08-03", "fix: crash on empty input");
    commit_on(temp.path(), "2026-08-04", "test: cover parser edge cases");

    dw_in(temp.path())
        .args(["week", "--date", "2026-08-07"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"in_repo\":true"))
        .stdout(predicate::str::contains("\"total_commits\":3"))
        .stdout(predicate::str::contains("\"days_with_commits\":2"))
        .stdout(predicate::str::contains(
            "Features: feat: add parser; Fixes: fix: crash on empty input",
        ))
        .stdout(predicate::str::contains("Tests: test: cover parser edge cases"));
}

#[test]
fn test_week_ignores_merge_commits() {
    let temp = TempDir::new().unwrap();
    init_repo(temp.path());
    commit_on(temp.path(), "2026-08-03", "Merge branch 'feature/x'");
    commit_on(temp.path(), "2026-08-03", "fix: resolve conflict fallout");

    dw_in(temp.path())
        .args(["week", "--date", "2026-08-07"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"commits\":2"))
        .stdout(predicate::str::contains("Fixes: fix: resolve conflict fallout"))
        .stdout(predicate::str::contains("Merge branch").not());
}

#[test]
fn test_week_flags_future_days() {
    let temp = TempDir::new().unwrap();
    init_repo(temp.path());
    commit_on(temp.path(), "2026-08-03", "feat: add parser");

    // "Today" is Wednesday, so Thursday and Friday are future
    dw_in(temp.path())
        .args(["week", "--date", "2026-08-05"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"date\":\"2026-08-07\",\"future\":true"))
        .stdout(predicate::str::contains("\"date\":\"2026-08-03\",\"future\":false"));
}

#[test]
fn test_week_human_output() {
    let temp = TempDir::new().unwrap();
    init_repo(temp.path());
    commit_on(temp.path(), "2026-08-03", "feat: add parser");

    dw_in(temp.path())
        .args(["-H", "week", "--date", "2026-08-07"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Week of Aug 03 - Aug 07, 2026"))
        .stdout(predicate::str::contains("Monday (2026-08-03): 1 commit(s)"))
        .stdout(predicate::str::contains("Tuesday (2026-08-04): (no commits)"))
        .stdout(predicate::str::contains("Total commits: 1 across 1 day(s)"));
}

#[test]
fn test_week_human_marks_future_days() {
    let temp = TempDir::new().unwrap();
    init_repo(temp.path());

    dw_in(temp.path())
        .args(["-H", "week", "--date", "2026-08-05"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Friday (2026-08-07): (future)"));
}

#[test]
fn test_week_commits_outside_week_are_excluded() {
    let temp = TempDir::new().unwrap();
    init_repo(temp.path());
    commit_on(temp.path(), "2026-07-31", "feat: from last week");
    commit_on(temp.path(), "2026-08-03", "feat: from this week");

    dw_in(temp.path())
        .args(["week", "--date", "2026-08-07"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total_commits\":1"))
        .stdout(predicate::str::contains("from last week").not());
}
