//! Dogwatch - weekly Harvest timesheets from git history.
//!
//! This library provides the core functionality for the `dw` CLI tool:
//! commit extraction and summarization, weekly time entry synthesis, and
//! idempotent reconciliation against the Harvest API.

pub mod audit;
pub mod cli;
pub mod commands;
pub mod config;
pub mod git;
pub mod harvest;
pub mod timesheet;

/// Library-level error type for Dogwatch operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Credentials error: {0}")]
    Credentials(String),

    #[error("Git error: {0}")]
    Git(String),

    #[error("Harvest API error: {0}")]
    Harvest(#[from] harvest::HarvestError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for Dogwatch operations.
pub type Result<T> = std::result::Result<T, Error>;
