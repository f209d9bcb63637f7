//! Harvest API v2 types and the client seam.
//!
//! Wire types follow <https://help.getharvest.com/api-v2/>. The
//! [`TimeEntryApi`] trait is the surface the reconciler talks to:
//! [`HarvestClient`] implements it over HTTP and tests substitute an
//! in-memory implementation.

pub mod client;

pub use client::HarvestClient;

use crate::timesheet::TimeEntry;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced by Harvest API calls.
///
/// The client performs no retries; every failure maps to exactly one of
/// these conditions and the caller decides what is fatal.
#[derive(Debug, Error)]
pub enum HarvestError {
    /// Token or account ID rejected (401 Unauthorized)
    #[error("Invalid or expired credentials: Harvest returned 401 Unauthorized")]
    Unauthorized,

    /// Credentials lack access to the resource (403 Forbidden)
    #[error("Access denied: Harvest returned 403 Forbidden")]
    Forbidden,

    /// Unknown project, task, or entry ID (404 Not Found)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Harvest rejected the payload (422 Unprocessable Entity)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Any other HTTP error status
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Network or transport failure, including timeouts
    #[error("Network error: {0}")]
    Transport(String),

    /// Response body did not match the expected shape
    #[error("Failed to parse Harvest response: {0}")]
    Parse(String),
}

/// The currently authenticated user (`GET /users/me`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Project reference embedded in a time entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRef {
    pub id: u64,
    pub name: String,
}

/// Task reference embedded in a time entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRef {
    pub id: u64,
    pub name: String,
}

/// A time entry as Harvest stores it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteTimeEntry {
    pub id: u64,
    pub spent_date: NaiveDate,
    pub hours: f64,
    /// Harvest serializes empty notes as null
    #[serde(default)]
    pub notes: Option<String>,
    pub project: ProjectRef,
    pub task: TaskRef,
}

/// A project visible to the current user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    pub is_active: bool,
}

/// A task assignment on a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskAssignment {
    pub task: TaskRef,
    pub is_active: bool,
}

/// Operations the reconciler needs from the time-tracking backend.
pub trait TimeEntryApi {
    /// Fetch the authenticated user. Used to validate credentials before
    /// any write is attempted.
    fn current_user(&self) -> Result<CurrentUser, HarvestError>;

    /// List entries with a spent date in `[from, to]`, optionally
    /// restricted to one project.
    fn list_entries(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        project_id: Option<u64>,
    ) -> Result<Vec<RemoteTimeEntry>, HarvestError>;

    /// Create a new entry.
    fn create_entry(&self, entry: &TimeEntry) -> Result<RemoteTimeEntry, HarvestError>;

    /// Replace an existing entry's hours and notes in place.
    fn update_entry(&self, id: u64, hours: f64, notes: &str)
    -> Result<RemoteTimeEntry, HarvestError>;

    /// Delete an entry.
    fn delete_entry(&self, id: u64) -> Result<(), HarvestError>;
}
