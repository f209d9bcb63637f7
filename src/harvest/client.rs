//! HTTP client for the Harvest API v2.
//!
//! Every request carries the bearer token, the `Harvest-Account-Id`
//! header, and a `User-Agent` identifying this tool (Harvest asks API
//! clients to identify themselves). Calls are blocking with a fixed
//! timeout; a timeout surfaces as a transport failure.

use super::{
    CurrentUser, HarvestError, Project, RemoteTimeEntry, TaskAssignment, TimeEntryApi,
};
use crate::config::Credentials;
use crate::timesheet::TimeEntry;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;

/// Harvest API base URL.
const HARVEST_API_BASE: &str = "https://api.harvestapp.com/v2";

/// User-Agent header sent with every request.
const USER_AGENT: &str = "dogwatch-cli";

/// Request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Listing envelopes. Week-scale queries fit in the first page, so
/// pagination links are ignored.
#[derive(Debug, serde::Deserialize)]
struct TimeEntriesPage {
    time_entries: Vec<RemoteTimeEntry>,
}

#[derive(Debug, serde::Deserialize)]
struct ProjectsPage {
    projects: Vec<Project>,
}

#[derive(Debug, serde::Deserialize)]
struct TaskAssignmentsPage {
    task_assignments: Vec<TaskAssignment>,
}

/// Client for the Harvest API v2.
pub struct HarvestClient {
    agent: ureq::Agent,
    access_token: String,
    account_id: String,
}

impl HarvestClient {
    /// Create a client from resolved credentials.
    pub fn new(credentials: &Credentials) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build(),
            access_token: credentials.access_token.clone(),
            account_id: credentials.account_id.clone(),
        }
    }

    /// Attach the authentication and identification headers.
    fn prepare(&self, request: ureq::Request) -> ureq::Request {
        request
            .set("Authorization", &format!("Bearer {}", self.access_token))
            .set("Harvest-Account-Id", &self.account_id)
            .set("User-Agent", USER_AGENT)
    }

    fn url(path: &str) -> String {
        format!("{}{}", HARVEST_API_BASE, path)
    }

    /// List projects accessible to the current user.
    pub fn projects(&self) -> Result<Vec<Project>, HarvestError> {
        let response = self
            .prepare(self.agent.get(&Self::url("/projects")))
            .call()
            .map_err(map_error)?;

        Ok(parse_json::<ProjectsPage>(response)?.projects)
    }

    /// List task assignments for a project.
    pub fn project_tasks(&self, project_id: u64) -> Result<Vec<TaskAssignment>, HarvestError> {
        let path = format!("/projects/{}/task_assignments", project_id);
        let response = self
            .prepare(self.agent.get(&Self::url(&path)))
            .call()
            .map_err(map_error)?;

        Ok(parse_json::<TaskAssignmentsPage>(response)?.task_assignments)
    }
}

impl TimeEntryApi for HarvestClient {
    fn current_user(&self) -> Result<CurrentUser, HarvestError> {
        let response = self
            .prepare(self.agent.get(&Self::url("/users/me")))
            .call()
            .map_err(map_error)?;

        parse_json(response)
    }

    fn list_entries(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        project_id: Option<u64>,
    ) -> Result<Vec<RemoteTimeEntry>, HarvestError> {
        let mut request = self
            .prepare(self.agent.get(&Self::url("/time_entries")))
            .query("from", &from.format("%Y-%m-%d").to_string())
            .query("to", &to.format("%Y-%m-%d").to_string());

        if let Some(project_id) = project_id {
            request = request.query("project_id", &project_id.to_string());
        }

        let response = request.call().map_err(map_error)?;
        Ok(parse_json::<TimeEntriesPage>(response)?.time_entries)
    }

    fn create_entry(&self, entry: &TimeEntry) -> Result<RemoteTimeEntry, HarvestError> {
        let response = self
            .prepare(self.agent.post(&Self::url("/time_entries")))
            .send_json(json!({
                "project_id": entry.project_id,
                "task_id": entry.task_id,
                "spent_date": entry.spent_date.format("%Y-%m-%d").to_string(),
                "hours": entry.hours,
                "notes": entry.notes,
            }))
            .map_err(map_error)?;

        parse_json(response)
    }

    fn update_entry(
        &self,
        id: u64,
        hours: f64,
        notes: &str,
    ) -> Result<RemoteTimeEntry, HarvestError> {
        let path = format!("/time_entries/{}", id);
        let response = self
            .prepare(self.agent.request("PATCH", &Self::url(&path)))
            .send_json(json!({
                "hours": hours,
                "notes": notes,
            }))
            .map_err(map_error)?;

        parse_json(response)
    }

    fn delete_entry(&self, id: u64) -> Result<(), HarvestError> {
        let path = format!("/time_entries/{}", id);
        self.prepare(self.agent.delete(&Self::url(&path)))
            .call()
            .map_err(map_error)?;

        // Harvest answers a successful delete with an empty body.
        Ok(())
    }
}

/// Deserialize a successful response body.
fn parse_json<T: DeserializeOwned>(response: ureq::Response) -> Result<T, HarvestError> {
    response
        .into_json()
        .map_err(|e| HarvestError::Parse(e.to_string()))
}

/// Map a ureq error onto the Harvest error taxonomy.
fn map_error(err: ureq::Error) -> HarvestError {
    match err {
        ureq::Error::Status(401, _) => HarvestError::Unauthorized,
        ureq::Error::Status(403, _) => HarvestError::Forbidden,
        ureq::Error::Status(404, response) => HarvestError::NotFound(error_body(response)),
        ureq::Error::Status(422, response) => HarvestError::Validation(error_body(response)),
        ureq::Error::Status(code, response) => {
            HarvestError::Http(format!("HTTP {}: {}", code, error_body(response)))
        }
        e => HarvestError::Transport(e.to_string()),
    }
}

/// Pull the most useful message out of a Harvest error body.
///
/// Harvest error responses carry one of `message`, `error_description`,
/// or `error`; fall back to the raw body text.
fn error_body(response: ureq::Response) -> String {
    let body = response.into_string().unwrap_or_default();

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(&body) {
        for key in ["message", "error_description", "error"] {
            if let Some(message) = value.get(key).and_then(|v| v.as_str()) {
                return message.to_string();
            }
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        "(empty response body)".to_string()
    } else {
        trimmed.to_string()
    }
}
