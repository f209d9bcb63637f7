//! Project configuration for Harvest submission.
//!
//! A `.project.yaml` file in the working directory names the Harvest
//! project and task that entries are logged against:
//!
//! ```yaml
//! harvest:
//!   project_id: 12345678
//!   task_id: 87654321
//!   default_notes: "Development work"
//!   hours_per_day: 8.0
//!   future_day_notes: "Planned development work"
//!   time_off:
//!     project_id: 11112222
//!     task_id: 33334444
//!     default_reason: "Time off"
//! ```
//!
//! The file is created by an external setup workflow and only read here.
//! Validation runs on every load, before any remote call is attempted.

pub mod credentials;

pub use credentials::Credentials;

use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

/// Name of the per-project configuration file.
pub const CONFIG_FILE: &str = ".project.yaml";

/// Default hours logged per working day.
const DEFAULT_HOURS_PER_DAY: f64 = 8.0;

/// Top-level shape of `.project.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    harvest: ProjectConfig,
}

/// Harvest settings for one working directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Numeric Harvest project ID
    #[serde(deserialize_with = "numeric_id")]
    pub project_id: u64,

    /// Numeric Harvest task ID
    #[serde(deserialize_with = "numeric_id")]
    pub task_id: u64,

    /// Notes used when a day has no commits
    pub default_notes: String,

    /// Hours logged per working day
    #[serde(default = "default_hours")]
    pub hours_per_day: f64,

    /// Notes used for days that have not happened yet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub future_day_notes: Option<String>,

    /// Project/task pair where day-off hours are logged. When absent,
    /// days off produce no entry at all (legacy behavior).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_off: Option<TimeOffConfig>,
}

/// Destination for day-off entries, when configured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeOffConfig {
    /// Numeric Harvest project ID of the time-off project
    #[serde(deserialize_with = "numeric_id")]
    pub project_id: u64,

    /// Numeric Harvest task ID within the time-off project
    #[serde(deserialize_with = "numeric_id")]
    pub task_id: u64,

    /// Fallback reason when the user supplies none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_reason: Option<String>,
}

fn default_hours() -> f64 {
    DEFAULT_HOURS_PER_DAY
}

/// Accept a Harvest ID as either a YAML number or a numeric string.
///
/// Human-readable names are rejected with a pointer at the real fix: the
/// numeric ID from the Harvest web interface.
fn numeric_id<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(id) => Ok(id),
        Raw::Text(text) => text.trim().parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "expected a numeric Harvest ID, got \"{}\" (use the ID from the Harvest web interface, not the name)",
                text
            ))
        }),
    }
}

impl ProjectConfig {
    /// Load and validate `.project.yaml` from `dir`.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);

        if !path.exists() {
            return Err(Error::Config(format!(
                "{} not found in {}. Run the project setup workflow first.",
                CONFIG_FILE,
                dir.display()
            )));
        }

        let raw = std::fs::read_to_string(&path)?;
        Self::from_yaml(&raw)
    }

    /// Parse and validate a configuration from YAML text.
    pub fn from_yaml(raw: &str) -> Result<Self> {
        let file: ConfigFile = serde_yaml::from_str(raw)
            .map_err(|e| Error::Config(format!("invalid {}: {}", CONFIG_FILE, e)))?;

        file.harvest.validate()?;
        Ok(file.harvest)
    }

    /// Validate field values.
    pub fn validate(&self) -> Result<()> {
        if self.default_notes.trim().is_empty() {
            return Err(Error::Config("default_notes must not be empty".to_string()));
        }

        if !(self.hours_per_day > 0.0 && self.hours_per_day <= 24.0) {
            return Err(Error::Config(format!(
                "hours_per_day must be between 0 and 24, got {}",
                self.hours_per_day
            )));
        }

        if let Some(time_off) = &self.time_off {
            if let Some(reason) = &time_off.default_reason {
                if reason.trim().is_empty() {
                    return Err(Error::Config(
                        "time_off.default_reason cannot be empty if specified".to_string(),
                    ));
                }
            }
        }

        Ok(())
    }
}
