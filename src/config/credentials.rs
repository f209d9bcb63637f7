//! Harvest API credential resolution.
//!
//! Precedence (highest to lowest):
//!
//! 1. `HARVEST_ACCESS_TOKEN` / `HARVEST_ACCOUNT_ID` environment variables
//! 2. `KEY=VALUE` lines in `~/.harvest/credentials`
//!
//! Credentials are resolved once at the start of a run into an explicit
//! value that is passed to the client constructor; nothing reads the
//! environment after that point.

use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Environment variable holding the personal access token.
pub const ACCESS_TOKEN_ENV: &str = "HARVEST_ACCESS_TOKEN";

/// Environment variable holding the account identifier.
pub const ACCOUNT_ID_ENV: &str = "HARVEST_ACCOUNT_ID";

/// Resolved Harvest API credentials.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Personal access token, sent as a bearer token
    pub access_token: String,
    /// Harvest account ID, sent as the `Harvest-Account-Id` header
    pub account_id: String,
}

impl Credentials {
    /// Resolve credentials from the environment, falling back to the
    /// credentials file in the home directory.
    pub fn resolve() -> Result<Self> {
        Self::resolve_with_file(credentials_file().as_deref())
    }

    /// Resolve credentials against an explicit fallback file (dependency
    /// injection for tests).
    pub fn resolve_with_file(file: Option<&Path>) -> Result<Self> {
        let mut token = env_non_empty(ACCESS_TOKEN_ENV);
        let mut account = env_non_empty(ACCOUNT_ID_ENV);

        if token.is_none() || account.is_none() {
            if let Some(contents) = file.and_then(|path| std::fs::read_to_string(path).ok()) {
                for line in contents.lines() {
                    let Some((key, value)) = line.split_once('=') else {
                        continue;
                    };
                    let value = value.trim();
                    if value.is_empty() {
                        continue;
                    }
                    match key.trim() {
                        ACCESS_TOKEN_ENV if token.is_none() => token = Some(value.to_string()),
                        ACCOUNT_ID_ENV if account.is_none() => account = Some(value.to_string()),
                        _ => {}
                    }
                }
            }
        }

        match (token, account) {
            (Some(access_token), Some(account_id)) => Ok(Self {
                access_token,
                account_id,
            }),
            _ => Err(Error::Credentials(format!(
                "Harvest credentials not found. Set {} and {} in the environment or in ~/.harvest/credentials.",
                ACCESS_TOKEN_ENV, ACCOUNT_ID_ENV
            ))),
        }
    }

    /// Mask the access token for display, keeping the first and last
    /// four characters.
    pub fn masked_token(&self) -> String {
        let token = &self.access_token;
        if token.len() <= 12 {
            format!("{}...", &token[..4.min(token.len())])
        } else {
            format!("{}...{}", &token[..4], &token[token.len() - 4..])
        }
    }
}

/// Read an environment variable, treating empty values as unset.
fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

/// Default location of the credentials file.
fn credentials_file() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".harvest").join("credentials"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    /// Clear both credential variables for the duration of a test.
    ///
    /// SAFETY: set_var/remove_var are unsafe on POSIX because setenv(3)
    /// is not thread-safe. Acceptable here because these tests are
    /// `#[serial]` and nothing else in the process touches these
    /// variables concurrently.
    fn clear_env() {
        unsafe {
            std::env::remove_var(ACCESS_TOKEN_ENV);
            std::env::remove_var(ACCOUNT_ID_ENV);
        }
    }

    #[test]
    #[serial]
    fn test_resolve_from_environment() {
        clear_env();
        unsafe {
            std::env::set_var(ACCESS_TOKEN_ENV, "token-from-env");
            std::env::set_var(ACCOUNT_ID_ENV, "1234567");
        }

        let credentials = Credentials::resolve_with_file(None).unwrap();
        assert_eq!(credentials.access_token, "token-from-env");
        assert_eq!(credentials.account_id, "1234567");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_resolve_from_file() {
        clear_env();

        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("credentials");
        std::fs::write(
            &path,
            "# Harvest API credentials\nHARVEST_ACCESS_TOKEN=token-from-file\nHARVEST_ACCOUNT_ID=7654321\n",
        )
        .unwrap();

        let credentials = Credentials::resolve_with_file(Some(&path)).unwrap();
        assert_eq!(credentials.access_token, "token-from-file");
        assert_eq!(credentials.account_id, "7654321");
    }

    #[test]
    #[serial]
    fn test_environment_wins_over_file() {
        clear_env();
        unsafe {
            std::env::set_var(ACCESS_TOKEN_ENV, "env-token");
            std::env::set_var(ACCOUNT_ID_ENV, "1111111");
        }

        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("credentials");
        std::fs::write(&path, "HARVEST_ACCESS_TOKEN=file-token\nHARVEST_ACCOUNT_ID=2222222\n").unwrap();

        let credentials = Credentials::resolve_with_file(Some(&path)).unwrap();
        assert_eq!(credentials.access_token, "env-token");
        assert_eq!(credentials.account_id, "1111111");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_missing_credentials_give_guidance() {
        clear_env();

        let err = Credentials::resolve_with_file(None).unwrap_err().to_string();
        assert!(err.contains(ACCESS_TOKEN_ENV));
        assert!(err.contains(ACCOUNT_ID_ENV));
    }

    #[test]
    fn test_masked_token() {
        let credentials = Credentials {
            access_token: "1234567890abcdefgh".to_string(),
            account_id: "1".to_string(),
        };
        assert_eq!(credentials.masked_token(), "1234...efgh");
    }

    #[test]
    fn test_masked_token_short() {
        let credentials = Credentials {
            access_token: "short".to_string(),
            account_id: "1".to_string(),
        };
        assert_eq!(credentials.masked_token(), "shor...");
    }
}
