//! Configuration for productive-box
//!
//! Every setting can come from a flag or from the environment, so the binary
//! runs unchanged from a shell or from a scheduled CI job with secrets.
//! A `.env` file can fill in environment variables that are not already set.

use std::path::{Path, PathBuf};

use chrono::{FixedOffset, Offset, Utc};
use clap::Parser;

use crate::gist::DEFAULT_GIST_DESCRIPTION;
use crate::github::DEFAULT_API_URL;

/// Branch whose history is sampled when none is configured
pub const DEFAULT_BRANCH: &str = "master";

/// productive-box - Are you an early 🐤 or a night 🦉?
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "productive-box")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// GitHub access token
    ///
    /// Needs the `repo` scope to read private contributions and the `gist`
    /// scope to publish.
    #[arg(long, env = "GH_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// ID of the gist to update
    #[arg(long, env = "GIST_ID")]
    pub gist_id: Option<String>,

    /// Description to set on the gist
    #[arg(long, env = "GIST_DESCRIPTION")]
    pub gist_description: Option<String>,

    /// Fixed UTC offset used to read commit hours, e.g. +09:00 or -0500
    ///
    /// Defaults to UTC. The machine's local timezone is never used.
    #[arg(long, env = "UTC_OFFSET", allow_hyphen_values = true)]
    pub utc_offset: Option<String>,

    /// Branch whose commit history is sampled in each repository
    #[arg(long, env = "PRODUCTIVE_BRANCH")]
    pub branch: Option<String>,

    /// GitHub REST API base URL, e.g. https://ghe.example/api/v3
    #[arg(long, env = "GITHUB_API_URL")]
    pub api_url: Option<String>,

    /// GitHub GraphQL endpoint, defaults to `{api-url}/graphql`
    ///
    /// GitHub Enterprise Server needs this set, e.g.
    /// https://ghe.example/api/graphql.
    #[arg(long, env = "GITHUB_GRAPHQL_URL")]
    pub graphql_url: Option<String>,

    /// Print the chart to stdout instead of publishing it
    #[arg(long, default_value = "false")]
    pub dry_run: bool,

    /// With --dry-run, print the report as JSON
    #[arg(long, default_value = "false", requires = "dry_run")]
    pub json: bool,

    /// Enable verbose logging (debug level)
    ///
    /// Logs are written to stderr so they never mix with --dry-run output.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

impl Config {
    /// Get the access token
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingToken`] if no non-empty token is set.
    pub fn token(&self) -> Result<&str, ConfigError> {
        non_empty(self.token.as_deref()).ok_or(ConfigError::MissingToken)
    }

    /// Get the gist id
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingGistId`] if no non-empty id is set.
    pub fn gist_id(&self) -> Result<&str, ConfigError> {
        non_empty(self.gist_id.as_deref()).ok_or(ConfigError::MissingGistId)
    }

    /// Get the gist description, falling back to the default when unset or empty
    #[must_use]
    pub fn gist_description(&self) -> &str {
        non_empty(self.gist_description.as_deref()).unwrap_or(DEFAULT_GIST_DESCRIPTION)
    }

    /// Get the branch to sample, defaulting to `master`
    #[must_use]
    pub fn branch(&self) -> &str {
        non_empty(self.branch.as_deref()).unwrap_or(DEFAULT_BRANCH)
    }

    /// Get the API base URL, defaulting to the public GitHub API
    #[must_use]
    pub fn api_url(&self) -> &str {
        non_empty(self.api_url.as_deref()).unwrap_or(DEFAULT_API_URL)
    }

    /// Get the GraphQL endpoint, if one was set apart from the API base URL
    #[must_use]
    pub fn graphql_url(&self) -> Option<&str> {
        non_empty(self.graphql_url.as_deref())
    }

    /// Get the offset commit hours are read in, defaulting to UTC
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUtcOffset`] if the offset cannot be parsed.
    pub fn utc_offset(&self) -> Result<FixedOffset, ConfigError> {
        match non_empty(self.utc_offset.as_deref()) {
            Some(raw) => parse_utc_offset(raw),
            None => Ok(utc()),
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No access token is set
    /// - No gist id is set and this is not a dry run
    /// - The UTC offset is malformed
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.token()?;
        if !self.dry_run {
            self.gist_id()?;
        }
        self.utc_offset()?;
        Ok(())
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

/// Configuration errors
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// No access token
    #[error("Unable to get environment variable 'GH_TOKEN' (or --token)")]
    MissingToken,

    /// No destination gist
    #[error("Unable to get environment variable 'GIST_ID' (or --gist-id)")]
    MissingGistId,

    /// Offset not in a recognised format or out of range
    #[error("Invalid UTC offset '{0}': expected Z, +HH, +HHMM or +HH:MM")]
    InvalidUtcOffset(String),

    /// A `.env` file exists but could not be read
    #[error("Unable to load env file {path}: {message}")]
    EnvFile {
        /// File that failed to load
        path: String,
        /// Parser or I/O error
        message: String,
    },
}

/// Load a `.env` file from the working directory or one of its parents
///
/// Variables already set in the environment keep their value. Returns the
/// loaded file, or `None` when there is no `.env` file.
///
/// # Errors
///
/// Returns [`ConfigError::EnvFile`] if a `.env` file exists but is malformed.
pub fn load_env_file() -> Result<Option<PathBuf>, ConfigError> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(error) if error.not_found() => Ok(None),
        Err(error) => Err(ConfigError::EnvFile {
            path: ".env".to_string(),
            message: error.to_string(),
        }),
    }
}

/// Load `KEY=value` lines from `path` into the environment
///
/// Variables already set in the environment keep their value.
///
/// # Errors
///
/// Returns [`ConfigError::EnvFile`] if the file is missing or malformed.
pub fn load_env_file_from(path: &Path) -> Result<(), ConfigError> {
    dotenvy::from_path(path).map_err(|error| ConfigError::EnvFile {
        path: path.display().to_string(),
        message: error.to_string(),
    })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn utc() -> FixedOffset {
    Utc.fix()
}

/// Parse `Z`, `UTC`, `+HH`, `+HHMM` or `+HH:MM` (sign required for numeric forms)
///
/// # Errors
///
/// Returns [`ConfigError::InvalidUtcOffset`] for anything else, or for
/// hours above 23 or minutes above 59.
pub fn parse_utc_offset(raw: &str) -> Result<FixedOffset, ConfigError> {
    let invalid = || ConfigError::InvalidUtcOffset(raw.to_string());
    let value = raw.trim();

    if value.eq_ignore_ascii_case("z") || value.eq_ignore_ascii_case("utc") {
        return Ok(utc());
    }
    if !value.is_ascii() {
        return Err(invalid());
    }

    let (sign, digits) = match value.split_at_checked(1) {
        Some(("+", rest)) => (1, rest),
        Some(("-", rest)) => (-1, rest),
        _ => return Err(invalid()),
    };
    let (hours, minutes) = match digits.split_once(':') {
        Some(parts) => parts,
        None if digits.len() == 4 => digits.split_at(2),
        None => (digits, "0"),
    };

    let hours: i32 = parse_field(hours, 23).ok_or_else(invalid)?;
    let minutes: i32 = parse_field(minutes, 59).ok_or_else(invalid)?;
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}

fn parse_field(field: &str, max: i32) -> Option<i32> {
    if field.is_empty() || field.len() > 2 || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok().filter(|v| *v <= max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offset_seconds(raw: &str) -> Result<i32, ConfigError> {
        parse_utc_offset(raw).map(|o| o.local_minus_utc())
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.token.is_none());
        assert!(config.gist_id.is_none());
        assert!(!config.dry_run);
        assert!(!config.json);
        assert!(!config.verbose);
        assert!(!config.quiet);
    }

    #[test]
    fn test_defaults_for_optional_settings() {
        let config = Config::default();
        assert_eq!(config.branch(), "master");
        assert_eq!(config.api_url(), "https://api.github.com");
        assert_eq!(config.graphql_url(), None);
        assert_eq!(config.gist_description(), DEFAULT_GIST_DESCRIPTION);
        assert_eq!(config.utc_offset(), Ok(utc()));
    }

    #[test]
    fn test_empty_description_uses_default() {
        let config = Config {
            gist_description: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(config.gist_description(), DEFAULT_GIST_DESCRIPTION);
    }

    #[test]
    fn test_custom_description() {
        let config = Config {
            gist_description: Some("my commits".to_string()),
            ..Default::default()
        };
        assert_eq!(config.gist_description(), "my commits");
    }

    #[test]
    fn test_validate_requires_token() {
        let config = Config {
            gist_id: Some("abc".to_string()),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::MissingToken));
    }

    #[test]
    fn test_validate_requires_gist_id_unless_dry_run() {
        let mut config = Config {
            token: Some("ghp_x".to_string()),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::MissingGistId));

        config.dry_run = true;
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_blank_token() {
        let config = Config {
            token: Some(String::new()),
            gist_id: Some("abc".to_string()),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::MissingToken));
    }

    #[test]
    fn test_validate_checks_offset() {
        let config = Config {
            token: Some("ghp_x".to_string()),
            gist_id: Some("abc".to_string()),
            utc_offset: Some("nine".to_string()),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidUtcOffset(_))));
    }

    #[test]
    fn test_parse_utc_offset_forms() {
        assert_eq!(offset_seconds("Z"), Ok(0));
        assert_eq!(offset_seconds("utc"), Ok(0));
        assert_eq!(offset_seconds("+09:00"), Ok(9 * 3600));
        assert_eq!(offset_seconds("+0930"), Ok(9 * 3600 + 30 * 60));
        assert_eq!(offset_seconds("-05"), Ok(-5 * 3600));
        assert_eq!(offset_seconds("-5"), Ok(-5 * 3600));
        assert_eq!(offset_seconds(" +01:00 "), Ok(3600));
    }

    #[test]
    fn test_parse_utc_offset_rejects_garbage() {
        for raw in ["", "+", "09:00", "+24:00", "+09:60", "+9:0:0", "+0a", "+🕘", "+123"] {
            assert!(parse_utc_offset(raw).is_err(), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn test_log_level_default() {
        let config = Config::default();
        assert_eq!(config.log_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_log_level_verbose() {
        let config = Config {
            verbose: true,
            ..Default::default()
        };
        assert_eq!(config.log_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_log_level_quiet() {
        let config = Config {
            quiet: true,
            ..Default::default()
        };
        assert_eq!(config.log_level(), tracing::Level::WARN);
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
