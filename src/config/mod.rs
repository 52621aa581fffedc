//! Application configuration loaded from CLI, environment, and files.
//!
//! Values are merged with ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.risr.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `RISR_COMMAND`, `RISR_TOKEN` (or legacy
//!    `GITHUB_PAT`), `RISR_REPO_TYPE`, and so on
//! 4. **Command-line arguments** – `--command`/`-c`, `--token`/`-t`, ...
//!
//! # Configuration File
//!
//! ```toml
//! token = "ghp_example"
//! repo_type = "starter"
//! teams_file = "step_teams.csv"
//! data_dir = "data"
//! retry_delay_ms = 1000
//! cohort_starts = "5/18/2020,6/1/2020,6/15/2020"
//! ```

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::cohort::calendar::parse_start_date;
use crate::cohort::{CohortCalendar, RepoCategory};
use crate::export::{DEFAULT_DATA_DIR, DataFiles};
use crate::github::transport::retry::DEFAULT_MAX_ATTEMPTS;
use crate::github::{CollectError, DEFAULT_GRAPHQL_ENDPOINT, PersonalAccessToken, RetryPolicy};

/// Environment variable consulted when no token is configured.
pub const LEGACY_TOKEN_VARIABLE: &str = "GITHUB_PAT";

const DEFAULT_RETRY_DELAY_MS: u64 = 1_000;

/// Collection step to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Discover repositories of one category.
    Repos,
    /// Build the host roster.
    Hosts,
    /// Extract pull request statistics.
    PrStats,
    /// Extract comments.
    Comments,
    /// Summarise pull request counts per repository.
    PrCount,
}

impl Command {
    /// Name accepted on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Repos => "repos",
            Self::Hosts => "hosts",
            Self::PrStats => "pr-stats",
            Self::Comments => "comments",
            Self::PrCount => "pr-count",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Command {
    type Err = CollectError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "repos" => Ok(Self::Repos),
            "hosts" => Ok(Self::Hosts),
            "pr-stats" => Ok(Self::PrStats),
            "comments" => Ok(Self::Comments),
            "pr-count" => Ok(Self::PrCount),
            _ => Err(CollectError::Configuration {
                message: format!(
                    "unknown command '{value}' (expected repos, hosts, pr-stats, comments, or pr-count)"
                ),
            }),
        }
    }
}

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use risr::RisrConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = RisrConfig::load().expect("failed to load configuration");
/// let command = config.require_command().expect("command required");
/// let token = config.resolve_token().expect("token required");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "RISR",
    discovery(
        dotfile_name = ".risr.toml",
        config_file_name = "risr.toml",
        app_name = "risr"
    )
)]
pub struct RisrConfig {
    /// Collection step: `repos`, `hosts`, `pr-stats`, `comments`, or
    /// `pr-count`.
    ///
    /// Can be provided via:
    /// - CLI: `--command <NAME>` or `-c <NAME>`
    /// - Environment: `RISR_COMMAND`
    #[ortho_config(cli_short = 'c')]
    pub command: Option<String>,

    /// Personal access token for the GitHub GraphQL API.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `RISR_TOKEN` or `GITHUB_PAT` (legacy)
    /// - Config file: `token = "..."`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Repository category: `starter`, `capstone`, or `test`.
    ///
    /// Can be provided via:
    /// - CLI: `--repo-type <TYPE>` or `-r <TYPE>`
    /// - Environment: `RISR_REPO_TYPE`
    /// - Config file: `repo_type = "..."`
    #[ortho_config(cli_short = 'r')]
    pub repo_type: Option<String>,

    /// Path to the program teams CSV used by the `hosts` step.
    ///
    /// Can be provided via:
    /// - CLI: `--teams-file <PATH>` or `-f <PATH>`
    /// - Environment: `RISR_TEAMS_FILE`
    /// - Config file: `teams_file = "..."`
    #[ortho_config(cli_short = 'f')]
    pub teams_file: Option<String>,

    /// Directory holding every input and output CSV. Defaults to `data`.
    #[ortho_config(cli_short = 'd')]
    pub data_dir: String,

    /// GraphQL endpoint. Defaults to the public GitHub API.
    #[ortho_config(cli_short = 'a')]
    pub api_url: String,

    /// Pause before retrying a throttled or failed request, in milliseconds.
    #[ortho_config(cli_short = 'w')]
    pub retry_delay_ms: u64,

    /// Comma-separated cohort start dates (`M/D/YYYY`) used to bucket
    /// inferred hosts. Defaults to the 2020 cohorts.
    ///
    /// Can be provided via:
    /// - CLI: `--cohort-starts <DATES>` or `-s <DATES>`
    /// - Environment: `RISR_COHORT_STARTS`
    /// - Config file: `cohort_starts = "..."`
    #[ortho_config(cli_short = 's')]
    pub cohort_starts: Option<String>,
}

impl Default for RisrConfig {
    fn default() -> Self {
        Self {
            command: None,
            token: None,
            repo_type: None,
            teams_file: None,
            data_dir: DEFAULT_DATA_DIR.to_owned(),
            api_url: DEFAULT_GRAPHQL_ENDPOINT.to_owned(),
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
            cohort_starts: None,
        }
    }
}

impl RisrConfig {
    /// Resolves the token from configuration or the legacy `GITHUB_PAT`
    /// environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`CollectError::MissingToken`] when no source provides a
    /// non-blank value.
    pub fn resolve_token(&self) -> Result<PersonalAccessToken, CollectError> {
        let raw = self
            .token
            .clone()
            .or_else(|| env::var(LEGACY_TOKEN_VARIABLE).ok())
            .ok_or(CollectError::MissingToken)?;
        PersonalAccessToken::new(raw)
    }

    /// Returns the collection step to run.
    ///
    /// # Errors
    ///
    /// Returns [`CollectError::Configuration`] when the command is missing or
    /// not recognised.
    pub fn require_command(&self) -> Result<Command, CollectError> {
        self.command
            .as_deref()
            .ok_or_else(|| CollectError::Configuration {
                message: "a command is required (use --command or -c)".to_owned(),
            })?
            .parse()
    }

    /// Returns the configured repository category.
    ///
    /// # Errors
    ///
    /// Returns [`CollectError::Configuration`] when no category is set and
    /// [`CollectError::UnsupportedCategory`] when it is not recognised.
    pub fn require_repo_category(&self) -> Result<RepoCategory, CollectError> {
        self.repo_type
            .as_deref()
            .ok_or_else(|| CollectError::Configuration {
                message: "a repository type is required (use --repo-type or -r)".to_owned(),
            })?
            .parse()
    }

    /// Returns the configured repository category, or `default` when unset.
    ///
    /// # Errors
    ///
    /// Returns [`CollectError::UnsupportedCategory`] when the configured value
    /// is not recognised.
    pub fn repo_category_or(&self, default: RepoCategory) -> Result<RepoCategory, CollectError> {
        self.repo_type.as_deref().map_or(Ok(default), str::parse)
    }

    /// Returns the teams file path.
    ///
    /// # Errors
    ///
    /// Returns [`CollectError::Configuration`] when no path is configured.
    pub fn require_teams_file(&self) -> Result<Utf8PathBuf, CollectError> {
        self.teams_file
            .as_deref()
            .map(Utf8PathBuf::from)
            .ok_or_else(|| CollectError::Configuration {
                message: "a teams file is required (use --teams-file or -f)".to_owned(),
            })
    }

    /// Data file layout rooted at `data_dir`.
    #[must_use]
    pub fn data_files(&self) -> DataFiles {
        DataFiles::new(self.data_dir.as_str())
    }

    /// Cohort calendar from `cohort_starts`, or the default 2020 calendar
    /// when unset.
    ///
    /// # Errors
    ///
    /// Returns [`CollectError::Configuration`] when a date does not parse or
    /// no dates are listed.
    pub fn cohort_calendar(&self) -> Result<CohortCalendar, CollectError> {
        let Some(raw) = self.cohort_starts.as_deref() else {
            return Ok(CohortCalendar::default());
        };
        let dates = raw
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| {
                parse_start_date(entry).ok_or_else(|| CollectError::Configuration {
                    message: format!("invalid cohort start date '{entry}' (expected M/D/YYYY)"),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        CohortCalendar::new(dates)
    }

    /// Retry policy using the configured delay.
    #[must_use]
    pub const fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            DEFAULT_MAX_ATTEMPTS,
            Duration::from_millis(self.retry_delay_ms),
        )
    }
}

#[cfg(test)]
mod tests;
