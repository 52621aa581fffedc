//! CLI command handlers.
//!
//! Each collection step lives in its own module:
//! - [`repos`]: discover repositories of one category
//! - [`hosts`]: merge the teams file with inferred reviewers
//! - [`pr_stats`]: per pull request statistics
//! - [`comments`]: every non-empty comment
//! - [`pr_count`]: pull request count distribution
//!
//! Handlers take any `GraphqlTransport` so they can be exercised without
//! the network.

use std::fs;

use risr::{CollectError, Command, DataFiles, HttpTransport, RepoCategory, RisrConfig};
use tracing::info;

pub mod comments;
pub mod hosts;
pub mod pr_count;
pub mod pr_stats;
pub mod repos;

/// Category assumed by `hosts` when none is configured.
const HOSTS_DEFAULT_CATEGORY: RepoCategory = RepoCategory::Starter;

/// Category assumed by `pr-count` when none is configured.
const PR_COUNT_DEFAULT_CATEGORY: RepoCategory = RepoCategory::Capstone;

/// Runs the configured command.
///
/// Arguments are validated and the transport is built before the data
/// directory is touched, so a configuration mistake leaves nothing behind.
///
/// # Errors
///
/// Returns any configuration, input, transport, or output error raised by the
/// command.
pub fn run(config: &RisrConfig) -> Result<(), CollectError> {
    let command = config.require_command()?;
    let files = config.data_files();
    info!(%command, data_dir = %files.root(), "running collection step");

    match command {
        Command::Repos => {
            let category = config.require_repo_category()?;
            let transport = connect(config)?;
            ensure_data_dir(&files)?;
            repos::run_with_transport(&transport, &files, category)
        }
        Command::Hosts => {
            let category = config.repo_category_or(HOSTS_DEFAULT_CATEGORY)?;
            let teams_file = config.require_teams_file()?;
            let calendar = config.cohort_calendar()?;
            let transport = connect(config)?;
            ensure_data_dir(&files)?;
            hosts::run_with_transport(&transport, &files, category, &teams_file, calendar)
        }
        Command::PrStats => {
            let category = config.require_repo_category()?;
            let transport = connect(config)?;
            ensure_data_dir(&files)?;
            pr_stats::run_with_transport(&transport, &files, category)
        }
        Command::Comments => {
            let category = config.require_repo_category()?;
            let transport = connect(config)?;
            ensure_data_dir(&files)?;
            comments::run_with_transport(&transport, &files, category)
        }
        Command::PrCount => {
            let category = config.repo_category_or(PR_COUNT_DEFAULT_CATEGORY)?;
            ensure_data_dir(&files)?;
            pr_count::run(&files, category)
        }
    }
}

/// Builds the HTTP transport from the configured token, endpoint, and retry
/// delay.
fn connect(config: &RisrConfig) -> Result<HttpTransport, CollectError> {
    let token = config.resolve_token()?;
    HttpTransport::for_endpoint(&token, &config.api_url, config.retry_policy())
}

fn ensure_data_dir(files: &DataFiles) -> Result<(), CollectError> {
    let root = files.root();
    fs::create_dir_all(root).map_err(|error| CollectError::Io {
        message: format!("{root}: {error}"),
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use camino::Utf8PathBuf;
    use risr::DataFiles;
    use tempfile::TempDir;

    /// Temporary data directory removed when the guard drops.
    pub(crate) fn temp_data_files() -> (TempDir, DataFiles) {
        let dir = TempDir::new().expect("temp dir should be created");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .expect("temp path should be UTF-8");
        (dir, DataFiles::new(root))
    }
}
