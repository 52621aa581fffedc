//! `pr-stats`: pull request statistics.

use risr::export::{PullRequestRow, read_file, write_file};
use risr::github::GraphqlTransport;
use risr::{
    CollectError, DataFiles, HostRecord, HostRoster, PullRequestStatsExtractor, RepoCategory,
    RepositoryRecord,
};
use tracing::info;

/// Extracts statistics for every repository of `category` and writes them.
///
/// # Errors
///
/// Returns [`CollectError::MissingInput`] when the repository or host roster
/// is absent, and transport, I/O, or CSV errors raised along the way.
pub fn run_with_transport<T>(
    transport: &T,
    files: &DataFiles,
    category: RepoCategory,
) -> Result<(), CollectError>
where
    T: GraphqlTransport + ?Sized,
{
    let repositories: Vec<RepositoryRecord> = read_file(&files.repositories(category))?;
    let roster: HostRoster = read_file::<HostRecord>(&files.hosts())?
        .into_iter()
        .collect();

    let mut extractor = PullRequestStatsExtractor::new(transport);
    let mut rows = Vec::new();
    for repository in &repositories {
        let records = extractor.extract_stats(repository, &roster)?;
        rows.extend(records.iter().map(PullRequestRow::from));
    }

    info!(
        repositories = repositories.len(),
        pull_requests = rows.len(),
        "pull request statistics extracted"
    );
    write_file(&files.pr_stats(category), &rows)
}
