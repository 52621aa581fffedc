//! `pr-count`: pull request count distribution. Needs no network access.

use risr::export::{pr_count_distribution, read_file, write_file};
use risr::{CollectError, DataFiles, RepoCategory, RepositoryRecord};

/// Buckets the `category` roster by pull request count and writes the
/// distribution.
///
/// # Errors
///
/// Returns [`CollectError::MissingInput`] when the roster is absent, and I/O
/// or CSV errors when reading or writing fails.
pub fn run(files: &DataFiles, category: RepoCategory) -> Result<(), CollectError> {
    let repositories: Vec<RepositoryRecord> = read_file(&files.repositories(category))?;
    write_file(&files.pr_count(), &pr_count_distribution(&repositories))
}
