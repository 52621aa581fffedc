//! `comments`: comment extraction.

use risr::export::{CommentRow, read_file, write_file};
use risr::github::GraphqlTransport;
use risr::{
    CollectError, CommentExtractor, DataFiles, HostRecord, HostRoster, RepoCategory,
    RepositoryRecord,
};
use tracing::info;

/// Extracts comments from every repository of `category` and writes them.
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

    let extractor = CommentExtractor::new(transport);
    let mut rows = Vec::new();
    for repository in &repositories {
        let records = extractor.extract_comments(repository, category, &roster)?;
        rows.extend(records.iter().map(CommentRow::from));
    }

    info!(
        repositories = repositories.len(),
        comments = rows.len(),
        "comments extracted"
    );
    write_file(&files.comments(category), &rows)
}
