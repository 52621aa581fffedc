//! `repos`: repository discovery.

use risr::export::write_file;
use risr::github::GraphqlTransport;
use risr::{CollectError, DataFiles, RepoCategory, RepositoryDiscovery};

/// Discovers repositories of `category` and writes their roster.
///
/// # Errors
///
/// Returns [`CollectError::UnsupportedResponse`] when a search page cannot be
/// decoded, and I/O or CSV errors when the roster cannot be written.
pub fn run_with_transport<T>(
    transport: &T,
    files: &DataFiles,
    category: RepoCategory,
) -> Result<(), CollectError>
where
    T: GraphqlTransport + ?Sized,
{
    let repositories = RepositoryDiscovery::new(transport).discover_category(category)?;
    write_file(&files.repositories(category), &repositories)
}

#[cfg(test)]
mod tests {
    use risr::export::read_file;
    use risr::github::ScriptedTransport;
    use risr::github::models::test_support::{edge, repository_node, search_page};
    use risr::{RepoCategory, RepositoryRecord};
    use rstest::rstest;

    use super::run_with_transport;
    use crate::cli::test_support::temp_data_files;

    #[rstest]
    fn writes_discovered_repositories() {
        let (_guard, files) = temp_data_files();
        let transport = ScriptedTransport::new([
            Some(search_page(vec![edge(
                "Y3Vyc29yOjE=",
                repository_node("googleinterns", "risr", "2020-06-01T17:02:13Z", 12),
            )])),
            Some(search_page(Vec::new())),
        ]);

        run_with_transport(&transport, &files, RepoCategory::Test)
            .expect("discovery should succeed");

        let written: Vec<RepositoryRecord> =
            read_file(&files.repositories(RepoCategory::Test)).expect("roster should load");
        assert_eq!(written.len(), 1);
        assert_eq!(
            written.first().map(RepositoryRecord::full_name).as_deref(),
            Some("googleinterns/risr")
        );
        assert_eq!(transport.remaining(), 0);
    }
}
