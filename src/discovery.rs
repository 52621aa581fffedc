//! Repository discovery through GitHub search.

use tracing::info;

use crate::cohort::{RepoCategory, RepositoryRecord};
use crate::github::models::{SearchData, decode_data};
use crate::github::pagination::{consume_edges, paginate};
use crate::github::{CollectError, GraphqlQuery, GraphqlTransport, SearchParams};

const STARTER_SEARCH: &str =
    "git clone https://github.com/googleinterns/step.git in:readme sort:created-asc";
const CAPSTONE_SEARCH: &str =
    "step 2020 in:name org:googleinterns created:>2020-06-17 sort:created-asc";
const TEST_SEARCH: &str = "repo:googleinterns/risr";

/// GitHub search predicate selecting repositories of `category`.
#[must_use]
pub const fn search_predicate(category: RepoCategory) -> &'static str {
    match category {
        RepoCategory::Starter => STARTER_SEARCH,
        RepoCategory::Capstone => CAPSTONE_SEARCH,
        RepoCategory::Test => TEST_SEARCH,
    }
}

/// Builds the repository roster for a category.
pub struct RepositoryDiscovery<'client, T>
where
    T: GraphqlTransport + ?Sized,
{
    transport: &'client T,
}

impl<'client, T> RepositoryDiscovery<'client, T>
where
    T: GraphqlTransport + ?Sized,
{
    /// Creates a discovery service backed by `transport`.
    #[must_use]
    pub const fn new(transport: &'client T) -> Self {
        Self { transport }
    }

    /// Parses `category` and lists its repositories in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`CollectError::UnsupportedCategory`] before any request when
    /// `category` is not recognised, and [`CollectError::UnsupportedResponse`]
    /// when a search page cannot be decoded.
    pub fn discover(&self, category: &str) -> Result<Vec<RepositoryRecord>, CollectError> {
        let parsed: RepoCategory = category.parse()?;
        self.discover_category(parsed)
    }

    /// Lists repositories of an already parsed category.
    ///
    /// # Errors
    ///
    /// Returns [`CollectError::UnsupportedResponse`] when a search page cannot
    /// be decoded.
    pub fn discover_category(
        &self,
        category: RepoCategory,
    ) -> Result<Vec<RepositoryRecord>, CollectError> {
        let search = search_predicate(category);
        let mut records = Vec::new();

        let pages = paginate(
            self.transport,
            |after| GraphqlQuery::repository_search(&SearchParams { search, after }),
            |page| {
                let data: SearchData = decode_data("repository search", page)?;
                Ok(consume_edges(data.search, |node| {
                    records.push(RepositoryRecord {
                        owner: node.owner.login,
                        name: node.name,
                        created_at: node.created_at,
                        pr_count: node.pull_requests.total_count,
                        category,
                    });
                }))
            },
        )?;

        info!(
            %category,
            pages,
            repositories = records.len(),
            "repository discovery complete"
        );
        Ok(records)
    }
}

#[cfg(test)]
#[expect(
    clippy::indexing_slicing,
    reason = "test assertions index known JSON fields and fixed-length results"
)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::{RepositoryDiscovery, search_predicate};
    use crate::cohort::RepoCategory;
    use crate::github::models::test_support::{edge, repository_node, search_page};
    use crate::github::{CollectError, MockGraphqlTransport, ScriptedTransport};

    #[rstest]
    fn unsupported_category_fails_before_any_request() {
        let mut transport = MockGraphqlTransport::new();
        transport.expect_run_query().never();

        let error = RepositoryDiscovery::new(&transport)
            .discover("repo_type")
            .expect_err("unsupported category should fail");

        assert_eq!(
            error,
            CollectError::UnsupportedCategory {
                category: "repo_type".to_owned()
            }
        );
    }

    #[rstest]
    fn one_edge_then_empty_page_yields_one_record() {
        let transport = ScriptedTransport::new([
            Some(search_page(vec![edge(
                "Y3Vyc29yOjE=",
                repository_node("googleinterns", "risr", "2020-06-01T17:02:13Z", 12),
            )])),
            Some(search_page(Vec::new())),
        ]);

        let records = RepositoryDiscovery::new(&transport)
            .discover("test")
            .expect("discovery should succeed");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].full_name(), "googleinterns/risr");
        assert_eq!(records[0].pr_count, 12);
        assert_eq!(records[0].category, RepoCategory::Test);

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].variables()["after"], json!(null));
        assert_eq!(requests[1].variables()["after"], json!("Y3Vyc29yOjE="));
        assert_eq!(
            requests[0].variables()["search"],
            json!("repo:googleinterns/risr")
        );
    }

    #[rstest]
    #[case(RepoCategory::Starter, "in:readme")]
    #[case(RepoCategory::Capstone, "created:>2020-06-17")]
    #[case(RepoCategory::Test, "repo:googleinterns/risr")]
    fn predicates_select_category(#[case] category: RepoCategory, #[case] needle: &str) {
        assert!(search_predicate(category).contains(needle));
    }

    #[rstest]
    fn malformed_search_page_is_fatal() {
        let transport = ScriptedTransport::new([Some(json!({"data": {}}))]);

        let error = RepositoryDiscovery::new(&transport)
            .discover("capstone")
            .expect_err("malformed page should fail");

        assert!(matches!(error, CollectError::UnsupportedResponse { .. }));
    }
}
