//! Typed GraphQL request construction.
//!
//! Query documents are constants; everything that varies between requests
//! (search predicates, repository coordinates, cursors) travels in the
//! `variables` object so request text is never assembled from user data.

use serde_json::{Value, json};

const REPOSITORY_SEARCH: &str = r"query RepositorySearch($search: String!, $after: String) {
  search(first: 100, after: $after, query: $search, type: REPOSITORY) {
    edges {
      cursor
      node {
        ... on Repository {
          owner { login }
          name
          createdAt
          pullRequests { totalCount }
        }
      }
    }
  }
}";

const PULL_REQUEST_STATS: &str = r"query PullRequestStats($owner: String!, $name: String!, $after: String) {
  repository(owner: $owner, name: $name) {
    pullRequests(first: 50, after: $after) {
      edges {
        cursor
        node {
          resourcePath
          number
          createdAt
          closedAt
          additions
          deletions
          comments { totalCount }
          reviews(first: 50) {
            nodes {
              body
              comments { totalCount }
            }
          }
          participants(first: 50) {
            nodes { login }
          }
          timelineItems(first: 100, itemTypes: [PULL_REQUEST_REVIEW]) {
            nodes { __typename }
          }
        }
      }
    }
  }
}";

const PULL_REQUEST_COMMENTS: &str = r"query PullRequestComments($owner: String!, $name: String!, $after: String) {
  repository(owner: $owner, name: $name) {
    pullRequests(first: 20, after: $after) {
      edges {
        cursor
        node {
          comments(first: 100) {
            nodes {
              resourcePath
              body
              createdAt
              author { login }
            }
          }
          reviews(first: 50) {
            nodes {
              resourcePath
              body
              createdAt
              author { login }
              comments(first: 100) {
                nodes {
                  resourcePath
                  body
                  createdAt
                  author { login }
                }
              }
            }
          }
        }
      }
    }
  }
}";

const REVIEW_TIMELINE: &str = r"query ReviewTimeline($owner: String!, $name: String!, $after: String) {
  repository(owner: $owner, name: $name) {
    pullRequests(first: 50, after: $after) {
      edges {
        cursor
        node {
          createdAt
          timelineItems(first: 100, itemTypes: [REVIEW_REQUESTED_EVENT, PULL_REQUEST_REVIEW]) {
            nodes {
              __typename
              ... on ReviewRequestedEvent {
                requestedReviewer {
                  ... on User { login }
                }
              }
              ... on PullRequestReview {
                author { login }
              }
            }
          }
        }
      }
    }
  }
}";

/// Opaque pagination token marking the last-seen edge of a connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cursor(String);

impl Cursor {
    /// Wraps a cursor string returned by the API.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the raw cursor value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Parameters for a repository search page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams<'a> {
    /// GitHub search predicate, e.g. `org:octo in:name sort:created-asc`.
    pub search: &'a str,
    /// Cursor of the last edge of the previous page, `None` for the first.
    pub after: Option<&'a Cursor>,
}

/// Parameters for a page of pull requests in one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryParams<'a> {
    /// Repository owner login.
    pub owner: &'a str,
    /// Repository name.
    pub name: &'a str,
    /// Cursor of the last edge of the previous page, `None` for the first.
    pub after: Option<&'a Cursor>,
}

/// Pull request projections this crate requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullRequestProjection {
    /// Counts, participants, and review timeline for statistics.
    Stats,
    /// Comment, review, and review-comment bodies.
    Comments,
    /// Review requests and review authors for host inference.
    ReviewTimeline,
}

impl PullRequestProjection {
    const fn document(self) -> (&'static str, &'static str) {
        match self {
            Self::Stats => ("pull request stats", PULL_REQUEST_STATS),
            Self::Comments => ("pull request comments", PULL_REQUEST_COMMENTS),
            Self::ReviewTimeline => ("review timeline", REVIEW_TIMELINE),
        }
    }
}

/// A rendered GraphQL request: constant document plus variables.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphqlQuery {
    operation: &'static str,
    document: &'static str,
    variables: Value,
}

impl GraphqlQuery {
    /// Builds a repository search request.
    #[must_use]
    pub fn repository_search(params: &SearchParams<'_>) -> Self {
        Self {
            operation: "repository search",
            document: REPOSITORY_SEARCH,
            variables: json!({
                "search": params.search,
                "after": params.after.map(Cursor::as_str),
            }),
        }
    }

    /// Builds a pull request request for one repository.
    #[must_use]
    pub fn pull_requests(projection: PullRequestProjection, params: &RepositoryParams<'_>) -> Self {
        let (operation, document) = projection.document();
        Self {
            operation,
            document,
            variables: json!({
                "owner": params.owner,
                "name": params.name,
                "after": params.after.map(Cursor::as_str),
            }),
        }
    }

    /// Short human-readable name used in logs and errors.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        self.operation
    }

    /// The GraphQL document text.
    #[must_use]
    pub const fn document(&self) -> &'static str {
        self.document
    }

    /// Variables sent alongside the document.
    #[must_use]
    pub const fn variables(&self) -> &Value {
        &self.variables
    }

    /// Serialises the POST body expected by the GraphQL endpoint.
    #[must_use]
    pub fn body(&self) -> Value {
        json!({
            "query": self.document,
            "variables": self.variables,
        })
    }
}

#[cfg(test)]
#[expect(
    clippy::indexing_slicing,
    reason = "test assertions index known JSON fields"
)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::{Cursor, GraphqlQuery, PullRequestProjection, RepositoryParams, SearchParams};

    #[rstest]
    fn first_search_page_sends_null_cursor() {
        let query = GraphqlQuery::repository_search(&SearchParams {
            search: "org:googleinterns",
            after: None,
        });

        assert_eq!(
            query.variables(),
            &json!({"search": "org:googleinterns", "after": null})
        );
        assert!(query.document().contains("type: REPOSITORY"));
    }

    #[rstest]
    fn search_predicate_with_quotes_stays_out_of_document() {
        let cursor = Cursor::new("Y3Vyc29yOjE=");
        let query = GraphqlQuery::repository_search(&SearchParams {
            search: r#"name" } evil"#,
            after: Some(&cursor),
        });

        assert!(!query.document().contains("evil"));
        assert_eq!(query.variables()["after"], json!("Y3Vyc29yOjE="));
        assert_eq!(query.body()["variables"]["search"], json!(r#"name" } evil"#));
    }

    #[rstest]
    #[case(PullRequestProjection::Stats, "participants")]
    #[case(PullRequestProjection::Comments, "author { login }")]
    #[case(PullRequestProjection::ReviewTimeline, "requestedReviewer")]
    fn projections_select_expected_fields(
        #[case] projection: PullRequestProjection,
        #[case] needle: &str,
    ) {
        let query = GraphqlQuery::pull_requests(
            projection,
            &RepositoryParams {
                owner: "googleinterns",
                name: "risr",
                after: None,
            },
        );

        assert!(
            query.document().contains(needle),
            "{} document should select {needle}",
            query.operation()
        );
        assert_eq!(query.variables()["owner"], json!("googleinterns"));
        assert_eq!(query.variables()["name"], json!("risr"));
    }
}
