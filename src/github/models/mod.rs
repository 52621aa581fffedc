//! GraphQL response models.
//!
//! Types in this module are deserialisation targets for the documents in
//! [`crate::github::query`]. Every field the API may omit or null out is an
//! `Option`, so absence is handled by pattern matching rather than by
//! assuming key presence. Decoding a page that does not fit these shapes
//! yields [`CollectError::UnsupportedResponse`].

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::CollectError;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Decodes the `data` member of a GraphQL response into `T`.
pub(crate) fn decode_data<T: DeserializeOwned>(
    operation: &str,
    response: Value,
) -> Result<T, CollectError> {
    serde_json::from_value::<Envelope<T>>(response)
        .map(|envelope| envelope.data)
        .map_err(|error| CollectError::unsupported_response(operation, &error))
}

/// A relay-style connection page.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Connection<T> {
    pub(crate) edges: Vec<Edge<T>>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Edge<T> {
    pub(crate) cursor: String,
    pub(crate) node: T,
}

/// A `nodes` list; GraphQL permits null entries.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct NodeList<T> {
    #[serde(default = "Vec::new")]
    pub(crate) nodes: Vec<Option<T>>,
}

impl<T> NodeList<T> {
    pub(crate) fn present(&self) -> impl Iterator<Item = &T> {
        self.nodes.iter().flatten()
    }

    pub(crate) fn into_present(self) -> impl Iterator<Item = T> {
        self.nodes.into_iter().flatten()
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TotalCount {
    pub(crate) total_count: u64,
}

/// An actor reference. `login` is absent for teams and for fragments that did
/// not match; the whole actor is null for deleted accounts.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct Actor {
    pub(crate) login: Option<String>,
}

/// Resolves the login of an optional actor, treating blank logins as absent.
pub(crate) fn actor_login(actor: Option<&Actor>) -> Option<&str> {
    actor
        .and_then(|value| value.login.as_deref())
        .filter(|login| !login.is_empty())
}

// --- Repository search ---

#[derive(Debug, Deserialize)]
pub(crate) struct SearchData {
    pub(crate) search: Connection<ApiRepository>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiOwner {
    pub(crate) login: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiRepository {
    pub(crate) owner: ApiOwner,
    pub(crate) name: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) pull_requests: TotalCount,
}

// --- Repository pull requests ---

/// `data.repository`, null when the repository no longer exists.
#[derive(Debug, Deserialize)]
pub(crate) struct RepositoryData<T> {
    pub(crate) repository: Option<PullRequestsField<T>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PullRequestsField<T> {
    pub(crate) pull_requests: Connection<T>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiPullRequestStats {
    pub(crate) resource_path: String,
    pub(crate) number: u64,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) closed_at: Option<DateTime<Utc>>,
    pub(crate) additions: u64,
    pub(crate) deletions: u64,
    pub(crate) comments: TotalCount,
    pub(crate) reviews: NodeList<ApiReviewSummary>,
    pub(crate) participants: NodeList<Actor>,
    pub(crate) timeline_items: NodeList<TimelineItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiReviewSummary {
    pub(crate) body: Option<String>,
    pub(crate) comments: TotalCount,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiPullRequestComments {
    pub(crate) comments: NodeList<ApiComment>,
    pub(crate) reviews: NodeList<ApiReview>,
}

/// A comment-like node: issue comment, review, or review comment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiComment {
    pub(crate) resource_path: String,
    pub(crate) body: Option<String>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) author: Option<Actor>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiReview {
    #[serde(flatten)]
    pub(crate) review: ApiComment,
    pub(crate) comments: NodeList<ApiComment>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiReviewTimeline {
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) timeline_items: NodeList<TimelineItem>,
}

/// Pull request timeline item, discriminated by `__typename`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "__typename")]
pub(crate) enum TimelineItem {
    ReviewRequestedEvent {
        #[serde(rename = "requestedReviewer")]
        requested_reviewer: Option<Actor>,
    },
    PullRequestReview {
        author: Option<Actor>,
    },
    #[serde(other)]
    Other,
}

impl TimelineItem {
    /// Login of the reviewer this item attributes, if one resolves.
    pub(crate) fn reviewer_login(&self) -> Option<&str> {
        match self {
            Self::ReviewRequestedEvent { requested_reviewer } => {
                actor_login(requested_reviewer.as_ref())
            }
            Self::PullRequestReview { author } => actor_login(author.as_ref()),
            Self::Other => None,
        }
    }
}
