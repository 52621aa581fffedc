//! Builders for GraphQL response documents used in tests.
//!
//! The builders produce `serde_json::Value` trees shaped exactly like the
//! responses to the documents in [`crate::github::query`], so tests can feed
//! them through a transport double and exercise the real decoders.
//!
//! ```
//! use risr::github::models::test_support::{edge, repository_node, search_page};
//!
//! let page = search_page(vec![edge("Y3Vyc29yOjE=", repository_node("intern1", "step", "2020-05-18T00:00:00Z", 3))]);
//! assert_eq!(page["data"]["search"]["edges"][0]["cursor"], "Y3Vyc29yOjE=");
//! ```

use serde_json::{Value, json};

/// Wraps a node in a connection edge.
#[must_use]
pub fn edge(cursor: &str, node: Value) -> Value {
    json!({"cursor": cursor, "node": node})
}

/// A repository search response holding `edges`.
#[must_use]
pub fn search_page(edges: Vec<Value>) -> Value {
    json!({"data": {"search": {"edges": edges}}})
}

/// A repository search result node.
#[must_use]
pub fn repository_node(owner: &str, name: &str, created_at: &str, pr_count: u64) -> Value {
    json!({
        "owner": {"login": owner},
        "name": name,
        "createdAt": created_at,
        "pullRequests": {"totalCount": pr_count}
    })
}

/// A repository pull request response holding `edges`.
#[must_use]
pub fn pull_request_page(edges: Vec<Value>) -> Value {
    json!({"data": {"repository": {"pullRequests": {"edges": edges}}}})
}

/// A response for a repository that no longer resolves.
#[must_use]
pub fn missing_repository_page() -> Value {
    json!({"data": {"repository": null}})
}

/// Inputs for a pull request statistics node.
#[derive(Debug, Clone)]
pub struct StatsNode<'a> {
    /// `resourcePath` of the pull request.
    pub resource_path: &'a str,
    /// Pull request number.
    pub number: u64,
    /// RFC 3339 creation timestamp.
    pub created_at: &'a str,
    /// Number of direct pull request comments.
    pub comment_count: u64,
    /// Review body and nested comment count per review.
    pub reviews: Vec<(&'a str, u64)>,
    /// Participant logins in API order.
    pub participants: Vec<&'a str>,
    /// Number of review timeline items.
    pub review_events: usize,
    /// Lines added.
    pub additions: u64,
    /// Lines deleted.
    pub deletions: u64,
}

impl Default for StatsNode<'_> {
    fn default() -> Self {
        Self {
            resource_path: "/googleinterns/risr/pull/1",
            number: 1,
            created_at: "2020-06-01T12:00:00Z",
            comment_count: 0,
            reviews: Vec::new(),
            participants: Vec::new(),
            review_events: 0,
            additions: 0,
            deletions: 0,
        }
    }
}

impl StatsNode<'_> {
    /// Renders the node as the API returns it.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let reviews: Vec<Value> = self
            .reviews
            .iter()
            .map(|(body, comments)| json!({"body": body, "comments": {"totalCount": comments}}))
            .collect();
        let participants: Vec<Value> = self
            .participants
            .iter()
            .map(|login| json!({"login": login}))
            .collect();
        let timeline: Vec<Value> = (0..self.review_events)
            .map(|_| json!({"__typename": "PullRequestReview"}))
            .collect();
        json!({
            "resourcePath": self.resource_path,
            "number": self.number,
            "createdAt": self.created_at,
            "closedAt": null,
            "additions": self.additions,
            "deletions": self.deletions,
            "comments": {"totalCount": self.comment_count},
            "reviews": {"nodes": reviews},
            "participants": {"nodes": participants},
            "timelineItems": {"nodes": timeline}
        })
    }
}

/// A comment or review-comment node; `author: None` models a deleted account.
#[must_use]
pub fn comment_node(resource_path: &str, body: &str, created_at: &str, author: Option<&str>) -> Value {
    json!({
        "resourcePath": resource_path,
        "body": body,
        "createdAt": created_at,
        "author": author.map(|login| json!({"login": login}))
    })
}

/// A review node with its nested comments.
#[must_use]
pub fn review_node(
    resource_path: &str,
    body: &str,
    created_at: &str,
    author: Option<&str>,
    comments: Vec<Value>,
) -> Value {
    json!({
        "resourcePath": resource_path,
        "body": body,
        "createdAt": created_at,
        "author": author.map(|login| json!({"login": login})),
        "comments": {"nodes": comments}
    })
}

/// A pull request node for the comments projection.
#[must_use]
pub fn comments_node(comments: Vec<Value>, reviews: Vec<Value>) -> Value {
    json!({
        "comments": {"nodes": comments},
        "reviews": {"nodes": reviews}
    })
}

/// A pull request node for the review timeline projection.
#[must_use]
pub fn timeline_node(created_at: &str, items: Vec<Value>) -> Value {
    json!({
        "createdAt": created_at,
        "timelineItems": {"nodes": items}
    })
}

/// A review request for a user, or for a team when `login` is `None`.
#[must_use]
pub fn review_requested(login: Option<&str>) -> Value {
    let reviewer = login.map_or_else(|| json!({}), |value| json!({"login": value}));
    json!({"__typename": "ReviewRequestedEvent", "requestedReviewer": reviewer})
}

/// A submitted review; `author: None` models a deleted account.
#[must_use]
pub fn review_submitted(author: Option<&str>) -> Value {
    json!({
        "__typename": "PullRequestReview",
        "author": author.map(|login| json!({"login": login}))
    })
}
