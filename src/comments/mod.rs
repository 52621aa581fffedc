//! Comment extraction.
//!
//! Each pull request contributes its direct comments first, then every review
//! body followed by that review's inline comments, all in API order. Empty
//! bodies are dropped.

use tracing::{debug, warn};

use crate::cohort::{CommentRecord, HostRoster, RepoCategory, RepositoryRecord};
use crate::github::models::{
    ApiComment, ApiPullRequestComments, RepositoryData, actor_login, decode_data,
};
use crate::github::pagination::{PageOutcome, consume_edges, paginate};
use crate::github::{
    CollectError, GraphqlQuery, GraphqlTransport, PullRequestProjection, RepositoryParams,
};

/// Author recorded for comments whose account has been deleted.
pub const DELETED_USER: &str = "deleted-user";

/// Converts one API comment into a record; `None` when the body is empty.
fn to_record(
    comment: ApiComment,
    category: RepoCategory,
    roster: &HostRoster,
) -> Option<CommentRecord> {
    let body = comment.body.filter(|text| !text.is_empty())?;
    let (author, is_host) = actor_login(comment.author.as_ref()).map_or_else(
        || (DELETED_USER.to_owned(), false),
        |login| (login.to_owned(), roster.contains(login)),
    );
    Some(CommentRecord {
        resource_path: comment.resource_path,
        created_at: comment.created_at,
        author,
        body,
        category,
        is_host,
    })
}

/// Flattens one pull request into comment records in traversal order.
fn flatten_pull_request(
    pull_request: ApiPullRequestComments,
    category: RepoCategory,
    roster: &HostRoster,
    sink: &mut Vec<CommentRecord>,
) {
    sink.extend(
        pull_request
            .comments
            .into_present()
            .filter_map(|comment| to_record(comment, category, roster)),
    );
    for review in pull_request.reviews.into_present() {
        sink.extend(to_record(review.review, category, roster));
        sink.extend(
            review
                .comments
                .into_present()
                .filter_map(|comment| to_record(comment, category, roster)),
        );
    }
}

/// Extracts [`CommentRecord`]s repository by repository.
pub struct CommentExtractor<'client, T>
where
    T: GraphqlTransport + ?Sized,
{
    transport: &'client T,
}

impl<'client, T> CommentExtractor<'client, T>
where
    T: GraphqlTransport + ?Sized,
{
    /// Creates an extractor backed by `transport`.
    #[must_use]
    pub const fn new(transport: &'client T) -> Self {
        Self { transport }
    }

    /// Every non-empty comment in `repository`, tagged with `category`.
    ///
    /// A repository whose response cannot be decoded yields no records and a
    /// warning.
    ///
    /// # Errors
    ///
    /// Propagates transport errors other than undecodable responses.
    pub fn extract_comments(
        &self,
        repository: &RepositoryRecord,
        category: RepoCategory,
        roster: &HostRoster,
    ) -> Result<Vec<CommentRecord>, CollectError> {
        let mut records = Vec::new();
        let outcome = paginate(
            self.transport,
            |after| {
                GraphqlQuery::pull_requests(
                    PullRequestProjection::Comments,
                    &RepositoryParams {
                        owner: &repository.owner,
                        name: &repository.name,
                        after,
                    },
                )
            },
            |page| {
                let data: RepositoryData<ApiPullRequestComments> =
                    decode_data("pull request comments", page)?;
                let Some(found) = data.repository else {
                    warn!(repository = %repository.full_name(), "repository not found");
                    return Ok(PageOutcome::Exhausted);
                };
                Ok(consume_edges(found.pull_requests, |pull_request| {
                    flatten_pull_request(pull_request, category, roster, &mut records);
                }))
            },
        );

        match outcome {
            Ok(pages) => {
                debug!(
                    repository = %repository.full_name(),
                    pages,
                    comments = records.len(),
                    "collected comments"
                );
                Ok(records)
            }
            Err(error @ CollectError::UnsupportedResponse { .. }) => {
                warn!(repository = %repository.full_name(), "skipping repository: {error}");
                Ok(Vec::new())
            }
            Err(error) => Err(error),
        }
    }
}

#[cfg(test)]
#[expect(
    clippy::indexing_slicing,
    reason = "tests index records of known length"
)]
