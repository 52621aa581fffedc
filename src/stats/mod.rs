//! Pull request statistics.
//!
//! For every pull request in a repository the extractor derives the comment
//! total, the review count, and the contributor's cohort start date. The
//! start date comes from the first participant found in the host roster;
//! when no participant is a host, the last date resolved for the same
//! repository is reused.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::cohort::{HostRoster, PullRequestRecord, RepositoryRecord, UNKNOWN, program_week_for};
use crate::github::models::{ApiPullRequestStats, RepositoryData, actor_login, decode_data};
use crate::github::pagination::{PageOutcome, consume_edges, paginate};
use crate::github::{
    CollectError, GraphqlQuery, GraphqlTransport, PullRequestProjection, RepositoryParams,
};

/// Resolves start dates from participants, remembering the last successful
/// resolution per repository.
#[derive(Debug, Clone, Default)]
pub struct StartDateResolver {
    by_repository: HashMap<String, String>,
}

impl StartDateResolver {
    /// Creates an empty resolver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start date of the first participant in `roster`, else the cached date
    /// for `repository`, else `unknown`.
    pub fn resolve<'login>(
        &mut self,
        repository: &str,
        participants: impl IntoIterator<Item = &'login str>,
        roster: &HostRoster,
    ) -> String {
        let found = participants
            .into_iter()
            .find_map(|login| roster.start_date(login));
        if let Some(start_date) = found {
            self.by_repository
                .insert(repository.to_owned(), start_date.to_owned());
            return start_date.to_owned();
        }
        self.by_repository
            .get(repository)
            .cloned()
            .unwrap_or_else(|| UNKNOWN.to_owned())
    }
}

/// Direct comments, plus one per non-empty review body, plus every comment
/// nested under a review.
pub(crate) fn total_comments(pull_request: &ApiPullRequestStats) -> u64 {
    pull_request
        .reviews
        .present()
        .fold(pull_request.comments.total_count, |total, review| {
            let body = u64::from(review.body.as_deref().is_some_and(|text| !text.is_empty()));
            total
                .saturating_add(body)
                .saturating_add(review.comments.total_count)
        })
}

/// Number of review timeline items.
pub(crate) fn review_count(pull_request: &ApiPullRequestStats) -> u64 {
    u64::try_from(pull_request.timeline_items.present().count()).unwrap_or(u64::MAX)
}

/// Extracts [`PullRequestRecord`]s repository by repository.
pub struct PullRequestStatsExtractor<'client, T>
where
    T: GraphqlTransport + ?Sized,
{
    transport: &'client T,
    resolver: StartDateResolver,
}

impl<'client, T> PullRequestStatsExtractor<'client, T>
where
    T: GraphqlTransport + ?Sized,
{
    /// Creates an extractor with an empty start-date cache.
    #[must_use]
    pub fn new(transport: &'client T) -> Self {
        Self {
            transport,
            resolver: StartDateResolver::new(),
        }
    }

    /// Statistics for every pull request in `repository`.
    ///
    /// A repository whose response cannot be decoded yields no records and a
    /// warning.
    ///
    /// # Errors
    ///
    /// Propagates transport errors other than undecodable responses.
    pub fn extract_stats(
        &mut self,
        repository: &RepositoryRecord,
        roster: &HostRoster,
    ) -> Result<Vec<PullRequestRecord>, CollectError> {
        match self.collect(repository, roster) {
            Ok(records) => {
                debug!(
                    repository = %repository.full_name(),
                    pull_requests = records.len(),
                    "collected pull request statistics"
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

    fn collect(
        &mut self,
        repository: &RepositoryRecord,
        roster: &HostRoster,
    ) -> Result<Vec<PullRequestRecord>, CollectError> {
        let full_name = repository.full_name();
        let resolver = &mut self.resolver;
        let mut records = Vec::new();

        paginate(
            self.transport,
            |after| {
                GraphqlQuery::pull_requests(
                    PullRequestProjection::Stats,
                    &RepositoryParams {
                        owner: &repository.owner,
                        name: &repository.name,
                        after,
                    },
                )
            },
            |page| {
                let data: RepositoryData<ApiPullRequestStats> =
                    decode_data("pull request stats", page)?;
                let Some(found) = data.repository else {
                    warn!(repository = %full_name, "repository not found");
                    return Ok(PageOutcome::Exhausted);
                };
                Ok(consume_edges(found.pull_requests, |pull_request| {
                    let participants = pull_request
                        .participants
                        .present()
                        .filter_map(|actor| actor_login(Some(actor)));
                    let start_date = resolver.resolve(&full_name, participants, roster);
                    records.push(PullRequestRecord {
                        total_comments: total_comments(&pull_request),
                        review_count: review_count(&pull_request),
                        program_week: program_week_for(&start_date, pull_request.created_at),
                        start_date,
                        resource_path: pull_request.resource_path,
                        number: pull_request.number,
                        created_at: pull_request.created_at,
                        closed_at: pull_request.closed_at,
                        additions: pull_request.additions,
                        deletions: pull_request.deletions,
                    });
                }))
            },
        )?;
        Ok(records)
    }
}

#[cfg(test)]
#[expect(
    clippy::indexing_slicing,
    reason = "tests index records and JSON fixtures of known shape"
)]
