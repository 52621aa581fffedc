//! Host roster construction.
//!
//! Hosts come from two sources. The teams file lists them explicitly with a
//! start date and team. Anyone else who requested changes or reviewed a pull
//! request in an intern's repository is inferred to be a host and placed in
//! the cohort bucketed from that pull request's creation date. Entries are
//! never overwritten, so the teams file always takes precedence.

mod teams;

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::cohort::{
    CohortCalendar, HostRecord, HostRoster, RepoCategory, RepositoryRecord, UNKNOWN,
    format_start_date,
};
use crate::github::models::{ApiReviewTimeline, RepositoryData, decode_data};
use crate::github::pagination::{PageOutcome, consume_edges, paginate};
use crate::github::{
    CollectError, GraphqlQuery, GraphqlTransport, PullRequestProjection, RepositoryParams,
};

pub use teams::load_team_hosts;

/// Organisation owning program infrastructure rather than intern work.
pub const INTERNAL_ORGANIZATION: &str = "googleinterns";

/// Owners of every repository whose category is scanned for hosts.
#[must_use]
pub fn intern_usernames(repositories: &[RepositoryRecord]) -> HashSet<&str> {
    repositories
        .iter()
        .filter(|repo| repo.category.scanned_for_hosts())
        .map(|repo| repo.owner.as_str())
        .collect()
}

/// Whether `repository`'s review timeline should be scanned for hosts.
///
/// Organisation-owned repositories are skipped unless they are test fixtures.
#[must_use]
pub fn should_scan(repository: &RepositoryRecord) -> bool {
    repository.category.scanned_for_hosts()
        && (repository.owner != INTERNAL_ORGANIZATION || repository.category == RepoCategory::Test)
}

/// Merges explicit and inferred hosts into one roster.
pub struct HostRosterBuilder<'client, T>
where
    T: GraphqlTransport + ?Sized,
{
    transport: &'client T,
    calendar: CohortCalendar,
}

impl<'client, T> HostRosterBuilder<'client, T>
where
    T: GraphqlTransport + ?Sized,
{
    /// Creates a builder using the default cohort calendar.
    #[must_use]
    pub fn new(transport: &'client T) -> Self {
        Self::with_calendar(transport, CohortCalendar::default())
    }

    /// Creates a builder bucketing inferred hosts with `calendar`.
    #[must_use]
    pub const fn with_calendar(transport: &'client T, calendar: CohortCalendar) -> Self {
        Self {
            transport,
            calendar,
        }
    }

    /// Builds the roster: `explicit` hosts first, then inferred reviewers.
    ///
    /// A repository whose timeline cannot be decoded is logged and skipped.
    ///
    /// # Errors
    ///
    /// Propagates transport errors other than undecodable responses.
    pub fn build(
        &self,
        explicit: Vec<HostRecord>,
        repositories: &[RepositoryRecord],
    ) -> Result<HostRoster, CollectError> {
        let mut roster: HostRoster = explicit.into_iter().collect();
        let explicit_count = roster.len();
        let interns = intern_usernames(repositories);

        for repository in repositories.iter().filter(|repo| should_scan(repo)) {
            match self.scan_repository(repository, &interns, &mut roster) {
                Ok(added) => debug!(repository = %repository.full_name(), added, "scanned reviews"),
                Err(error @ CollectError::UnsupportedResponse { .. }) => {
                    warn!(
                        repository = %repository.full_name(),
                        "skipping repository: {error}"
                    );
                }
                Err(error) => return Err(error),
            }
        }

        info!(
            explicit = explicit_count,
            inferred = roster.len().saturating_sub(explicit_count),
            "host roster built"
        );
        Ok(roster)
    }

    fn scan_repository(
        &self,
        repository: &RepositoryRecord,
        interns: &HashSet<&str>,
        roster: &mut HostRoster,
    ) -> Result<usize, CollectError> {
        let mut added = 0_usize;
        paginate(
            self.transport,
            |after| {
                GraphqlQuery::pull_requests(
                    PullRequestProjection::ReviewTimeline,
                    &RepositoryParams {
                        owner: &repository.owner,
                        name: &repository.name,
                        after,
                    },
                )
            },
            |page| {
                let data: RepositoryData<ApiReviewTimeline> =
                    decode_data("review timeline", page)?;
                let Some(found) = data.repository else {
                    warn!(repository = %repository.full_name(), "repository not found");
                    return Ok(PageOutcome::Exhausted);
                };
                Ok(consume_edges(found.pull_requests, |pull_request| {
                    for item in pull_request.timeline_items.present() {
                        let Some(login) = item.reviewer_login() else {
                            continue;
                        };
                        if interns.contains(login) || roster.contains(login) {
                            continue;
                        }
                        let start_date = self.calendar.bucket(pull_request.created_at);
                        roster.insert(HostRecord {
                            username: login.to_owned(),
                            start_date: format_start_date(start_date),
                            team: UNKNOWN.to_owned(),
                        });
                        added = added.saturating_add(1);
                    }
                }))
            },
        )?;
        Ok(added)
    }
}
