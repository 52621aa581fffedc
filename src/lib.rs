//! risr library crate collecting cohort pull request activity from GitHub.
//!
//! The library discovers program repositories through the GraphQL search API,
//! builds the host roster from a teams file and inferred reviewers, extracts
//! per pull request statistics and comments, and writes every result as CSV
//! for the dashboard.

pub mod cohort;
pub mod comments;
pub mod config;
pub mod discovery;
pub mod export;
pub mod github;
pub mod hosts;
pub mod stats;

pub use cohort::{
    CohortCalendar, CommentRecord, HostRecord, HostRoster, ProgramWeek, PullRequestRecord,
    RepoCategory, RepositoryRecord,
};
pub use comments::CommentExtractor;
pub use config::{Command, RisrConfig};
pub use discovery::RepositoryDiscovery;
pub use export::DataFiles;
pub use github::{
    CollectError, GraphqlTransport, HttpTransport, PersonalAccessToken, RetryPolicy,
};
pub use hosts::{HostRosterBuilder, load_team_hosts};
pub use stats::PullRequestStatsExtractor;
