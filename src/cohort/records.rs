//! Flat records produced by the extractors.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

use super::calendar::UNKNOWN;
use crate::github::error::CollectError;

/// Category of a cohort repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepoCategory {
    /// Starter project cloned from the program template.
    Starter,
    /// Team capstone project.
    Capstone,
    /// Live fixture repository used to exercise the pipeline.
    Test,
}

impl RepoCategory {
    /// Lowercase name used in file names and CSV columns.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Starter => "starter",
            Self::Capstone => "capstone",
            Self::Test => "test",
        }
    }

    /// Capstone projects use peer review, so their reviewers are not hosts.
    #[must_use]
    pub const fn scanned_for_hosts(self) -> bool {
        !matches!(self, Self::Capstone)
    }
}

impl fmt::Display for RepoCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RepoCategory {
    type Err = CollectError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "starter" => Ok(Self::Starter),
            "capstone" => Ok(Self::Capstone),
            "test" => Ok(Self::Test),
            _ => Err(CollectError::UnsupportedCategory {
                category: value.to_owned(),
            }),
        }
    }
}

/// One discovered repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    /// Owner login.
    pub owner: String,
    /// Repository name.
    pub name: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Number of pull requests at discovery time.
    pub pr_count: u64,
    /// Category the repository was discovered under.
    pub category: RepoCategory,
}

impl RepositoryRecord {
    /// `owner/name`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// Week of the program a pull request was opened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramWeek {
    /// One-based week relative to the contributor's start date.
    Known(i64),
    /// No start date could be resolved.
    Unknown,
}

impl fmt::Display for ProgramWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(week) => write!(f, "{week}"),
            Self::Unknown => f.write_str(UNKNOWN),
        }
    }
}

impl Serialize for ProgramWeek {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Known(week) => serializer.serialize_i64(*week),
            Self::Unknown => serializer.serialize_str(UNKNOWN),
        }
    }
}

/// Statistics for one pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestRecord {
    /// `/owner/name/pull/N`.
    pub resource_path: String,
    /// Pull request number.
    pub number: u64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Close timestamp, absent while open.
    pub closed_at: Option<DateTime<Utc>>,
    /// Lines added.
    pub additions: u64,
    /// Lines deleted.
    pub deletions: u64,
    /// Direct comments plus non-empty review bodies plus review comments.
    pub total_comments: u64,
    /// Number of submitted reviews.
    pub review_count: u64,
    /// Resolved cohort start date or `unknown`.
    pub start_date: String,
    /// Program week derived from `start_date`.
    pub program_week: ProgramWeek,
}

impl PullRequestRecord {
    /// Additions plus deletions.
    #[must_use]
    pub const fn lines_changed(&self) -> u64 {
        self.additions.saturating_add(self.deletions)
    }
}

/// One non-empty comment, review body, or review comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRecord {
    /// Resource path of the comment.
    pub resource_path: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Author login, or the deleted-account placeholder.
    pub author: String,
    /// Comment text; never empty.
    pub body: String,
    /// Category of the repository the comment belongs to.
    pub category: RepoCategory,
    /// Whether the author is a known host.
    pub is_host: bool,
}
