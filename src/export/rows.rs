//! Column layouts of the data files.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cohort::{
    CommentRecord, HostRecord, ProgramWeek, PullRequestRecord, RepoCategory, RepositoryRecord,
};

/// A record type with a fixed CSV header.
pub trait TabularRow {
    /// Column names in serialisation order.
    const HEADERS: &'static [&'static str];
}

impl TabularRow for RepositoryRecord {
    const HEADERS: &'static [&'static str] = &["owner", "name", "created_at", "pr_count", "category"];
}

impl TabularRow for HostRecord {
    const HEADERS: &'static [&'static str] = &["username", "start_date", "team"];
}

/// One line of the pull request statistics file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequestRow {
    /// Pull request resource path.
    pub pr_path: String,
    /// Pull request number.
    pub pr_number: u64,
    /// Program week or `unknown`.
    pub week: ProgramWeek,
    /// Cohort start date or `unknown`.
    pub start_date: String,
    /// Creation timestamp.
    pub created_date: DateTime<Utc>,
    /// Derived comment total.
    pub total_comments: u64,
    /// Submitted review count.
    pub review_count: u64,
    /// Additions plus deletions.
    pub pr_lines_changed: u64,
}

impl From<&PullRequestRecord> for PullRequestRow {
    fn from(record: &PullRequestRecord) -> Self {
        Self {
            pr_path: record.resource_path.clone(),
            pr_number: record.number,
            week: record.program_week,
            start_date: record.start_date.clone(),
            created_date: record.created_at,
            total_comments: record.total_comments,
            review_count: record.review_count,
            pr_lines_changed: record.lines_changed(),
        }
    }
}

impl TabularRow for PullRequestRow {
    const HEADERS: &'static [&'static str] = &[
        "pr_path",
        "pr_number",
        "week",
        "start_date",
        "created_date",
        "total_comments",
        "review_count",
        "pr_lines_changed",
    ];
}

/// One line of the comments file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentRow {
    /// Comment resource path.
    pub comment_path: String,
    /// Creation timestamp.
    pub created: DateTime<Utc>,
    /// Author login or the deleted-account placeholder.
    pub author: String,
    /// Comment text.
    pub comment: String,
    /// Repository category.
    pub repo_type: RepoCategory,
    /// Whether the author is a host.
    pub is_host: bool,
}

impl From<&CommentRecord> for CommentRow {
    fn from(record: &CommentRecord) -> Self {
        Self {
            comment_path: record.resource_path.clone(),
            created: record.created_at,
            author: record.author.clone(),
            comment: record.body.clone(),
            repo_type: record.category,
            is_host: record.is_host,
        }
    }
}

impl TabularRow for CommentRow {
    const HEADERS: &'static [&'static str] =
        &["comment_path", "created", "author", "comment", "repo_type", "is_host"];
}

/// One line of the pull request count distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrCountRow {
    /// Range label such as `1-5`.
    pub pr_range: &'static str,
    /// Repositories whose pull request count falls in the range.
    pub repo_count: u64,
}

impl TabularRow for PrCountRow {
    const HEADERS: &'static [&'static str] = &["pr_range", "repo_count"];
}
