//! Cohort domain: record types, the host roster, and the start-date calendar.

pub mod calendar;
pub mod records;
pub mod roster;

pub use calendar::{CohortCalendar, UNKNOWN, format_start_date, program_week, program_week_for};
pub use records::{CommentRecord, ProgramWeek, PullRequestRecord, RepoCategory, RepositoryRecord};
pub use roster::{HostRecord, HostRoster};
