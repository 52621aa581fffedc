//! Cohort start dates and program week arithmetic.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use super::records::ProgramWeek;
use crate::github::error::CollectError;

/// Placeholder for a start date or team that could not be resolved.
pub const UNKNOWN: &str = "unknown";

/// Ascending list of cohort start dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CohortCalendar {
    starts: Vec<NaiveDate>,
    earliest: NaiveDate,
}

impl Default for CohortCalendar {
    fn default() -> Self {
        let starts: Vec<NaiveDate> = [(2020, 5, 18), (2020, 6, 1), (2020, 6, 15)]
            .into_iter()
            .filter_map(|(year, month, day)| NaiveDate::from_ymd_opt(year, month, day))
            .collect();
        let earliest = starts.first().copied().unwrap_or(NaiveDate::MIN);
        Self { starts, earliest }
    }
}

impl CohortCalendar {
    /// Builds a calendar from arbitrary dates; they are sorted and deduplicated.
    ///
    /// # Errors
    ///
    /// Returns [`CollectError::Configuration`] when `dates` is empty.
    pub fn new(dates: impl IntoIterator<Item = NaiveDate>) -> Result<Self, CollectError> {
        let mut starts: Vec<NaiveDate> = dates.into_iter().collect();
        starts.sort_unstable();
        starts.dedup();
        let earliest = starts
            .first()
            .copied()
            .ok_or_else(|| CollectError::Configuration {
                message: "cohort calendar needs at least one start date".to_owned(),
            })?;
        Ok(Self { starts, earliest })
    }

    /// Known start dates in ascending order.
    #[must_use]
    pub const fn starts(&self) -> &[NaiveDate] {
        self.starts.as_slice()
    }

    /// The latest start date on or before `created_at`, falling back to the
    /// earliest start for activity that predates every cohort.
    #[must_use]
    pub fn bucket(&self, created_at: DateTime<Utc>) -> NaiveDate {
        let day = created_at.date_naive();
        self.starts
            .iter()
            .rev()
            .find(|start| **start <= day)
            .copied()
            .unwrap_or(self.earliest)
    }
}

/// Formats a start date as `M/D/YYYY` without zero padding.
#[must_use]
pub fn format_start_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}

/// Parses an `M/D/YYYY` or `MM/DD/YYYY` start date.
#[must_use]
pub fn parse_start_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%m/%d/%Y").ok()
}

/// One-based week of the program in which `created_at` falls.
///
/// Activity before `start` lands in week 0 or lower.
#[must_use]
pub fn program_week(start: NaiveDate, created_at: DateTime<Utc>) -> i64 {
    let days = created_at
        .date_naive()
        .signed_duration_since(start)
        .num_days();
    days.div_euclid(7).saturating_add(1)
}

/// Program week for a start date string; unparseable dates give
/// [`ProgramWeek::Unknown`].
#[must_use]
pub fn program_week_for(start_date: &str, created_at: DateTime<Utc>) -> ProgramWeek {
    parse_start_date(start_date).map_or(ProgramWeek::Unknown, |start| {
        ProgramWeek::Known(program_week(start, created_at))
    })
}
