//! Insert-only roster of program hosts.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A host known to the program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostRecord {
    /// GitHub login.
    pub username: String,
    /// Cohort start date (`M/D/YYYY`) or `unknown`.
    pub start_date: String,
    /// Team label or `unknown`.
    pub team: String,
}

/// Username-unique host roster preserving insertion order.
///
/// The first record for a username wins; later inserts are ignored.
#[derive(Debug, Clone, Default)]
pub struct HostRoster {
    records: Vec<HostRecord>,
    index: HashMap<String, usize>,
}

impl HostRoster {
    /// Creates an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `record` unless its username is already present.
    ///
    /// Returns `true` when the record was added.
    pub fn insert(&mut self, record: HostRecord) -> bool {
        if self.index.contains_key(&record.username) {
            return false;
        }
        self.index.insert(record.username.clone(), self.records.len());
        self.records.push(record);
        true
    }

    /// Whether `username` is a known host.
    #[must_use]
    pub fn contains(&self, username: &str) -> bool {
        self.index.contains_key(username)
    }

    /// Record for `username`, if present.
    #[must_use]
    pub fn get(&self, username: &str) -> Option<&HostRecord> {
        self.index
            .get(username)
            .and_then(|position| self.records.get(*position))
    }

    /// Start date recorded for `username`, if present.
    #[must_use]
    pub fn start_date(&self, username: &str) -> Option<&str> {
        self.get(username).map(|record| record.start_date.as_str())
    }

    /// Records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &HostRecord> {
        self.records.iter()
    }

    /// Number of hosts.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the roster is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<HostRecord> for HostRoster {
    fn from_iter<I: IntoIterator<Item = HostRecord>>(iter: I) -> Self {
        let mut roster = Self::new();
        for record in iter {
            roster.insert(record);
        }
        roster
    }
}

impl Extend<HostRecord> for HostRoster {
    fn extend<I: IntoIterator<Item = HostRecord>>(&mut self, iter: I) {
        for record in iter {
            self.insert(record);
        }
    }
}

impl From<HostRoster> for Vec<HostRecord> {
    fn from(roster: HostRoster) -> Self {
        roster.records
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{HostRecord, HostRoster};

    fn host(username: &str, start_date: &str, team: &str) -> HostRecord {
        HostRecord {
            username: username.to_owned(),
            start_date: start_date.to_owned(),
            team: team.to_owned(),
        }
    }

    #[rstest]
    fn first_write_wins() {
        let mut roster = HostRoster::new();

        assert!(roster.insert(host("host_duplicate", "date1", "team1")));
        assert!(!roster.insert(host("host_duplicate", "6/15/2020", "unknown")));

        assert_eq!(roster.len(), 1);
        assert_eq!(roster.start_date("host_duplicate"), Some("date1"));
    }

    #[rstest]
    fn iteration_preserves_insertion_order() {
        let roster: HostRoster = [
            host("host2", "date1", "team1"),
            host("host1", "date1", "team1"),
            host("host3", "date2", "team2"),
        ]
        .into_iter()
        .collect();

        let names: Vec<&str> = roster.iter().map(|record| record.username.as_str()).collect();
        assert_eq!(names, ["host2", "host1", "host3"]);
        assert!(roster.contains("host3"));
        assert!(!roster.contains("intern1"));
    }
}
