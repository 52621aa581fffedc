//! Layout of the data directory.

use camino::{Utf8Path, Utf8PathBuf};

use crate::cohort::RepoCategory;

/// Default data directory, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Paths of every file the collector reads or writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFiles {
    root: Utf8PathBuf,
}

impl DataFiles {
    /// Lays files out under `root`.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The data directory.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Repository roster for `category`.
    #[must_use]
    pub fn repositories(&self, category: RepoCategory) -> Utf8PathBuf {
        self.root.join(format!("{category}_repos.csv"))
    }

    /// Merged host roster.
    #[must_use]
    pub fn hosts(&self) -> Utf8PathBuf {
        self.root.join("host_usernames.csv")
    }

    /// Pull request statistics for `category`.
    #[must_use]
    pub fn pr_stats(&self, category: RepoCategory) -> Utf8PathBuf {
        self.root.join(format!("{category}_pr_stats.csv"))
    }

    /// Comments for `category`.
    #[must_use]
    pub fn comments(&self, category: RepoCategory) -> Utf8PathBuf {
        self.root.join(format!("{category}_pr_comments.csv"))
    }

    /// Pull request count distribution read by the dashboard.
    #[must_use]
    pub fn pr_count(&self) -> Utf8PathBuf {
        self.root.join("cap_pr_count.csv")
    }
}

impl Default for DataFiles {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}
