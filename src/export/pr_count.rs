//! Distribution of pull request counts across repositories.

use crate::cohort::RepositoryRecord;

use super::rows::PrCountRow;

/// Label, inclusive lower bound, inclusive upper bound (`None` = unbounded).
const RANGES: [(&str, u64, Option<u64>); 6] = [
    ("0", 0, Some(0)),
    ("1-5", 1, Some(5)),
    ("6-10", 6, Some(10)),
    ("11-15", 11, Some(15)),
    ("16-20", 16, Some(20)),
    ("21+", 21, None),
];

/// Counts repositories per pull request range, listing every range even when
/// it is empty.
#[must_use]
pub fn pr_count_distribution(repositories: &[RepositoryRecord]) -> Vec<PrCountRow> {
    RANGES
        .iter()
        .map(|(label, lower, upper)| {
            let matching = repositories
                .iter()
                .filter(|repo| {
                    repo.pr_count >= *lower && upper.is_none_or(|max| repo.pr_count <= max)
                })
                .count();
            PrCountRow {
                pr_range: *label,
                repo_count: u64::try_from(matching).unwrap_or(u64::MAX),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    use super::pr_count_distribution;
    use crate::cohort::{RepoCategory, RepositoryRecord};

    fn capstone(pr_count: u64) -> RepositoryRecord {
        RepositoryRecord {
            owner: "googleinterns".to_owned(),
            name: format!("step2020-{pr_count}"),
            created_at: Utc
                .with_ymd_and_hms(2020, 6, 18, 0, 0, 0)
                .single()
                .expect("valid timestamp"),
            pr_count,
            category: RepoCategory::Capstone,
        }
    }

    #[rstest]
    fn buckets_every_boundary() {
        let repositories: Vec<RepositoryRecord> =
            [0, 1, 5, 6, 10, 11, 20, 21, 90].into_iter().map(capstone).collect();

        let counts: Vec<(&str, u64)> = pr_count_distribution(&repositories)
            .into_iter()
            .map(|row| (row.pr_range, row.repo_count))
            .collect();

        assert_eq!(
            counts,
            [
                ("0", 1),
                ("1-5", 2),
                ("6-10", 2),
                ("11-15", 1),
                ("16-20", 1),
                ("21+", 2)
            ]
        );
    }

    #[rstest]
    fn empty_roster_lists_all_ranges_with_zero() {
        let rows = pr_count_distribution(&[]);

        assert_eq!(rows.len(), 6);
        assert!(rows.iter().all(|row| row.repo_count == 0));
    }
}
