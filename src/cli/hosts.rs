//! `hosts`: host roster construction.

use std::fs::File;

use camino::Utf8Path;
use risr::export::{read_file, write_file};
use risr::github::GraphqlTransport;
use risr::{
    CohortCalendar, CollectError, DataFiles, HostRecord, HostRosterBuilder, RepoCategory,
    RepositoryRecord, load_team_hosts,
};

/// Merges the teams file with reviewers inferred from the `category`
/// repository roster and writes the host roster. Inferred hosts are bucketed
/// with `calendar`.
///
/// # Errors
///
/// Returns [`CollectError::MissingInput`] when the teams file or the roster
/// is absent, and transport, I/O, or CSV errors raised along the way.
pub fn run_with_transport<T>(
    transport: &T,
    files: &DataFiles,
    category: RepoCategory,
    teams_file: &Utf8Path,
    calendar: CohortCalendar,
) -> Result<(), CollectError>
where
    T: GraphqlTransport + ?Sized,
{
    let explicit = read_teams(teams_file)?;
    let repositories: Vec<RepositoryRecord> = read_file(&files.repositories(category))?;
    let roster =
        HostRosterBuilder::with_calendar(transport, calendar).build(explicit, &repositories)?;
    let records: Vec<HostRecord> = roster.into();
    write_file(&files.hosts(), &records)
}

fn read_teams(path: &Utf8Path) -> Result<Vec<HostRecord>, CollectError> {
    if !path.is_file() {
        return Err(CollectError::MissingInput {
            path: path.to_string(),
        });
    }
    let file = File::open(path).map_err(|error| CollectError::Io {
        message: format!("{path}: {error}"),
    })?;
    load_team_hosts(file, path.as_str())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use risr::export::{read_file, write_file};
    use risr::github::ScriptedTransport;
    use risr::github::models::test_support::{
        edge, pull_request_page, review_requested, timeline_node,
    };
    use risr::{CohortCalendar, CollectError, HostRecord, RepoCategory, RepositoryRecord};
    use rstest::rstest;

    use super::run_with_transport;
    use crate::cli::test_support::temp_data_files;

    const TEAMS: &str = "Github username 1,Github username 2,Start Date,Team Number\n\
                         host_duplicate,host_b,5/18/2020,7\n";

    fn starter_repository() -> RepositoryRecord {
        RepositoryRecord {
            owner: "intern1".to_owned(),
            name: "step".to_owned(),
            created_at: "2020-05-18T16:00:00Z".parse().expect("valid timestamp"),
            pr_count: 1,
            category: RepoCategory::Starter,
        }
    }

    #[rstest]
    fn merges_teams_file_with_inferred_reviewers() {
        let (_guard, files) = temp_data_files();
        let teams = files.root().join("step_teams.csv");
        fs::write(&teams, TEAMS).expect("teams file should be written");
        write_file(&files.repositories(RepoCategory::Starter), &[starter_repository()])
            .expect("roster should be written");
        let transport = ScriptedTransport::new([
            Some(pull_request_page(vec![edge(
                "Y3Vyc29yOjE=",
                timeline_node(
                    "2020-06-26T12:00:00Z",
                    vec![
                        review_requested(Some("host_duplicate")),
                        review_requested(Some("new_host")),
                    ],
                ),
            )])),
            Some(pull_request_page(Vec::new())),
        ]);

        run_with_transport(
            &transport,
            &files,
            RepoCategory::Starter,
            &teams,
            CohortCalendar::default(),
        )
        .expect("hosts should be built");

        let hosts: Vec<HostRecord> = read_file(&files.hosts()).expect("hosts should load");
        let summary: Vec<(&str, &str, &str)> = hosts
            .iter()
            .map(|host| (host.username.as_str(), host.start_date.as_str(), host.team.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("host_duplicate", "5/18/2020", "7"),
                ("host_b", "5/18/2020", "7"),
                ("new_host", "6/15/2020", "unknown"),
            ]
        );
    }

    #[rstest]
    fn missing_teams_file_is_reported_by_name() {
        let (_guard, files) = temp_data_files();
        let teams = files.root().join("absent.csv");
        let transport = ScriptedTransport::default();

        let result = run_with_transport(
            &transport,
            &files,
            RepoCategory::Starter,
            &teams,
            CohortCalendar::default(),
        );

        assert_eq!(
            result,
            Err(CollectError::MissingInput {
                path: teams.to_string()
            })
        );
        assert!(transport.requests().is_empty());
    }

    #[rstest]
    fn inferred_hosts_follow_the_supplied_calendar() {
        let (_guard, files) = temp_data_files();
        let teams = files.root().join("step_teams.csv");
        fs::write(&teams, TEAMS).expect("teams file should be written");
        write_file(&files.repositories(RepoCategory::Starter), &[starter_repository()])
            .expect("roster should be written");
        let transport = ScriptedTransport::new([
            Some(pull_request_page(vec![edge(
                "Y3Vyc29yOjE=",
                timeline_node("2020-06-26T12:00:00Z", vec![review_requested(Some("new_host"))]),
            )])),
            Some(pull_request_page(Vec::new())),
        ]);
        let calendar = CohortCalendar::new(
            ["5/18/2021", "6/20/2020"]
                .into_iter()
                .filter_map(risr::cohort::calendar::parse_start_date),
        )
        .expect("calendar should build");

        run_with_transport(&transport, &files, RepoCategory::Starter, &teams, calendar)
            .expect("hosts should be built");

        let hosts: Vec<HostRecord> = read_file(&files.hosts()).expect("hosts should load");
        let inferred = hosts.iter().find(|host| host.username == "new_host");
        assert_eq!(
            inferred.map(|host| host.start_date.as_str()),
            Some("6/20/2020")
        );
    }
}
