//! End-to-end collection over a scripted transport.
//!
//! Runs discovery, host roster construction, statistics, and comment
//! extraction in sequence, writing every intermediate file to a temporary
//! data directory the way the CLI does.

use camino::Utf8PathBuf;
use risr::export::{CommentRow, PullRequestRow, pr_count_distribution, read_file, write_file};
use risr::github::ScriptedTransport;
use risr::github::models::test_support::{
    StatsNode, comment_node, comments_node, edge, pull_request_page, repository_node,
    review_node, review_requested, review_submitted, search_page, timeline_node,
};
use risr::{
    CommentExtractor, DataFiles, HostRecord, HostRoster, HostRosterBuilder,
    PullRequestStatsExtractor, RepoCategory, RepositoryDiscovery, RepositoryRecord,
    load_team_hosts,
};
use rstest::{fixture, rstest};
use tempfile::TempDir;

const CURSOR: &str = "Y3Vyc29yOjE=";

const TEAMS: &str = "Github username 1,Github username 2,Start Date,Team Number\n\
                     host_duplicate,host_partner,5/18/2020,12\n";

#[fixture]
fn data_files() -> (TempDir, DataFiles) {
    let dir = TempDir::new().expect("temp dir should be created");
    let root = Utf8PathBuf::from_path_buf(dir.path().join("data"))
        .expect("temp path should be UTF-8");
    (dir, DataFiles::new(root))
}

fn discover(files: &DataFiles) -> Vec<RepositoryRecord> {
    let transport = ScriptedTransport::new([
        Some(search_page(vec![edge(
            CURSOR,
            repository_node("intern_a", "step", "2020-05-18T16:00:00Z", 2),
        )])),
        Some(search_page(Vec::new())),
    ]);

    let repositories = RepositoryDiscovery::new(&transport)
        .discover("starter")
        .expect("discovery should succeed");
    write_file(&files.repositories(RepoCategory::Starter), &repositories)
        .expect("roster should be written");
    read_file(&files.repositories(RepoCategory::Starter)).expect("roster should load")
}

fn build_hosts(files: &DataFiles, repositories: &[RepositoryRecord]) -> HostRoster {
    let transport = ScriptedTransport::new([
        Some(pull_request_page(vec![edge(
            CURSOR,
            timeline_node(
                "2020-06-26T09:00:00Z",
                vec![
                    review_requested(Some("host_duplicate")),
                    review_requested(None),
                    review_submitted(Some("intern_a")),
                    review_submitted(Some("host_inferred")),
                ],
            ),
        )])),
        Some(pull_request_page(Vec::new())),
    ]);
    let explicit =
        load_team_hosts(TEAMS.as_bytes(), "step_teams.csv").expect("teams should load");

    let roster = HostRosterBuilder::new(&transport)
        .build(explicit, repositories)
        .expect("roster should build");
    let records: Vec<HostRecord> = roster.into();
    write_file(&files.hosts(), &records).expect("hosts should be written");
    read_file::<HostRecord>(&files.hosts())
        .expect("hosts should load")
        .into_iter()
        .collect()
}

#[rstest]
fn collects_every_data_file(data_files: (TempDir, DataFiles)) {
    let (_guard, files) = data_files;

    let repositories = discover(&files);
    assert_eq!(repositories.len(), 1, "one edge then an empty page");

    let roster = build_hosts(&files, &repositories);
    let hosts: Vec<(&str, &str, &str)> = roster
        .iter()
        .map(|host| (host.username.as_str(), host.start_date.as_str(), host.team.as_str()))
        .collect();
    assert_eq!(
        hosts,
        vec![
            ("host_duplicate", "5/18/2020", "12"),
            ("host_partner", "5/18/2020", "12"),
            ("host_inferred", "6/15/2020", "unknown"),
        ]
    );

    let stats_transport = ScriptedTransport::new([
        Some(pull_request_page(vec![edge(
            CURSOR,
            StatsNode {
                resource_path: "/intern_a/step/pull/1",
                number: 1,
                created_at: "2020-05-19T20:05:40Z",
                reviews: vec![("text1", 3), ("", 1), ("text2", 2), ("text3", 2)],
                participants: vec!["intern_a", "host_duplicate"],
                review_events: 4,
                additions: 30,
                deletions: 2,
                ..StatsNode::default()
            }
            .to_value(),
        )])),
        Some(pull_request_page(Vec::new())),
    ]);
    let mut stats = PullRequestStatsExtractor::new(&stats_transport);
    let pull_requests: Vec<PullRequestRow> = repositories
        .iter()
        .flat_map(|repo| stats.extract_stats(repo, &roster).expect("stats should extract"))
        .map(|record| PullRequestRow::from(&record))
        .collect();
    write_file(&files.pr_stats(RepoCategory::Starter), &pull_requests)
        .expect("stats should be written");

    let stats_csv = std::fs::read_to_string(files.pr_stats(RepoCategory::Starter))
        .expect("stats file should exist");
    assert_eq!(
        stats_csv,
        "pr_path,pr_number,week,start_date,created_date,total_comments,review_count,pr_lines_changed\n\
         /intern_a/step/pull/1,1,1,5/18/2020,2020-05-19T20:05:40Z,11,4,32\n"
    );

    let comments_transport = ScriptedTransport::new([
        Some(pull_request_page(vec![edge(
            CURSOR,
            comments_node(
                vec![comment_node(
                    "/intern_a/step/pull/1#c1",
                    "please review",
                    "2020-05-19T21:00:00Z",
                    Some("intern_a"),
                )],
                vec![review_node(
                    "/intern_a/step/pull/1#r1",
                    "",
                    "2020-05-20T08:00:00Z",
                    Some("host_duplicate"),
                    vec![comment_node(
                        "/intern_a/step/pull/1#r1c1",
                        "rename this",
                        "2020-05-20T08:00:01Z",
                        Some("host_duplicate"),
                    )],
                )],
            ),
        )])),
        Some(pull_request_page(Vec::new())),
    ]);
    let extractor = CommentExtractor::new(&comments_transport);
    let comments: Vec<CommentRow> = repositories
        .iter()
        .flat_map(|repo| {
            extractor
                .extract_comments(repo, RepoCategory::Starter, &roster)
                .expect("comments should extract")
        })
        .map(|record| CommentRow::from(&record))
        .collect();
    write_file(&files.comments(RepoCategory::Starter), &comments)
        .expect("comments should be written");

    let comments_csv = std::fs::read_to_string(files.comments(RepoCategory::Starter))
        .expect("comments file should exist");
    assert_eq!(
        comments_csv,
        "comment_path,created,author,comment,repo_type,is_host\n\
         /intern_a/step/pull/1#c1,2020-05-19T21:00:00Z,intern_a,please review,starter,false\n\
         /intern_a/step/pull/1#r1c1,2020-05-20T08:00:01Z,host_duplicate,rename this,starter,true\n"
    );

    write_file(&files.pr_count(), &pr_count_distribution(&repositories))
        .expect("distribution should be written");
    let distribution = std::fs::read_to_string(files.pr_count()).expect("distribution exists");
    assert!(distribution.contains("1-5,1\n"));
}

#[rstest]
fn unsupported_category_issues_no_requests() {
    let transport = ScriptedTransport::default();

    let result = RepositoryDiscovery::new(&transport).discover("bootcamp");

    assert!(result.is_err());
    assert!(transport.requests().is_empty());
}
