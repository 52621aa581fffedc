//! HTTP behaviour of the GraphQL transport against a mock server.

mod support;

use risr::github::{GraphqlQuery, GraphqlTransport, SearchParams};
use risr::{CollectError, RepositoryDiscovery};
use rstest::{fixture, rstest};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

use support::{GraphqlServer, TEST_TOKEN};

#[fixture]
fn graphql_server() -> GraphqlServer {
    GraphqlServer::start()
}

fn search_query() -> GraphqlQuery {
    GraphqlQuery::repository_search(&SearchParams {
        search: "repo:googleinterns/risr",
        after: None,
    })
}

#[rstest]
fn sends_token_and_variables(graphql_server: GraphqlServer) {
    let page = json!({"data": {"search": {"edges": []}}});
    graphql_server.block_on(
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(header("authorization", format!("token {TEST_TOKEN}").as_str()))
            .and(body_partial_json(json!({
                "variables": {"search": "repo:googleinterns/risr"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(page.clone()))
            .expect(1)
            .mount(graphql_server.server()),
    );

    let result = graphql_server
        .transport(2)
        .run_query(&search_query())
        .expect("request should succeed");

    assert_eq!(result, Some(page));
}

#[rstest]
#[case::bad_gateway(502)]
#[case::rate_limited(429)]
fn retries_transient_failures_exactly_once(graphql_server: GraphqlServer, #[case] status: u16) {
    graphql_server.block_on(
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(status))
            .expect(2)
            .mount(graphql_server.server()),
    );

    let result = graphql_server
        .transport(2)
        .run_query(&search_query())
        .expect("exhausted retries should not be an error");

    assert_eq!(result, None);
}

#[rstest]
fn does_not_retry_not_found(graphql_server: GraphqlServer) {
    graphql_server.block_on(
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})),
            )
            .expect(1)
            .mount(graphql_server.server()),
    );

    let result = graphql_server
        .transport(2)
        .run_query(&search_query())
        .expect("client errors should not be raised");

    assert_eq!(result, None);
}

#[rstest]
fn graphql_errors_yield_the_empty_result(graphql_server: GraphqlServer) {
    graphql_server.block_on(
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "errors": [{"message": "Could not resolve to a Repository"}]
            })))
            .expect(1)
            .mount(graphql_server.server()),
    );

    let result = graphql_server
        .transport(2)
        .run_query(&search_query())
        .expect("GraphQL errors should not be raised");

    assert_eq!(result, None);
}

#[rstest]
fn non_json_success_is_unsupported(graphql_server: GraphqlServer) {
    graphql_server.block_on(
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .expect(1)
            .mount(graphql_server.server()),
    );

    let result = graphql_server.transport(2).run_query(&search_query());

    assert!(
        matches!(result, Err(CollectError::UnsupportedResponse { .. })),
        "expected unsupported response, got {result:?}"
    );
}

#[rstest]
fn discovery_pages_through_search_results(graphql_server: GraphqlServer) {
    graphql_server.block_on(
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"variables": {"after": null}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"search": {"edges": [{
                    "cursor": "Y3Vyc29yOjE=",
                    "node": {
                        "owner": {"login": "googleinterns"},
                        "name": "risr",
                        "createdAt": "2020-06-01T17:02:13Z",
                        "pullRequests": {"totalCount": 12}
                    }
                }]}}
            })))
            .expect(1)
            .mount(graphql_server.server()),
    );
    graphql_server.block_on(
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"variables": {"after": "Y3Vyc29yOjE="}})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"data": {"search": {"edges": []}}})),
            )
            .expect(1)
            .mount(graphql_server.server()),
    );
    let transport = graphql_server.transport(2);

    let repositories = RepositoryDiscovery::new(&transport)
        .discover("test")
        .expect("discovery should succeed");

    assert_eq!(repositories.len(), 1);
    assert!(repositories.iter().all(|repo| repo.pr_count == 12));
}
