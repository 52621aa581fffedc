//! Helpers turning HTTP failures into log-friendly descriptions.

use reqwest::StatusCode;
use serde_json::Value;

/// Pulls the `message` field out of a GitHub error body, if present.
pub(super) fn extract_github_message(body: &str) -> Option<String> {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return None;
    };
    value
        .get("message")
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
}

/// Describes a non-success status for logging.
pub(super) fn describe_http_failure(operation: &str, status: StatusCode, body: &str) -> String {
    let message = extract_github_message(body).unwrap_or_else(|| "unknown error".to_owned());
    format!("{operation} failed with status {status}: {message}")
}

/// Describes a transport error, distinguishing timeouts from connection faults.
pub(super) fn describe_transport_failure(operation: &str, error: &reqwest::Error) -> String {
    let kind = if error.is_timeout() {
        "timed out"
    } else if error.is_connect() {
        "could not connect"
    } else {
        "transport failed"
    };
    format!("{operation} {kind}: {error}")
}

/// Renders the GraphQL `errors` array as a single line.
pub(super) fn describe_graphql_errors(errors: &Value) -> String {
    let messages: Vec<&str> = errors
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| entry.get("message").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default();
    if messages.is_empty() {
        errors.to_string()
    } else {
        messages.join("; ")
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use rstest::rstest;
    use serde_json::json;

    use super::{describe_graphql_errors, describe_http_failure, extract_github_message};

    #[rstest]
    #[case::github_body(r#"{"message":"Bad credentials"}"#, Some("Bad credentials"))]
    #[case::html_body("<html>bad gateway</html>", None)]
    #[case::no_message(r#"{"documentation_url":"x"}"#, None)]
    fn extracts_github_message(#[case] body: &str, #[case] expected: Option<&str>) {
        assert_eq!(extract_github_message(body).as_deref(), expected);
    }

    #[rstest]
    fn http_failure_falls_back_to_unknown() {
        let description = describe_http_failure("repository search", StatusCode::NOT_FOUND, "");

        assert_eq!(
            description,
            "repository search failed with status 404 Not Found: unknown error"
        );
    }

    #[rstest]
    fn graphql_errors_join_messages() {
        let errors = json!([
            {"message": "Could not resolve to a Repository"},
            {"message": "Field 'x' doesn't exist"}
        ]);

        assert_eq!(
            describe_graphql_errors(&errors),
            "Could not resolve to a Repository; Field 'x' doesn't exist"
        );
    }
}
