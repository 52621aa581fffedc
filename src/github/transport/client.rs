//! Blocking `reqwest` implementation of [`GraphqlTransport`].

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use serde_json::Value;
use tracing::{debug, error, warn};
use url::Url;

use super::error_mapping::{
    describe_graphql_errors, describe_http_failure, describe_transport_failure,
};
use super::retry::{RetryPolicy, is_transient_status};
use super::GraphqlTransport;
use crate::github::error::CollectError;
use crate::github::query::GraphqlQuery;
use crate::github::rate_limit::RateLimitInfo;
use crate::github::token::PersonalAccessToken;

/// Public GitHub GraphQL endpoint.
pub const DEFAULT_GRAPHQL_ENDPOINT: &str = "https://api.github.com/graphql";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const CLIENT_USER_AGENT: &str = concat!("risr/", env!("CARGO_PKG_VERSION"));

/// Outcome of one HTTP exchange.
enum Attempt {
    /// Final answer: either data or the empty result.
    Settled(Option<Value>),
    /// A failure that another attempt may fix.
    Transient {
        description: String,
        rate_limit: Option<RateLimitInfo>,
    },
}

/// GraphQL transport speaking HTTP to GitHub.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
    authorization: String,
    retry: RetryPolicy,
}

impl HttpTransport {
    /// Creates a transport for `endpoint` authenticated with `token`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectError::Network`] when the HTTP client cannot be
    /// constructed.
    pub fn new(
        token: &PersonalAccessToken,
        endpoint: Url,
        retry: RetryPolicy,
    ) -> Result<Self, CollectError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|error| CollectError::Network {
                message: format!("failed to configure GitHub HTTP client: {error}"),
            })?;

        Ok(Self {
            client,
            endpoint,
            authorization: token.authorization_value(),
            retry,
        })
    }

    /// Parses `endpoint` and creates the transport.
    ///
    /// # Errors
    ///
    /// Returns [`CollectError::Configuration`] for an invalid URL and
    /// [`CollectError::Network`] when the HTTP client cannot be constructed.
    pub fn for_endpoint(
        token: &PersonalAccessToken,
        endpoint: &str,
        retry: RetryPolicy,
    ) -> Result<Self, CollectError> {
        let url = Url::parse(endpoint).map_err(|error| CollectError::Configuration {
            message: format!("invalid GraphQL endpoint '{endpoint}': {error}"),
        })?;
        Self::new(token, url, retry)
    }

    fn send_once(&self, query: &GraphqlQuery) -> Result<Attempt, CollectError> {
        let operation = query.operation();
        let sent = self
            .client
            .post(self.endpoint.clone())
            .header(AUTHORIZATION, self.authorization.as_str())
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .header(ACCEPT, "application/json")
            .json(&query.body())
            .send();

        let response = match sent {
            Ok(response) => response,
            Err(error) => {
                return Ok(Attempt::Transient {
                    description: describe_transport_failure(operation, &error),
                    rate_limit: None,
                });
            }
        };

        let status = response.status();
        if status == StatusCode::OK {
            return Self::read_success(operation, response).map(Attempt::Settled);
        }

        let rate_limit = RateLimitInfo::from_headers(response.headers());
        let body = response.text().unwrap_or_default();
        let description = describe_http_failure(operation, status, &body);
        if is_transient_status(status) {
            return Ok(Attempt::Transient {
                description,
                rate_limit,
            });
        }

        error!(%status, "{description}");
        Ok(Attempt::Settled(None))
    }

    fn read_success(operation: &str, response: Response) -> Result<Option<Value>, CollectError> {
        let document: Value = response
            .json()
            .map_err(|error| CollectError::UnsupportedResponse {
                operation: operation.to_owned(),
                message: format!("response body is not JSON: {error}"),
            })?;

        if let Some(errors) = document.get("errors") {
            error!(
                operation,
                "GraphQL query returned errors: {}",
                describe_graphql_errors(errors)
            );
            return Ok(None);
        }
        Ok(Some(document))
    }
}

impl GraphqlTransport for HttpTransport {
    fn run_query(&self, query: &GraphqlQuery) -> Result<Option<Value>, CollectError> {
        let mut attempt: u32 = 1;
        loop {
            debug!(operation = query.operation(), attempt, "sending GraphQL request");
            match self.send_once(query)? {
                Attempt::Settled(result) => return Ok(result),
                Attempt::Transient {
                    description,
                    rate_limit,
                } => {
                    if !self.retry.allows_another(attempt) {
                        error!(attempt, "{description}; giving up");
                        return Ok(None);
                    }
                    warn!(
                        attempt,
                        retry_in = ?self.retry.delay(),
                        rate_limit_remaining = rate_limit.map(|info| info.remaining()),
                        rate_limit_reset_in_secs = rate_limit.map(|info| info.seconds_until_reset()),
                        "{description}; retrying"
                    );
                    std::thread::sleep(self.retry.delay());
                    attempt = attempt.saturating_add(1);
                }
            }
        }
    }
}
