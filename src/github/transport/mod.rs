//! Sending GraphQL requests to GitHub.
//!
//! [`GraphqlTransport`] is the seam every extractor talks through. The HTTP
//! implementation retries transient failures under a [`RetryPolicy`] and
//! reports anything it cannot recover from as the empty result, so one bad
//! request never aborts a batch.

mod client;
mod error_mapping;
pub mod retry;
#[cfg(any(test, feature = "test-support"))]
mod scripted;

use serde_json::Value;

use super::error::CollectError;
use super::query::GraphqlQuery;

pub use client::{DEFAULT_GRAPHQL_ENDPOINT, HttpTransport};
pub use retry::RetryPolicy;
#[cfg(any(test, feature = "test-support"))]
pub use scripted::ScriptedTransport;

/// Runs one GraphQL request.
#[cfg_attr(test, mockall::automock)]
pub trait GraphqlTransport {
    /// Sends `query` and returns the decoded JSON document.
    ///
    /// `Ok(None)` is the empty result: the API reported GraphQL errors, an
    /// unexpected status, or a transient failure that survived every retry.
    ///
    /// # Errors
    ///
    /// Returns [`CollectError::UnsupportedResponse`] when a successful
    /// response body is not JSON.
    fn run_query(&self, query: &GraphqlQuery) -> Result<Option<Value>, CollectError>;
}
