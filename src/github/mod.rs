//! GitHub GraphQL access.
//!
//! This module renders typed GraphQL requests, sends them through a retrying
//! transport, walks cursor-paginated connections, and decodes the response
//! pages into typed models. Everything above this layer sees only
//! [`GraphqlTransport`] and [`CollectError`].

pub mod error;
pub mod models;
pub mod pagination;
pub mod query;
pub mod rate_limit;
pub mod token;
pub mod transport;

pub use error::CollectError;
pub use pagination::{PageOutcome, paginate};
pub use query::{Cursor, GraphqlQuery, PullRequestProjection, RepositoryParams, SearchParams};
pub use token::PersonalAccessToken;
pub use transport::{DEFAULT_GRAPHQL_ENDPOINT, GraphqlTransport, HttpTransport, RetryPolicy};

#[cfg(test)]
pub use transport::MockGraphqlTransport;
#[cfg(any(test, feature = "test-support"))]
pub use transport::ScriptedTransport;
