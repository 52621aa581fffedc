//! Shared helpers for integration tests.

use std::time::Duration;

use risr::{HttpTransport, PersonalAccessToken, RetryPolicy};
use tokio::runtime::Runtime;
use wiremock::MockServer;

/// Token sent by every test transport.
pub const TEST_TOKEN: &str = "test-token";

/// A Wiremock server driven by its own runtime.
///
/// The blocking transport must be called outside the runtime, so the
/// runtime is only entered to start the server and mount mocks.
pub struct GraphqlServer {
    runtime: Runtime,
    server: MockServer,
}

impl GraphqlServer {
    /// Starts a fresh server.
    pub fn start() -> Self {
        let runtime = Runtime::new().expect("runtime should start");
        let server = runtime.block_on(MockServer::start());
        Self { runtime, server }
    }

    /// Runs `future` on the server's runtime.
    pub fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    /// The mock server.
    pub const fn server(&self) -> &MockServer {
        &self.server
    }

    /// A transport pointed at the server's `/graphql` path with `max_attempts`
    /// attempts and no retry delay.
    pub fn transport(&self, max_attempts: u32) -> HttpTransport {
        let token = PersonalAccessToken::new(TEST_TOKEN).expect("token should be valid");
        HttpTransport::for_endpoint(
            &token,
            &format!("{}/graphql", self.server.uri()),
            RetryPolicy::new(max_attempts, Duration::ZERO),
        )
        .expect("transport should be created")
    }
}
