//! In-memory transport replaying canned responses.

use std::cell::RefCell;
use std::collections::VecDeque;

use serde_json::Value;

use super::GraphqlTransport;
use crate::github::error::CollectError;
use crate::github::query::GraphqlQuery;

/// Replays responses in order and records every query it receives.
///
/// Once the script runs out every request gets the empty result.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    responses: RefCell<VecDeque<Option<Value>>>,
    requests: RefCell<Vec<GraphqlQuery>>,
}

impl ScriptedTransport {
    /// Creates a transport that answers with `responses` in order.
    #[must_use]
    pub fn new(responses: impl IntoIterator<Item = Option<Value>>) -> Self {
        Self {
            responses: RefCell::new(responses.into_iter().collect()),
            requests: RefCell::new(Vec::new()),
        }
    }

    /// Queries received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<GraphqlQuery> {
        self.requests.borrow().clone()
    }

    /// Responses not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.responses.borrow().len()
    }
}

impl GraphqlTransport for ScriptedTransport {
    fn run_query(&self, query: &GraphqlQuery) -> Result<Option<Value>, CollectError> {
        self.requests.borrow_mut().push(query.clone());
        Ok(self.responses.borrow_mut().pop_front().flatten())
    }
}
