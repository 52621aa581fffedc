//! Cursor-driven pagination over GraphQL connections.
//!
//! [`paginate`] owns the request loop; callers supply a template that renders
//! the request for a cursor and a page processor that consumes one response
//! and reports where to resume. Pagination ends when a page has no edges or
//! the transport returns the empty result.

use serde_json::Value;
use tracing::{debug, warn};

use super::error::CollectError;
use super::models::Connection;
use super::query::{Cursor, GraphqlQuery};
use super::transport::GraphqlTransport;

/// What a page processor found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// The page had edges; resume after this cursor.
    Continue(Cursor),
    /// The page had no edges, or the data source is gone.
    Exhausted,
}

/// Drives `template` through `transport` until `process` reports exhaustion.
///
/// Returns the number of pages handed to `process`.
///
/// # Errors
///
/// Propagates the first error from the transport or from `process`; a page
/// whose shape does not decode therefore stops pagination with
/// [`CollectError::UnsupportedResponse`].
pub fn paginate<T, Template, Process>(
    transport: &T,
    template: Template,
    mut process: Process,
) -> Result<usize, CollectError>
where
    T: GraphqlTransport + ?Sized,
    Template: Fn(Option<&Cursor>) -> GraphqlQuery,
    Process: FnMut(Value) -> Result<PageOutcome, CollectError>,
{
    let mut cursor: Option<Cursor> = None;
    let mut pages: usize = 0;

    loop {
        let query = template(cursor.as_ref());
        let Some(page) = transport.run_query(&query)? else {
            warn!(
                operation = query.operation(),
                pages, "empty result from GitHub; ending pagination"
            );
            return Ok(pages);
        };
        pages = pages.saturating_add(1);

        match process(page)? {
            PageOutcome::Continue(next) => {
                debug!(operation = query.operation(), pages, cursor = next.as_str(), "next page");
                cursor = Some(next);
            }
            PageOutcome::Exhausted => return Ok(pages),
        }
    }
}

/// Hands every node of `connection` to `sink` in order and reports the
/// cursor of the last edge.
pub(crate) fn consume_edges<N, Sink>(connection: Connection<N>, mut sink: Sink) -> PageOutcome
where
    Sink: FnMut(N),
{
    let mut last: Option<String> = None;
    for edge in connection.edges {
        sink(edge.node);
        last = Some(edge.cursor);
    }
    last.map_or(PageOutcome::Exhausted, |cursor| {
        PageOutcome::Continue(Cursor::new(cursor))
    })
}
