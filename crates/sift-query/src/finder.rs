//! Executes build commands through an injected client.
//!
//! The [`Finder`] is the boundary between query construction and I/O. It
//! checks the one precondition a command has (a target index), compiles the
//! command, makes exactly one client call and adapts the answer.

use tracing::{debug, warn};

use crate::client::SearchClient;
use crate::error::FindError;
use crate::query::BuildCommand;
use crate::request::CompiledRequest;
use crate::result::{read_count, ResultSet};

/// Runs [`BuildCommand`]s against a [`SearchClient`].
///
/// No retries, no caching: each call is one request and one response.
///
/// # Example
///
/// ```
/// use sift_query::{BuildCommand, Finder, MockClient};
/// use serde_json::json;
///
/// let client = MockClient::responding(json!({
///     "hits": {"total": {"value": 1}, "hits": [{"_id": "42", "_source": {}}]}
/// }));
/// let finder = Finder::new(&client);
///
/// let results = finder
///     .find(&BuildCommand::new().index("articles").query("rust"))
///     .unwrap();
/// assert_eq!(results.total(), 1);
/// assert_eq!(results.hits()[0].id(), Some("42"));
/// ```
#[derive(Debug, Clone)]
pub struct Finder<C> {
    client: C,
}

impl<C: SearchClient> Finder<C> {
    /// Creates a finder over the given client.
    pub fn new(client: C) -> Self {
        Finder { client }
    }

    /// Returns the client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Runs the command and returns one page of hits.
    ///
    /// Fails with [`FindError::InvalidQuery`] without calling the client when
    /// the command has no index.
    pub fn find(&self, command: &BuildCommand) -> Result<ResultSet, FindError<C::Error>> {
        let request = prepare(command)?;
        debug!(
            index = request.index.as_deref().unwrap_or_default(),
            clauses = request.bool_query().clause_count(),
            from = request.from,
            size = request.size,
            "dispatching search"
        );

        let response = self.client.search(&request).map_err(FindError::Client)?;
        let results = ResultSet::from_response(response)?;

        debug!(total = results.total(), hits = results.len(), "search completed");
        Ok(results)
    }

    /// Returns the total number of matching documents without fetching hits.
    pub fn count(&self, command: &BuildCommand) -> Result<u64, FindError<C::Error>> {
        let request = prepare(command)?.for_count();
        debug!(
            index = request.index.as_deref().unwrap_or_default(),
            clauses = request.bool_query().clause_count(),
            "dispatching count"
        );

        let response = self.client.count(&request).map_err(FindError::Client)?;
        let total = read_count(&response)?;

        debug!(total, "count completed");
        Ok(total)
    }
}

fn prepare<E>(command: &BuildCommand) -> Result<CompiledRequest, FindError<E>> {
    if !command.is_valid() {
        warn!("rejecting search command without a target index");
        return Err(FindError::invalid_query("no target index set"));
    }
    Ok(command.compile())
}
