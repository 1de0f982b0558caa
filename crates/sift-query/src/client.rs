//! Client capability consumed by the [`Finder`](crate::Finder).
//!
//! This crate never talks to an engine itself. Hosts inject an
//! implementation of [`SearchClient`] that ships a [`CompiledRequest`] and
//! returns the engine's raw JSON answer. [`MockClient`] serves tests.

use std::sync::{Arc, Mutex, PoisonError};

use serde_json::Value;

use crate::request::CompiledRequest;

/// Executes compiled requests against a search engine.
///
/// This is the single I/O seam of the crate. Implementations own transport,
/// timeouts and retries; the finder calls each operation at most once per
/// invocation and hands any error back to its caller untouched.
///
/// # Thread Safety
///
/// Clients must be `Send + Sync` so one client can serve concurrent finders.
pub trait SearchClient: Send + Sync {
    /// Error raised by the transport or the engine.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Runs a search and returns the raw response.
    fn search(&self, request: &CompiledRequest) -> Result<Value, Self::Error>;

    /// Runs a count-only request and returns the raw response.
    ///
    /// The finder passes [`CompiledRequest::for_count`]. The default sends it
    /// through [`search`](Self::search); clients with a dedicated count
    /// endpoint can override this and answer `{"count": n}`.
    fn count(&self, request: &CompiledRequest) -> Result<Value, Self::Error> {
        self.search(request)
    }
}

impl<T: SearchClient + ?Sized> SearchClient for &T {
    type Error = T::Error;

    fn search(&self, request: &CompiledRequest) -> Result<Value, Self::Error> {
        (**self).search(request)
    }

    fn count(&self, request: &CompiledRequest) -> Result<Value, Self::Error> {
        (**self).count(request)
    }
}

impl<T: SearchClient + ?Sized> SearchClient for Box<T> {
    type Error = T::Error;

    fn search(&self, request: &CompiledRequest) -> Result<Value, Self::Error> {
        (**self).search(request)
    }

    fn count(&self, request: &CompiledRequest) -> Result<Value, Self::Error> {
        (**self).count(request)
    }
}

impl<T: SearchClient + ?Sized> SearchClient for Arc<T> {
    type Error = T::Error;

    fn search(&self, request: &CompiledRequest) -> Result<Value, Self::Error> {
        (**self).search(request)
    }

    fn count(&self, request: &CompiledRequest) -> Result<Value, Self::Error> {
        (**self).count(request)
    }
}

/// Adapts a closure into a [`SearchClient`].
///
/// ```
/// use sift_query::{BuildCommand, ClientFn, Finder};
/// use serde_json::json;
///
/// let client = ClientFn::new(|_request| {
///     Ok::<_, std::io::Error>(json!({"hits": {"total": 0, "hits": []}}))
/// });
/// let results = Finder::new(client)
///     .find(&BuildCommand::new().index("articles"))
///     .unwrap();
/// assert!(results.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct ClientFn<F>(F);

impl<F> ClientFn<F> {
    /// Wraps the closure.
    pub fn new<E>(f: F) -> Self
    where
        F: Fn(&CompiledRequest) -> Result<Value, E>,
    {
        ClientFn(f)
    }
}

impl<F, E> SearchClient for ClientFn<F>
where
    F: Fn(&CompiledRequest) -> Result<Value, E> + Send + Sync,
    E: std::error::Error + Send + Sync + 'static,
{
    type Error = E;

    fn search(&self, request: &CompiledRequest) -> Result<Value, Self::Error> {
        (self.0)(request)
    }
}

// === Mock implementation for testing ===

/// Error returned by a failing [`MockClient`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct MockClientError(pub String);

#[derive(Debug, Clone)]
enum MockReply {
    Respond(Value),
    Fail(String),
}

/// Mock client for testing.
///
/// Replays one canned response (or failure) for every call and records the
/// requests it receives.
#[derive(Debug)]
pub struct MockClient {
    reply: MockReply,
    count_reply: Option<Value>,
    requests: Mutex<Vec<CompiledRequest>>,
}

impl MockClient {
    /// Create a mock that answers every call with `response`.
    pub fn responding(response: Value) -> Self {
        Self {
            reply: MockReply::Respond(response),
            count_reply: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock that fails every call with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: MockReply::Fail(message.into()),
            count_reply: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answer count calls with `response` instead of the search reply.
    pub fn with_count_response(mut self, response: Value) -> Self {
        self.count_reply = Some(response);
        self
    }

    /// Requests received so far, in call order.
    pub fn requests(&self) -> Vec<CompiledRequest> {
        self.lock().clone()
    }

    /// Number of calls received so far.
    pub fn call_count(&self) -> usize {
        self.lock().len()
    }

    /// The most recent request, if any.
    pub fn last_request(&self) -> Option<CompiledRequest> {
        self.lock().last().cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<CompiledRequest>> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, request: &CompiledRequest) {
        self.lock().push(request.clone());
    }
}

impl SearchClient for MockClient {
    type Error = MockClientError;

    fn search(&self, request: &CompiledRequest) -> Result<Value, Self::Error> {
        self.record(request);
        match &self.reply {
            MockReply::Respond(value) => Ok(value.clone()),
            MockReply::Fail(message) => Err(MockClientError(message.clone())),
        }
    }

    fn count(&self, request: &CompiledRequest) -> Result<Value, Self::Error> {
        match &self.count_reply {
            Some(value) => {
                self.record(request);
                Ok(value.clone())
            }
            None => self.search(request),
        }
    }
}
