//! Error types for the sift-query crate.

use thiserror::Error;

/// Errors raised while constructing clauses and sort modifiers.
///
/// Building and compiling a [`BuildCommand`](crate::BuildCommand) never
/// fails; validation happens when a clause is created.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// A clause was given an empty or whitespace-only field name.
    #[error("{clause} clause requires a non-empty field name")]
    EmptyField { clause: &'static str },

    /// A term clause field collides with the `boost` key of its wire form.
    #[error("term clause cannot target the reserved field '{field}'")]
    ReservedField { field: String },

    /// A range clause was created without any bound.
    #[error("range clause on '{field}' needs at least one bound")]
    EmptyRange { field: String },

    /// A terms clause was created with no values.
    #[error("terms clause on '{field}' needs at least one value")]
    EmptyTerms { field: String },

    /// A sort direction string was not recognised.
    #[error("invalid sort direction '{0}', expected 'asc' or 'desc'")]
    InvalidDirection(String),
}

/// Result type for clause construction.
pub type Result<T> = std::result::Result<T, QueryError>;

/// Errors raised while adapting a raw engine response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponseError {
    /// An expected key is absent from the response.
    #[error("response is missing '{0}'")]
    MissingKey(&'static str),

    /// The total hit count could not be read as a non-negative integer.
    #[error("response total is not a hit count: {0}")]
    InvalidTotal(String),

    /// A key that must hold an array holds something else.
    #[error("response key '{0}' is not an array")]
    NotAnArray(&'static str),
}

/// Errors returned by [`Finder`](crate::Finder).
///
/// `E` is the error type of the injected [`SearchClient`](crate::SearchClient).
/// Client failures are passed through untouched in [`FindError::Client`].
#[derive(Debug, Error)]
pub enum FindError<E> {
    /// The command cannot be executed. Raised before any request is sent.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// The client failed (transport or engine-side error).
    #[error(transparent)]
    Client(E),

    /// The engine answered with something that is not a search response.
    #[error("malformed response: {0}")]
    MalformedResponse(#[from] ResponseError),
}

impl<E> FindError<E> {
    /// Create an invalid-query error.
    pub fn invalid_query(msg: impl Into<String>) -> Self {
        Self::InvalidQuery(msg.into())
    }

    /// Returns `true` if this is an [`FindError::InvalidQuery`].
    pub fn is_invalid_query(&self) -> bool {
        matches!(self, Self::InvalidQuery(_))
    }

    /// Returns the client error, if this error came from the client.
    pub fn client_error(&self) -> Option<&E> {
        match self {
            Self::Client(e) => Some(e),
            _ => None,
        }
    }

    /// Consumes the error, returning the client error if there is one.
    pub fn into_client_error(self) -> Option<E> {
        match self {
            Self::Client(e) => Some(e),
            _ => None,
        }
    }
}
