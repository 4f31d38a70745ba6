//! Error types for record synchronization.
//!
//! Every failure is contained to the operation that produced it; none of them
//! is fatal to the process.

use roster_protocol::{FormSnapshot, ValidationErrors};
use thiserror::Error;

/// Errors returned by a remote resource.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// The configured endpoint is not a usable URL.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
    /// Connection, TLS, or body transfer failure.
    #[error("transport error: {0}")]
    Transport(String),
    /// The request exceeded the configured timeout.
    #[error("request timed out: {0}")]
    Timeout(String),
    /// The server answered with a non-success status.
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },
    /// The response body was not the expected JSON shape.
    #[error("malformed response: {0}")]
    Decode(String),
}

/// The initial fetch failed; the collection keeps its previous contents.
#[derive(Debug, Error)]
#[error("failed to load records: {source}")]
pub struct LoadFailure {
    #[source]
    pub source: RemoteError,
}

/// The candidate failed one or more validation rules.
///
/// Carries the submitted data so the form can be redisplayed as the user left it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failed: {errors}")]
pub struct ValidationFailure {
    pub errors: ValidationErrors,
    pub data: FormSnapshot,
}

/// The candidate was valid but the server did not confirm it.
#[derive(Debug, Error)]
#[error("failed to persist record: {source}")]
pub struct PersistenceFailure {
    pub data: FormSnapshot,
    #[source]
    pub source: RemoteError,
}

/// Terminal failure states of a create attempt.
#[derive(Debug, Error)]
pub enum CreateError {
    #[error(transparent)]
    Invalid(#[from] ValidationFailure),
    #[error(transparent)]
    Persist(#[from] PersistenceFailure),
}

impl CreateError {
    /// The data the user submitted.
    pub fn data(&self) -> &FormSnapshot {
        match self {
            Self::Invalid(failure) => &failure.data,
            Self::Persist(failure) => &failure.data,
        }
    }
}
