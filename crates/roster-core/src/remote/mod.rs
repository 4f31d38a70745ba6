//! Remote resource abstraction: the server-side source of truth for records.

mod http;

pub use http::HttpRemoteResource;

use crate::error::RemoteError;
use async_trait::async_trait;
use roster_protocol::Record;

/// Collection endpoint the store synchronizes against.
///
/// Implementations must treat any non-success response as an error rather than
/// a payload.
#[async_trait]
pub trait RemoteResource: Send + Sync {
    /// Fetch the full remote collection, in server order.
    async fn fetch_all(&self) -> Result<Vec<Record>, RemoteError>;

    /// Persist one record and return the server's representation of it,
    /// which may carry a server-assigned identifier.
    async fn persist(&self, record: &Record) -> Result<Record, RemoteError>;
}
