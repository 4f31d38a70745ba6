use async_trait::async_trait;
use parking_lot::Mutex;
use roster_core::{RemoteError, RemoteResource};
use roster_protocol::Record;
use std::collections::VecDeque;

/// Scripted remote resource that records every call.
///
/// Queued responses are consumed in order. Once a queue is empty, `fetch_all`
/// returns an empty list and `persist` echoes the submitted record.
#[derive(Default)]
pub struct StubRemote {
    fetch_responses: Mutex<VecDeque<Result<Vec<Record>, RemoteError>>>,
    persist_responses: Mutex<VecDeque<Result<Record, RemoteError>>>,
    fetch_calls: Mutex<usize>,
    persisted: Mutex<Vec<Record>>,
}

impl StubRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fetch(mut self, response: Result<Vec<Record>, RemoteError>) -> Self {
        self.fetch_responses.get_mut().push_back(response);
        self
    }

    pub fn with_persist(mut self, response: Result<Record, RemoteError>) -> Self {
        self.persist_responses.get_mut().push_back(response);
        self
    }

    pub fn fetch_calls(&self) -> usize {
        *self.fetch_calls.lock()
    }

    /// Number of persistence attempts, successful or not.
    pub fn persist_calls(&self) -> usize {
        self.persisted.lock().len()
    }

    /// Records sent to `persist`, in call order.
    pub fn persisted(&self) -> Vec<Record> {
        self.persisted.lock().clone()
    }
}

#[async_trait]
impl RemoteResource for StubRemote {
    async fn fetch_all(&self) -> Result<Vec<Record>, RemoteError> {
        *self.fetch_calls.lock() += 1;
        self.fetch_responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn persist(&self, record: &Record) -> Result<Record, RemoteError> {
        self.persisted.lock().push(record.clone());
        self.persist_responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(record.clone()))
    }
}

/// Remote resource whose every call fails with a 500 status.
#[derive(Debug, Default, Clone)]
pub struct FailingRemote;

impl FailingRemote {
    pub fn error() -> RemoteError {
        RemoteError::Status {
            status: 500,
            body: "internal error".to_string(),
        }
    }
}

#[async_trait]
impl RemoteResource for FailingRemote {
    async fn fetch_all(&self) -> Result<Vec<Record>, RemoteError> {
        Err(Self::error())
    }

    async fn persist(&self, _record: &Record) -> Result<Record, RemoteError> {
        Err(Self::error())
    }
}
