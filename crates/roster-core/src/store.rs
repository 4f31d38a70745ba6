//! Authoritative in-memory record collection.
//!
//! The store is the only writer of the collection. It holds one invariant:
//! every record in it came verbatim from the remote resource, either from a
//! full load or as the confirmed result of a create. A candidate that fails
//! validation or persistence never enters.

use crate::error::{CreateError, LoadFailure, PersistenceFailure, ValidationFailure};
use crate::remote::RemoteResource;
use crate::validate::RecordValidator;
use log::{debug, error, info};
use roster_protocol::{FormSnapshot, Record};
use std::sync::Arc;

/// Owner of the record collection and mediator of every remote call.
///
/// Mutating operations take `&mut self`, so no other mutation can interleave
/// while a remote call is in flight.
pub struct RecordStore {
    remote: Arc<dyn RemoteResource>,
    validator: RecordValidator,
    form_fields: Vec<String>,
    records: Vec<Record>,
}

impl RecordStore {
    /// Create an empty store backed by `remote`.
    pub fn new(remote: Arc<dyn RemoteResource>, validator: RecordValidator) -> Self {
        Self {
            remote,
            validator,
            form_fields: Vec::new(),
            records: Vec::new(),
        }
    }

    /// Form fields sent along with `name` and `email` when a record is created.
    pub fn with_form_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.form_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Current collection: server order after a load, newest first after creates.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop every record, returning the store to its initial state.
    pub fn reset(&mut self) {
        debug!("record store reset (dropped={})", self.records.len());
        self.records.clear();
    }

    /// Replace the collection with the server's full set.
    ///
    /// Each call replaces rather than merges. On failure the collection is
    /// left as it was.
    pub async fn load_all(&mut self) -> Result<&[Record], LoadFailure> {
        let records = self
            .remote
            .fetch_all()
            .await
            .map_err(|source| LoadFailure { source })?;
        info!(
            "records loaded (count={}, replaced={})",
            records.len(),
            self.records.len()
        );
        self.records = records;
        Ok(&self.records)
    }

    /// Validate, persist, and on confirmation prepend a new record.
    ///
    /// Invalid candidates return before any remote call. A persistence failure
    /// leaves the collection untouched. The returned record is the server's
    /// version, including any identifier it assigned.
    pub async fn create(&mut self, candidate: FormSnapshot) -> Result<Record, CreateError> {
        let errors = self.validator.validate(&candidate);
        if !errors.is_empty() {
            debug!("create rejected by validation (fields={})", errors.len());
            return Err(ValidationFailure {
                errors,
                data: candidate,
            }
            .into());
        }

        let record = Record::from_snapshot(&candidate)
            .with_fields_from(&candidate, self.form_fields.iter().map(String::as_str));
        let persisted = match self.remote.persist(&record).await {
            Ok(persisted) => persisted,
            Err(source) => {
                error!("create failed to persist: {source}");
                return Err(PersistenceFailure {
                    data: candidate,
                    source,
                }
                .into());
            }
        };

        info!(
            "record persisted (id={}, count={})",
            persisted
                .id
                .as_ref()
                .map_or_else(|| "none".to_string(), ToString::to_string),
            self.records.len() + 1
        );
        self.records.insert(0, persisted.clone());
        Ok(persisted)
    }
}

impl std::fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore")
            .field("validator", &self.validator)
            .field("form_fields", &self.form_fields)
            .field("records", &self.records.len())
            .finish_non_exhaustive()
    }
}
