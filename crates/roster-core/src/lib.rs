//! Core record synchronization for Roster.
//!
//! This crate owns the record lifecycle: form serialization, validation, the
//! authoritative in-memory collection and its remote resource, and the pure
//! mapping from state to list and form views.

pub mod app;
pub mod error;
pub mod form;
pub mod remote;
pub mod store;
pub mod validate;
pub mod view;

pub use app::{InitReport, RecordApp, SubmitOutcome};
pub use error::{CreateError, LoadFailure, PersistenceFailure, RemoteError, ValidationFailure};
pub use form::{FormElement, FormLike, serialize};
pub use remote::{HttpRemoteResource, RemoteResource};
pub use store::RecordStore;
pub use validate::{FieldSource, RecordValidator, RequiredField, ValidationRule};
pub use view::{FormFieldView, FormView, ListItem, ListView, ViewRenderer, render_page};
