//! Shared data types for Roster records, form snapshots, and validation results.

mod record;
mod snapshot;
mod validation;

pub use record::{Record, RecordId};
pub use snapshot::FormSnapshot;
pub use validation::ValidationErrors;

/// Field holding a record's display name.
pub const FIELD_NAME: &str = "name";
/// Field holding a record's email address.
pub const FIELD_EMAIL: &str = "email";
