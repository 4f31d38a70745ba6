//! Test helpers shared across Roster crates.

pub mod remote;

pub use remote::{FailingRemote, StubRemote};
