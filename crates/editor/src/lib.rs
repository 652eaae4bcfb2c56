// Library crate: the picking core, scene state and the headless harness.
// The `graph-ops` binary replays scripts against it.

pub mod command;
pub mod error;
pub mod fixtures;
pub mod harness;
pub mod state;
pub mod viewport;

pub use error::EditorError;
