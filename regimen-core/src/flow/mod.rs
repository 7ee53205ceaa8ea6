//! Training program flow control
//!
//! Drives the selected program through its steps and publishes read-only
//! snapshots of its progress.

pub mod control;
pub mod snapshot;
pub mod timing;

pub use control::FlowControl;
pub use snapshot::{ExecutionSnapshot, FlowSnapshot, ProgramListing};
pub use timing::StepTable;
