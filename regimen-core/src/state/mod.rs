//! State machine for program flow
//!
//! Defines the lifecycle of the selected program and the events it emits.
//! The state machine is explicit, finite, and deterministic.

pub mod events;
pub mod machine;

pub use events::FlowEvent;
pub use machine::{FlowState, Trigger};
