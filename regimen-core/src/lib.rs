//! Host-agnostic core logic for timed training programs
//!
//! This crate contains everything that does not depend on a specific host
//! application:
//!
//! - Program and catalog data model
//! - Collaborator traits (clock, game mode switch, notifications)
//! - State machine for the program lifecycle
//! - Flow control with pause reconciliation and step timing
//! - Settings type definitions

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod config;
pub mod flow;
pub mod program;
pub mod state;
pub mod traits;

pub use config::FlowSettings;
pub use flow::{ExecutionSnapshot, FlowControl, FlowSnapshot};
pub use program::{Catalog, Completion, EntryKind, Program, ProgramEntry};
pub use state::{FlowEvent, FlowState};
pub use traits::{Clock, GameModeSwitch, Instant, ManualClock, ModeTarget, Notifier};
