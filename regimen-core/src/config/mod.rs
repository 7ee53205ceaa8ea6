//! Configuration types
//!
//! Host-agnostic settings; parsing them from files is the host's job.

pub mod settings;

pub use settings::*;
