//! Collaborator traits
//!
//! These traits define the interface between the flow control and the
//! host application it runs in.

pub mod clock;
pub mod mode;
pub mod notify;

pub use clock::{Clock, Instant, ManualClock};
pub use mode::{GameModeSwitch, ModeTarget};
pub use notify::Notifier;
