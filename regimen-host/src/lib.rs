//! Host integration for the training program flow control
//!
//! Glue between a host application and `regimen-core`:
//!
//! - Monotonic clock backed by `std::time::Instant`
//! - Settings loaded from TOML
//! - Channel-backed event notifier
//! - Bridge translating host pause/frame callbacks into flow control calls

#![deny(unsafe_code)]

pub mod bridge;
pub mod channels;
pub mod clock;
pub mod settings;

pub use bridge::HostBridge;
pub use channels::ChannelNotifier;
pub use clock::MonotonicClock;
pub use settings::{load_settings, parse_settings, SettingsError};
