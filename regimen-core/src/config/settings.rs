//! Flow control settings

use core::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default finish banner time (seconds)
pub const DEFAULT_FINISH_BANNER_S: u16 = 5;

/// Behaviour switches for the flow control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct FlowSettings {
    /// Ask the host to load each step's game mode when it activates
    pub switch_game_mode: bool,
    /// Pause the program while the host is paused
    pub follow_host_pause: bool,
    /// How long a finished program stays "recently finished" (seconds)
    pub finish_banner_s: u16,
}

impl FlowSettings {
    /// Finish banner time as a duration
    pub fn finish_banner(&self) -> Duration {
        Duration::from_secs(u64::from(self.finish_banner_s))
    }
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            switch_game_mode: true,
            follow_host_pause: true,
            finish_banner_s: DEFAULT_FINISH_BANNER_S,
        }
    }
}
