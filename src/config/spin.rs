//! Spin animation configuration

use crate::error::{DraftError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timing and shape of a single spin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinConfig {
    /// Minimum number of full turns before the random offset
    pub base_turns: u32,
    /// Real-time length of the eased trajectory
    pub duration_ms: u64,
    /// Delay between rendered frames
    pub frame_interval_ms: u64,
    /// Pause after a winner is announced before the next spin is offered
    pub reveal_pause_ms: u64,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            base_turns: 5,
            duration_ms: 5000,
            frame_interval_ms: 16,
            reveal_pause_ms: 2000,
        }
    }
}

impl SpinConfig {
    /// Configuration that resolves every spin without animating it
    pub fn instant() -> Self {
        Self {
            duration_ms: 0,
            reveal_pause_ms: 0,
            ..Self::default()
        }
    }

    /// Get spin duration as Duration
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    /// Get frame interval as Duration
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    /// Get reveal pause as Duration
    pub fn reveal_pause(&self) -> Duration {
        Duration::from_millis(self.reveal_pause_ms)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.base_turns == 0 {
            return Err(DraftError::ConfigurationError {
                message: "Spin base turns must be greater than 0".to_string(),
            }
            .into());
        }

        if self.frame_interval_ms == 0 {
            return Err(DraftError::ConfigurationError {
                message: "Frame interval must be greater than 0".to_string(),
            }
            .into());
        }

        Ok(())
    }
}
