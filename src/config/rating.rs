//! Ticket weighting configuration

use crate::error::{DraftError, Result};
use crate::types::Tickets;
use serde::{Deserialize, Serialize};

/// Shape of the piecewise-linear ticket schedule.
///
/// The ramp slopes are derived from the endpoints so the schedule stays
/// continuous at a zero differential and at both saturation points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TicketConfig {
    /// Tickets for a participant who rated exactly as expected
    pub baseline: Tickets,
    /// Tickets at or above `+saturation`
    pub ceiling: Tickets,
    /// Tickets at or below `-saturation`
    pub floor: Tickets,
    /// Rating differential at which the schedule saturates
    pub saturation: f64,
}

impl Default for TicketConfig {
    fn default() -> Self {
        Self {
            baseline: 50,
            ceiling: 100,
            floor: 25,
            saturation: 100.0,
        }
    }
}

impl TicketConfig {
    /// Tickets gained per rating point of overperformance
    pub fn reward_slope(&self) -> f64 {
        (f64::from(self.ceiling) - f64::from(self.baseline)) / self.saturation
    }

    /// Tickets lost per rating point of underperformance
    pub fn penalty_slope(&self) -> f64 {
        (f64::from(self.baseline) - f64::from(self.floor)) / self.saturation
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.floor == 0 {
            return Err(DraftError::ConfigurationError {
                message: "Ticket floor must be at least 1".to_string(),
            }
            .into());
        }

        if !(self.floor <= self.baseline && self.baseline <= self.ceiling) {
            return Err(DraftError::ConfigurationError {
                message: format!(
                    "Ticket schedule must satisfy floor <= baseline <= ceiling (got {} / {} / {})",
                    self.floor, self.baseline, self.ceiling
                ),
            }
            .into());
        }

        if !self.saturation.is_finite() || self.saturation <= 0.0 {
            return Err(DraftError::ConfigurationError {
                message: "Ticket saturation must be a positive number".to_string(),
            }
            .into());
        }

        Ok(())
    }
}
