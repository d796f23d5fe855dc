//! Ticket weighting
//!
//! Converts the differential between a round's derived rating and the
//! participant's prior rating into draw tickets. With the default schedule:
//!
//! | differential        | tickets                    |
//! |---------------------|----------------------------|
//! | `>= +100`           | 100                        |
//! | `0 < diff < 100`    | `round(50 + diff * 0.5)`   |
//! | `-100 < diff <= 0`  | `round(50 + diff * 0.25)`  |
//! | `<= -100`           | 25                         |
//!
//! The ramp is steeper above zero than below it.

use crate::config::TicketConfig;
use crate::error::Result;
use crate::types::Tickets;

/// Pure mapping from rating differential to tickets
#[derive(Debug, Clone)]
pub struct TicketWeigher {
    config: TicketConfig,
    reward_slope: f64,
    penalty_slope: f64,
}

impl TicketWeigher {
    /// Create a weigher from a validated schedule
    pub fn new(config: TicketConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            reward_slope: config.reward_slope(),
            penalty_slope: config.penalty_slope(),
            config,
        })
    }

    /// Tickets for a derived rating measured against the prior rating.
    /// An unknown prior counts as no differential.
    pub fn weigh(&self, derived_rating: f64, baseline_rating: Option<f64>) -> Tickets {
        let reference = baseline_rating.unwrap_or(derived_rating);
        self.weigh_differential(derived_rating - reference)
    }

    /// Tickets for a raw rating differential
    pub fn weigh_differential(&self, diff: f64) -> Tickets {
        let config = &self.config;
        if !diff.is_finite() {
            return config.baseline;
        }

        if diff >= config.saturation {
            return config.ceiling;
        }
        if diff <= -config.saturation {
            return config.floor;
        }

        let slope = if diff > 0.0 {
            self.reward_slope
        } else {
            self.penalty_slope
        };
        let tickets = f64::from(config.baseline) + diff * slope;

        (tickets.round() as Tickets).clamp(config.floor, config.ceiling)
    }
}

impl Default for TicketWeigher {
    fn default() -> Self {
        let config = TicketConfig::default();
        Self {
            reward_slope: config.reward_slope(),
            penalty_slope: config.penalty_slope(),
            config,
        }
    }
}
