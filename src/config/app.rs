//! Main application configuration
//!
//! This module defines the primary configuration structures for the ticket-wheel
//! draft engine, including environment variable and TOML file loading and validation.

use crate::config::rating::TicketConfig;
use crate::config::spin::SpinConfig;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub spin: SpinConfig,
    pub tickets: TicketConfig,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "ticket-wheel".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file; environment variables still override it
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            self.service.log_level = log_level;
        }

        // Spin settings
        if let Ok(turns) = env::var("SPIN_BASE_TURNS") {
            self.spin.base_turns = turns
                .parse()
                .map_err(|_| anyhow!("Invalid SPIN_BASE_TURNS value: {}", turns))?;
        }
        if let Ok(duration) = env::var("SPIN_DURATION_MS") {
            self.spin.duration_ms = duration
                .parse()
                .map_err(|_| anyhow!("Invalid SPIN_DURATION_MS value: {}", duration))?;
        }
        if let Ok(interval) = env::var("SPIN_FRAME_INTERVAL_MS") {
            self.spin.frame_interval_ms = interval
                .parse()
                .map_err(|_| anyhow!("Invalid SPIN_FRAME_INTERVAL_MS value: {}", interval))?;
        }
        if let Ok(pause) = env::var("SPIN_REVEAL_PAUSE_MS") {
            self.spin.reveal_pause_ms = pause
                .parse()
                .map_err(|_| anyhow!("Invalid SPIN_REVEAL_PAUSE_MS value: {}", pause))?;
        }

        // Ticket settings
        if let Ok(baseline) = env::var("TICKETS_BASELINE") {
            self.tickets.baseline = baseline
                .parse()
                .map_err(|_| anyhow!("Invalid TICKETS_BASELINE value: {}", baseline))?;
        }
        if let Ok(ceiling) = env::var("TICKETS_CEILING") {
            self.tickets.ceiling = ceiling
                .parse()
                .map_err(|_| anyhow!("Invalid TICKETS_CEILING value: {}", ceiling))?;
        }
        if let Ok(floor) = env::var("TICKETS_FLOOR") {
            self.tickets.floor = floor
                .parse()
                .map_err(|_| anyhow!("Invalid TICKETS_FLOOR value: {}", floor))?;
        }
        if let Ok(saturation) = env::var("TICKETS_SATURATION") {
            self.tickets.saturation = saturation
                .parse()
                .map_err(|_| anyhow!("Invalid TICKETS_SATURATION value: {}", saturation))?;
        }

        Ok(())
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.name.is_empty() {
        return Err(anyhow!("Service name cannot be empty"));
    }

    config.spin.validate()?;
    config.tickets.validate()?;

    Ok(())
}
