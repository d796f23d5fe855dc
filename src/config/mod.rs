//! Configuration management for the ticket-wheel draft engine
//!
//! This module handles configuration loading from environment variables and
//! TOML files, validation, and default values for spins and ticket weighting.

pub mod app;
pub mod rating;
pub mod spin;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, ServiceSettings};
pub use rating::TicketConfig;
pub use spin::SpinConfig;
