//! Ticket Wheel - Weighted wheel draft engine
//!
//! This crate turns a round of scores into rating-derived lottery tickets,
//! lays the tickets out as a spinning wheel and draws participants one at a
//! time until every one of them has been placed in the draft order.

pub mod config;
pub mod draft;
pub mod error;
pub mod rating;
pub mod source;
pub mod types;
pub mod utils;
pub mod wheel;

// Re-export commonly used types and traits
pub use error::{DraftError, Result};
pub use types::*;

// Re-export key components
pub use draft::{DraftController, DraftSession, RenderSink, TracingRenderSink};
pub use rating::{RatingNormalizer, TicketWeigher};
pub use source::{load_draft_inputs, MetrixExportSource, ParticipantSource, StaticParticipantSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
