//! Participant and rating data sources
//!
//! This module defines the interface for obtaining round results, rating
//! anchors and prior ratings, along with an in-memory implementation and a
//! reader for JSON exports from the Disc Golf Metrix rating service.

pub mod metrix;
pub mod provider;

// Re-export commonly used types
pub use metrix::MetrixExportSource;
pub use provider::{load_draft_inputs, DraftInputs, ParticipantSource, StaticParticipantSource};
