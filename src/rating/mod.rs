//! Rating normalization and ticket weighting
//!
//! This module turns a participant's raw round score into a comparable rating
//! and converts the gap between that rating and the participant's prior
//! rating into an integer number of draw tickets.

pub mod normalizer;
pub mod weigher;

// Re-export commonly used types
pub use normalizer::{normalize, RatingNormalizer};
pub use weigher::TicketWeigher;

use crate::error::DraftError;
use crate::types::Participant;
use tracing::debug;

/// Recompute the derived rating and weight of a single participant
pub fn rescore_participant(
    participant: &mut Participant,
    normalizer: &RatingNormalizer,
    weigher: &TicketWeigher,
) {
    if participant.baseline_rating.is_none() {
        // Recovered below: the weigher treats a missing prior as no differential
        let unknown = DraftError::UnknownRating {
            participant_id: participant.id.clone(),
        };
        debug!("{}", unknown);
    }

    participant.derived_rating =
        normalizer.derive_rating(participant.raw_score, participant.baseline_rating);
    participant.weight = participant
        .derived_rating
        .map(|derived| weigher.weigh(derived, participant.baseline_rating));

    match participant.weight {
        Some(tickets) => debug!(
            "Weighted '{}' - derived: {:?}, baseline: {:?}, tickets: {}",
            participant.name, participant.derived_rating, participant.baseline_rating, tickets
        ),
        None => debug!(
            "Participant '{}' has no rating yet and is excluded from weighting",
            participant.name
        ),
    }
}
