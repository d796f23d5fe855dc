//! Segment partitioning

use crate::error::{DraftError, Result};
use crate::types::{Participant, Segment};
use std::f64::consts::TAU;

/// Split a full turn into contiguous arcs proportional to each participant's
/// tickets, in the order the participants are given.
///
/// The final arc always ends at exactly `2π`, so accumulated rounding never
/// leaves a gap at the seam.
pub fn partition(population: &[Participant]) -> Result<Vec<Segment>> {
    if population.is_empty() {
        return Err(DraftError::EmptyPopulation.into());
    }

    let mut total: u64 = 0;
    for participant in population {
        match participant.weight {
            Some(weight) if weight > 0 => total += u64::from(weight),
            _ => {
                return Err(DraftError::InvalidWeight {
                    participant_id: participant.id.clone(),
                }
                .into())
            }
        }
    }

    let last = population.len() - 1;
    let mut offset = 0.0;
    let segments = population
        .iter()
        .enumerate()
        .map(|(index, participant)| {
            let weight = participant.weight.unwrap_or_default();
            let span = TAU * (f64::from(weight) / total as f64);
            let start_angle = offset;
            let end_angle = if index == last { TAU } else { offset + span };
            offset = end_angle;

            Segment {
                participant: participant.clone(),
                start_angle,
                end_angle,
            }
        })
        .collect();

    Ok(segments)
}
