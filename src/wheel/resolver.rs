//! Winner resolution from a terminal wheel rotation
//!
//! The pointer sits at `3π/2` (top of the wheel) in the unrotated frame. The
//! wheel turns underneath it, so the arc under the pointer after a rotation
//! `r` is the one containing `(3π/2 - r) mod 2π`.

use crate::error::{DraftError, Result};
use crate::types::{Participant, Segment};
use crate::utils::normalize_angle;
use std::f64::consts::PI;
use tracing::warn;

/// Fixed pointer position in the unrotated frame
pub const POINTER_ANGLE: f64 = 1.5 * PI;

/// Angle of the unrotated wheel that sits under the pointer, in `[0, 2π)`
pub fn effective_angle(rotation: f64) -> f64 {
    normalize_angle(POINTER_ANGLE - rotation)
}

/// Index of the unique segment with `start_angle <= angle < end_angle`
pub fn find_segment(segments: &[Segment], angle: f64) -> Result<usize> {
    segments
        .iter()
        .position(|segment| segment.contains(angle))
        .ok_or_else(|| DraftError::NoSegmentMatched { angle }.into())
}

/// Outcome of resolving a terminal rotation
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution<'a> {
    pub index: usize,
    pub segment: &'a Segment,
    pub effective_angle: f64,
    /// The angle matched no segment and the last segment was taken instead
    pub drift_recovered: bool,
}

impl Resolution<'_> {
    pub fn participant(&self) -> &Participant {
        &self.segment.participant
    }
}

/// Resolve the winning segment for a terminal rotation.
///
/// An unmatched angle can only come from numerical drift in the partition; it
/// is logged and resolved to the last segment rather than failing the spin.
pub fn resolve_winner(segments: &[Segment], terminal_rotation: f64) -> Result<Resolution<'_>> {
    let Some(last) = segments.len().checked_sub(1) else {
        return Err(DraftError::EmptyPopulation.into());
    };

    let angle = effective_angle(terminal_rotation);
    let (index, drift_recovered) = match find_segment(segments, angle) {
        Ok(index) => (index, false),
        Err(e) => {
            warn!(
                "{} (rotation {}), clamping to last segment '{}'",
                e, terminal_rotation, segments[last].participant.name
            );
            (last, true)
        }
    };

    Ok(Resolution {
        index,
        segment: &segments[index],
        effective_angle: angle,
        drift_recovered,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wheel::partition::partition;
    use proptest::prelude::*;
    use std::f64::consts::TAU;

    fn weighted(id: &str, weight: u32) -> Participant {
        let mut participant = Participant::new(id, id, 0.0);
        participant.weight = Some(weight);
        participant
    }

    fn reference_wheel() -> Vec<Segment> {
        partition(&[weighted("a", 50), weighted("b", 25), weighted("c", 25)]).unwrap()
    }

    #[test]
    fn test_zero_rotation_picks_segment_under_pointer() {
        let segments = reference_wheel();
        let resolution = resolve_winner(&segments, 0.0).unwrap();

        assert_eq!(resolution.participant().id, "c");
        assert_eq!(resolution.index, 2);
        assert!(!resolution.drift_recovered);
        assert!((resolution.effective_angle - 1.5 * PI).abs() < 1e-12);
    }

    #[test]
    fn test_rotation_moves_wheel_under_pointer() {
        let segments = reference_wheel();

        // A quarter turn puts the first arc under the pointer
        assert_eq!(resolve_winner(&segments, 0.5 * PI + 0.1).unwrap().participant().id, "a");
        assert_eq!(resolve_winner(&segments, 0.1).unwrap().participant().id, "b");
        // Full turns do not change the outcome
        assert_eq!(resolve_winner(&segments, 5.0 * TAU + 0.1).unwrap().participant().id, "b");
    }

    #[test]
    fn test_boundary_belongs_to_segment_starting_there() {
        let segments = reference_wheel();

        assert_eq!(find_segment(&segments, 0.0).unwrap(), 0);
        assert_eq!(find_segment(&segments, segments[1].start_angle).unwrap(), 1);
        assert_eq!(find_segment(&segments, segments[2].start_angle).unwrap(), 2);
        assert_eq!(find_segment(&segments, TAU - 1e-12).unwrap(), 2);
    }

    #[test]
    fn test_unmatched_angle_reports_error() {
        let segments = reference_wheel();
        let err = find_segment(&segments, TAU).unwrap_err();
        assert!(matches!(
            DraftError::from_anyhow(&err),
            Some(DraftError::NoSegmentMatched { .. })
        ));
    }

    #[test]
    fn test_drift_clamps_to_last_segment() {
        // A partition whose seam stops short of a full turn
        let mut segments = reference_wheel();
        segments[2].end_angle = TAU - 0.2;

        // Rotation placing the pointer inside the gap
        let rotation = POINTER_ANGLE - (TAU - 0.1);
        let resolution = resolve_winner(&segments, rotation).unwrap();

        assert!(resolution.drift_recovered);
        assert_eq!(resolution.index, 2);
        assert_eq!(resolution.participant().id, "c");
    }

    #[test]
    fn test_empty_wheel_rejected() {
        let err = resolve_winner(&[], 0.0).unwrap_err();
        assert_eq!(
            DraftError::from_anyhow(&err),
            Some(&DraftError::EmptyPopulation)
        );
    }

    #[test]
    fn test_effective_angle_is_normalized() {
        for rotation in [0.0, 1.0, -3.0, 1e6, POINTER_ANGLE, 7.0 * TAU] {
            let angle = effective_angle(rotation);
            assert!((0.0..TAU).contains(&angle), "rotation {} -> {}", rotation, angle);
        }
        assert_eq!(effective_angle(POINTER_ANGLE), 0.0);
    }

    proptest! {
        #[test]
        fn prop_every_angle_matches_exactly_one_segment(
            weights in prop::collection::vec(1u32..=100, 1..30),
            angle in 0.0f64..TAU,
        ) {
            let population: Vec<_> = weights
                .iter()
                .enumerate()
                .map(|(i, w)| weighted(&i.to_string(), *w))
                .collect();
            let segments = partition(&population).unwrap();

            let matches = segments.iter().filter(|s| s.contains(angle)).count();
            prop_assert_eq!(matches, 1);
        }

        #[test]
        fn prop_resolution_never_drifts_on_partitioned_wheel(
            weights in prop::collection::vec(1u32..=100, 1..30),
            rotation in -100.0f64..100.0,
        ) {
            let population: Vec<_> = weights
                .iter()
                .enumerate()
                .map(|(i, w)| weighted(&i.to_string(), *w))
                .collect();
            let segments = partition(&population).unwrap();

            let resolution = resolve_winner(&segments, rotation).unwrap();
            prop_assert!(!resolution.drift_recovered);
        }
    }
}
