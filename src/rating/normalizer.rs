//! Two-point linear rating normalization
//!
//! A round's rating is interpolated from two calibration anchors
//! `(rating_low, result_low)` and `(rating_high, result_high)`:
//!
//! `rating = round((rating_high - rating_low) * (score - result_low) / (result_high - result_low) + rating_low)`
//!
//! Rounding uses `f64::round`, so exact halves round away from zero.

use crate::error::{DraftError, Result};
use crate::types::RatingAnchors;
use tracing::debug;

/// Check that anchors describe a usable linear map
pub fn validate_anchors(anchors: &RatingAnchors) -> Result<()> {
    let values = [
        anchors.rating_low,
        anchors.result_low,
        anchors.rating_high,
        anchors.result_high,
    ];
    if values.iter().any(|v| !v.is_finite()) {
        return Err(DraftError::InvalidAnchors {
            reason: format!("anchor values must be finite numbers: {:?}", anchors),
        }
        .into());
    }

    if anchors.result_high == anchors.result_low {
        return Err(DraftError::InvalidAnchors {
            reason: format!(
                "anchor results must differ (both are {})",
                anchors.result_low
            ),
        }
        .into());
    }

    Ok(())
}

/// Map a raw score to a rating through the anchors.
///
/// Fails with `InvalidAnchors` when the anchors are degenerate or the
/// score is not a finite number.
pub fn normalize(raw_score: f64, anchors: &RatingAnchors) -> Result<f64> {
    validate_anchors(anchors)?;

    if !raw_score.is_finite() {
        return Err(DraftError::InvalidAnchors {
            reason: format!("raw score {} cannot be interpolated", raw_score),
        }
        .into());
    }

    let rating = (anchors.rating_high - anchors.rating_low) * (raw_score - anchors.result_low)
        / (anchors.result_high - anchors.result_low)
        + anchors.rating_low;

    Ok(rating.round())
}

/// Normalizer bound to the anchors of one round
#[derive(Debug, Clone, Default)]
pub struct RatingNormalizer {
    anchors: Option<RatingAnchors>,
}

impl RatingNormalizer {
    /// Create a normalizer; missing anchors select the baseline fallback
    pub fn new(anchors: Option<RatingAnchors>) -> Self {
        if let Some(anchors) = &anchors {
            if let Err(e) = validate_anchors(anchors) {
                debug!("Anchors rejected, falling back to baseline ratings: {}", e);
            }
        }
        Self { anchors }
    }

    pub fn anchors(&self) -> Option<&RatingAnchors> {
        self.anchors.as_ref()
    }

    /// Whether the anchors can be used for interpolation
    pub fn has_valid_anchors(&self) -> bool {
        self.anchors
            .as_ref()
            .is_some_and(|anchors| validate_anchors(anchors).is_ok())
    }

    /// Derive a rating for a score, substituting the baseline when the
    /// anchors are unusable. Returns `None` when neither is available.
    pub fn derive_rating(&self, raw_score: f64, baseline: Option<f64>) -> Option<f64> {
        let Some(anchors) = &self.anchors else {
            return baseline;
        };

        match normalize(raw_score, anchors) {
            Ok(rating) => Some(rating),
            Err(e) => {
                debug!("Using baseline rating {:?} instead: {}", baseline, e);
                baseline
            }
        }
    }
}
