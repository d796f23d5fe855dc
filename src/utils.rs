//! Utility functions for the draft engine

use chrono::{DateTime, Utc};
use std::f64::consts::TAU;
use uuid::Uuid;

/// Generate a new unique draft session ID
pub fn generate_session_id() -> Uuid {
    Uuid::new_v4()
}

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Map a rating from an external source to `Some` only when it is usable.
/// Zero is the "no rating on record" sentinel used by rating services.
pub fn known_rating(rating: f64) -> Option<f64> {
    if rating.is_finite() && rating != 0.0 {
        Some(rating)
    } else {
        None
    }
}

/// Normalize an angle into `[0, 2π)`
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_generate_unique_ids() {
        let id1 = generate_session_id();
        let id2 = generate_session_id();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_known_rating() {
        assert_eq!(known_rating(912.0), Some(912.0));
        assert_eq!(known_rating(0.0), None);
        assert_eq!(known_rating(f64::NAN), None);
        assert_eq!(known_rating(f64::INFINITY), None);
    }

    #[test]
    fn test_normalize_angle() {
        assert!((normalize_angle(-0.5 * PI) - 1.5 * PI).abs() < 1e-12);
        assert!((normalize_angle(5.0 * TAU + 1.0) - 1.0).abs() < 1e-9);
        assert_eq!(normalize_angle(TAU), 0.0);
        assert_eq!(normalize_angle(-1e-300), 0.0);
        assert_eq!(normalize_angle(0.0), 0.0);
    }
}
