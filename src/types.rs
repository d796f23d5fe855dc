//! Common types used throughout the draft engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for participants within a draft session
pub type ParticipantId = String;

/// Unique identifier for draft sessions
pub type SessionId = Uuid;

/// Draw weight of a participant
pub type Tickets = u32;

/// A single participant as supplied by the data source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantEntry {
    pub id: ParticipantId,
    pub name: String,
    pub raw_score: f64,
}

/// A participant in the draw, together with its rating and weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    pub raw_score: f64,
    /// Externally supplied prior rating; `None` when unknown
    pub baseline_rating: Option<f64>,
    /// Rating derived from the raw score; `None` only when neither the
    /// anchors nor the baseline can produce one
    pub derived_rating: Option<f64>,
    /// Draw weight; recomputed whenever either rating changes
    pub weight: Option<Tickets>,
    /// Inclusion in the current draw pool
    pub active: bool,
    /// Wheel color hue in degrees
    pub hue: u16,
}

impl Participant {
    /// Create an active, not yet weighted participant
    pub fn new(id: impl Into<ParticipantId>, name: impl Into<String>, raw_score: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            raw_score,
            baseline_rating: None,
            derived_rating: None,
            weight: None,
            active: true,
            hue: 0,
        }
    }

    /// Set the baseline rating, mapping the "unknown" sentinels to `None`
    pub fn with_baseline_rating(mut self, rating: Option<f64>) -> Self {
        self.baseline_rating = rating.and_then(crate::utils::known_rating);
        self
    }

    /// Whether this participant can currently be placed on the wheel
    pub fn is_eligible(&self) -> bool {
        self.active && self.weight.is_some_and(|w| w > 0)
    }
}

impl From<ParticipantEntry> for Participant {
    fn from(entry: ParticipantEntry) -> Self {
        Participant::new(entry.id, entry.name, entry.raw_score)
    }
}

/// Two calibration points mapping a raw result to a rating
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingAnchors {
    pub rating_low: f64,
    pub result_low: f64,
    pub rating_high: f64,
    pub result_high: f64,
}

impl RatingAnchors {
    pub fn new(rating_low: f64, result_low: f64, rating_high: f64, result_high: f64) -> Self {
        Self {
            rating_low,
            result_low,
            rating_high,
            result_high,
        }
    }
}

/// A contiguous arc of the wheel owned by one participant.
/// The arc is half-open: `start_angle <= angle < end_angle`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub participant: Participant,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl Segment {
    /// Angular width of the segment in radians
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Whether the angle falls inside this segment
    pub fn contains(&self, angle: f64) -> bool {
        self.start_angle <= angle && angle < self.end_angle
    }
}

/// Phase of a draft session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DraftPhase {
    /// Wheel is built and waiting for a spin request
    Idle,
    /// A trajectory is in flight; new spin requests are ignored
    Spinning,
    /// Every participant has been drawn (terminal state)
    Complete,
}

impl std::fmt::Display for DraftPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DraftPhase::Idle => write!(f, "Idle"),
            DraftPhase::Spinning => write!(f, "Spinning"),
            DraftPhase::Complete => write!(f, "Complete"),
        }
    }
}

/// A completed draw, appended to the winners list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftPick {
    /// 1-based position in the draft order
    pub pick_number: usize,
    pub participant: Participant,
    pub tickets: Tickets,
    pub terminal_rotation: f64,
    /// Set when the resolver had to clamp to the last segment
    pub drift_recovered: bool,
    pub picked_at: DateTime<Utc>,
}
