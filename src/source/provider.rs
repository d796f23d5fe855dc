//! Participant source trait and implementations

use crate::error::{DraftError, Result};
use crate::types::{Participant, ParticipantEntry, RatingAnchors};
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::{info, warn};

/// Trait for the external collaborator supplying round data
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ParticipantSource: Send + Sync {
    /// Participants who finished the round, with their raw scores
    async fn fetch_entries(&self) -> Result<Vec<ParticipantEntry>>;

    /// Rating anchors for the round's course, if known
    async fn fetch_anchors(&self) -> Result<Option<RatingAnchors>>;

    /// Prior ratings keyed by exact participant name
    async fn fetch_baseline_ratings(&self) -> Result<HashMap<String, f64>>;
}

/// Everything needed to build a draft session
#[derive(Debug, Clone, PartialEq)]
pub struct DraftInputs {
    pub participants: Vec<Participant>,
    pub anchors: Option<RatingAnchors>,
}

/// Fetch entries, anchors and prior ratings and join them by name.
///
/// Only a failure to fetch entries is fatal. Missing anchors or ratings
/// degrade to the baseline fallback and the neutral ticket count.
pub async fn load_draft_inputs(source: &dyn ParticipantSource) -> Result<DraftInputs> {
    let entries = source
        .fetch_entries()
        .await
        .map_err(|e| DraftError::SourceError {
            message: format!("Failed to fetch round results: {}", e),
        })?;

    let anchors = match source.fetch_anchors().await {
        Ok(anchors) => anchors,
        Err(e) => {
            warn!("Failed to fetch rating anchors, using prior ratings instead: {}", e);
            None
        }
    };

    let ratings = match source.fetch_baseline_ratings().await {
        Ok(ratings) => ratings,
        Err(e) => {
            warn!("Failed to fetch prior ratings, treating all as unknown: {}", e);
            HashMap::new()
        }
    };

    let participants: Vec<Participant> = entries
        .into_iter()
        .map(|entry| {
            let baseline = ratings.get(&entry.name).copied();
            Participant::from(entry).with_baseline_rating(baseline)
        })
        .collect();

    let rated = participants
        .iter()
        .filter(|p| p.baseline_rating.is_some())
        .count();
    info!(
        "Loaded {} participants ({} with prior ratings), anchors: {}",
        participants.len(),
        rated,
        if anchors.is_some() { "found" } else { "missing" }
    );

    Ok(DraftInputs {
        participants,
        anchors,
    })
}

/// In-memory participant source
#[derive(Debug, Clone, Default)]
pub struct StaticParticipantSource {
    entries: Vec<ParticipantEntry>,
    anchors: Option<RatingAnchors>,
    ratings: HashMap<String, f64>,
}

impl StaticParticipantSource {
    /// Create a source with the given round entries
    pub fn new(entries: Vec<ParticipantEntry>) -> Self {
        Self {
            entries,
            ..Self::default()
        }
    }

    pub fn with_anchors(mut self, anchors: RatingAnchors) -> Self {
        self.anchors = Some(anchors);
        self
    }

    pub fn with_baseline_rating(mut self, name: impl Into<String>, rating: f64) -> Self {
        self.ratings.insert(name.into(), rating);
        self
    }
}

#[async_trait]
impl ParticipantSource for StaticParticipantSource {
    async fn fetch_entries(&self) -> Result<Vec<ParticipantEntry>> {
        Ok(self.entries.clone())
    }

    async fn fetch_anchors(&self) -> Result<Option<RatingAnchors>> {
        Ok(self.anchors)
    }

    async fn fetch_baseline_ratings(&self) -> Result<HashMap<String, f64>> {
        Ok(self.ratings.clone())
    }
}
