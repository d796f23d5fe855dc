//! Draft session state machine
//!
//! A `DraftSession` owns the remaining pool, the accumulated wheel rotation
//! and the ordered winners list. All mutation goes through the transition
//! methods below:
//!
//! ```text
//! Idle --request_spin--> Spinning --complete_spin--> Idle      (pool not empty)
//!                                                 \-> Complete (pool empty)
//! ```
//!
//! `complete_spin` performs the await-next-or-done step in one go: the
//! winner moves from the pool to the winners list, the wheel is rebuilt from
//! what remains, and the session lands in `Idle` or `Complete`.

use crate::config::SpinConfig;
use crate::error::{DraftError, Result};
use crate::rating::{rescore_participant, RatingNormalizer, TicketWeigher};
use crate::types::{DraftPhase, DraftPick, Participant, ParticipantId, Segment, SessionId};
use crate::utils::{current_timestamp, generate_session_id, known_rating};
use crate::wheel::{partition, resolve_winner, SpinTrajectory};
use rand::Rng;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info};

/// Outcome of a spin request
#[derive(Debug, Clone, PartialEq)]
pub enum SpinRequest {
    /// A new trajectory is in flight
    Started(SpinTrajectory),
    /// A spin was already running; the request was ignored
    AlreadySpinning,
}

/// One draft from a full pool down to an empty one
#[derive(Debug, Clone)]
pub struct DraftSession {
    id: SessionId,
    normalizer: RatingNormalizer,
    weigher: TicketWeigher,
    spin_config: SpinConfig,
    pool: Vec<Participant>,
    winners: Vec<DraftPick>,
    rotation: f64,
    segments: Vec<Segment>,
    phase: DraftPhase,
    in_flight: Option<SpinTrajectory>,
}

impl DraftSession {
    /// Build a session, weighting every participant and laying out the wheel
    pub fn new(
        participants: Vec<Participant>,
        normalizer: RatingNormalizer,
        weigher: TicketWeigher,
        spin_config: SpinConfig,
    ) -> Result<Self> {
        spin_config.validate()?;

        if participants.is_empty() {
            return Err(DraftError::EmptyPopulation.into());
        }

        {
            let mut seen = HashSet::new();
            for participant in &participants {
                if !seen.insert(participant.id.as_str()) {
                    return Err(DraftError::DuplicateParticipant {
                        participant_id: participant.id.clone(),
                    }
                    .into());
                }
            }
        }

        let mut pool = participants;
        for participant in &mut pool {
            rescore_participant(participant, &normalizer, &weigher);
        }

        let mut session = Self {
            id: generate_session_id(),
            normalizer,
            weigher,
            spin_config,
            pool,
            winners: Vec::new(),
            rotation: 0.0,
            segments: Vec::new(),
            phase: DraftPhase::Idle,
            in_flight: None,
        };
        session.rebuild_segments()?;

        info!(
            "Created draft session {} - participants: {}, eligible: {}, anchors valid: {}",
            session.id,
            session.pool.len(),
            session.segments.len(),
            session.normalizer.has_valid_anchors()
        );

        Ok(session)
    }

    /// Give every participant in the pool a wheel hue
    pub fn assign_hues<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
        self.ensure_not_spinning()?;
        for participant in &mut self.pool {
            participant.hue = rng.gen_range(0..360);
        }
        self.rebuild_segments()
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn phase(&self) -> DraftPhase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase == DraftPhase::Complete
    }

    /// Participants not yet drawn, in their original order
    pub fn pool(&self) -> &[Participant] {
        &self.pool
    }

    /// Winners in the order they were drawn
    pub fn winners(&self) -> &[DraftPick] {
        &self.winners
    }

    /// Current wheel layout; empty when nobody is eligible
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Accumulated rotation as of the last completed spin
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn in_flight(&self) -> Option<&SpinTrajectory> {
        self.in_flight.as_ref()
    }

    pub fn spin_config(&self) -> &SpinConfig {
        &self.spin_config
    }

    pub fn normalizer(&self) -> &RatingNormalizer {
        &self.normalizer
    }

    /// Number of pool members currently on the wheel
    pub fn eligible_count(&self) -> usize {
        self.segments.len()
    }

    /// Pool members left off the wheel: excluded, or without a weight
    pub fn unplaced(&self) -> Vec<&Participant> {
        self.pool.iter().filter(|p| !p.is_eligible()).collect()
    }

    /// Look up a pool member by exact name
    pub fn find_by_name(&self, name: &str) -> Option<&Participant> {
        self.pool.iter().find(|p| p.name == name)
    }

    /// Rotation to display `elapsed` time into the current spin
    pub fn displayed_rotation(&self, elapsed: Duration) -> f64 {
        self.in_flight
            .as_ref()
            .map_or(self.rotation, |trajectory| trajectory.rotation_at(elapsed))
    }

    /// Start a spin. A request while a spin is in flight is ignored.
    pub fn request_spin<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<SpinRequest> {
        match self.phase {
            DraftPhase::Spinning => {
                debug!("Spin requested while spinning, ignoring");
                return Ok(SpinRequest::AlreadySpinning);
            }
            DraftPhase::Complete => return Err(DraftError::EmptyPool.into()),
            DraftPhase::Idle => {}
        }

        if self.pool.is_empty() {
            return Err(DraftError::EmptyPool.into());
        }
        if self.segments.is_empty() {
            return Err(DraftError::EmptyPopulation.into());
        }

        let trajectory = SpinTrajectory::plan(self.rotation, &self.spin_config, rng);
        info!(
            "Spin {} started - {} on the wheel, terminal rotation {:.4}",
            self.winners.len() + 1,
            self.segments.len(),
            trajectory.terminal_rotation
        );

        self.in_flight = Some(trajectory.clone());
        self.phase = DraftPhase::Spinning;
        Ok(SpinRequest::Started(trajectory))
    }

    /// Finish the in-flight spin: resolve the winner from the terminal
    /// rotation, move it from the pool to the winners and rebuild the wheel.
    pub fn complete_spin(&mut self) -> Result<DraftPick> {
        let Some(trajectory) = self.in_flight.take() else {
            return Err(DraftError::NotSpinning.into());
        };

        let (winner_id, drift_recovered) =
            match resolve_winner(&self.segments, trajectory.terminal_rotation) {
                Ok(resolution) => (
                    resolution.participant().id.clone(),
                    resolution.drift_recovered,
                ),
                Err(e) => {
                    self.phase = DraftPhase::Idle;
                    return Err(e);
                }
            };

        let Some(position) = self.pool.iter().position(|p| p.id == winner_id) else {
            self.phase = DraftPhase::Idle;
            return Err(DraftError::ParticipantNotFound {
                participant_id: winner_id,
            }
            .into());
        };

        self.rotation = trajectory.terminal_rotation;
        let participant = self.pool.remove(position);
        let pick = DraftPick {
            pick_number: self.winners.len() + 1,
            tickets: participant.weight.unwrap_or_default(),
            participant,
            terminal_rotation: trajectory.terminal_rotation,
            drift_recovered,
            picked_at: current_timestamp(),
        };

        info!(
            "Pick {}: '{}' ({} tickets), {} remaining",
            pick.pick_number,
            pick.participant.name,
            pick.tickets,
            self.pool.len()
        );
        self.winners.push(pick.clone());

        self.rebuild_segments()?;
        self.phase = if self.pool.is_empty() {
            info!("Draft session {} complete", self.id);
            DraftPhase::Complete
        } else {
            DraftPhase::Idle
        };

        Ok(pick)
    }

    /// Correct a participant's baseline rating and re-weight only them
    pub fn set_baseline_rating(&mut self, participant_id: &str, rating: Option<f64>) -> Result<()> {
        self.ensure_not_spinning()?;

        let participant = self
            .pool
            .iter_mut()
            .find(|p| p.id == participant_id)
            .ok_or_else(|| DraftError::ParticipantNotFound {
                participant_id: participant_id.to_string(),
            })?;

        participant.baseline_rating = rating.and_then(known_rating);
        rescore_participant(participant, &self.normalizer, &self.weigher);
        info!(
            "Baseline rating for '{}' set to {:?} - tickets now {:?}",
            participant.name, participant.baseline_rating, participant.weight
        );

        self.rebuild_segments()
    }

    /// Include or exclude a participant from the wheel without touching
    /// their rating or weight
    pub fn set_active(&mut self, participant_id: &str, active: bool) -> Result<()> {
        self.ensure_not_spinning()?;

        let participant = self
            .pool
            .iter_mut()
            .find(|p| p.id == participant_id)
            .ok_or_else(|| DraftError::ParticipantNotFound {
                participant_id: participant_id.to_string(),
            })?;

        participant.active = active;
        info!("Participant '{}' active: {}", participant.name, active);

        self.rebuild_segments()
    }

    fn ensure_not_spinning(&self) -> Result<()> {
        if self.phase == DraftPhase::Spinning {
            return Err(DraftError::SpinInProgress.into());
        }
        Ok(())
    }

    fn rebuild_segments(&mut self) -> Result<()> {
        let eligible: Vec<Participant> = self
            .pool
            .iter()
            .filter(|p| p.is_eligible())
            .cloned()
            .collect();

        self.segments = if eligible.is_empty() {
            Vec::new()
        } else {
            partition(&eligible)?
        };

        debug!(
            "Wheel rebuilt with {} segments from a pool of {}",
            self.segments.len(),
            self.pool.len()
        );
        Ok(())
    }
}

/// Participant ids in the pool and among the winners, for membership checks
pub fn membership(session: &DraftSession) -> (Vec<ParticipantId>, Vec<ParticipantId>) {
    let pool = session.pool().iter().map(|p| p.id.clone()).collect();
    let winners = session
        .winners()
        .iter()
        .map(|pick| pick.participant.id.clone())
        .collect();
    (pool, winners)
}
