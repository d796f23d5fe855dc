//! Draft controller driving spins on an animation clock
//!
//! The controller owns a `DraftSession`, a random source and a rendering
//! sink. Each spin is rendered on a fixed frame tick as a pure function of
//! elapsed time and always runs to its full duration before the winner is
//! resolved. Session state changes only when a spin starts and completes.

use crate::draft::session::{DraftSession, SpinRequest};
use crate::draft::sink::RenderSink;
use crate::error::{DraftError, Result};
use crate::types::DraftPick;
use rand::Rng;
use std::sync::Arc;
use tokio::time::{interval, sleep, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Statistics about controller operations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftStats {
    /// Total number of spins started
    pub spins_started: u64,
    /// Total number of spins that produced a winner
    pub spins_completed: u64,
    /// Total number of frames pushed to the sink
    pub frames_rendered: u64,
    /// Spins whose winner needed the last-segment clamp
    pub drift_recoveries: u64,
    /// Sink calls that returned an error
    pub sink_failures: u64,
}

/// Orchestrates repeated spins until the pool is exhausted
pub struct DraftController<R> {
    session: DraftSession,
    sink: Arc<dyn RenderSink>,
    rng: R,
    stats: DraftStats,
}

impl<R: Rng + Send> DraftController<R> {
    /// Create a controller for a session
    pub fn new(session: DraftSession, sink: Arc<dyn RenderSink>, rng: R) -> Self {
        Self {
            session,
            sink,
            rng,
            stats: DraftStats::default(),
        }
    }

    pub fn session(&self) -> &DraftSession {
        &self.session
    }

    /// Mutable access for manual overrides between spins
    pub fn session_mut(&mut self) -> &mut DraftSession {
        &mut self.session
    }

    pub fn stats(&self) -> &DraftStats {
        &self.stats
    }

    pub fn into_session(self) -> DraftSession {
        self.session
    }

    /// Run one spin to completion and return its winner
    pub async fn spin(&mut self) -> Result<DraftPick> {
        let trajectory = match self.session.request_spin(&mut self.rng)? {
            SpinRequest::Started(trajectory) => {
                self.stats.spins_started += 1;
                trajectory
            }
            SpinRequest::AlreadySpinning => self
                .session
                .in_flight()
                .cloned()
                .ok_or(DraftError::NotSpinning)?,
        };

        let spin_config = self.session.spin_config().clone();
        let started = Instant::now();
        let mut ticker = interval(spin_config.frame_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            let elapsed = started.elapsed();
            let rotation = trajectory.rotation_at(elapsed);
            self.render_frame(rotation).await;

            if trajectory.is_complete(elapsed) {
                break;
            }
        }

        let pick = self.session.complete_spin()?;
        self.stats.spins_completed += 1;
        if pick.drift_recovered {
            self.stats.drift_recoveries += 1;
        }

        if let Err(e) = self.sink.announce_winner(&pick).await {
            warn!("Failed to announce winner '{}': {}", pick.participant.name, e);
            self.stats.sink_failures += 1;
        }

        if !spin_config.reveal_pause().is_zero() {
            sleep(spin_config.reveal_pause()).await;
        }

        if self.session.eligible_count() == 0 {
            if let Err(e) = self.sink.draft_complete(self.session.winners()).await {
                warn!("Failed to present final draft order: {}", e);
                self.stats.sink_failures += 1;
            }
        } else {
            self.render_frame(self.session.rotation()).await;
        }

        Ok(pick)
    }

    /// Spin until nobody is left on the wheel.
    ///
    /// Excluded or unweighted pool members are never drawn; they stay in the
    /// pool and are reported through `DraftSession::unplaced`.
    pub async fn run_to_completion(&mut self) -> Result<Vec<DraftPick>> {
        info!(
            "Running draft session {} with {} participants",
            self.session.id(),
            self.session.pool().len()
        );

        while self.session.eligible_count() > 0 {
            self.spin().await?;
        }

        let unplaced = self.session.unplaced();
        if !unplaced.is_empty() {
            let names: Vec<&str> = unplaced.iter().map(|p| p.name.as_str()).collect();
            warn!(
                "Draft stopped with {} participants off the wheel: {}",
                names.len(),
                names.join(", ")
            );
        }

        debug!("Draft finished with stats {:?}", self.stats);
        Ok(self.session.winners().to_vec())
    }

    async fn render_frame(&mut self, rotation: f64) {
        match self
            .sink
            .render_frame(self.session.segments(), rotation)
            .await
        {
            Ok(()) => self.stats.frames_rendered += 1,
            Err(e) => {
                debug!("Frame render failed: {}", e);
                self.stats.sink_failures += 1;
            }
        }
    }
}
