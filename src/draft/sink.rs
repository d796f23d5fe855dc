//! Rendering sinks for wheel frames and draw results
//!
//! The engine only ever pushes into a sink; it never reads anything back.

use crate::error::Result;
use crate::types::{DraftPick, Segment};
use async_trait::async_trait;
use tracing::{info, trace};

/// Trait for presenting the wheel
#[async_trait]
pub trait RenderSink: Send + Sync {
    /// Draw the wheel at the given rotation
    async fn render_frame(&self, segments: &[Segment], rotation: f64) -> Result<()>;

    /// Present the winner of a completed spin
    async fn announce_winner(&self, pick: &DraftPick) -> Result<()>;

    /// Present the final draft order
    async fn draft_complete(&self, winners: &[DraftPick]) -> Result<()>;
}

/// Sink that writes frames and results to the tracing log
#[derive(Debug, Default, Clone)]
pub struct TracingRenderSink;

#[async_trait]
impl RenderSink for TracingRenderSink {
    async fn render_frame(&self, segments: &[Segment], rotation: f64) -> Result<()> {
        trace!("frame: {} segments at rotation {:.4}", segments.len(), rotation);
        Ok(())
    }

    async fn announce_winner(&self, pick: &DraftPick) -> Result<()> {
        info!(
            "🎉 Winner #{}: {} (Tickets: {})",
            pick.pick_number, pick.participant.name, pick.tickets
        );
        Ok(())
    }

    async fn draft_complete(&self, winners: &[DraftPick]) -> Result<()> {
        info!("All {} participants picked", winners.len());
        Ok(())
    }
}

/// Sink that discards everything
#[derive(Debug, Default, Clone)]
pub struct NullRenderSink;

#[async_trait]
impl RenderSink for NullRenderSink {
    async fn render_frame(&self, _segments: &[Segment], _rotation: f64) -> Result<()> {
        Ok(())
    }

    async fn announce_winner(&self, _pick: &DraftPick) -> Result<()> {
        Ok(())
    }

    async fn draft_complete(&self, _winners: &[DraftPick]) -> Result<()> {
        Ok(())
    }
}
