//! Draft orchestration
//!
//! This module holds the draft session state machine, the async controller
//! that animates spins on a frame clock, and the rendering sink interface.

pub mod controller;
pub mod session;
pub mod sink;

// Re-export commonly used types
pub use controller::{DraftController, DraftStats};
pub use session::{membership, DraftSession, SpinRequest};
pub use sink::{NullRenderSink, RenderSink, TracingRenderSink};
