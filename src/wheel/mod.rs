//! Wheel geometry: partitioning, spin trajectories and winner resolution
//!
//! The wheel is a circular partition of `[0, 2π)` into one half-open arc per
//! eligible participant, sized by tickets. A spin rotates the wheel under a
//! fixed pointer; the arc under the pointer at the terminal rotation wins.

pub mod partition;
pub mod resolver;
pub mod trajectory;

// Re-export commonly used types
pub use partition::partition;
pub use resolver::{effective_angle, find_segment, resolve_winner, Resolution, POINTER_ANGLE};
pub use trajectory::{ease_out_quart, SpinTrajectory};
