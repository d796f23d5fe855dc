//! Spin trajectory planning and easing
//!
//! A spin is fully described by its start rotation, terminal rotation and
//! duration. Every displayed frame is a pure function of elapsed time, so a
//! renderer that drops frames never desynchronizes from the outcome.

use crate::config::SpinConfig;
use rand::Rng;
use std::f64::consts::TAU;
use std::time::Duration;

/// Ease-out-quartic curve: `1 - (1 - t)^4`, with `t` clamped to `[0, 1]`
pub fn ease_out_quart(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(4)
}

/// The planned path of a single spin
#[derive(Debug, Clone, PartialEq)]
pub struct SpinTrajectory {
    pub start_rotation: f64,
    pub terminal_rotation: f64,
    pub duration: Duration,
}

impl SpinTrajectory {
    /// Plan a spin: `base_turns` full turns plus a uniform offset in `[0, 2π)`
    pub fn plan<R: Rng + ?Sized>(current_rotation: f64, config: &SpinConfig, rng: &mut R) -> Self {
        let offset = rng.gen_range(0.0..TAU);
        Self::with_offset(current_rotation, config.base_turns, offset, config.duration())
    }

    /// Plan a spin with an explicit random offset
    pub fn with_offset(
        current_rotation: f64,
        base_turns: u32,
        offset: f64,
        duration: Duration,
    ) -> Self {
        Self {
            start_rotation: current_rotation,
            terminal_rotation: current_rotation + f64::from(base_turns) * TAU + offset,
            duration,
        }
    }

    /// Total angle travelled by the wheel
    pub fn total_delta(&self) -> f64 {
        self.terminal_rotation - self.start_rotation
    }

    /// Normalized time in `[0, 1]`
    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn is_complete(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }

    /// Displayed rotation after `elapsed` time. Render-only: the winner is
    /// resolved from `terminal_rotation`, never from an intermediate frame.
    pub fn rotation_at(&self, elapsed: Duration) -> f64 {
        if self.is_complete(elapsed) {
            return self.terminal_rotation;
        }
        self.start_rotation + self.total_delta() * ease_out_quart(self.progress(elapsed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_easing_endpoints() {
        assert_eq!(ease_out_quart(0.0), 0.0);
        assert_eq!(ease_out_quart(1.0), 1.0);
        assert_eq!(ease_out_quart(0.5), 0.9375);
        assert_eq!(ease_out_quart(-1.0), 0.0);
        assert_eq!(ease_out_quart(2.0), 1.0);
    }

    #[test]
    fn test_planned_rotation_range() {
        let config = SpinConfig::default();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..100 {
            let trajectory = SpinTrajectory::plan(3.0, &config, &mut rng);
            let delta = trajectory.total_delta();
            assert!(delta >= 5.0 * TAU - 1e-9);
            assert!(delta < 6.0 * TAU);
            assert_eq!(trajectory.start_rotation, 3.0);
            assert_eq!(trajectory.duration, Duration::from_millis(5000));
        }
    }

    #[test]
    fn test_seeded_plans_are_reproducible() {
        let config = SpinConfig::default();
        let a = SpinTrajectory::plan(0.0, &config, &mut StdRng::seed_from_u64(42));
        let b = SpinTrajectory::plan(0.0, &config, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_rotation_at_endpoints() {
        let trajectory = SpinTrajectory::with_offset(1.0, 5, 2.0, Duration::from_millis(5000));

        assert_eq!(trajectory.rotation_at(Duration::ZERO), 1.0);
        assert_eq!(
            trajectory.rotation_at(Duration::from_millis(5000)),
            trajectory.terminal_rotation
        );
        assert_eq!(
            trajectory.rotation_at(Duration::from_secs(60)),
            trajectory.terminal_rotation
        );

        let halfway = trajectory.rotation_at(Duration::from_millis(2500));
        let expected = 1.0 + trajectory.total_delta() * 0.9375;
        assert!((halfway - expected).abs() < 1e-9);
    }

    #[test]
    fn test_zero_duration_lands_immediately() {
        let trajectory = SpinTrajectory::with_offset(0.0, 5, 1.0, Duration::ZERO);
        assert!(trajectory.is_complete(Duration::ZERO));
        assert_eq!(trajectory.progress(Duration::ZERO), 1.0);
        assert_eq!(trajectory.rotation_at(Duration::ZERO), trajectory.terminal_rotation);
    }

    proptest! {
        #[test]
        fn prop_displayed_rotation_never_decreases(
            offset in 0.0f64..TAU,
            a in 0u64..6000,
            b in 0u64..6000,
        ) {
            let trajectory = SpinTrajectory::with_offset(0.0, 5, offset, Duration::from_millis(5000));
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let r_lo = trajectory.rotation_at(Duration::from_millis(lo));
            let r_hi = trajectory.rotation_at(Duration::from_millis(hi));
            prop_assert!(r_lo <= r_hi);
            prop_assert!(r_hi <= trajectory.terminal_rotation);
        }
    }
}
