//! Fixed-timestep pacing.
//!
//! The view state advances in whole 60 Hz ticks no matter how fast frames
//! are presented; leftover time carries over in an accumulator.

use std::time::Instant;
use tracing::warn;

/// One simulation tick: 60 Hz.
pub const FIXED_DT: f64 = 1.0 / 60.0;

/// Longest frame time credited to the accumulator. A stall longer than this
/// (window drag, debugger) slows the animation down instead of replaying
/// dozens of ticks at once.
pub const MAX_FRAME_TIME: f64 = 0.25;

pub struct TickLoop {
    previous_time: Instant,
    accumulator: f64,
}

impl TickLoop {
    pub fn new() -> Self {
        Self {
            previous_time: Instant::now(),
            accumulator: 0.0,
        }
    }

    /// Measure the time since the previous frame and run `update` once per
    /// whole tick it covers. Returns the number of ticks run.
    pub fn tick(&mut self, update: impl FnMut()) -> u32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.previous_time).as_secs_f64();
        self.previous_time = now;
        self.advance_by(frame_time, update)
    }

    /// Credit `frame_time` seconds and run the ticks it completes.
    pub fn advance_by(&mut self, frame_time: f64, mut update: impl FnMut()) -> u32 {
        let mut frame_time = frame_time.max(0.0);
        if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            frame_time = MAX_FRAME_TIME;
        }

        self.accumulator += frame_time;
        let mut ran = 0;
        while self.accumulator >= FIXED_DT {
            update();
            self.accumulator -= FIXED_DT;
            ran += 1;
        }
        ran
    }
}

impl Default for TickLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_step() {
        let mut pacing = TickLoop::new();
        let mut updates = 0;
        assert_eq!(pacing.advance_by(FIXED_DT, || updates += 1), 1);
        assert_eq!(updates, 1);
        assert_eq!(pacing.advance_by(0.5 * FIXED_DT, || updates += 1), 0);
    }

    #[test]
    fn test_partial_frames_accumulate() {
        let mut pacing = TickLoop::new();
        let mut updates = 0;
        pacing.advance_by(0.6 * FIXED_DT, || updates += 1);
        assert_eq!(updates, 0);

        pacing.advance_by(0.6 * FIXED_DT, || updates += 1);
        assert_eq!(updates, 1);

        // 0.2 left over, so 0.7 more completes a second tick.
        pacing.advance_by(0.7 * FIXED_DT, || updates += 1);
        assert_eq!(updates, 1);
        pacing.advance_by(0.2 * FIXED_DT, || updates += 1);
        assert_eq!(updates, 2);
    }

    #[test]
    fn test_long_frame_is_clamped() {
        let mut pacing = TickLoop::new();
        let ran = pacing.advance_by(5.0, || {});
        let max = (MAX_FRAME_TIME / FIXED_DT).ceil() as u32;
        assert!(ran > 0);
        assert!(ran <= max, "ran {ran} ticks, expected at most {max}");
    }

    #[test]
    fn test_negative_time_runs_nothing() {
        let mut pacing = TickLoop::new();
        assert_eq!(pacing.advance_by(-1.0, || {}), 0);
        assert_eq!(pacing.advance_by(0.99 * FIXED_DT, || {}), 0);
    }

    #[test]
    fn test_tick_total_matches_time() {
        let mut pacing = TickLoop::new();
        let mut total = 0;
        for _ in 0..30 {
            total += pacing.advance_by(2.0 * FIXED_DT, || {});
        }
        // Sixty ticks, give or take rounding in the final accumulator.
        assert!((59..=60).contains(&total));
    }

    #[test]
    fn test_same_frame_times_give_same_ticks() {
        let frame_times = [0.017, 0.015, 0.020, 0.016, 0.033, 0.008, 0.018];
        let mut a = TickLoop::new();
        let mut b = TickLoop::new();
        for &ft in &frame_times {
            assert_eq!(a.advance_by(ft, || {}), b.advance_by(ft, || {}));
        }
    }
}
