//! Progress animation for a single burst.
//!
//! An [`AnimationDriver`] turns frame deltas into an eased progress value that
//! runs from 0 to 1 over a fixed duration:
//!
//! ```text
//! Pending --start()--> Running --advance() past duration--> Completed
//!                         \--finish()------------------------/
//! ```
//!
//! Progress is derived from the accumulated local time rather than stepped,
//! so a burst ticked at 10 Hz and one ticked at 240 Hz end in the same state.
//! The tick that crosses the duration returns [`Step::Completed`]; no other
//! call ever does.

use crate::easing::Easing;
use tracing::warn;

/// Default burst duration in seconds.
pub const DEFAULT_DURATION: f32 = 3.0;

/// Accumulated time this close to the duration counts as finished.
const COMPLETION_EPSILON: f64 = 1e-6;

/// Lifecycle state of a driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    Pending,
    Running,
    Completed,
}

/// Outcome of one [`AnimationDriver::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Not running (still pending, or already completed earlier).
    Idle,
    /// Progress moved (or stayed) below 1.
    Running(f32),
    /// Progress reached 1 on this call.
    Completed,
}

/// Drives one burst's progress from 0 to 1.
#[derive(Debug, Clone)]
pub struct AnimationDriver {
    duration: f32,
    easing: Easing,
    elapsed: f64,
    progress: f32,
    state: AnimationState,
}

impl AnimationDriver {
    /// Create a pending driver.
    ///
    /// A duration that is not finite and positive falls back to
    /// [`DEFAULT_DURATION`], so every driver is guaranteed to complete.
    pub fn new(duration: f32, easing: Easing) -> Self {
        let duration = if duration.is_finite() && duration > 0.0 {
            duration
        } else {
            warn!(duration, fallback = DEFAULT_DURATION, "invalid burst duration");
            DEFAULT_DURATION
        };
        Self {
            duration,
            easing,
            elapsed: 0.0,
            progress: 0.0,
            state: AnimationState::Pending,
        }
    }

    /// Move from `Pending` to `Running` with progress 0.
    ///
    /// Has no effect in any other state.
    pub fn start(&mut self) {
        if self.state == AnimationState::Pending {
            self.state = AnimationState::Running;
            self.elapsed = 0.0;
            self.progress = 0.0;
        }
    }

    /// Advance by `delta` seconds.
    ///
    /// Negative or NaN deltas count as zero.
    pub fn advance(&mut self, delta: f32) -> Step {
        if self.state != AnimationState::Running {
            return Step::Idle;
        }

        let delta = if delta.is_finite() { delta.max(0.0) } else { 0.0 };
        self.elapsed += delta as f64;

        let duration = self.duration as f64;
        if self.elapsed + COMPLETION_EPSILON >= duration {
            self.complete();
            return Step::Completed;
        }

        let eased = self.easing.apply((self.elapsed / duration) as f32);
        // Easing is monotonic, but f32 rounding near 1 is not guaranteed to be.
        self.progress = eased.max(self.progress).min(1.0);
        Step::Running(self.progress)
    }

    /// Force completion.
    ///
    /// Returns `true` if this call performed the transition, `false` if the
    /// driver had already completed.
    pub fn finish(&mut self) -> bool {
        if self.state == AnimationState::Completed {
            return false;
        }
        self.complete();
        true
    }

    fn complete(&mut self) {
        self.elapsed = self.elapsed.max(self.duration as f64);
        self.progress = 1.0;
        self.state = AnimationState::Completed;
    }

    /// Current eased progress in `0..=1`.
    #[inline]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    #[inline]
    pub fn state(&self) -> AnimationState {
        self.state
    }

    #[inline]
    pub fn is_completed(&self) -> bool {
        self.state == AnimationState::Completed
    }

    /// Local time accumulated while running, in seconds.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed as f32
    }

    #[inline]
    pub fn duration(&self) -> f32 {
        self.duration
    }
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION, Easing::Power2Out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running() -> AnimationDriver {
        let mut d = AnimationDriver::default();
        d.start();
        d
    }

    #[test]
    fn test_pending_does_not_advance() {
        let mut d = AnimationDriver::default();
        assert_eq!(d.state(), AnimationState::Pending);
        assert_eq!(d.advance(10.0), Step::Idle);
        assert_eq!(d.progress(), 0.0);
    }

    #[test]
    fn test_completes_exactly_once() {
        let mut d = running();
        let mut completions = 0;
        for _ in 0..400 {
            if d.advance(1.0 / 60.0) == Step::Completed {
                completions += 1;
            }
        }
        assert_eq!(completions, 1);
        assert_eq!(d.progress(), 1.0);
        assert!(d.is_completed());
    }

    #[test]
    fn test_completes_within_duration_at_60hz() {
        let mut d = running();
        let mut ticks = 0;
        while d.advance(1.0 / 60.0) != Step::Completed {
            ticks += 1;
            assert!(ticks < 180, "did not complete within 3 seconds");
        }
    }

    #[test]
    fn test_progress_monotonic_and_bounded() {
        let mut d = running();
        let mut last = 0.0;
        let deltas = [0.016, 0.5, 0.001, 0.2, 0.033, 0.9, 0.016, 1.0, 0.3];
        for delta in deltas {
            d.advance(delta);
            assert!(d.progress() >= last);
            assert!((0.0..=1.0).contains(&d.progress()));
            last = d.progress();
        }
    }

    #[test]
    fn test_coarse_and_fine_ticks_converge() {
        let mut coarse = running();
        let mut fine = running();
        for _ in 0..3 {
            coarse.advance(1.0);
        }
        for _ in 0..3000 {
            fine.advance(0.001);
        }
        assert!(coarse.is_completed());
        assert!(fine.is_completed());
        assert_eq!(coarse.progress(), fine.progress());
    }

    #[test]
    fn test_intermediate_progress_is_eased() {
        let mut d = running();
        d.advance(1.5);
        assert!((d.progress() - 0.875).abs() < 1e-6);
    }

    #[test]
    fn test_single_huge_tick_completes() {
        let mut d = running();
        assert_eq!(d.advance(100.0), Step::Completed);
        assert_eq!(d.advance(100.0), Step::Idle);
    }

    #[test]
    fn test_bad_deltas_are_ignored() {
        let mut d = running();
        d.advance(1.0);
        let p = d.progress();
        d.advance(-5.0);
        d.advance(f32::NAN);
        assert_eq!(d.progress(), p);
    }

    #[test]
    fn test_finish_reports_transition_once() {
        let mut d = running();
        d.advance(0.5);
        assert!(d.finish());
        assert!(!d.finish());
        assert_eq!(d.progress(), 1.0);
        assert_eq!(d.advance(1.0), Step::Idle);
    }

    #[test]
    fn test_invalid_duration_falls_back() {
        for duration in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY, 0.0, -2.0] {
            let mut d = AnimationDriver::new(duration, Easing::Power2Out);
            assert_eq!(d.duration(), DEFAULT_DURATION);
            d.start();
            assert!(matches!(d.advance(1.0), Step::Running(_)));
            assert!(matches!(d.advance(1.0), Step::Running(_)));
            assert_eq!(d.advance(1.0), Step::Completed);
            assert_eq!(d.progress(), 1.0);
        }
    }

    #[test]
    fn test_start_is_one_shot() {
        let mut d = running();
        d.advance(1.0);
        d.start();
        assert!(d.elapsed() > 0.9);
    }
}
