//! Frame clock.
//!
//! All bursts share one monotonic clock; each keeps its own local time inside
//! its [`AnimationDriver`](crate::animation::AnimationDriver). The clock is a
//! trait so the show can be driven by wall time in the window host and by a
//! [`ManualClock`] in tests.
//!
//! # Example
//!
//! ```ignore
//! use fireworks::time::{Clock, Time};
//!
//! let mut time = Time::new();
//!
//! // In your frame loop:
//! let frame = time.tick();
//! show.tick(frame.delta, &mut backend);
//! ```

use std::time::{Duration, Instant};

/// Largest delta a single frame may report, in seconds.
///
/// Stalls (window drags, debugger breaks) would otherwise finish every
/// running burst in one frame.
pub const MAX_FRAME_DELTA: f32 = 0.25;

/// One clock reading.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTime {
    /// Seconds since the clock started, excluding paused time.
    pub elapsed: f32,
    /// Seconds since the previous tick.
    pub delta: f32,
    /// Ticks since the clock started.
    pub frame: u64,
}

/// Monotonic frame clock.
pub trait Clock {
    /// Advance to the next frame. `elapsed` never decreases and `delta` is
    /// never negative.
    fn tick(&mut self) -> FrameTime;
}

/// Wall-clock time with pause and time scaling.
#[derive(Debug)]
pub struct Time {
    start: Instant,
    last_frame: Instant,
    /// Accumulated scaled time, in seconds.
    elapsed_secs: f64,
    delta_secs: f32,
    frame_count: u64,
    paused: bool,
    time_scale: f32,
}

impl Time {
    /// Create a new clock starting from now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            paused: false,
            time_scale: 1.0,
        }
    }

    /// Restart the clock from now, keeping pause state and time scale.
    ///
    /// Call once setup is done so the first frame does not absorb it.
    pub fn reset(&mut self) {
        let now = Instant::now();
        self.start = now;
        self.last_frame = now;
        self.elapsed_secs = 0.0;
        self.delta_secs = 0.0;
        self.frame_count = 0;
    }

    /// Total elapsed time in seconds.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs as f32
    }

    /// Time since last frame in seconds.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[inline]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// While paused, ticks report a zero delta and bursts freeze in place.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.last_frame = Instant::now();
            self.paused = false;
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Set time scale multiplier. Negative values clamp to 0.
    ///
    /// - `1.0` = normal speed
    /// - `0.5` = slow motion
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    /// Wall time since the clock was created, including paused time.
    #[inline]
    pub fn wall_time(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for Time {
    fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        self.frame_count += 1;

        if self.paused {
            self.delta_secs = 0.0;
        } else {
            let raw = now.duration_since(self.last_frame).as_secs_f32();
            self.delta_secs = raw.min(MAX_FRAME_DELTA) * self.time_scale;
            self.last_frame = now;
            self.elapsed_secs += self.delta_secs as f64;
        }

        FrameTime {
            elapsed: self.elapsed(),
            delta: self.delta_secs,
            frame: self.frame_count,
        }
    }
}

/// Clock that advances by a fixed step per tick. For tests and offline
/// rendering.
#[derive(Debug, Clone)]
pub struct ManualClock {
    step: f32,
    elapsed: f64,
    frame: u64,
}

impl ManualClock {
    /// Negative or non-finite steps become zero.
    pub fn new(step: f32) -> Self {
        let step = if step.is_finite() { step.max(0.0) } else { 0.0 };
        Self {
            step,
            elapsed: 0.0,
            frame: 0,
        }
    }

    pub fn step(&self) -> f32 {
        self.step
    }
}

impl Clock for ManualClock {
    fn tick(&mut self) -> FrameTime {
        self.elapsed += self.step as f64;
        self.frame += 1;
        FrameTime {
            elapsed: self.elapsed as f32,
            delta: self.step,
            frame: self.frame,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_time_new() {
        let time = Time::new();
        assert_eq!(time.frame(), 0);
        assert!(!time.is_paused());
        assert_eq!(time.time_scale(), 1.0);
    }

    #[test]
    fn test_time_tick() {
        let mut time = Time::new();
        thread::sleep(Duration::from_millis(10));
        let frame = time.tick();

        assert!(frame.elapsed > 0.0);
        assert!(frame.delta > 0.0);
        assert!(frame.delta <= MAX_FRAME_DELTA);
        assert_eq!(frame.frame, 1);
    }

    #[test]
    fn test_time_pause() {
        let mut time = Time::new();
        time.tick();

        time.pause();
        let before = time.elapsed();
        thread::sleep(Duration::from_millis(10));
        let frame = time.tick();

        assert_eq!(frame.elapsed, before);
        assert_eq!(frame.delta, 0.0);
        assert_eq!(frame.frame, 2);
    }

    #[test]
    fn test_time_scale() {
        let mut time = Time::new();
        time.set_time_scale(2.0);
        assert_eq!(time.time_scale(), 2.0);

        time.set_time_scale(-1.0);
        assert_eq!(time.time_scale(), 0.0);
        thread::sleep(Duration::from_millis(5));
        assert_eq!(time.tick().delta, 0.0);
    }

    #[test]
    fn test_elapsed_is_monotonic() {
        let mut time = Time::new();
        let mut last = 0.0;
        for _ in 0..20 {
            let frame = time.tick();
            assert!(frame.elapsed >= last);
            assert!(frame.delta >= 0.0);
            last = frame.elapsed;
        }
    }

    #[test]
    fn test_reset_drops_setup_time() {
        let mut time = Time::new();
        time.set_time_scale(2.0);
        thread::sleep(Duration::from_millis(300));
        time.reset();
        let frame = time.tick();

        assert!(frame.delta < 0.1, "first delta after reset was {}", frame.delta);
        assert!(frame.elapsed < 0.1);
        assert_eq!(frame.frame, 1);
        assert_eq!(time.time_scale(), 2.0);
    }

    #[test]
    fn test_manual_clock() {
        let mut clock = ManualClock::new(0.5);
        clock.tick();
        let frame = clock.tick();
        assert_eq!(frame.delta, 0.5);
        assert_eq!(frame.elapsed, 1.0);
        assert_eq!(frame.frame, 2);

        assert_eq!(ManualClock::new(-1.0).step(), 0.0);
    }
}
