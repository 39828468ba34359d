//! Time management utilities

use std::time::Instant;

/// Monotonic clock that drives the simulation.
///
/// Reports the time elapsed since the previous tick as `delta_time` and
/// accumulates the total simulated time. The clock can be stopped and
/// restarted: while stopped, `tick` reports a zero delta and advances
/// nothing, which is how the engine freezes the simulation during pause.
///
/// `delta_time` is deliberately not clamped. A long gap between two ticks,
/// for example when the host stalls the frame loop, is reported as one
/// large delta and fed straight into integration.
pub struct Clock {
    last_tick: Option<Instant>,
    running: bool,
    delta_time: f32,
    elapsed: f32,
    tick_count: u64,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock {
    /// Create a new stopped clock
    pub fn new() -> Self {
        Self {
            last_tick: None,
            running: false,
            delta_time: 0.0,
            elapsed: 0.0,
            tick_count: 0,
        }
    }

    /// Start the clock, capturing a fresh time baseline.
    ///
    /// Resets the elapsed counter and tick count; use [`Clock::resume`] to
    /// continue a run without discarding them.
    pub fn start(&mut self) {
        self.last_tick = Some(Instant::now());
        self.running = true;
        self.delta_time = 0.0;
        self.elapsed = 0.0;
        self.tick_count = 0;
    }

    /// Stop time advancement, keeping the accumulated counters
    pub fn stop(&mut self) {
        self.running = false;
        self.last_tick = None;
    }

    /// Restart time advancement after a stop.
    ///
    /// Captures a new baseline so the stopped interval is never reported
    /// as part of the next delta.
    pub fn resume(&mut self) {
        if !self.running {
            self.last_tick = Some(Instant::now());
            self.running = true;
        }
    }

    /// Advance the clock by one tick and return the delta in seconds.
    ///
    /// Returns 0.0 while the clock is stopped.
    pub fn tick(&mut self) -> f32 {
        if !self.running {
            self.delta_time = 0.0;
            return 0.0;
        }

        let now = Instant::now();
        let delta = self
            .last_tick
            .map_or(0.0, |last| now.duration_since(last).as_secs_f32());
        self.last_tick = Some(now);
        self.delta_time = delta;
        self.elapsed += delta;
        self.tick_count += 1;
        delta
    }

    /// Whether the clock is currently advancing
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Get the time since the last tick in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total simulated time in seconds
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Get the number of ticks since the clock was started
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Get the FPS implied by the last tick
    pub fn current_fps(&self) -> f32 {
        if self.delta_time > 0.0 {
            1.0 / self.delta_time
        } else {
            0.0
        }
    }

    /// Get the average FPS since the clock was started
    pub fn average_fps(&self) -> f32 {
        if self.elapsed > 0.0 {
            self.tick_count as f32 / self.elapsed
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn test_new_clock_is_stopped() {
        let mut clock = Clock::new();

        assert!(!clock.is_running());
        assert_eq!(clock.tick(), 0.0);
        assert_eq!(clock.tick_count(), 0);
    }

    #[test]
    fn test_tick_advances_elapsed() {
        let mut clock = Clock::new();
        clock.start();

        sleep(Duration::from_millis(5));
        let delta = clock.tick();

        assert!(delta > 0.0);
        assert!(clock.elapsed() >= delta);
        assert_eq!(clock.tick_count(), 1);
    }

    #[test]
    fn test_stop_freezes_advancement() {
        let mut clock = Clock::new();
        clock.start();
        sleep(Duration::from_millis(2));
        clock.tick();
        let elapsed = clock.elapsed();

        clock.stop();
        sleep(Duration::from_millis(5));
        assert_eq!(clock.tick(), 0.0);
        assert_eq!(clock.elapsed(), elapsed);
    }

    #[test]
    fn test_resume_rebaselines() {
        let mut clock = Clock::new();
        clock.start();
        sleep(Duration::from_millis(2));
        clock.tick();

        clock.stop();
        sleep(Duration::from_millis(20));
        clock.resume();

        // The stopped interval must not leak into the next delta.
        let delta = clock.tick();
        assert!(delta < 0.015, "delta {delta} includes the stopped gap");
    }

    #[test]
    fn test_start_resets_counters() {
        let mut clock = Clock::new();
        clock.start();
        sleep(Duration::from_millis(2));
        clock.tick();

        clock.start();
        assert_eq!(clock.elapsed(), 0.0);
        assert_eq!(clock.tick_count(), 0);
    }
}
