//! Frame scheduling seam between the engine and its host
//!
//! The engine never runs its own thread. It registers interest in the next
//! frame through a [`FrameScheduler`] and the host decides when to grant it;
//! the gap between one tick finishing and the next grant is the engine's
//! only suspension point. Any frame-pacing primitive can sit behind the
//! trait: a timer, an OS event loop, or a dedicated render-thread driver.

use std::thread;
use std::time::{Duration, Instant};

/// Host-provided frame pacing primitive.
pub trait FrameScheduler {
    /// Register interest in the next frame. Returns immediately.
    fn request_tick(&mut self);

    /// Cancel the pending frame request, if any.
    fn cancel_tick(&mut self);

    /// Whether a frame request is currently pending.
    fn tick_requested(&self) -> bool;

    /// Wait until the host grants the pending frame request.
    ///
    /// Returns `false` when no request is pending or the host is shutting
    /// down, which ends the drive loop.
    fn next_frame(&mut self) -> bool;
}

/// Fixed-interval scheduler paced by sleeping the calling thread.
///
/// Stands in for vsync when the engine runs headless: each granted frame
/// schedules the next deadline one interval later.
pub struct TimerScheduler {
    frame_interval: Duration,
    next_deadline: Option<Instant>,
    pending: bool,
}

impl TimerScheduler {
    /// Create a scheduler that grants frames at the given rate
    pub fn new(target_fps: f32) -> Self {
        let fps = if target_fps > 0.0 { target_fps } else { 60.0 };
        Self {
            frame_interval: Duration::from_secs_f32(1.0 / fps),
            next_deadline: None,
            pending: false,
        }
    }

    /// The interval between granted frames
    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }
}

impl FrameScheduler for TimerScheduler {
    fn request_tick(&mut self) {
        self.pending = true;
    }

    fn cancel_tick(&mut self) {
        self.pending = false;
    }

    fn tick_requested(&self) -> bool {
        self.pending
    }

    fn next_frame(&mut self) -> bool {
        if !self.pending {
            return false;
        }

        if let Some(deadline) = self.next_deadline {
            let now = Instant::now();
            if deadline > now {
                thread::sleep(deadline - now);
            }
        }
        self.next_deadline = Some(Instant::now() + self.frame_interval);
        self.pending = false;
        true
    }
}

/// Scheduler that grants every requested frame immediately.
///
/// Used by tests and scripted headless runs where pacing is irrelevant.
#[derive(Default)]
pub struct ManualScheduler {
    pending: bool,
    granted: u64,
}

impl ManualScheduler {
    /// Create a new manual scheduler
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames granted so far
    pub fn granted(&self) -> u64 {
        self.granted
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_tick(&mut self) {
        self.pending = true;
    }

    fn cancel_tick(&mut self) {
        self.pending = false;
    }

    fn tick_requested(&self) -> bool {
        self.pending
    }

    fn next_frame(&mut self) -> bool {
        if !self.pending {
            return false;
        }
        self.pending = false;
        self.granted += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_scheduler_grants_requested_frames() {
        let mut scheduler = ManualScheduler::new();
        assert!(!scheduler.next_frame());

        scheduler.request_tick();
        assert!(scheduler.tick_requested());
        assert!(scheduler.next_frame());
        assert!(!scheduler.tick_requested());
        assert_eq!(scheduler.granted(), 1);
    }

    #[test]
    fn test_cancel_discards_pending_request() {
        let mut scheduler = ManualScheduler::new();
        scheduler.request_tick();
        scheduler.cancel_tick();

        assert!(!scheduler.tick_requested());
        assert!(!scheduler.next_frame());
    }

    #[test]
    fn test_timer_scheduler_waits_out_the_interval() {
        let mut scheduler = TimerScheduler::new(200.0);

        scheduler.request_tick();
        assert!(scheduler.next_frame());

        // The second grant has a deadline one interval after the first.
        let before = Instant::now();
        scheduler.request_tick();
        assert!(scheduler.next_frame());
        assert!(before.elapsed() >= scheduler.frame_interval() / 2);
    }

    #[test]
    fn test_timer_scheduler_rejects_ungranted_frames() {
        let mut scheduler = TimerScheduler::new(60.0);
        assert!(!scheduler.next_frame());
    }
}
