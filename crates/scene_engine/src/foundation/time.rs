//! Frame timing

use std::time::{Duration, Instant};

/// Frame counter and timer for the render loop
///
/// Distinguishes frames that were rendered from frames the engine spent
/// yielding because the window was inactive.
#[derive(Debug)]
pub struct FrameTimer {
    started: Instant,
    last_frame: Instant,
    delta_time: f32,
    rendered_frames: u64,
    idle_frames: u64,
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTimer {
    /// Create a new timer starting now
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            started: now,
            last_frame: now,
            delta_time: 0.0,
            rendered_frames: 0,
            idle_frames: 0,
        }
    }

    /// Record a rendered frame
    pub fn frame_rendered(&mut self) {
        self.tick();
        self.rendered_frames += 1;
    }

    /// Record a frame spent yielding
    pub fn frame_idle(&mut self) {
        self.tick();
        self.idle_frames += 1;
    }

    fn tick(&mut self) {
        let now = Instant::now();
        self.delta_time = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
    }

    /// Time between the last two recorded frames in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Number of rendered frames
    pub fn rendered_frames(&self) -> u64 {
        self.rendered_frames
    }

    /// Number of idle frames
    pub fn idle_frames(&self) -> u64 {
        self.idle_frames
    }

    /// Wall time since the timer was created
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Average rendered frames per second since creation
    pub fn average_fps(&self) -> f32 {
        let secs = self.elapsed().as_secs_f32();
        if secs > 0.0 {
            self.rendered_frames as f32 / secs
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_rendered_and_idle_separately() {
        let mut timer = FrameTimer::new();
        timer.frame_rendered();
        timer.frame_rendered();
        timer.frame_idle();

        assert_eq!(timer.rendered_frames(), 2);
        assert_eq!(timer.idle_frames(), 1);
        assert!(timer.delta_time() >= 0.0);
    }
}
