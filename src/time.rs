//! Frame pacing for the window host.
//!
//! The backdrop itself counts frames, not seconds; [`FrameClock`] only
//! measures how fast the host is actually delivering them.
//!
//! ```ignore
//! let mut clock = FrameClock::new();
//!
//! // once per redraw:
//! if let Some(fps) = clock.tick() {
//!     tracing::debug!(fps, "frame rate");
//! }
//! ```

use std::time::{Duration, Instant};

/// Counts frames and measures frames per second over a fixed window.
#[derive(Debug)]
pub struct FrameClock {
    start: Instant,
    frame_count: u64,
    fps: f32,
    window_frames: u64,
    window_start: Instant,
    window: Duration,
}

impl FrameClock {
    /// Start counting now, reporting FPS once a second.
    pub fn new() -> Self {
        Self::with_window(Duration::from_secs(1))
    }

    /// Start counting now, reporting FPS every `window`.
    pub fn with_window(window: Duration) -> Self {
        let now = Instant::now();
        Self {
            start: now,
            frame_count: 0,
            fps: 0.0,
            window_frames: 0,
            window_start: now,
            window,
        }
    }

    /// Record a frame. Returns the new FPS figure when a window closes.
    pub fn tick(&mut self) -> Option<f32> {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> Option<f32> {
        self.frame_count += 1;

        let elapsed = now.duration_since(self.window_start);
        if elapsed < self.window {
            return None;
        }
        let frames = self.frame_count - self.window_frames;
        self.fps = frames as f32 / elapsed.as_secs_f32();
        self.window_frames = self.frame_count;
        self.window_start = now;
        Some(self.fps)
    }

    /// Frames recorded so far.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Most recent FPS measurement; 0 until the first window closes.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Wall time since the clock started, in seconds.
    pub fn elapsed(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
