//! Time management utilities
//!
//! The [`Timer`] is ticked once per frame by the engine loop. Its delta is handed
//! to every module through a [`FrameContext`] instead of a process-wide clock.

use std::time::{Duration, Instant};

use crate::render::RenderBackend;

/// High-precision timer for frame timing
#[derive(Debug, Clone)]
pub struct Timer {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Update the timer (should be called once per frame)
    pub fn update(&mut self) {
        self.update_at(Instant::now());
    }

    /// Update the timer with an explicit timestamp
    pub fn update_at(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.last_frame);
        self.advance(elapsed);
        self.last_frame = now;
    }

    /// Advance the timer by a fixed step without reading the wall clock
    pub fn advance(&mut self, elapsed: Duration) {
        self.delta_time = elapsed.as_secs_f32();
        self.total_time += self.delta_time;
        self.frame_count += 1;
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total elapsed time since timer creation
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the average FPS since timer creation
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }

    /// Get the current FPS (based on last frame time)
    pub fn current_fps(&self) -> f32 {
        if self.delta_time > 0.0 {
            1.0 / self.delta_time
        } else {
            0.0
        }
    }

    /// Instant of the most recent tick
    pub fn last_frame(&self) -> Instant {
        self.last_frame
    }
}

/// Per-frame state threaded through every module update
///
/// Carries the frame delta and the rendering backend, which text modules need
/// to rasterize their strings.
pub struct FrameContext<'a> {
    /// Seconds elapsed since the previous frame
    pub delta_time: f32,
    /// Rendering backend for this frame
    pub renderer: &'a mut dyn RenderBackend,
}

impl<'a> FrameContext<'a> {
    /// Create a context for one frame
    pub fn new(delta_time: f32, renderer: &'a mut dyn RenderBackend) -> Self {
        Self { delta_time, renderer }
    }
}
