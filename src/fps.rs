//! Frame-rate measurement
//!
//! Detection quality depends on the shell actually delivering frames at
//! camera rate; a starved feed shows up here before it shows up as
//! missed passes. The counter latches the number of frames seen in each
//! elapsed second.

use log::debug;

/// Counts frames per wall-clock second
#[derive(Debug, Default)]
pub struct FrameRateCounter {
    frames: u32,
    fps: u32,
    window_start_ms: Option<u64>,
}

impl FrameRateCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one frame arrival
    ///
    /// When a full second has elapsed since the window opened, the
    /// frame count is latched as the measured rate and a new window
    /// starts.
    pub fn tick(&mut self, now_ms: u64) {
        let start = *self.window_start_ms.get_or_insert(now_ms);
        self.frames += 1;

        if now_ms.saturating_sub(start) >= 1000 {
            self.fps = self.frames;
            self.frames = 0;
            self.window_start_ms = Some(now_ms);
            debug!("fps: {}", self.fps);
        }
    }

    /// Most recently latched frames-per-second value
    ///
    /// Zero until the first full second has elapsed.
    pub fn fps(&self) -> u32 {
        self.fps
    }
}
