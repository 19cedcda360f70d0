//! Engine configuration and shared constants
//!
//! Provides defaults matching the reference hardware setup (a phone
//! camera pointed across a track at roughly 25 fps). All values are
//! adjustable per session, but not while a lap clock is running.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of fixed sample points watched per frame
pub const SAMPLE_POINTS: usize = 3;

/// One frame's brightness readings, one value per sample point, each in [0, 255]
pub type Sample = [u8; SAMPLE_POINTS];

/// Frames collected during a calibration run before the baseline is derived
pub const CALIBRATION_FRAMES: usize = 20;

/// Default debounce delay between accepted catches (milliseconds)
/// Catches closer together than this are re-triggers, not laps
pub const DEFAULT_CATCH_DELAY_MS: u64 = 500;

/// Default number of consecutive caught frames before a miscalibration
/// warning is raised (about 2 seconds at 25 fps)
pub const DEFAULT_STUCK_TRIGGER_FRAMES: u32 = 50;

/// Default sensitivity threshold (brightness delta units)
pub const DEFAULT_THRESHOLD: u8 = 10;

/// Maximum accepted sensitivity threshold
pub const MAX_THRESHOLD: u8 = 25;

/// Lap timer configuration
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimerConfig {
    /// Minimum time between accepted catches (ms). Laps shorter than
    /// this are ignored as re-triggers of the same physical pass.
    pub catch_delay_ms: u64,
    /// Consecutive caught frames before a stuck-trigger warning.
    /// 50 frames ≈ 2 s at 25 fps; use 20 for low-frame-rate cameras.
    pub stuck_trigger_frames: u32,
    /// Brightness deviation threshold, 0..=25. Lower = more sensitive.
    pub threshold: u8,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            catch_delay_ms: DEFAULT_CATCH_DELAY_MS,
            stuck_trigger_frames: DEFAULT_STUCK_TRIGGER_FRAMES,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}
