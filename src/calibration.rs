//! Baseline calibration for the brightness sample points
//!
//! Before detection can run, the engine must learn what each sample
//! point looks like with an empty track. Calibration collects a short
//! fixed window of readings per point and reduces each to its mean.
//!
//! The reduction is deliberately a one-shot integer average with no
//! smoothing or outlier rejection: the camera is static and the window
//! is captured in under a second, so anything fancier would only react
//! to noise the detection threshold already absorbs.

use crate::config::{Sample, CALIBRATION_FRAMES, SAMPLE_POINTS};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Outcome of feeding one frame to the calibrator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CalibrationProgress {
    /// Still collecting; carries the number of frames collected so far
    InProgress(u8),
    /// Window full; carries the derived per-point baseline
    Complete(Sample),
}

/// Calibration request rejections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationError {
    /// The window is already full and a baseline has been derived;
    /// call `begin()` to start a new run
    AlreadyComplete,
}

/// Collects a fixed window of brightness readings and derives a
/// per-point baseline
///
/// The window holds exactly [`CALIBRATION_FRAMES`] readings per sample
/// point, in frame order. The baseline is the integer-truncated mean of
/// each point's readings, computed independently per point.
pub struct Calibrator {
    window: [[u8; CALIBRATION_FRAMES]; SAMPLE_POINTS],
    frames: usize,
    baseline: Option<Sample>,
}

impl Calibrator {
    /// Create a calibrator with an empty window, ready to collect
    pub fn new() -> Self {
        Self {
            window: [[0; CALIBRATION_FRAMES]; SAMPLE_POINTS],
            frames: 0,
            baseline: None,
        }
    }

    /// Reset the frame counter and clear the window for a new run
    pub fn begin(&mut self) {
        self.frames = 0;
        self.baseline = None;
    }

    /// Append one frame's readings to the window
    ///
    /// Returns `InProgress(n)` until the window is full, then
    /// `Complete(baseline)` on the frame that fills it. Feeding more
    /// frames after completion is an error.
    pub fn add_sample(&mut self, sample: Sample) -> Result<CalibrationProgress, CalibrationError> {
        if self.baseline.is_some() {
            return Err(CalibrationError::AlreadyComplete);
        }

        for (point, &value) in sample.iter().enumerate() {
            self.window[point][self.frames] = value;
        }
        self.frames += 1;

        if self.frames < CALIBRATION_FRAMES {
            return Ok(CalibrationProgress::InProgress(self.frames as u8));
        }

        // Window full: average each point over exactly the collected
        // frames, truncating toward zero
        let mut baseline = [0u8; SAMPLE_POINTS];
        for (point, values) in self.window.iter().enumerate() {
            let total: u32 = values.iter().map(|&v| v as u32).sum();
            baseline[point] = (total / CALIBRATION_FRAMES as u32) as u8;
        }

        self.baseline = Some(baseline);
        Ok(CalibrationProgress::Complete(baseline))
    }

    /// Frames collected in the current run
    pub fn frames_collected(&self) -> usize {
        self.frames
    }

    /// The derived baseline, if the current run has completed
    pub fn baseline(&self) -> Option<Sample> {
        self.baseline
    }

    /// Whether the current run has completed
    pub fn is_complete(&self) -> bool {
        self.baseline.is_some()
    }
}

impl Default for Calibrator {
    fn default() -> Self {
        Self::new()
    }
}
