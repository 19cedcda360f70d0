//! Lap timer with brightness-based pass detection
//!
//! Detects when a vehicle passes the camera point and tracks lap times.
//! Consumes one frame of sample-point readings at a time, in arrival
//! order, together with a wall-clock timestamp.
//!
//! ## Features
//!
//! - Millisecond-precision lap timing
//! - Auto-calibration against the empty track (20-frame baseline)
//! - Rising-edge debounce so one physical pass yields one lap
//! - Configurable catch delay and stuck-trigger warning
//! - Per-frame outcome events for shell integration
//!
//! ## Usage
//!
//! ```rust,ignore
//! use photogate::{LapTimer, FrameEvent};
//!
//! let mut timer = LapTimer::new();
//! timer.request_calibration()?;
//!
//! // In the frame callback:
//! let outcome = timer.process_frame(readings, timestamp_ms);
//! if let Some(FrameEvent::LapCompleted { duration_ms, lap }) = outcome.event {
//!     // Lap boundary crossed this frame
//! }
//! ```

use log::{info, warn};

use crate::calibration::{CalibrationError, CalibrationProgress, Calibrator};
use crate::config::{Sample, TimerConfig, MAX_THRESHOLD};
use crate::detector;
use crate::history::LapHistory;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Lap timer state machine states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TimerState {
    /// No baseline learned yet
    Idle,
    /// Collecting calibration frames
    Calibrating,
    /// Baseline learned, not timing
    Calibrated,
    /// Start requested, waiting for the first pass
    Armed,
    /// Lap clock running, counting laps
    Running,
}

/// Event produced by processing one frame
///
/// At most one event is produced per frame: a lap boundary and a stuck
/// warning cannot coincide because the former needs a rising edge and
/// the latter a long caught run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FrameEvent {
    /// Calibration collected another frame (count so far)
    CalibrationProgress(u8),
    /// Calibration finished; the baseline is now available
    CalibrationComplete,
    /// First pass after arming; the lap clock starts now
    TimingStarted,
    /// A lap boundary was accepted; `lap` is the 1-based lap number
    LapCompleted { duration_ms: u64, lap: usize },
    /// Sample points have deviated continuously for too long;
    /// the baseline is probably stale. Advisory only.
    StuckTriggerWarning,
}

/// Result of processing one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FrameOutcome {
    /// Event raised by this frame, if any
    pub event: Option<FrameEvent>,
    /// Whether at least one sample point currently deviates from its
    /// baseline (drives the shell's indicator color)
    pub deviating: bool,
}

impl FrameOutcome {
    fn quiet(deviating: bool) -> Self {
        Self {
            event: None,
            deviating,
        }
    }
}

/// Control request rejections
///
/// Every rejection leaves the timer state unchanged; the shell decides
/// how to surface the reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestError {
    /// Calibration was requested while one is already collecting
    CalibrationAlreadyInProgress,
    /// Calibration was requested while the lap clock is running
    CalibrationBlockedWhileRunning,
    /// Start was requested without a learned baseline
    StartBlockedNotCalibrated,
    /// Threshold change was requested while the lap clock is running
    ThresholdBlockedWhileRunning,
}

/// Main lap timer state machine
///
/// Owns the calibrator, the learned baseline, the debounce counters and
/// the lap history. Not internally synchronized: frame processing and
/// control requests mutate the same state and must be serialized by the
/// caller (a single-threaded frame loop, or a lock around both).
pub struct LapTimer {
    config: TimerConfig,
    state: TimerState,
    calibrator: Calibrator,
    baseline: Option<Sample>,
    history: LapHistory,
    /// Length of the current contiguous caught run, in frames
    subsequent_frames_caught: u32,
    /// Timestamp of the last accepted catch (ms)
    last_catch_ms: u64,
    /// Timestamp the lap clock started (ms)
    start_ms: u64,
    best_lap_ms: Option<u64>,
    /// Stuck warning already raised for the current caught run
    stuck_warned: bool,
}

impl LapTimer {
    /// Create a lap timer in idle state with default configuration
    pub fn new() -> Self {
        Self::with_config(TimerConfig::default())
    }

    /// Create a lap timer with a custom configuration
    pub fn with_config(mut config: TimerConfig) -> Self {
        config.threshold = config.threshold.min(MAX_THRESHOLD);
        Self {
            config,
            state: TimerState::Idle,
            calibrator: Calibrator::new(),
            baseline: None,
            history: LapHistory::new(),
            subsequent_frames_caught: 0,
            last_catch_ms: 0,
            start_ms: 0,
            best_lap_ms: None,
            stuck_warned: false,
        }
    }

    /// Process one frame of sample-point readings
    ///
    /// Frames must arrive in order; detection correctness depends on
    /// temporal adjacency of the caught-run counter and the debounce
    /// window.
    ///
    /// # Arguments
    /// * `readings` - Brightness per sample point, [0, 255]
    /// * `now_ms` - Wall-clock timestamp of this frame (milliseconds)
    pub fn process_frame(&mut self, readings: Sample, now_ms: u64) -> FrameOutcome {
        match self.state {
            TimerState::Idle => FrameOutcome::quiet(false),
            TimerState::Calibrating => self.process_calibration_frame(readings),
            TimerState::Calibrated | TimerState::Armed | TimerState::Running => {
                self.process_detection_frame(readings, now_ms)
            }
        }
    }

    fn process_calibration_frame(&mut self, readings: Sample) -> FrameOutcome {
        let progress = match self.calibrator.add_sample(readings) {
            Ok(progress) => progress,
            // Unreachable: completion transitions out of Calibrating
            Err(CalibrationError::AlreadyComplete) => return FrameOutcome::quiet(false),
        };

        let event = match progress {
            CalibrationProgress::InProgress(frames) => FrameEvent::CalibrationProgress(frames),
            CalibrationProgress::Complete(baseline) => {
                self.baseline = Some(baseline);
                self.state = TimerState::Calibrated;
                info!("Calibration complete, baseline {:?}", baseline);
                FrameEvent::CalibrationComplete
            }
        };

        FrameOutcome {
            event: Some(event),
            deviating: false,
        }
    }

    fn process_detection_frame(&mut self, readings: Sample, now_ms: u64) -> FrameOutcome {
        let Some(baseline) = self.baseline else {
            return FrameOutcome::quiet(false);
        };

        let caught = detector::is_caught(readings, baseline, self.config.threshold);

        if caught {
            self.subsequent_frames_caught += 1;
        } else {
            self.subsequent_frames_caught = 0;
            self.stuck_warned = false;
        }

        let mut event = None;

        // A lap boundary needs the rising edge of a caught run, outside
        // the debounce window of the previous catch
        if caught && matches!(self.state, TimerState::Armed | TimerState::Running) {
            let lap_time = now_ms.saturating_sub(self.last_catch_ms);

            if self.subsequent_frames_caught == 1 && lap_time >= self.config.catch_delay_ms {
                if self.state == TimerState::Running {
                    self.history.append(lap_time);
                    let lap = self.history.len();
                    if self.best_lap_ms.is_none_or(|best| lap_time < best) {
                        self.best_lap_ms = Some(lap_time);
                    }
                    self.last_catch_ms = now_ms;
                    info!("Lap {} completed: {} ms", lap, lap_time);
                    event = Some(FrameEvent::LapCompleted {
                        duration_ms: lap_time,
                        lap,
                    });
                } else {
                    // First pass after arming starts the clock, no lap yet
                    self.state = TimerState::Running;
                    self.start_ms = now_ms;
                    self.last_catch_ms = now_ms;
                    info!("First pass detected, timing started");
                    event = Some(FrameEvent::TimingStarted);
                }
            }
        }

        // Advisory only: a run this long means the points see a changed
        // scene, not a passing car
        if self.subsequent_frames_caught > self.config.stuck_trigger_frames && !self.stuck_warned {
            self.stuck_warned = true;
            warn!(
                "Sample points deviating for {} consecutive frames, possible miscalibration",
                self.subsequent_frames_caught
            );
            if event.is_none() {
                event = Some(FrameEvent::StuckTriggerWarning);
            }
        }

        FrameOutcome {
            event,
            deviating: caught,
        }
    }

    /// Arm the timer, or stop it if already armed/running
    ///
    /// Arming clears the lap history and best-lap tracking; the lap
    /// clock starts on the first accepted pass. Requesting start while
    /// armed or running acts as stop (start-button toggle).
    pub fn request_start(&mut self) -> Result<(), RequestError> {
        match self.state {
            TimerState::Armed | TimerState::Running => {
                self.stop();
                Ok(())
            }
            TimerState::Calibrated => {
                self.history.clear();
                self.best_lap_ms = None;
                self.start_ms = 0;
                self.state = TimerState::Armed;
                info!("Armed, waiting for first pass");
                Ok(())
            }
            TimerState::Idle | TimerState::Calibrating => {
                Err(RequestError::StartBlockedNotCalibrated)
            }
        }
    }

    /// Stop timing, retaining the lap history for export
    ///
    /// Succeeds as a no-op when nothing is armed or running.
    pub fn request_stop(&mut self) -> Result<(), RequestError> {
        if matches!(self.state, TimerState::Armed | TimerState::Running) {
            self.stop();
        }
        Ok(())
    }

    fn stop(&mut self) {
        self.state = TimerState::Calibrated;
        info!("Timing stopped after {} laps", self.history.len());
    }

    /// Begin a new calibration run, discarding baseline and history
    ///
    /// Rejected while the lap clock is running or while a run is
    /// already collecting. Allowed while armed: arming is cancelled.
    pub fn request_calibration(&mut self) -> Result<(), RequestError> {
        match self.state {
            TimerState::Running => Err(RequestError::CalibrationBlockedWhileRunning),
            TimerState::Calibrating => Err(RequestError::CalibrationAlreadyInProgress),
            TimerState::Idle | TimerState::Calibrated | TimerState::Armed => {
                self.calibrator.begin();
                self.baseline = None;
                self.history.clear();
                self.best_lap_ms = None;
                self.subsequent_frames_caught = 0;
                self.stuck_warned = false;
                self.last_catch_ms = 0;
                self.start_ms = 0;
                self.state = TimerState::Calibrating;
                info!("Calibration started");
                Ok(())
            }
        }
    }

    /// Set the sensitivity threshold, clamped to 0..=25
    ///
    /// Rejected while the lap clock is running; allowed while armed.
    pub fn set_threshold(&mut self, threshold: u8) -> Result<(), RequestError> {
        if self.state == TimerState::Running {
            return Err(RequestError::ThresholdBlockedWhileRunning);
        }
        self.config.threshold = threshold.min(MAX_THRESHOLD);
        Ok(())
    }

    /// Current state
    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Milliseconds since the lap clock started (0 unless running)
    ///
    /// The shell polls this at its own cadence to refresh a display;
    /// the engine owns no refresh loop.
    pub fn elapsed_millis(&self, now_ms: u64) -> u64 {
        if self.state == TimerState::Running {
            now_ms.saturating_sub(self.start_ms)
        } else {
            0
        }
    }

    /// Completed laps this session
    pub fn lap_count(&self) -> usize {
        self.history.len()
    }

    /// Lap history snapshot (chronological order)
    pub fn history(&self) -> &LapHistory {
        &self.history
    }

    /// Best lap this session (ms)
    pub fn best_lap_ms(&self) -> Option<u64> {
        self.best_lap_ms
    }

    /// Learned baseline, if calibrated
    pub fn baseline(&self) -> Option<Sample> {
        self.baseline
    }

    /// Current sensitivity threshold
    pub fn threshold(&self) -> u8 {
        self.config.threshold
    }
}

impl Default for LapTimer {
    fn default() -> Self {
        Self::new()
    }
}
