//! Photogate — optical lap timing engine
//!
//! Converts brightness readings from three fixed sample points in a
//! camera feed into lap times for a small vehicle circling a track.
//! The engine is the detection-and-timing core only: the shell that
//! owns the camera, UI, sound and file delivery feeds frames in and
//! consumes events out.
//!
//! ## Features
//!
//! - **Auto-calibration**: learns a per-point brightness baseline from
//!   a 20-frame window of the empty track
//! - **Threshold edge detection**: a pass is any point deviating beyond
//!   a configurable sensitivity threshold
//! - **Debounced lap boundaries**: rising-edge plus time-window
//!   filtering turns a multi-frame occlusion into exactly one lap
//! - **Lap bookkeeping**: chronological history with best/worst views,
//!   text and CSV export
//! - **Failure advisory**: stuck-trigger warning when the scene stops
//!   matching the baseline
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Shell (camera, UI, export delivery)    │
//! ├─────────────────────────────────────────┤
//! │  LapTimer (state machine, debounce)     │
//! ├─────────────────────────────────────────┤
//! │  Calibrator · detector · LapHistory     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use photogate::{FrameEvent, LapTimer, TimerState};
//!
//! let mut timer = LapTimer::new();
//!
//! // Point the camera at the empty track and calibrate
//! timer.request_calibration().unwrap();
//! for frame in 0..20 {
//!     timer.process_frame([100, 100, 100], frame * 40);
//! }
//! assert_eq!(timer.state(), TimerState::Calibrated);
//!
//! // Arm the timer; the clock starts on the first pass
//! timer.request_start().unwrap();
//! timer.process_frame([140, 100, 100], 5000);
//! assert_eq!(timer.state(), TimerState::Running);
//!
//! // The next pass completes lap 1
//! timer.process_frame([100, 100, 100], 5040);
//! let outcome = timer.process_frame([140, 100, 100], 8200);
//! assert_eq!(
//!     outcome.event,
//!     Some(FrameEvent::LapCompleted { duration_ms: 3200, lap: 1 })
//! );
//! ```
//!
//! ## Modules
//!
//! - [`timer`] - Lap timer state machine, the main entry point
//! - [`calibration`] - Baseline learning over a fixed frame window
//! - [`detector`] - Pure threshold edge detection
//! - [`history`] - Lap history with derived queries
//! - [`format`] - `M:SS:D` display formatting
//! - [`export`] - Text and CSV session rendering
//! - [`fps`] - Frame-rate measurement
//! - [`config`] - Configuration and shared constants

pub mod calibration;
pub mod config;
pub mod detector;
pub mod export;
pub mod format;
pub mod fps;
pub mod history;
pub mod timer;

// Re-export commonly used types
pub use calibration::{CalibrationError, CalibrationProgress, Calibrator};
pub use config::{Sample, TimerConfig};
pub use format::format_time;
pub use history::LapHistory;
pub use timer::{FrameEvent, FrameOutcome, LapTimer, RequestError, TimerState};
