//! Simulates a timing session to verify the detection-and-timing engine
//!
//! Feeds the engine a synthetic 25 fps brightness stream: a static
//! track scene with sensor noise, interrupted by short occlusions each
//! time the simulated car passes the camera point.
//!
//! **Key test**: each multi-frame occlusion must register as exactly
//! one lap, noise must never register at all, and the reported lap
//! times must match the simulated pass spacing.
//!
//! Run with: cargo run --example pass_sim

use photogate::fps::FrameRateCounter;
use photogate::{export, format_time, FrameEvent, LapTimer, TimerState};

/// Frame interval for the simulated 25 fps camera (ms)
const FRAME_MS: u64 = 40;

/// Ambient brightness of the empty track scene
const SCENE: u8 = 120;

/// Simple pseudo-random noise generator (deterministic for reproducibility)
struct NoiseGen {
    state: u32,
}

impl NoiseGen {
    fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Returns noise in range [-amplitude, +amplitude]
    fn next(&mut self, amplitude: i32) -> i32 {
        // Simple LCG
        self.state = self.state.wrapping_mul(1103515245).wrapping_add(12345);
        let span = 2 * amplitude + 1;
        (self.state >> 16) as i32 % span - amplitude
    }
}

/// One frame of readings: the noisy scene, darkened where occluded
fn scene_frame(noise: &mut NoiseGen, occluded: bool) -> [u8; 3] {
    let mut readings = [0u8; 3];
    for value in readings.iter_mut() {
        let base = if occluded { SCENE as i32 - 60 } else { SCENE as i32 };
        *value = (base + noise.next(3)).clamp(0, 255) as u8;
    }
    readings
}

fn main() {
    let mut timer = LapTimer::new();
    let mut noise = NoiseGen::new(42);
    let mut fps = FrameRateCounter::new();
    let mut now: u64 = 0;

    println!("=== Photogate Pass Detection Simulation ===\n");
    println!("Scene brightness {}, noise ±3, threshold {}\n", SCENE, timer.threshold());

    // Phase 1: calibrate against the empty track
    println!("Phase 1: CALIBRATION (20 frames)");
    timer.request_calibration().unwrap();
    while timer.state() == TimerState::Calibrating {
        let outcome = timer.process_frame(scene_frame(&mut noise, false), now);
        fps.tick(now);
        now += FRAME_MS;
        if let Some(FrameEvent::CalibrationComplete) = outcome.event {
            println!("  Baseline learned: {:?}\n", timer.baseline().unwrap());
        }
    }

    // Phase 2: arm and run six passes; the first only starts the clock
    println!("Phase 2: TIMING (6 passes, 5 laps)");
    timer.request_start().unwrap();
    let pass_gaps_ms = [2000, 4200, 3900, 4600, 4050, 3780];

    for gap in pass_gaps_ms {
        // Quiet frames until the next pass
        let quiet_frames = gap / FRAME_MS;
        for _ in 0..quiet_frames {
            timer.process_frame(scene_frame(&mut noise, false), now);
            fps.tick(now);
            now += FRAME_MS;
        }

        // The car occludes the sample points for 3 consecutive frames
        for _ in 0..3 {
            let outcome = timer.process_frame(scene_frame(&mut noise, true), now);
            fps.tick(now);
            now += FRAME_MS;
            match outcome.event {
                Some(FrameEvent::TimingStarted) => {
                    println!("  t={:>6} ms  first pass, clock started", now - FRAME_MS);
                }
                Some(FrameEvent::LapCompleted { duration_ms, lap }) => {
                    println!(
                        "  t={:>6} ms  lap {} completed in {} ({} ms)",
                        now - FRAME_MS,
                        lap,
                        format_time(duration_ms),
                        duration_ms
                    );
                }
                _ => {}
            }
        }
    }

    timer.request_stop().unwrap();

    // Phase 3: session summary
    println!("\nPhase 3: SUMMARY");
    println!("  Measured frame rate: {} fps", fps.fps());
    let history = timer.history();
    if let (Some((best_idx, best)), Some((worst_idx, worst))) = (history.best(), history.worst()) {
        println!("  Best lap:  {} ({})", format_time(best), best_idx + 1);
        println!("  Worst lap: {} ({})", format_time(worst), worst_idx + 1);
    }

    println!("\n--- text export ---\n{}", export::to_text(history));
    println!("--- csv export ---\n{}", export::to_csv(history));
}
