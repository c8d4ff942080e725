//! Skyward - headless flight and procedural space population demo.
//!
//! Usage: `skyward [config.ron] [seconds]`. With no window to read from, a
//! scripted pilot feeds keyboard and mouse events through the same input
//! path a windowed build would use.

mod config;
mod flight;
mod rotation;
mod simulation;

use anyhow::{Context, Result};
use flight::FlightPhase;
use input::{ElementState, InputState, KeyCode, MouseButton};
use simulation::Simulation;
use std::path::PathBuf;
use std::time::Duration;

const FRAME_RATE: f64 = 60.0;
const DEFAULT_RUN_SECONDS: f64 = 90.0;
const REPORT_INTERVAL_SECONDS: f64 = 5.0;

/// Keys the scripted pilot can hold.
const PILOT_KEYS: [KeyCode; 4] = [KeyCode::Space, KeyCode::KeyW, KeyCode::ShiftLeft, KeyCode::KeyQ];

/// Feed this frame's scripted events into `input`.
fn drive_autopilot(input: &mut InputState, t: f64, phase: FlightPhase) {
    let flying = phase == FlightPhase::Flying;
    let rolling = flying && (t % 15.0) < 1.0;

    for key in PILOT_KEYS {
        let held = match key {
            KeyCode::Space => phase == FlightPhase::Grounded,
            KeyCode::KeyW | KeyCode::ShiftLeft => flying,
            KeyCode::KeyQ => rolling,
            _ => false,
        };
        let state = if held {
            ElementState::Pressed
        } else {
            ElementState::Released
        };
        input.process_keyboard(key, state);
    }

    if flying {
        // A slow right turn with a little nose-up wobble.
        let wobble = (t * 0.5).sin();
        input.process_mouse_motion((1.5, -wobble));
    }

    // Let go of the cursor for ten seconds mid-run, then click back in.
    let frame = 1.0 / FRAME_RATE;
    if (30.0..30.0 + frame).contains(&t) {
        input.process_keyboard(KeyCode::Escape, ElementState::Pressed);
    } else {
        input.process_keyboard(KeyCode::Escape, ElementState::Released);
    }
    if (40.0..40.0 + frame).contains(&t) {
        input.process_mouse_button(MouseButton::Left, ElementState::Pressed);
    } else {
        input.process_mouse_button(MouseButton::Left, ElementState::Released);
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let config_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(config::default_config_path);
    let run_seconds = match args.next() {
        Some(s) => s
            .parse::<f64>()
            .with_context(|| format!("invalid run length {s:?}"))?,
        None => DEFAULT_RUN_SECONDS,
    };

    let config = config::GameConfig::load_from(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    let mut sim = Simulation::new(&config).context("invalid configuration")?;

    log::info!("Starting Skyward for {run_seconds}s");

    let mut input = InputState::new();
    input.set_cursor_locked(true);

    let frame = Duration::from_secs_f64(1.0 / FRAME_RATE);
    let mut next_report = REPORT_INTERVAL_SECONDS;
    let mut t = 0.0;
    while t < run_seconds {
        drive_autopilot(&mut input, t, sim.flight().phase());
        if let Some(locked) = input.update_cursor_capture() {
            log::info!("Control {}", if locked { "captured" } else { "released" });
        }
        input.begin_frame();

        let snapshot = input.snapshot();
        sim.frame(frame, &snapshot, input.is_cursor_locked());

        t += 1.0 / FRAME_RATE;
        if t >= next_report {
            next_report += REPORT_INTERVAL_SECONDS;
            let state = sim.flight().state();
            let report = sim.last_report();
            log::info!(
                "t={:.0}s {:?} pos=({:.0}, {:.0}, {:.0}) speed={:.1} bodies={} active={} evicted={}",
                sim.time().elapsed_seconds(),
                state.phase,
                state.position.x,
                state.position.y,
                state.position.z,
                state.velocity.length(),
                sim.bodies().len(),
                report.active,
                report.evicted,
            );
        }
    }

    log::info!(
        "Finished after {} frames with {} bodies registered",
        sim.time().frame_count(),
        sim.generator().bodies().len()
    );
    Ok(())
}
