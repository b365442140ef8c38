//! Trust Ping headless runner
//!
//! Plays one full run with a simple autopilot and prints the end-of-run
//! summary as JSON. Useful for balance checks and replaying seeds.
//!
//! Usage: `trust-ping [seed] [--settings path.json]`

use std::error::Error;

use glam::Vec2;

use trust_ping::{FrameMonitor, Settings};
use trust_ping::consts::*;
use trust_ping::sim::{SimState, Snapshot, TickInput, tick};

const DEFAULT_SEED: u64 = 20_260_219;
/// Host frame rate the runner pretends to render at
const FRAME_MS: f32 = 1000.0 / 60.0;
/// Autopilot pings when a target is this close
const PING_REACH: f32 = 180.0;

struct Args {
    seed: u64,
    settings: Option<String>,
}

fn parse_args() -> Result<Args, Box<dyn Error>> {
    let mut args = Args {
        seed: DEFAULT_SEED,
        settings: None,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--settings" => {
                args.settings = Some(iter.next().ok_or("--settings needs a path")?);
            }
            other => args.seed = other.parse()?,
        }
    }
    Ok(args)
}

/// Head away from the closest live threat and ping at the nearest hazard's kind
fn autopilot(snap: &Snapshot) -> TickInput {
    let nearest = snap.hazards.iter().min_by(|a, b| {
        a.pos
            .distance_squared(snap.player)
            .total_cmp(&b.pos.distance_squared(snap.player))
    });
    let Some(target) = nearest else {
        // Drift back toward the middle while the arena is empty
        let home = trust_ping::arena_center() - snap.player;
        return TickInput {
            move_axis: if home.length() > 40.0 { home.normalize() } else { Vec2::ZERO },
            ..Default::default()
        };
    };

    let away = snap.player - target.pos;
    TickInput {
        move_axis: if target.active { away.normalize_or_zero() } else { Vec2::ZERO },
        emit_ping: snap.ping_ready && away.length() <= PING_REACH,
        select: Some(target.kind),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args()?;
    let settings = match &args.settings {
        Some(path) => Settings::from_json(&std::fs::read_to_string(path)?)?,
        None => Settings::default(),
    };
    log::info!("Settings: {:?}", settings);

    let mut state = SimState::new(args.seed);
    state.start();

    let mut monitor = FrameMonitor::new();
    let mut frames: u64 = 0;
    while state.is_running() {
        let input = autopilot(&state.snapshot());
        let effects = tick(&mut state, &input, FRAME_MS);
        monitor.record(FRAME_MS);
        frames += 1;

        if effects.score_delta > 0 {
            log::debug!(
                "t={:.1}s {} cleared {} (streak {}, trust {:.1})",
                state.run.elapsed_ms / 1000.0,
                state.selected.label(),
                effects.score_delta,
                effects.streak,
                state.run.trust
            );
        }
        // Safety net against a stuck clock
        if frames as f32 * FRAME_MS > RUN_DURATION_MS * 2.0 {
            return Err("run did not terminate".into());
        }
    }

    log::info!(
        "{} frames, avg {:.1}ms, render quality {}, trust left {:.0}%",
        frames,
        monitor.average_ms(),
        settings.effective_quality(&monitor).as_str(),
        state.run.trust_fraction() * 100.0
    );

    let summary = state.summary().ok_or("run ended without a summary")?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
