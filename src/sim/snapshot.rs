//! Render-ready views of the simulation
//!
//! The presentation layer reads these after each tick. Nothing here feeds
//! back into gameplay.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::run::EndReason;
use super::rng::SpawnRng;
use super::signal::Signal;
use super::state::{Phase, SimState};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HazardView {
    pub id: u32,
    pub kind: Signal,
    pub pos: Vec2,
    pub radius: f32,
    pub active: bool,
    /// 0-1 while telegraphing, 1 once active
    pub telegraph: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BurstView {
    pub kind: Signal,
    pub origin: Vec2,
    pub radius: f32,
    /// 0-1 expansion progress (fade out as it grows)
    pub progress: f32,
}

/// Everything needed to draw one frame and its HUD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub player: Vec2,
    pub player_radius: f32,
    pub hazards: Vec<HazardView>,
    pub bursts: Vec<BurstView>,
    /// 0-100
    pub trust_percent: f32,
    pub time_left_ms: f32,
    pub score: u64,
    pub streak: u32,
    pub selected: Signal,
    pub ping_ready: bool,
    pub ping_cooldown_ms: f32,
    /// Show onboarding hints
    pub first_wave: bool,
    pub end_reason: EndReason,
}

/// End-of-run record handed to the end card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub end_reason: EndReason,
    pub elapsed_ms: u32,
    pub score: u64,
    pub best_streak: u32,
}

impl<R: SpawnRng> SimState<R> {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            player: self.player.pos,
            player_radius: self.player.radius,
            hazards: self
                .field
                .hazards
                .iter()
                .map(|h| HazardView {
                    id: h.id,
                    kind: h.kind,
                    pos: h.pos,
                    radius: h.radius,
                    active: h.active,
                    telegraph: h.telegraph_progress(),
                })
                .collect(),
            bursts: self
                .bursts
                .iter()
                .map(|b| BurstView {
                    kind: b.kind,
                    origin: b.origin,
                    radius: b.current_radius(),
                    progress: b.progress(),
                })
                .collect(),
            trust_percent: self.run.trust,
            time_left_ms: self.run.time_left_ms(),
            score: self.score,
            streak: self.streak,
            selected: self.selected,
            ping_ready: self.cooldown.is_ready(),
            ping_cooldown_ms: self.cooldown.remaining_ms,
            first_wave: crate::tuning::is_in_first_wave(self.run.elapsed_ms),
            end_reason: self.run.end_reason,
        }
    }

    /// Final results, available once the run has ended
    pub fn summary(&self) -> Option<RunSummary> {
        if self.phase != Phase::Ended {
            return None;
        }
        Some(RunSummary {
            end_reason: self.run.end_reason,
            elapsed_ms: self.run.elapsed_ms.round() as u32,
            score: self.score,
            best_streak: self.best_streak,
        })
    }
}
