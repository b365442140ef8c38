//! Simulation context
//!
//! Everything one run needs lives in [`SimState`]. There are no globals, so
//! several runs can be simulated side by side.

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::hazard::HazardField;
use super::ping::{PingBurst, PingCooldown};
use super::rng::{SpawnRng, seeded};
use super::run::RunState;
use super::signal::Signal;
use crate::consts::*;

/// Lifecycle of the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the start command
    #[default]
    PreRun,
    /// Active gameplay
    Running,
    /// Run finished; frozen until restart
    Ended,
}

/// The player's avatar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(ARENA_WIDTH * PLAYER_START_X, ARENA_HEIGHT * PLAYER_START_Y),
            radius: PLAYER_RADIUS,
        }
    }
}

impl Player {
    /// Move along a held axis at constant speed, staying inside the arena.
    /// Diagonals are normalized so they are not faster.
    pub fn step(&mut self, axis: Vec2, delta_ms: f32) {
        let dir = axis.normalize_or_zero();
        if dir == Vec2::ZERO {
            return;
        }
        let step = PLAYER_SPEED * delta_ms / 1000.0;
        let min = Vec2::splat(self.radius);
        let max = Vec2::new(ARENA_WIDTH - self.radius, ARENA_HEIGHT - self.radius);
        self.pos = (self.pos + dir * step).clamp(min, max);
    }
}

/// Complete simulation state for one run.
///
/// Generic over the spawn randomness so tests can drive the whole
/// orchestrator from a [`ScriptedRng`](super::rng::ScriptedRng).
#[derive(Debug, Clone)]
pub struct SimState<R = Pcg32> {
    /// Seed the current run was started with
    pub seed: u64,
    pub phase: Phase,
    pub run: RunState,
    pub player: Player,
    pub field: HazardField,
    /// Live bursts, oldest first
    pub bursts: Vec<PingBurst>,
    pub cooldown: PingCooldown,
    /// Signal the next ping will carry
    pub selected: Signal,
    /// Hazards cleared this run
    pub score: u64,
    /// Consecutive pings that hit something
    pub streak: u32,
    pub best_streak: u32,
    /// Spawn randomness
    pub rng: R,
}

impl SimState<Pcg32> {
    /// Create an idle simulation waiting in `PreRun`, seeding a `Pcg32`
    pub fn new(seed: u64) -> Self {
        Self::with_rng(seed, seeded(seed))
    }
}

impl<R: SpawnRng> SimState<R> {
    /// Create an idle simulation drawing spawns from `rng`
    pub fn with_rng(seed: u64, rng: R) -> Self {
        Self {
            seed,
            phase: Phase::PreRun,
            run: RunState::new(),
            player: Player::default(),
            field: HazardField::new(),
            bursts: Vec::new(),
            cooldown: PingCooldown::default(),
            selected: Signal::default(),
            score: 0,
            streak: 0,
            best_streak: 0,
            rng,
        }
    }

    /// Begin a run: reset every owned collection and the clock
    pub fn start(&mut self) {
        let seed = self.seed;
        self.start_with_seed(seed);
    }

    /// Begin a run with a new seed
    pub fn start_with_seed(&mut self, seed: u64) {
        self.seed = seed;
        self.phase = Phase::Running;
        self.run = RunState::new();
        self.player = Player::default();
        self.field.reset();
        self.bursts.clear();
        self.cooldown = PingCooldown::default();
        self.selected = Signal::default();
        self.score = 0;
        self.streak = 0;
        self.best_streak = 0;
        self.rng.reseed(seed);
        log::info!("Run started (seed {})", seed);
    }

    /// Same as [`SimState::start`]; valid from any phase
    pub fn restart(&mut self) {
        self.start();
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_ended(&self) -> bool {
        self.phase == Phase::Ended
    }

    pub(crate) fn record_hit_burst(&mut self) {
        self.streak += 1;
        self.best_streak = self.best_streak.max(self.streak);
    }

    pub(crate) fn break_streak(&mut self) {
        self.streak = 0;
    }
}
