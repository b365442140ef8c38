//! Hazard field: spawning, telegraph, homing and contact drain
//!
//! Hazards enter from a random arena edge, sit harmless for their telegraph
//! window, then home in on the player. Touching an active hazard drains
//! trust continuously.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rng::SpawnRng;
use super::run::RunState;
use super::signal::Signal;
use crate::consts::*;
use crate::tuning::{spawn_interval_ms, telegraph_from_unit};

/// Arena edge a hazard enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    pub fn from_unit(sample: f32) -> Self {
        let idx = (crate::clamp_unit(sample) * 4.0) as usize;
        Self::ALL[idx.min(3)]
    }

    /// Spawn point for a position `t` (0-1) along this edge, outside the arena
    pub fn spawn_point(&self, t: f32) -> Vec2 {
        let t = crate::clamp_unit(t);
        match self {
            Edge::Top => Vec2::new(t * ARENA_WIDTH, -HAZARD_SPAWN_MARGIN),
            Edge::Right => Vec2::new(ARENA_WIDTH + HAZARD_SPAWN_MARGIN, t * ARENA_HEIGHT),
            Edge::Bottom => Vec2::new(t * ARENA_WIDTH, ARENA_HEIGHT + HAZARD_SPAWN_MARGIN),
            Edge::Left => Vec2::new(-HAZARD_SPAWN_MARGIN, t * ARENA_HEIGHT),
        }
    }
}

/// A single threat
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub id: u32,
    pub kind: Signal,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Homing speed once active (units/s)
    pub speed: f32,
    pub age_ms: f32,
    /// Time before the hazard becomes dangerous
    pub telegraph_ms: f32,
    pub active: bool,
}

impl Hazard {
    /// Inactive hazard at rest with minimum speed and telegraph
    pub fn new(id: u32, kind: Signal, pos: Vec2, radius: f32) -> Self {
        Self {
            id,
            kind,
            pos,
            vel: Vec2::ZERO,
            radius,
            speed: HAZARD_MIN_SPEED,
            age_ms: 0.0,
            telegraph_ms: crate::tuning::TELEGRAPH_MIN_MS,
            active: false,
        }
    }

    /// Roll a new hazard at a random edge
    pub fn spawn<R: SpawnRng + ?Sized>(id: u32, rng: &mut R) -> Self {
        let edge = Edge::from_unit(rng.unit());
        let pos = edge.spawn_point(rng.unit());
        let kind = Signal::from_unit(rng.unit());
        let speed = rng.span(HAZARD_MIN_SPEED, HAZARD_SPEED_RANGE);
        let radius = rng.span(HAZARD_MIN_RADIUS, HAZARD_RADIUS_RANGE);
        let telegraph_ms = telegraph_from_unit(rng.unit());
        Self {
            speed,
            telegraph_ms,
            ..Self::new(id, kind, pos, radius)
        }
    }

    /// Circle overlap with another body (touching counts)
    #[inline]
    pub fn overlaps(&self, center: Vec2, radius: f32) -> bool {
        self.pos.distance(center) <= self.radius + radius
    }

    /// Telegraph progress 0-1 (1 once active)
    pub fn telegraph_progress(&self) -> f32 {
        if self.active {
            1.0
        } else {
            crate::clamp_unit(self.age_ms / self.telegraph_ms)
        }
    }

    /// Still within the despawn margin around the arena
    pub fn in_bounds(&self) -> bool {
        let m = HAZARD_DESPAWN_MARGIN;
        self.pos.x > -m
            && self.pos.x < ARENA_WIDTH + m
            && self.pos.y > -m
            && self.pos.y < ARENA_HEIGHT + m
    }

    /// Age by `delta_ms`, flipping to active once the telegraph has elapsed
    fn age(&mut self, delta_ms: f32) {
        self.age_ms += delta_ms;
        if !self.active && self.age_ms >= self.telegraph_ms {
            self.active = true;
        }
    }

    /// Steer toward `target` at full speed and integrate
    fn home(&mut self, target: Vec2, dt: f32) {
        self.vel = (target - self.pos).normalize_or_zero() * self.speed;
        self.pos += self.vel * dt;
    }
}

/// Outcome of moving the field for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HazardAdvance {
    /// Trust change from contact (zero or negative)
    pub trust_delta: f32,
    /// Active hazards touching the player this tick
    pub contacts: u32,
    /// Hazards that drifted out of bounds and were dropped
    pub lost: u32,
}

impl HazardAdvance {
    /// Contact actually cost trust this tick
    pub fn drained(&self) -> bool {
        self.trust_delta < 0.0
    }
}

/// All live hazards plus spawn bookkeeping
#[derive(Debug, Clone)]
pub struct HazardField {
    /// Live hazards (spawn order, ascending id)
    pub hazards: Vec<Hazard>,
    spawn_accumulator_ms: f32,
    next_id: u32,
}

impl Default for HazardField {
    fn default() -> Self {
        Self::new()
    }
}

impl HazardField {
    pub fn new() -> Self {
        Self {
            hazards: Vec::new(),
            spawn_accumulator_ms: 0.0,
            next_id: 1,
        }
    }

    /// Drop all hazards and reset spawn timing
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn len(&self) -> usize {
        self.hazards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hazards.is_empty()
    }

    /// Accumulate time and spawn one hazard per elapsed interval.
    /// Returns the number spawned.
    pub fn spawn_tick<R: SpawnRng + ?Sized>(
        &mut self,
        run: &RunState,
        delta_ms: f32,
        rng: &mut R,
    ) -> usize {
        let interval = spawn_interval_ms(run.progress());
        self.spawn_accumulator_ms += crate::sanitize_delta_ms(delta_ms);

        let mut spawned = 0;
        while self.spawn_accumulator_ms >= interval {
            self.spawn_accumulator_ms -= interval;
            let id = self.next_id;
            self.next_id += 1;
            let hazard = Hazard::spawn(id, rng);
            log::debug!(
                "Spawn hazard {} {:?} at ({:.0}, {:.0}), telegraph {:.0}ms",
                hazard.id,
                hazard.kind,
                hazard.pos.x,
                hazard.pos.y,
                hazard.telegraph_ms
            );
            self.hazards.push(hazard);
            spawned += 1;
        }
        spawned
    }

    /// Age, activate, home and collide every hazard, then drop strays
    pub fn advance(&mut self, delta_ms: f32, player_pos: Vec2, player_radius: f32) -> HazardAdvance {
        let delta_ms = crate::sanitize_delta_ms(delta_ms);
        let dt = delta_ms / 1000.0;
        let mut report = HazardAdvance::default();

        for hazard in &mut self.hazards {
            hazard.age(delta_ms);
            if !hazard.active {
                continue;
            }

            // Contact is judged from the position at the start of the step
            let touching = hazard.overlaps(player_pos, player_radius);
            hazard.home(player_pos, dt);

            if touching {
                report.contacts += 1;
                report.trust_delta -= TRUST_DRAIN_PER_SECOND * dt;
            }
        }

        let before = self.hazards.len();
        self.hazards.retain(Hazard::in_bounds);
        report.lost = (before - self.hazards.len()) as u32;

        report
    }
}
