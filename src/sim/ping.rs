//! Ping bursts and hazard matching
//!
//! A ping is an expanding ring tagged with a [`Signal`]. Each tick, every
//! live burst is checked against every live hazard; a hazard is cleared only
//! when its kind matches exactly and it overlaps the ring's current radius.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::hazard::Hazard;
use super::signal::Signal;
use crate::consts::*;

/// One emitted pulse
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PingBurst {
    pub kind: Signal,
    pub origin: Vec2,
    pub age_ms: f32,
    pub life_ms: f32,
    pub max_radius: f32,
    /// Hazards this burst has cleared so far
    pub hits: u32,
}

impl PingBurst {
    /// Fresh burst with the standard life and reach
    pub fn new(kind: Signal, origin: Vec2) -> Self {
        Self::with_shape(kind, origin, PING_LIFE_MS, PING_MAX_RADIUS)
    }

    pub fn with_shape(kind: Signal, origin: Vec2, life_ms: f32, max_radius: f32) -> Self {
        Self {
            kind,
            origin,
            age_ms: 0.0,
            life_ms: life_ms.max(f32::EPSILON),
            max_radius: max_radius.max(0.0),
            hits: 0,
        }
    }

    /// Expansion progress 0-1
    pub fn progress(&self) -> f32 {
        crate::clamp_unit(self.age_ms / self.life_ms)
    }

    /// Ring radius right now
    pub fn current_radius(&self) -> f32 {
        self.max_radius * self.progress()
    }

    pub fn is_expired(&self) -> bool {
        self.age_ms >= self.life_ms
    }

    pub fn age(&mut self, delta_ms: f32) {
        self.age_ms += crate::sanitize_delta_ms(delta_ms);
    }

    /// Match rule: exact kind and overlapping the current ring
    pub fn clears(&self, hazard: &Hazard) -> bool {
        self.kind.matches(hazard.kind) && hazard.overlaps(self.origin, self.current_radius())
    }
}

/// Result of resolving one burst against the field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BurstResolution {
    pub survivors: Vec<Hazard>,
    pub cleared_count: u32,
    /// Flat reward: cleared_count * TRUST_REWARD_PER_CLEAR
    pub trust_delta: f32,
}

/// Partition `hazards` into cleared and surviving for `burst`.
///
/// Wrong-kind hazards survive untouched even when inside the ring; there is
/// no penalty for a mismatched ping. Survivor order is preserved.
pub fn resolve_burst(hazards: Vec<Hazard>, burst: &PingBurst) -> BurstResolution {
    let (cleared, survivors): (Vec<Hazard>, Vec<Hazard>) =
        hazards.into_iter().partition(|h| burst.clears(h));
    let cleared_count = cleared.len() as u32;

    if cleared_count > 0 {
        log::trace!(
            "{:?} burst r={:.0} cleared {:?}",
            burst.kind,
            burst.current_radius(),
            cleared.iter().map(|h| h.id).collect::<Vec<_>>()
        );
    }

    BurstResolution {
        survivors,
        cleared_count,
        trust_delta: cleared_count as f32 * TRUST_REWARD_PER_CLEAR,
    }
}

/// Emission gate. A ping can fire only when the timer is at zero; firing
/// restarts it and extra presses are dropped, not queued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PingCooldown {
    pub remaining_ms: f32,
}

impl PingCooldown {
    pub fn is_ready(&self) -> bool {
        self.remaining_ms <= 0.0
    }

    pub fn tick(&mut self, delta_ms: f32) {
        self.remaining_ms = (self.remaining_ms - crate::sanitize_delta_ms(delta_ms)).max(0.0);
    }

    /// Try to fire. Returns false if still cooling down.
    pub fn try_fire(&mut self) -> bool {
        if !self.is_ready() {
            return false;
        }
        self.remaining_ms = PING_COOLDOWN_MS;
        true
    }

    /// Cooldown fill 0-1 (1 = ready)
    pub fn readiness(&self) -> f32 {
        1.0 - crate::clamp_unit(self.remaining_ms / PING_COOLDOWN_MS)
    }
}
