//! Run clock and trust model
//!
//! `RunState` is a small value type. Every mutator takes the state by value
//! and returns the next one, so a tick never exposes a half-applied change.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sanitize_delta_ms;

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndReason {
    /// Run still in progress
    #[default]
    None,
    /// Trust was exhausted
    Trust,
    /// The clock ran out with trust remaining
    Timeout,
}

/// Clock and trust for one run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    pub elapsed_ms: f32,
    pub trust: f32,
    pub ended: bool,
    pub end_reason: EndReason,
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}

impl RunState {
    /// Fresh run: full trust, nothing elapsed
    pub fn new() -> Self {
        Self {
            elapsed_ms: 0.0,
            trust: MAX_TRUST,
            ended: false,
            end_reason: EndReason::None,
        }
    }

    /// Advance the clock, never past the run duration
    #[must_use]
    pub fn advance_clock(self, delta_ms: f32) -> Self {
        if self.ended {
            return self;
        }
        let elapsed_ms = (self.elapsed_ms + sanitize_delta_ms(delta_ms)).min(RUN_DURATION_MS);
        Self { elapsed_ms, ..self }.resolve_end()
    }

    /// Add (or remove) trust, clamped to [MIN_TRUST, MAX_TRUST]
    #[must_use]
    pub fn apply_trust_delta(self, delta: f32) -> Self {
        if self.ended || delta.is_nan() {
            return self;
        }
        let trust = (self.trust + delta).clamp(MIN_TRUST, MAX_TRUST);
        Self { trust, ..self }.resolve_end()
    }

    /// Milliseconds remaining in the run
    pub fn time_left_ms(&self) -> f32 {
        (RUN_DURATION_MS - self.elapsed_ms).max(0.0)
    }

    /// Trust as a 0-1 fraction (for meters)
    pub fn trust_fraction(&self) -> f32 {
        (self.trust / MAX_TRUST).clamp(0.0, 1.0)
    }

    /// Run progress as a 0-1 fraction
    pub fn progress(&self) -> f32 {
        (self.elapsed_ms / RUN_DURATION_MS).clamp(0.0, 1.0)
    }

    /// Check end conditions. Trust is checked first and wins a tie with timeout.
    fn resolve_end(self) -> Self {
        if self.ended {
            return self;
        }
        if self.trust <= MIN_TRUST {
            return Self {
                trust: MIN_TRUST,
                ended: true,
                end_reason: EndReason::Trust,
                ..self
            };
        }
        if self.elapsed_ms >= RUN_DURATION_MS {
            return Self {
                elapsed_ms: RUN_DURATION_MS,
                ended: true,
                end_reason: EndReason::Timeout,
                ..self
            };
        }
        self
    }
}
