//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded, injectable RNG only
//! - Stable iteration order (by entity ID)
//! - Explicit context passed into every tick, no globals
//! - No rendering or platform dependencies

pub mod hazard;
pub mod ping;
pub mod rng;
pub mod run;
pub mod signal;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use hazard::{Edge, Hazard, HazardAdvance, HazardField};
pub use ping::{BurstResolution, PingBurst, PingCooldown, resolve_burst};
pub use rng::{ScriptedRng, SpawnRng, seeded};
pub use run::{EndReason, RunState};
pub use signal::Signal;
pub use snapshot::{BurstView, HazardView, RunSummary, Snapshot};
pub use state::{Phase, Player, SimState};
pub use tick::{TickEffects, TickInput, tick};
