//! Per-frame simulation tick
//!
//! Core game loop that advances a run. Steps run in a fixed order: clock,
//! player, cooldown and emission, spawning, hazard movement and contact,
//! burst resolution, burst expiry. Any step that ends the run stops the
//! remaining steps for that tick.

use glam::Vec2;

use super::ping::{PingBurst, resolve_burst};
use super::rng::SpawnRng;
use super::run::EndReason;
use super::signal::Signal;
use super::state::{Phase, SimState};
use crate::consts::*;
use crate::sanitize_delta_ms;

/// Input snapshot for a single tick, built once per frame by the host
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Held movement, each component in [-1, 1] (x right, y down)
    pub move_axis: Vec2,
    /// Ping button went down this frame (edge-triggered)
    pub emit_ping: bool,
    /// New ping selection, if the player changed it
    pub select: Option<Signal>,
}

impl TickInput {
    /// Build the movement axis from held direction keys
    pub fn from_held(up: bool, down: bool, left: bool, right: bool) -> Self {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Self {
            move_axis: Vec2::new(axis(left, right), axis(up, down)),
            ..Default::default()
        }
    }

    /// Movement axis with NaN removed and components clamped
    fn clamped_axis(&self) -> Vec2 {
        let clean = |v: f32| if v.is_nan() { 0.0 } else { v.clamp(-1.0, 1.0) };
        Vec2::new(clean(self.move_axis.x), clean(self.move_axis.y))
    }
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickEffects {
    /// Hazards cleared this tick (added to score)
    pub score_delta: u32,
    /// Streak after this tick
    pub streak: u32,
    /// A burst was emitted this tick
    pub pinged: bool,
    /// Player took contact damage this tick
    pub hit: bool,
    /// Hazards spawned this tick
    pub spawned: u32,
    pub ended: bool,
    pub end_reason: EndReason,
}

impl TickEffects {
    fn idle<R: SpawnRng>(state: &SimState<R>) -> Self {
        Self {
            streak: state.streak,
            ended: state.run.ended,
            end_reason: state.run.end_reason,
            ..Default::default()
        }
    }
}

/// Advance the simulation by one frame.
///
/// `delta_ms` is wall-clock time since the previous frame. Negative values
/// count as zero and large values are capped at [`MAX_TICK_MS`]. Outside
/// `Running` this is a no-op.
pub fn tick<R: SpawnRng>(state: &mut SimState<R>, input: &TickInput, delta_ms: f32) -> TickEffects {
    if state.phase != Phase::Running {
        return TickEffects::idle(state);
    }

    let dt_ms = sanitize_delta_ms(delta_ms).min(MAX_TICK_MS);
    let mut effects = TickEffects::default();

    // Clock first: a tick that times out does nothing else
    state.run = state.run.advance_clock(dt_ms);
    if state.run.ended {
        return finish(state, effects);
    }

    // Player
    state.player.step(input.clamped_axis(), dt_ms);

    // Ping selection and emission
    if let Some(signal) = input.select {
        state.selected = signal;
    }
    state.cooldown.tick(dt_ms);
    if input.emit_ping && state.cooldown.try_fire() {
        state.bursts.push(PingBurst::new(state.selected, state.player.pos));
        effects.pinged = true;
    }

    // Hazards
    effects.spawned = state.field.spawn_tick(&state.run, dt_ms, &mut state.rng) as u32;
    let contact = state
        .field
        .advance(dt_ms, state.player.pos, state.player.radius);
    if contact.drained() {
        state.run = state.run.apply_trust_delta(contact.trust_delta);
        state.break_streak();
        effects.hit = true;
    }
    if state.run.ended {
        return finish(state, effects);
    }

    // Bursts against hazards
    let mut hazards = std::mem::take(&mut state.field.hazards);
    let mut first_hits = 0;
    for burst in &mut state.bursts {
        burst.age(dt_ms);
        if hazards.is_empty() {
            continue;
        }
        let resolution = resolve_burst(hazards, burst);
        hazards = resolution.survivors;
        if resolution.cleared_count == 0 {
            continue;
        }
        if burst.hits == 0 {
            first_hits += 1;
        }
        burst.hits += resolution.cleared_count;
        effects.score_delta += resolution.cleared_count;
        state.run = state.run.apply_trust_delta(resolution.trust_delta);
    }
    state.field.hazards = hazards;
    state.score += effects.score_delta as u64;
    for _ in 0..first_hits {
        state.record_hit_burst();
    }

    // Expire bursts; one that faded without a hit breaks the streak
    let mut missed = false;
    state.bursts.retain(|burst| {
        if burst.is_expired() {
            missed |= burst.hits == 0;
            false
        } else {
            true
        }
    });
    if missed {
        state.break_streak();
    }

    effects.streak = state.streak;
    effects
}

/// Freeze the run and report the final state
fn finish<R: SpawnRng>(state: &mut SimState<R>, mut effects: TickEffects) -> TickEffects {
    state.phase = Phase::Ended;
    log::info!(
        "Run ended: {:?} at {:.1}s, score {}, best streak {}",
        state.run.end_reason,
        state.run.elapsed_ms / 1000.0,
        state.score,
        state.best_streak
    );
    effects.streak = state.streak;
    effects.ended = true;
    effects.end_reason = state.run.end_reason;
    effects
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::hazard::Hazard;
    use crate::sim::rng::ScriptedRng;

    const FRAME_MS: f32 = 1000.0 / 60.0;

    fn running(seed: u64) -> SimState {
        let mut state = SimState::new(seed);
        state.start();
        state
    }

    fn ping(signal: Signal) -> TickInput {
        TickInput {
            emit_ping: true,
            select: Some(signal),
            ..Default::default()
        }
    }

    /// Active hazard parked next to the player, too slow to move much
    fn parked_hazard<R: SpawnRng>(state: &mut SimState<R>, id: u32, kind: Signal, offset: Vec2) {
        let mut hazard = Hazard::new(id, kind, state.player.pos + offset, 20.0);
        hazard.active = true;
        hazard.speed = 0.0;
        state.field.hazards.push(hazard);
    }

    #[test]
    fn test_pre_run_tick_is_noop() {
        let mut state = SimState::new(1);
        let effects = tick(&mut state, &TickInput::default(), FRAME_MS);
        assert_eq!(state.phase, Phase::PreRun);
        assert_eq!(state.run.elapsed_ms, 0.0);
        assert!(!effects.ended);
    }

    #[test]
    fn test_delta_is_capped() {
        let mut state = running(1);
        state
            .field
            .hazards
            .push(Hazard::new(100, Signal::Safe, Vec2::new(100.0, 100.0), 20.0));

        let effects = tick(&mut state, &ping(Signal::Warn), 5_000.0);
        assert!(effects.pinged);
        assert_eq!(effects.spawned, 0);
        assert_eq!(state.run.elapsed_ms, MAX_TICK_MS);
        assert_eq!(state.field.hazards[0].age_ms, MAX_TICK_MS);
        assert!(!state.field.hazards[0].active);
        assert_eq!(state.bursts[0].age_ms, MAX_TICK_MS);
        assert_eq!(state.cooldown.remaining_ms, PING_COOLDOWN_MS);

        tick(&mut state, &TickInput::default(), -30.0);
        assert_eq!(state.run.elapsed_ms, MAX_TICK_MS);
        assert_eq!(state.field.hazards[0].age_ms, MAX_TICK_MS);
        assert_eq!(state.bursts[0].age_ms, MAX_TICK_MS);
    }

    #[test]
    fn test_run_times_out_and_freezes() {
        let mut state = running(7);
        state.run.elapsed_ms = RUN_DURATION_MS - 10.0;
        state.field.hazards.clear();

        let effects = tick(&mut state, &TickInput::default(), 20.0);
        assert!(effects.ended);
        assert_eq!(effects.end_reason, EndReason::Timeout);
        assert_eq!(state.phase, Phase::Ended);
        assert_eq!(state.run.time_left_ms(), 0.0);

        // Late ticks change nothing
        let frozen = state.run;
        let effects = tick(&mut state, &ping(Signal::Risk), FRAME_MS);
        assert!(effects.ended);
        assert_eq!(state.run, frozen);
        assert!(state.bursts.is_empty());
    }

    #[test]
    fn test_timeout_tick_suppresses_everything_else() {
        let mut state = running(7);
        state.run.elapsed_ms = RUN_DURATION_MS - 1.0;
        let start = state.player.pos;
        let input = TickInput {
            move_axis: Vec2::X,
            emit_ping: true,
            select: Some(Signal::Safe),
        };
        tick(&mut state, &input, FRAME_MS);
        assert_eq!(state.player.pos, start);
        assert!(state.bursts.is_empty());
        assert_eq!(state.selected, Signal::Warn);
    }

    #[test]
    fn test_contact_drains_trust_until_failure() {
        let mut state = running(3);
        state.run = state.run.apply_trust_delta(-99.9);
        parked_hazard(&mut state, 100, Signal::Risk, Vec2::new(5.0, 0.0));

        let effects = tick(&mut state, &TickInput::default(), 40.0);
        assert!(effects.hit);
        assert!(effects.ended);
        assert_eq!(effects.end_reason, EndReason::Trust);
        assert_eq!(state.run.trust, 0.0);
        assert_eq!(state.phase, Phase::Ended);
    }

    #[test]
    fn test_matching_ping_scores_and_rewards() {
        let mut state = running(4);
        state.run = state.run.apply_trust_delta(-50.0);
        parked_hazard(&mut state, 100, Signal::Safe, Vec2::new(60.0, 0.0));

        let effects = tick(&mut state, &ping(Signal::Safe), 40.0);
        assert!(effects.pinged);
        // Ring after 40ms is ~8.3 units; hazard edge is 40 away
        assert_eq!(effects.score_delta, 0);

        let mut cleared = false;
        for _ in 0..10 {
            let effects = tick(&mut state, &TickInput::default(), 40.0);
            if effects.score_delta > 0 {
                cleared = true;
                break;
            }
        }
        assert!(cleared);
        assert_eq!(state.score, 1);
        assert_eq!(state.streak, 1);
        assert_eq!(state.best_streak, 1);
        assert!(!state.field.hazards.iter().any(|h| h.id == 100));
        // Contact ticks never happened: hazard sat outside the player
        assert!(state.run.trust > 50.0);
    }

    #[test]
    fn test_wrong_ping_has_no_effect() {
        let mut state = running(4);
        parked_hazard(&mut state, 100, Signal::Risk, Vec2::new(60.0, 0.0));
        tick(&mut state, &ping(Signal::Warn), 40.0);

        for _ in 0..40 {
            state.field.hazards.retain(|h| h.id == 100);
            tick(&mut state, &TickInput::default(), 40.0);
        }
        assert!(state.field.hazards.iter().any(|h| h.id == 100));
        assert_eq!(state.score, 0);
        assert!(state.bursts.is_empty());
    }

    #[test]
    fn test_missed_burst_breaks_streak() {
        let mut state = running(9);
        state.streak = 4;
        state.best_streak = 4;
        // Keep spawned hazards away from the burst by clearing them every tick
        tick(&mut state, &ping(Signal::Warn), 40.0);
        let ticks = (PING_LIFE_MS / 40.0).ceil() as usize;
        for _ in 0..ticks {
            state.field.hazards.clear();
            tick(&mut state, &TickInput::default(), 40.0);
        }
        assert!(state.bursts.is_empty());
        assert_eq!(state.streak, 0);
        assert_eq!(state.best_streak, 4);
    }

    #[test]
    fn test_cooldown_blocks_second_ping() {
        let mut state = running(2);
        assert!(tick(&mut state, &ping(Signal::Warn), FRAME_MS).pinged);
        assert!(!tick(&mut state, &ping(Signal::Warn), FRAME_MS).pinged);
        assert_eq!(state.bursts.len(), 1);
    }

    #[test]
    fn test_unknown_selection_keeps_previous() {
        let mut state = running(2);
        let select_risk = TickInput {
            select: Some(Signal::Risk),
            ..Default::default()
        };
        tick(&mut state, &select_risk, FRAME_MS);
        let input = TickInput {
            select: Signal::from_key("q"),
            ..Default::default()
        };
        tick(&mut state, &input, FRAME_MS);
        assert_eq!(state.selected, Signal::Risk);
    }

    #[test]
    fn test_held_keys_move_player() {
        let mut state = running(2);
        let start = state.player.pos;
        let input = TickInput::from_held(false, false, false, true);
        tick(&mut state, &input, 40.0);
        assert!((state.player.pos.x - (start.x + PLAYER_SPEED * 0.04)).abs() < 1e-3);
        assert_eq!(state.player.pos.y, start.y);
    }

    #[test]
    fn test_restart_after_end() {
        let mut state = running(11);
        state.run = state.run.advance_clock(RUN_DURATION_MS - 1.0);
        tick(&mut state, &TickInput::default(), 10.0);
        assert!(state.is_ended());

        state.restart();
        assert!(state.is_running());
        assert_eq!(state.run.elapsed_ms, 0.0);
        assert!(state.field.is_empty());
    }

    #[test]
    fn test_contact_breaks_streak() {
        let mut state = running(3);
        state.streak = 5;
        state.best_streak = 5;
        parked_hazard(&mut state, 100, Signal::Warn, Vec2::new(5.0, 0.0));

        let effects = tick(&mut state, &TickInput::default(), FRAME_MS);
        assert!(effects.hit);
        assert!(!effects.ended);
        assert_eq!(effects.streak, 0);
        assert_eq!(state.streak, 0);
        assert_eq!(state.best_streak, 5);
        assert!(state.run.trust < MAX_TRUST);
    }

    #[test]
    fn test_burst_counts_once_for_streak() {
        // Every spawn is a Risk hazard at the top edge, so only the
        // parked Warn hazards can match the ping
        let script = ScriptedRng::new(vec![0.0, 0.5, 0.9, 0.0, 0.0, 0.0]);
        let mut state = SimState::with_rng(12, script);
        state.start();
        parked_hazard(&mut state, 100, Signal::Warn, Vec2::new(60.0, 0.0));
        parked_hazard(&mut state, 101, Signal::Warn, Vec2::new(0.0, -150.0));

        tick(&mut state, &ping(Signal::Warn), 40.0);
        let mut scoring_ticks = 0;
        while !state.bursts.is_empty() {
            if tick(&mut state, &TickInput::default(), 40.0).score_delta > 0 {
                scoring_ticks += 1;
            }
        }

        // The two hazards fall to the ring on different ticks
        assert_eq!(scoring_ticks, 2);
        assert_eq!(state.score, 2);
        assert_eq!(state.streak, 1);
        assert_eq!(state.best_streak, 1);
    }

    #[test]
    fn test_scripted_rng_drives_spawns() {
        let script = ScriptedRng::new(vec![0.0, 0.5, 0.9, 0.0, 0.0, 0.0]);
        let mut state = SimState::with_rng(12, script);
        state.start();

        let mut spawned = 0;
        for _ in 0..23 {
            spawned += tick(&mut state, &TickInput::default(), 40.0).spawned;
        }
        assert_eq!(spawned, 1);
        let hazard = state.field.hazards[0];
        assert_eq!(hazard.id, 1);
        assert_eq!(hazard.kind, Signal::Risk);
        assert_eq!(hazard.pos, Vec2::new(ARENA_WIDTH * 0.5, -HAZARD_SPAWN_MARGIN));
        assert!(!hazard.active);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = running(99_999);
        let mut state2 = running(99_999);

        for i in 0..600 {
            let input = TickInput {
                move_axis: Vec2::new((i as f32 * 0.05).sin(), (i as f32 * 0.03).cos()),
                emit_ping: i % 45 == 0,
                select: Some(Signal::ALL[i % 3]),
            };
            let a = tick(&mut state1, &input, FRAME_MS);
            let b = tick(&mut state2, &input, FRAME_MS);
            assert_eq!(a, b);
        }

        assert_eq!(state1.run, state2.run);
        assert_eq!(state1.field.hazards, state2.field.hazards);
        assert_eq!(state1.bursts, state2.bursts);
        assert_eq!(state1.score, state2.score);
    }
}
