//! Data-driven game balance
//!
//! Curves and clamps that shape difficulty over a run. The progression is
//! fixed; there is no per-player difficulty setting.

use crate::consts::*;
use crate::lerp;

/// Shortest telegraph window (ms)
pub const TELEGRAPH_MIN_MS: f32 = 320.0;
/// Longest telegraph window (ms). Stays under a second so threats read as urgent.
pub const TELEGRAPH_MAX_MS: f32 = 820.0;

/// Opening stretch of a run, shown with onboarding hints
pub const FIRST_WAVE_DURATION_MS: f32 = 10_000.0;

/// Clamp a telegraph duration into the allowed window
pub fn clamp_telegraph_ms(value_ms: f32) -> f32 {
    if value_ms.is_nan() {
        return TELEGRAPH_MIN_MS;
    }
    value_ms.clamp(TELEGRAPH_MIN_MS, TELEGRAPH_MAX_MS)
}

/// Telegraph duration for a unit sample in [0, 1)
pub fn telegraph_from_unit(sample: f32) -> f32 {
    clamp_telegraph_ms(lerp(TELEGRAPH_MIN_MS, TELEGRAPH_MAX_MS, sample))
}

/// Whether `elapsed_ms` is still inside the first wave (inclusive)
pub fn is_in_first_wave(elapsed_ms: f32) -> bool {
    elapsed_ms <= FIRST_WAVE_DURATION_MS
}

/// Milliseconds between spawns at a given run progress (0-1).
/// Falls linearly from the base interval to the minimum.
pub fn spawn_interval_ms(progress: f32) -> f32 {
    lerp(HAZARD_BASE_SPAWN_MS, HAZARD_MIN_SPAWN_MS, progress)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_telegraph_clamps() {
        assert!(TELEGRAPH_MAX_MS < 1_000.0);
        assert_eq!(clamp_telegraph_ms(50.0), TELEGRAPH_MIN_MS);
        assert_eq!(clamp_telegraph_ms(5_000.0), TELEGRAPH_MAX_MS);
        assert_eq!(clamp_telegraph_ms(500.0), 500.0);
    }

    #[test]
    fn test_first_wave_is_first_ten_seconds() {
        assert!(is_in_first_wave(0.0));
        assert!(is_in_first_wave(FIRST_WAVE_DURATION_MS));
        assert!(!is_in_first_wave(FIRST_WAVE_DURATION_MS + 1.0));
    }

    #[test]
    fn test_spawn_interval_shrinks_over_run() {
        assert_eq!(spawn_interval_ms(0.0), HAZARD_BASE_SPAWN_MS);
        assert_eq!(spawn_interval_ms(1.0), HAZARD_MIN_SPAWN_MS);
        assert!(spawn_interval_ms(0.25) > spawn_interval_ms(0.75));
    }
}
