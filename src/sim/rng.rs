//! Injectable randomness for hazard spawning
//!
//! The simulation never touches an ambient RNG. Spawn attributes are drawn
//! through [`SpawnRng`] so tests can script exact values and runs replay
//! under a fixed seed.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Source of uniform samples in [0, 1)
pub trait SpawnRng {
    fn unit(&mut self) -> f32;

    /// Rewind to the start of the stream for `seed`
    fn reseed(&mut self, seed: u64);

    /// Uniform sample in [min, min + range)
    fn span(&mut self, min: f32, range: f32) -> f32 {
        min + self.unit() * range
    }
}

impl SpawnRng for Pcg32 {
    fn unit(&mut self) -> f32 {
        self.random::<f32>()
    }

    fn reseed(&mut self, seed: u64) {
        *self = seeded(seed);
    }
}

/// Seeded generator for a run
pub fn seeded(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Replays a fixed list of samples, cycling when exhausted
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    samples: Vec<f32>,
    cursor: usize,
}

impl ScriptedRng {
    pub fn new(samples: impl Into<Vec<f32>>) -> Self {
        Self {
            samples: samples.into(),
            cursor: 0,
        }
    }
}

impl SpawnRng for ScriptedRng {
    fn unit(&mut self) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let value = self.samples[self.cursor % self.samples.len()];
        self.cursor += 1;
        crate::clamp_unit(value)
    }

    /// Scripts ignore the seed and replay from the first sample
    fn reseed(&mut self, _seed: u64) {
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_is_repeatable() {
        let mut a = seeded(42);
        let mut b = seeded(42);
        for _ in 0..16 {
            assert_eq!(a.unit(), b.unit());
        }
    }

    #[test]
    fn test_pcg_samples_in_unit_range() {
        let mut rng = seeded(7);
        for _ in 0..1_000 {
            let v = rng.unit();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_reseed_rewinds() {
        let mut rng = seeded(42);
        let first = rng.unit();
        rng.unit();
        rng.reseed(42);
        assert_eq!(rng.unit(), first);

        let mut script = ScriptedRng::new(vec![0.1, 0.2]);
        script.unit();
        script.reseed(99);
        assert_eq!(script.unit(), 0.1);
    }

    #[test]
    fn test_scripted_cycles() {
        let mut rng = ScriptedRng::new(vec![0.25, 0.75]);
        assert_eq!(rng.unit(), 0.25);
        assert_eq!(rng.unit(), 0.75);
        assert_eq!(rng.unit(), 0.25);
        assert_eq!(rng.span(10.0, 4.0), 13.0);
    }
}
