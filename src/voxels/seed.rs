use noise::{NoiseFn, Simplex};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::Seed;

/// Deterministic random stream derived from a world seed.
///
/// Every generation pass pulls its noise fields from here in a fixed order,
/// so the seed and the pass order fully determine the world.
pub struct NoiseSource {
    rng: ChaCha8Rng,
}

impl NoiseSource {
    pub fn new(seed: &Seed) -> NoiseSource {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed.to_u64()),
        }
    }

    /// Next value of the stream in [0, 1)
    pub fn uniform(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// Draws a fresh coherent noise field from the stream.
    pub fn next_noise(&mut self) -> SeededNoise {
        SeededNoise::new(self.rng.next_u32())
    }
}

/// Simplex noise field. Both samplers return values in [-1, 1].
pub struct SeededNoise {
    simplex: Simplex,
}

impl SeededNoise {
    pub fn new(seed: u32) -> SeededNoise {
        Self {
            simplex: Simplex::new(seed),
        }
    }

    pub fn noise_2d(&self, x: f64, z: f64) -> f64 {
        self.simplex.get([x, z]).clamp(-1.0, 1.0)
    }

    pub fn noise_3d(&self, x: f64, y: f64, z: f64) -> f64 {
        self.simplex.get([x, y, z]).clamp(-1.0, 1.0)
    }
}
