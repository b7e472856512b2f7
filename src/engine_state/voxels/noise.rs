//! # Terrain Noise
//!
//! The terrain generator only needs one thing from a noise implementation: a
//! deterministic, seeded 2-D height field normalized to `[0, 1]`. That contract
//! is the [`NoiseSource`] trait. [`PerlinNoise`] fulfils it with fractal
//! Perlin noise from the `noise` crate.
//!
//! Sources are `Send + Sync` so a single instance can be shared with the chunk
//! generation workers behind an `Arc`.

use noise::{NoiseFn, Perlin};

/// Amplitude falloff between successive octaves.
pub const PERSISTENCE: f64 = 0.5;
/// Frequency growth between successive octaves.
pub const LACUNARITY: f64 = 2.0;

/// A deterministic 2-D coherent noise function.
pub trait NoiseSource: Send + Sync {
    /// Samples the height field at `(x, z)` summing `octaves` layers.
    ///
    /// # Returns
    /// A value in `[0, 1]`. Identical inputs on sources with the same seed
    /// always produce identical outputs.
    fn sample(&self, x: f32, z: f32, octaves: u32) -> f32;

    /// The seed this source was built from.
    fn seed(&self) -> u32;
}

/// Multi-octave Perlin noise normalized to `[0, 1]`.
#[derive(Clone, Debug)]
pub struct PerlinNoise {
    perlin: Perlin,
    seed: u32,
}

impl PerlinNoise {
    /// Creates a noise source seeded with `seed`.
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
            seed,
        }
    }
}

impl NoiseSource for PerlinNoise {
    fn sample(&self, x: f32, z: f32, octaves: u32) -> f32 {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut amplitude_sum = 0.0;
        let mut frequency = 1.0;

        for _ in 0..octaves.max(1) {
            total += self.perlin.get([x as f64 * frequency, z as f64 * frequency]) * amplitude;
            amplitude_sum += amplitude;
            amplitude *= PERSISTENCE;
            frequency *= LACUNARITY;
        }

        let normalized = (total / amplitude_sum) * 0.5 + 0.5;
        normalized.clamp(0.0, 1.0) as f32
    }

    fn seed(&self) -> u32 {
        self.seed
    }
}

/// A flat height field, handy for pinning terrain height in tests and tools.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ConstantNoise(pub f32);

impl NoiseSource for ConstantNoise {
    fn sample(&self, _x: f32, _z: f32, _octaves: u32) -> f32 {
        self.0.clamp(0.0, 1.0)
    }

    fn seed(&self) -> u32 {
        0
    }
}
