//! Seeded randomness for biological variation.
//!
//! Every draw the turtle and assembler make goes through [`RandomSource`],
//! so a fixed seed reproduces the same tree bit for bit.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

use crate::math::Vec3;

/// Bounded-range draws used for jitter, spread and tropism-free variation.
pub trait RandomSource {
    /// Uniform float in `[lo, hi]`. Returns `lo` without consuming
    /// randomness when the range is empty.
    fn uniform(&mut self, lo: f32, hi: f32) -> f32;

    /// Angular jitter in `[-max, max]` radians
    fn rotation_jitter(&mut self, max: f32) -> f32 {
        self.uniform(-max, max)
    }

    /// Multiplicative step factor `1 + [-jitter, jitter]`
    fn length_factor(&mut self, jitter: f32) -> f32 {
        1.0 + self.uniform(-jitter, jitter)
    }

    /// Random yaw in `[-spread, spread]` radians
    fn branch_spread(&mut self, spread: f32) -> f32 {
        self.uniform(-spread, spread)
    }

    /// Random roll in `[0, 2π]`
    fn branch_roll(&mut self) -> f32 {
        self.uniform(0.0, TAU)
    }

    /// Per-axis offset in `[-jitter, jitter]`
    fn leaf_offset(&mut self, jitter: f32) -> Vec3 {
        let x = self.uniform(-jitter, jitter);
        let y = self.uniform(-jitter, jitter);
        let z = self.uniform(-jitter, jitter);
        Vec3::new(x, y, z)
    }
}

/// Deterministic source backed by a seeded `StdRng`.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn uniform(&mut self, lo: f32, hi: f32) -> f32 {
        if hi <= lo {
            return lo;
        }
        self.rng.gen_range(lo..=hi)
    }
}
