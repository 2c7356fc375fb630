//! Seedable randomness for rough borders and ink noise
//!
//! Every stochastic step draws from an [`InkRng`] handed in by the caller,
//! so a fixed seed reproduces a render pixel for pixel.

use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hasher};
use std::time::{SystemTime, UNIX_EPOCH};

/// xorshift64* generator
#[derive(Debug, Clone)]
pub struct InkRng {
    state: u64,
}

impl InkRng {
    /// A reproducible stream
    pub fn seeded(seed: u64) -> Self {
        // Zero is a fixed point of xorshift
        let state = seed ^ 0x9e37_79b9_7f4a_7c15;
        Self {
            state: if state == 0 { 0x2545_f491_4f6c_dd1d } else { state },
        }
    }

    /// A fresh stream for every call, for renders that must not repeat
    pub fn from_entropy() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        let mut hasher = RandomState::new().build_hasher();
        hasher.write_u64(nanos);
        Self::seeded(hasher.finish())
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_f491_4f6c_dd1d)
    }

    /// Uniform in `[0, 1)`
    pub fn next_f32(&mut self) -> f32 {
        // Top 24 bits fill the f32 mantissa exactly
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    /// Uniform in `[low, high)`
    pub fn uniform(&mut self, low: f32, high: f32) -> f32 {
        low + (high - low) * self.next_f32()
    }

    /// Uniform in `[-amount, amount)`; zero amplitude draws nothing
    pub fn jitter(&mut self, amount: f32) -> f32 {
        if amount == 0.0 {
            0.0
        } else {
            self.uniform(-amount, amount)
        }
    }
}
