//! Small deterministic pseudo-random source.
//!
//! Used for polygon placement, spray scatter and the canned evaluations.
//! Not suitable for anything security related.

use std::sync::atomic::{AtomicU32, Ordering};

/// A fresh seed that differs between calls. Works on every platform
/// including wasm, where there is no OS entropy without extra crates.
pub fn fresh_seed() -> u32 {
    static SEED_COUNTER: AtomicU32 = AtomicU32::new(1);
    mix(SEED_COUNTER.fetch_add(1, Ordering::Relaxed))
}

fn mix(value: u32) -> u32 {
    let mut x = value.wrapping_mul(0x9E37_79B9);
    x ^= x >> 16;
    x = x.wrapping_mul(0x85EB_CA6B);
    x ^= x >> 13;
    x = x.wrapping_mul(0xC2B2_AE35);
    x ^= x >> 16;
    x
}

/// splitmix32 generator.
#[derive(Debug, Clone)]
pub struct SplitMix32 {
    state: u32,
}

impl SplitMix32 {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn from_fresh_seed() -> Self {
        Self::new(fresh_seed())
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x9E37_79B9);
        mix(self.state)
    }

    /// Uniform value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / (u32::MAX as f64 + 1.0)
    }

    /// Uniform value in `[low, high)`; returns `low` for an empty range.
    pub fn range(&mut self, low: f64, high: f64) -> f64 {
        if high <= low {
            return low;
        }
        low + self.next_f64() * (high - low)
    }

    /// Uniform index below `len`. `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        (self.next_f64() * len as f64) as usize % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = SplitMix32::new(42);
        let mut b = SplitMix32::new(42);
        for _ in 0..10 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn test_fresh_seeds_differ() {
        assert_ne!(fresh_seed(), fresh_seed());
    }

    #[test]
    fn test_ranges() {
        let mut rng = SplitMix32::new(7);
        for _ in 0..1000 {
            let f = rng.next_f64();
            assert!((0.0..1.0).contains(&f));
            let r = rng.range(50.0, 750.0);
            assert!((50.0..750.0).contains(&r));
            assert!(rng.index(5) < 5);
        }
        assert!((rng.range(10.0, 10.0) - 10.0).abs() < f64::EPSILON);
    }
}
