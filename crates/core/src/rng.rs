//! RNG module - injectable random source for the initial fill
//!
//! The random fill only needs one uniform `[0, 1)` draw per cell, so the grid
//! takes any [`RandomSource`]. [`SimpleRng`] is a small seeded LCG that keeps
//! fills reproducible for a given seed (useful for tests and for replaying a
//! configuration).

/// Source of uniform draws in `[0, 1)`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl RandomSource for SimpleRng {
    fn next_unit(&mut self) -> f64 {
        // Low LCG bits have short periods; use the high 24 bits only.
        (self.next_u32() >> 8) as f64 / (1u32 << 24) as f64
    }
}
