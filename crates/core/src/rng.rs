//! RNG module - seedable randomness for tile spawning
//!
//! The engine never reaches for a global random source. Every draw goes
//! through a [`RandomSource`] owned by the engine, so a seed fully determines
//! which cells receive tiles and which values they get.
//!
//! [`SimpleRng`] is the default source: a small LCG that is fast and
//! reproducible across platforms.

/// A source of random numbers injected into the engine.
pub trait RandomSource {
    /// Generate next random u32
    fn next_u32(&mut self) -> u32;

    /// Uniform value in `[0, bound)`. `bound` must be non-zero.
    ///
    /// Uses the high bits of the generator (multiply-shift), which are the
    /// well-distributed ones for an LCG.
    fn next_below(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0);
        ((self.next_u32() as u64 * bound as u64) >> 32) as usize
    }

    /// Uniform value in `[0, 1)`.
    fn next_unit(&mut self) -> f64 {
        self.next_u32() as f64 / (u32::MAX as f64 + 1.0)
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, PartialEq, Eq)]
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

    /// Current generator state; feeding it back to [`SimpleRng::new`] resumes the sequence.
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn next_u32(&mut self) -> u32 {
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

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }
}
