//! RNG module - random color draws
//!
//! Every color the engine places comes from a [`RandomSource`], so a test can
//! swap in a seeded or fully scripted generator and get the same board every run.
//!
//! Provided sources:
//! - [`SimpleRng`]: small seedable LCG, the default for deterministic play
//! - [`ScriptedRng`]: replays a fixed list of values, for building known boards
//! - `rand::rngs::StdRng` / `rand::rngs::ThreadRng`: ecosystem generators

use rand::Rng;

/// Source of uniformly distributed integers.
pub trait RandomSource {
    /// Random value in `[low, high_exclusive)`.
    ///
    /// Callers guarantee `low < high_exclusive`.
    fn next_in_range(&mut self, low: u32, high_exclusive: u32) -> u32;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_in_range(&mut self, low: u32, high_exclusive: u32) -> u32 {
        (**self).next_in_range(low, high_exclusive)
    }
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

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // Low LCG bits cycle with a short period; use the high half.
        (self.next_u32() >> 16) % max
    }

    /// Current internal state (feed back into `new` to resume the sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl RandomSource for SimpleRng {
    fn next_in_range(&mut self, low: u32, high_exclusive: u32) -> u32 {
        low + self.next_range(high_exclusive - low)
    }
}

/// Replays a fixed sequence of values, wrapping around at the end.
///
/// Each value is reduced into the requested range, so a script of color ids
/// below the palette size comes back unchanged.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    values: Vec<u32>,
    cursor: usize,
    draws: u64,
}

impl ScriptedRng {
    /// Panics if `values` is empty.
    pub fn new(values: Vec<u32>) -> Self {
        assert!(!values.is_empty(), "ScriptedRng needs at least one value");
        Self {
            values,
            cursor: 0,
            draws: 0,
        }
    }

    /// Number of values handed out so far
    pub fn draws(&self) -> u64 {
        self.draws
    }
}

impl RandomSource for ScriptedRng {
    fn next_in_range(&mut self, low: u32, high_exclusive: u32) -> u32 {
        let v = self.values[self.cursor];
        self.cursor = (self.cursor + 1) % self.values.len();
        self.draws += 1;
        low + v % (high_exclusive - low)
    }
}

impl RandomSource for rand::rngs::StdRng {
    fn next_in_range(&mut self, low: u32, high_exclusive: u32) -> u32 {
        self.gen_range(low..high_exclusive)
    }
}

impl RandomSource for rand::rngs::ThreadRng {
    fn next_in_range(&mut self, low: u32, high_exclusive: u32) -> u32 {
        self.gen_range(low..high_exclusive)
    }
}
