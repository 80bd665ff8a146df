//! Random sources for piece selection
//!
//! The engine only ever asks for an index below a bound; [`random_kind`] turns
//! that into one of the seven kinds with an explicit bounds check.
//!
//! - [`SimpleRng`]: seeded LCG, deterministic across platforms
//! - [`ThreadRandom`]: `rand`'s thread-local generator
//! - [`ScriptedRandom`]: replays a fixed list of kinds

use rand::Rng;

use crate::types::PieceKind;

/// Supplies uniformly distributed indices.
pub trait RandomSource {
    /// A value in `0..bound`. `bound` is never zero.
    fn next_index(&mut self, bound: usize) -> usize;
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_index(&mut self, bound: usize) -> usize {
        (**self).next_index(bound)
    }
}

/// Draw one of the seven kinds uniformly.
pub fn random_kind<R: RandomSource + ?Sized>(rng: &mut R) -> PieceKind {
    let idx = rng.next_index(PieceKind::ALL.len());
    // A misbehaving source must still yield a real kind.
    PieceKind::ALL[idx % PieceKind::ALL.len()]
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    seed: u32,
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { seed, state }
    }

    /// Seed this generator was created with
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // Take the high half; the low bits of an LCG cycle quickly.
        (self.next_u32() >> 16) % max.max(1)
    }
}

impl RandomSource for SimpleRng {
    fn next_index(&mut self, bound: usize) -> usize {
        self.next_range(bound as u32) as usize
    }
}

/// Thread-local OS-seeded generator
#[derive(Debug, Clone, Default)]
pub struct ThreadRandom {
    rng: rand::rngs::ThreadRng,
}

impl ThreadRandom {
    pub fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

impl RandomSource for ThreadRandom {
    fn next_index(&mut self, bound: usize) -> usize {
        self.rng.gen_range(0..bound.max(1))
    }
}

/// Replays a fixed sequence of kinds, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    script: Vec<PieceKind>,
    cursor: usize,
}

impl ScriptedRandom {
    /// `script` must not be empty; an empty script behaves as `[I]`.
    pub fn new(script: impl Into<Vec<PieceKind>>) -> Self {
        let mut script = script.into();
        if script.is_empty() {
            script.push(PieceKind::I);
        }
        Self { script, cursor: 0 }
    }

    /// Number of draws served so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRandom {
    fn next_index(&mut self, bound: usize) -> usize {
        let kind = self.script[self.cursor % self.script.len()];
        self.cursor += 1;
        (kind.color_id() as usize - 1) % bound.max(1)
    }
}
