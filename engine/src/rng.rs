// ═══════════════════════════════════════════════════════════════════════
// Random source — the single sequential stream every draw comes from
//
// Consumption order is fixed so a seed reproduces a whole session:
//   1. board population (owner, then troops, per territory)
//   2. mission draw
//   3. per battle: attacker dice, then defender dice
// ═══════════════════════════════════════════════════════════════════════

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

/// Anything that can hand out uniform integers.
pub trait RandomSource {
    /// Uniform value in the inclusive range `[low, high]`.
    fn roll_range(&mut self, low: u32, high: u32) -> u32;

    /// Seed this stream was created from, if it has one.
    fn seed(&self) -> Option<u64> {
        None
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn roll_range(&mut self, low: u32, high: u32) -> u32 {
        (**self).roll_range(low, high)
    }

    fn seed(&self) -> Option<u64> {
        (**self).seed()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn roll_range(&mut self, low: u32, high: u32) -> u32 {
        (**self).roll_range(low, high)
    }

    fn seed(&self) -> Option<u64> {
        (**self).seed()
    }
}

// ── Seeded ─────────────────────────────────────────────────────────────

/// ChaCha8-backed source. Same seed, same session.
#[derive(Debug, Clone)]
pub struct SeededRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        SeededRng {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

impl RandomSource for SeededRng {
    fn roll_range(&mut self, low: u32, high: u32) -> u32 {
        self.inner.gen_range(low..=high)
    }

    fn seed(&self) -> Option<u64> {
        Some(self.seed)
    }
}

// ── Scripted ───────────────────────────────────────────────────────────

/// Replays a fixed list of values, clamped into whatever range is asked
/// for. Lets tests (and bug reports) pin exact dice.
///
/// Panics when the script runs out.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRng {
    values: VecDeque<u32>,
}

impl ScriptedRng {
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        ScriptedRng {
            values: values.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl RandomSource for ScriptedRng {
    fn roll_range(&mut self, low: u32, high: u32) -> u32 {
        let v = self
            .values
            .pop_front()
            .unwrap_or_else(|| panic!("scripted rng exhausted (asked for {low}..={high})"));
        v.clamp(low, high)
    }
}
