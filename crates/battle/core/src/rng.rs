//! Injected random number generation.
//!
//! The engine never reaches for a global RNG: every roll goes through a
//! [`BattleRng`] owned by the scheduler or a controller. Given the same seed,
//! [`PcgRng`] replays the same battle within a process.

/// Source of uniformly distributed numbers.
pub trait BattleRng: Send {
    /// Next raw 32-bit value.
    fn next_u32(&mut self) -> u32;

    /// Roll a d100 (1-100 inclusive).
    fn roll_d100(&mut self) -> u32 {
        (self.next_u32() % 100) + 1
    }

    /// Returns true with `percent` probability. Values ≥ 100 always succeed,
    /// values ≤ 0 never do.
    fn chance(&mut self, percent: i32) -> bool {
        if percent <= 0 {
            return false;
        }
        if percent >= 100 {
            return true;
        }
        self.roll_d100() as i32 <= percent
    }

    /// Generate a random value in range [min, max] inclusive.
    fn range(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let range = max - min + 1;
        min + (self.next_u32() % range)
    }

    /// Uniform index into a collection of `len` items.
    fn pick_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.next_u32() as usize % len)
    }
}

/// Picks a uniformly random element of `items`.
pub fn choose<'a, T>(rng: &mut dyn BattleRng, items: &'a [T]) -> Option<&'a T> {
    rng.pick_index(items.len()).map(|index| &items[index])
}

/// PCG-XSH-RR generator: 64-bit state, 32-bit output.
#[derive(Clone, Debug)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    pub fn seeded(seed: u64) -> Self {
        // One warm-up step so that nearby seeds diverge immediately.
        Self {
            state: Self::pcg_step(seed.wrapping_add(Self::INCREMENT)),
        }
    }

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl BattleRng for PcgRng {
    fn next_u32(&mut self) -> u32 {
        self.state = Self::pcg_step(self.state);
        Self::pcg_output(self.state)
    }
}

/// Replays a fixed sequence of raw values, cycling when exhausted.
///
/// Handy for pinning down rolls: a raw value `v` rolls `v % 100 + 1` on a
/// d100 and picks index `v % len` from a collection.
#[derive(Clone, Debug)]
pub struct ScriptedRng {
    values: Vec<u32>,
    cursor: usize,
}

impl ScriptedRng {
    pub fn new(values: impl Into<Vec<u32>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// Always returns the same value.
    pub fn constant(value: u32) -> Self {
        Self::new(vec![value])
    }
}

impl BattleRng for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        if self.values.is_empty() {
            return 0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
