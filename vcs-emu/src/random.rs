//! Seedable pseudorandom number generator.
//!
//! A Mersenne Twister (MT19937, 32-bit) with the full 624-word state vector
//! exposed to serialization, so a restored machine continues the exact same
//! sequence. Devices use it for the unknown/undefined parts of power-on
//! state.

use crate::serializer::{Deserializer, Serializer, StateError};

const STATE_WORDS: usize = 624;
const SHIFT_POINT: usize = 397;
const MATRIX_A: u32 = 0x9908_B0DF;
const UPPER_MASK: u32 = 0x8000_0000;
const LOWER_MASK: u32 = 0x7FFF_FFFF;

/// The reference MT19937 default seed.
const DEFAULT_SEED: u32 = 5489;

/// Mersenne Twister random number generator with serializable state.
pub struct Random {
    state: Box<[u32; STATE_WORDS]>,
    index: usize,
}

impl Random {
    /// Creates a generator seeded with the reference default seed.
    pub fn new() -> Self {
        let mut rng = Self {
            state: Box::new([0; STATE_WORDS]),
            index: STATE_WORDS,
        };
        rng.seed(DEFAULT_SEED);
        rng
    }

    /// Reinitializes the generator from the given seed.
    pub fn seed(&mut self, value: u32) {
        self.state[0] = value;
        for i in 1..STATE_WORDS {
            let prev = self.state[i - 1];
            self.state[i] = 1_812_433_253u32
                .wrapping_mul(prev ^ (prev >> 30))
                .wrapping_add(i as u32);
        }
        self.index = STATE_WORDS;
    }

    /// Answers the next 32-bit value from the generator.
    pub fn next(&mut self) -> u32 {
        if self.index >= STATE_WORDS {
            self.twist();
        }

        let mut y = self.state[self.index];
        self.index += 1;

        // Tempering
        y ^= y >> 11;
        y ^= (y << 7) & 0x9D2C_5680;
        y ^= (y << 15) & 0xEFC6_0000;
        y ^= y >> 18;
        y
    }

    /// Answers the next value mapped into `[0, 1)`.
    pub fn next_double(&mut self) -> f64 {
        self.next() as f64 / 4_294_967_296.0
    }

    fn twist(&mut self) {
        for i in 0..STATE_WORDS {
            let y = (self.state[i] & UPPER_MASK) | (self.state[(i + 1) % STATE_WORDS] & LOWER_MASK);
            let mut next = y >> 1;
            if y & 1 != 0 {
                next ^= MATRIX_A;
            }
            self.state[i] = self.state[(i + SHIFT_POINT) % STATE_WORDS] ^ next;
        }
        self.index = 0;
    }

    /// Serializes the full state vector and cursor.
    pub fn save(&self, out: &mut Serializer) -> Result<(), StateError> {
        out.put_string("Random");
        for &word in self.state.iter() {
            out.put_int(word as i32);
        }
        out.put_int(self.index as i32);
        Ok(())
    }

    /// Restores the state vector and cursor.
    pub fn load(&mut self, input: &mut Deserializer<'_>) -> Result<(), StateError> {
        input.expect_tag("Random")?;
        for word in self.state.iter_mut() {
            *word = input.get_int()? as u32;
        }
        let index = input.get_int()?;
        if index < 0 || index as usize > STATE_WORDS {
            return Err(StateError::Malformed("random state cursor out of range"));
        }
        self.index = index as usize;
        Ok(())
    }
}

impl Default for Random {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_sequence() {
        // First outputs of MT19937 seeded with 5489 (the reference values).
        let mut rng = Random::new();
        assert_eq!(rng.next(), 3_499_211_612);
        assert_eq!(rng.next(), 581_869_302);
        assert_eq!(rng.next(), 3_890_346_734);
    }

    #[test]
    fn test_seed_determinism() {
        let mut a = Random::new();
        let mut b = Random::new();
        a.seed(1234);
        b.seed(1234);
        for _ in 0..100 {
            assert_eq!(a.next(), b.next());
        }
    }

    #[test]
    fn test_next_double_in_unit_interval() {
        let mut rng = Random::new();
        for _ in 0..1000 {
            let value = rng.next_double();
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn test_save_load_resumes_sequence() {
        let mut rng = Random::new();
        rng.seed(42);
        for _ in 0..10 {
            rng.next();
        }

        let mut out = Serializer::new();
        rng.save(&mut out).unwrap();
        let expected: Vec<u32> = (0..16).map(|_| rng.next()).collect();

        let blob = out.into_bytes();
        let mut restored = Random::new();
        restored.load(&mut Deserializer::new(&blob)).unwrap();
        let resumed: Vec<u32> = (0..16).map(|_| restored.next()).collect();

        assert_eq!(expected, resumed);
    }
}
