use std::time::{SystemTime, UNIX_EPOCH};

use oorandom::Rand64;


/// A simple PRNG trait, used for generating random heights for elements in a skipmap.
pub(crate) trait Prng {
    /// Produces a random `f64` in the range `[0, 1)`.
    ///
    /// (See [`oorandom::Rand64::rand_float`]; this function is the same interface.)
    #[must_use]
    fn rand_float(&mut self) -> f64;
}

impl Prng for Rand64 {
    #[inline]
    fn rand_float(&mut self) -> f64 {
        // Inherent impls take priority over traits, so this is the inherent method
        // of `Rand64` a.k.a. `Self`
        Self::rand_float(self)
    }
}

/// Create the PRNG of a skipmap, falling back to the system clock if no seed is given.
///
/// Returns the PRNG along with the seed that was used.
#[must_use]
pub(crate) fn seeded_prng(seed: Option<u64>) -> (Rand64, u64) {
    let seed = seed.unwrap_or_else(clock_seed);
    (Rand64::new(u128::from(seed)), seed)
}

#[must_use]
fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            #[expect(
                clippy::as_conversions,
                clippy::cast_possible_truncation,
                reason = "only the low bits of the time matter for a seed",
            )]
            let nanos = elapsed.as_nanos() as u64;
            nanos
        })
}

/// Chooses element heights in a geometric distribution capped at `max_level`.
#[derive(Debug, Clone)]
pub(crate) struct HeightPolicy {
    probability: f64,
    /// `table[i] == probability^i`, for `i` in `0..max_level`.
    ///
    /// A draw below `table[i]` lets an element which reached height `i` reach height `i + 1`.
    /// `table[0]` is always `1.0`, and every element has height at least `1`.
    table:       Box<[f64]>,
}

impl HeightPolicy {
    /// `max_level` should be at least `1`, and `probability` should be in `[0, 1]`.
    #[expect(clippy::float_arithmetic, reason = "computing powers of the probability")]
    #[must_use]
    pub(crate) fn new(probability: f64, max_level: usize) -> Self {
        let table = (0..max_level)
            .scan(1.0_f64, |power, _| {
                let current = *power;
                *power *= probability;
                Some(current)
            })
            .collect();

        Self { probability, table }
    }

    #[inline]
    #[must_use]
    pub(crate) const fn probability(&self) -> f64 {
        self.probability
    }

    #[inline]
    #[must_use]
    pub(crate) fn max_level(&self) -> usize {
        self.table.len()
    }

    /// Return a random value in `1..=max_level`, in a geometric distribution (higher values
    /// are exponentially less likely): a height of at least `k` has probability
    /// `probability^(k-1)`.
    ///
    /// A single draw is compared against the decreasing thresholds of the table, so `max_level`
    /// is `1 / (1 - probability)` more likely than it would be in an unbounded distribution.
    pub(crate) fn random_height<P: Prng>(&self, prng: &mut P) -> usize {
        let draw = prng.rand_float();

        let mut height = 1;
        while self.table.get(height).is_some_and(|&threshold| draw < threshold) {
            height += 1;
        }
        height
    }
}
