use crate::{
    config_constants::{DEFAULT_MAX_LEVEL, DEFAULT_PROBABILITY, MAX_SUPPORTED_LEVEL},
    error::ConfigError,
};


/// Construction parameters of a [`SkipMap`].
///
/// None of these can be changed after the map is constructed.
///
/// [`SkipMap`]: crate::SkipMap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkipMapConfig {
    /// The number of levels of the map, including the bottom level which links every element.
    /// Each element is given a random height in `1..=max_level`.
    ///
    /// Must be in `1..=MAX_SUPPORTED_LEVEL`.
    pub max_level:   usize,
    /// The probability that an element which reached some level also reaches the next one.
    ///
    /// Must be in `[0, 1]`.
    pub probability: f64,
    /// Seed for the PRNG which picks element heights. If `None`, a seed is taken from the
    /// system clock.
    pub seed:        Option<u64>,
}

impl SkipMapConfig {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_level:   DEFAULT_MAX_LEVEL,
            probability: DEFAULT_PROBABILITY,
            seed:        None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn with_max_level(mut self, max_level: usize) -> Self {
        self.max_level = max_level;
        self
    }

    #[inline]
    #[must_use]
    pub const fn with_probability(mut self, probability: f64) -> Self {
        self.probability = probability;
        self
    }

    #[inline]
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check that a [`SkipMap`] can be built from this config.
    ///
    /// [`SkipMap`]: crate::SkipMap
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_level == 0 {
            return Err(ConfigError::ZeroMaxLevel);
        }

        if self.max_level > MAX_SUPPORTED_LEVEL {
            return Err(ConfigError::MaxLevelTooLarge {
                max_level: self.max_level,
                limit:     MAX_SUPPORTED_LEVEL,
            });
        }

        // NaN fails this check, too.
        if !(0.0..=1.0).contains(&self.probability) {
            return Err(ConfigError::InvalidProbability(self.probability));
        }

        Ok(())
    }
}

impl Default for SkipMapConfig {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
