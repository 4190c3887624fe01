/// The number of levels a [`SkipMap`] has unless configured otherwise.
///
/// [`SkipMap`]: crate::SkipMap
pub const DEFAULT_MAX_LEVEL: usize = 3;

/// The probability, unless configured otherwise, that a new element which reached some level
/// also reaches the level above it. Equal to `1/e`.
pub const DEFAULT_PROBABILITY: f64 = 1.0 / std::f64::consts::E;

/// The greatest `max_level` accepted by [`SkipMapConfig::validate`].
///
/// Even with a probability of `1/2`, a single element is expected to reach this height only once
/// per `2^63` insertions.
///
/// [`SkipMapConfig::validate`]: crate::SkipMapConfig::validate
pub const MAX_SUPPORTED_LEVEL: usize = 64;
