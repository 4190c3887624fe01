use thiserror::Error;


/// A [`SkipMapConfig`] which cannot be used to construct a [`SkipMap`].
///
/// [`SkipMapConfig`]: crate::SkipMapConfig
/// [`SkipMap`]: crate::SkipMap
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("a skipmap needs at least one level, but `max_level` was 0")]
    ZeroMaxLevel,
    #[error("`max_level` was {max_level}, which exceeds the supported limit of {limit}")]
    MaxLevelTooLarge {
        max_level: usize,
        limit:     usize,
    },
    #[error("level probability `{0}` is not within [0, 1]")]
    InvalidProbability(f64),
}
