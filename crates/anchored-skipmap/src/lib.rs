//! A single-threaded [skiplist] map from byte-string keys to values of any type.
//!
//! [`SkipMap`] keeps its entries sorted by key, according to a [`Comparator`] (bytewise
//! lexicographic ordering by default), and offers expected `O(log n)` insertion, lookup and
//! removal, plus in-order iteration. It is meant as a building block for things like memtables.
//!
//! [skiplist]: https://en.wikipedia.org/wiki/Skip_list

mod comparator;
mod config;
mod config_constants;
mod error;
mod iter;
mod list;
mod node;
mod node_heights;


pub use self::{
    comparator::{BytewiseComparator, Comparator},
    config::SkipMapConfig,
    config_constants::{DEFAULT_MAX_LEVEL, DEFAULT_PROBABILITY, MAX_SUPPORTED_LEVEL},
    error::ConfigError,
    iter::Iter,
    list::SkipMap,
    node::Element,
};
