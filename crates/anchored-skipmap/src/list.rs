use std::mem;
use std::fmt::{Debug, Formatter, Result as FmtResult};

use oorandom::Rand64;
use tracing::Level as LogLevel;

use crate::{
    comparator::{BytewiseComparator, Comparator},
    config::SkipMapConfig,
    error::ConfigError,
    iter::Iter,
    node::{Element, Link, Links, Position},
    node_heights::{HeightPolicy, seeded_prng},
};


/// An ordered map from byte-string keys to values of type `V`, backed by a [skiplist].
///
/// Keys are unique and sorted by `Cmp`. Every element is linked on the bottom level, and on each
/// level above that with probability [`probability`] (up to [`max_level`] levels in total), so
/// that searches can skip over most elements. Insertion, lookup and removal take expected
/// `O(log n)` time with a suitable `max_level`; iteration follows the bottom level.
///
/// The map is not threadsafe. Mutating operations reuse a scratch buffer owned by the map, which
/// is why they take `&mut self`.
///
/// [skiplist]: https://en.wikipedia.org/wiki/Skip_list
/// [`probability`]: SkipMap::probability
/// [`max_level`]: SkipMap::max_level
pub struct SkipMap<V, Cmp = BytewiseComparator> {
    cmp:        Cmp,
    /// Has a link for every level, `max_level` in total.
    head:       Links,
    /// Every element of the map, in no particular order. Links are indices into this vector,
    /// and every link refers to an element in it.
    elements:   Vec<Element<V>>,
    heights:    HeightPolicy,
    prng:       Rand64,
    /// Scratch space for [`SkipMap::find_preceding_neighbors`], with one entry per level.
    prev_nodes: Box<[Position]>,
}

impl<V> SkipMap<V> {
    /// Create an empty map with the default config, seeded from the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::from_valid_config(SkipMapConfig::new(), BytewiseComparator)
    }

    /// Create an empty map with the default config and a fixed seed, so that element heights
    /// are reproducible.
    #[must_use]
    pub fn new_seeded(seed: u64) -> Self {
        Self::from_valid_config(SkipMapConfig::new().with_seed(seed), BytewiseComparator)
    }

    pub fn with_config(config: SkipMapConfig) -> Result<Self, ConfigError> {
        Self::with_comparator(config, BytewiseComparator)
    }
}

impl<V, Cmp> SkipMap<V, Cmp> {
    pub fn with_comparator(config: SkipMapConfig, cmp: Cmp) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config, cmp))
    }

    /// `config` must already have been validated.
    fn from_valid_config(config: SkipMapConfig, cmp: Cmp) -> Self {
        let (prng, seed) = seeded_prng(config.seed);

        tracing::event!(
            LogLevel::DEBUG,
            max_level = config.max_level,
            probability = config.probability,
            seed,
            "created a skipmap"
        );

        Self {
            cmp,
            head:       Links::new(config.max_level),
            elements:   Vec::new(),
            heights:    HeightPolicy::new(config.probability, config.max_level),
            prng,
            prev_nodes: vec![Position::Head; config.max_level].into_boxed_slice(),
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn max_level(&self) -> usize {
        self.heights.max_level()
    }

    #[inline]
    #[must_use]
    pub const fn probability(&self) -> f64 {
        self.heights.probability()
    }

    /// Remove every element. The PRNG is not reset.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.head = Links::new(self.max_level());
    }

    /// The element with the smallest key, if the map is nonempty.
    ///
    /// This operation is fast.
    #[must_use]
    pub fn first(&self) -> Option<&Element<V>> {
        self.head.skip(0).map(|idx| self.element(idx))
    }

    /// The element with the greatest key, if the map is nonempty.
    #[must_use]
    pub fn last(&self) -> Option<&Element<V>> {
        let mut current = Position::Head;

        for level in (0..self.max_level()).rev() {
            while let Some(next) = self.links(current).skip(level) {
                current = Position::Element(next);
            }
        }

        match current {
            Position::Head         => None,
            Position::Element(idx) => Some(self.element(idx)),
        }
    }

    /// Iterate over every `(key, value)` pair, in ascending order of keys.
    ///
    /// Each call starts over from the smallest key.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> Iter<'_, V, Cmp> {
        Iter::new(self, self.head.skip(0))
    }

    #[expect(clippy::indexing_slicing, reason = "links only refer to elements in `self.elements`")]
    #[inline]
    #[must_use]
    pub(crate) fn element(&self, idx: usize) -> &Element<V> {
        &self.elements[idx]
    }

    #[expect(clippy::indexing_slicing, reason = "links only refer to elements in `self.elements`")]
    #[inline]
    #[must_use]
    fn element_mut(&mut self, idx: usize) -> &mut Element<V> {
        &mut self.elements[idx]
    }

    #[inline]
    #[must_use]
    fn links(&self, position: Position) -> &Links {
        match position {
            Position::Head         => &self.head,
            Position::Element(idx) => self.element(idx).links(),
        }
    }

    #[inline]
    #[must_use]
    fn links_mut(&mut self, position: Position) -> &mut Links {
        match position {
            Position::Head         => &mut self.head,
            Position::Element(idx) => self.element_mut(idx).links_mut(),
        }
    }

    /// The predecessor on `level` recorded by the last [`SkipMap::find_preceding_neighbors`].
    #[inline]
    #[must_use]
    fn prev_node(&self, level: usize) -> Position {
        self.prev_nodes.get(level).copied().unwrap_or(Position::Head)
    }

    /// Returns the node whose skip on `level` is `target`, trying `hint` first.
    ///
    /// A comparator which is not a total order can make a descent miss `target`; in that case,
    /// the whole level is walked.
    fn predecessor_on_level(
        &self,
        hint:   Position,
        level:  usize,
        target: usize,
    ) -> Option<Position> {
        if self.links(hint).skip(level) == Some(target) {
            return Some(hint);
        }

        let mut current = Position::Head;
        loop {
            match self.links(current).skip(level) {
                Some(next) if next == target => return Some(current),
                Some(next)                   => current = Position::Element(next),
                None                         => return None,
            }
        }
    }
}

// Searching through the skipmap.
impl<V, Cmp: Comparator> SkipMap<V, Cmp> {
    /// Return `Some(idx)` if the provided `link` refers to an element whose key sorts strictly
    /// less than `key`.
    #[must_use]
    fn node_before_key(&self, link: Link, key: &[u8]) -> Link {
        let idx = link?;
        self.cmp.cmp(self.element(idx).key(), key).is_lt().then_some(idx)
    }

    #[inline]
    #[must_use]
    fn key_matches(&self, idx: usize, key: &[u8]) -> bool {
        self.cmp.cmp(self.element(idx).key(), key).is_eq()
    }

    /// Move forwards along `level` for as long as the next key is strictly less than `key`.
    #[must_use]
    fn advance_while_less(&self, mut current: Position, level: usize, key: &[u8]) -> Position {
        while let Some(next) = self.node_before_key(self.links(current).skip(level), key) {
            current = Position::Element(next);
        }
        current
    }

    /// For each level, from the top down, record in `prev_nodes` the last node which precedes
    /// every element whose key is greater than or equal to `key`. Each level's search resumes
    /// from the predecessor found on the level above.
    fn fill_preceding_neighbors(&self, key: &[u8], prev_nodes: &mut [Position]) {
        let mut current = Position::Head;

        for level in (0..self.max_level()).rev() {
            current = self.advance_while_less(current, level, key);

            if let Some(prev) = prev_nodes.get_mut(level) {
                *prev = current;
            }
        }
    }

    /// Fill `self.prev_nodes` with the predecessors of `key` on each level.
    fn find_preceding_neighbors(&mut self, key: &[u8]) {
        let mut prev_nodes = mem::take(&mut self.prev_nodes);
        self.fill_preceding_neighbors(key, &mut prev_nodes);
        self.prev_nodes = prev_nodes;
    }

    /// After [`SkipMap::find_preceding_neighbors`] was called with `key`, return the element
    /// with that key, if there is one.
    #[must_use]
    fn matching_successor(&self, key: &[u8]) -> Link {
        self.links(self.prev_node(0))
            .skip(0)
            .filter(|&idx| self.key_matches(idx, key))
    }

    /// Return the first element whose key compares greater than or equal to `key`,
    /// if there is such an element.
    #[must_use]
    fn find_greater_or_equal(&self, key: &[u8]) -> Link {
        let mut current = Position::Head;

        for level in (0..self.max_level()).rev() {
            current = self.advance_while_less(current, level, key);
        }

        self.links(current).skip(0)
    }
}

impl<V, Cmp: Comparator> SkipMap<V, Cmp> {
    /// Insert `value` under `key`, and return the element holding it.
    ///
    /// If `key` is already in the map, its value is replaced in place (the old value is dropped)
    /// and the map's structure is unchanged. Otherwise, a copy of `key` is linked into the map
    /// as a new element with a random height.
    pub fn put(&mut self, key: &[u8], value: V) -> &mut Element<V> {
        self.find_preceding_neighbors(key);

        if let Some(idx) = self.matching_successor(key) {
            let element = self.element_mut(idx);
            element.set_value(value);
            return element;
        }

        let height = self.heights.random_height(&mut self.prng);
        let new_idx = self.elements.len();
        let mut element = Element::new(key, value, height);

        for level in 0..height {
            // On level `level`, put the new element between `prev` and `prev`'s skip
            // on the level.
            let prev = self.prev_node(level);
            element.links_mut().set_skip(level, self.links(prev).skip(level));
            self.links_mut(prev).set_skip(level, Some(new_idx));
        }

        self.elements.push(element);

        tracing::event!(
            LogLevel::TRACE,
            height,
            len = self.elements.len(),
            "inserted a skipmap element"
        );

        self.element_mut(new_idx)
    }

    /// Get the element with the given key, if there is one.
    #[must_use]
    pub fn get(&self, key: &[u8]) -> Option<&Element<V>> {
        let idx = self.find_greater_or_equal(key)?;
        let element = self.element(idx);

        self.cmp.cmp(element.key(), key).is_eq().then_some(element)
    }

    /// Get the element with the given key, if there is one, with mutable access to its value.
    #[must_use]
    pub fn get_mut(&mut self, key: &[u8]) -> Option<&mut Element<V>> {
        let idx = self.find_greater_or_equal(key)
            .filter(|&idx| self.key_matches(idx, key))?;

        Some(self.element_mut(idx))
    }

    /// Check whether the map has an element with the given key.
    #[inline]
    #[must_use]
    pub fn contains(&self, key: &[u8]) -> bool {
        self.get(key).is_some()
    }

    /// Unlink the element with the given key from every level, and hand it back.
    ///
    /// Returns `None`, without changing the map, if the key is not present.
    pub fn remove(&mut self, key: &[u8]) -> Option<Element<V>> {
        self.find_preceding_neighbors(key);

        let idx = self.matching_successor(key)?;
        self.unlink(idx);

        // `swap_remove` moves the last element into `idx`, so links to it need to be repointed
        // before its index changes.
        let last_idx = self.elements.len() - 1;
        if idx != last_idx {
            self.repoint_links(last_idx, idx);
        }

        let removed = self.elements.swap_remove(idx);

        tracing::event!(
            LogLevel::TRACE,
            height = removed.height(),
            len = self.elements.len(),
            "removed a skipmap element"
        );

        Some(removed)
    }

    /// Iterate over every `(key, value)` pair whose key is greater than or equal to `min_bound`,
    /// in ascending order of keys.
    #[must_use]
    pub fn iter_from(&self, min_bound: &[u8]) -> Iter<'_, V, Cmp> {
        Iter::new(self, self.find_greater_or_equal(min_bound))
    }

    /// Stitch each level around the element at `idx`, using the predecessors recorded in
    /// `self.prev_nodes`. Afterwards, no link refers to `idx`.
    fn unlink(&mut self, idx: usize) {
        for level in 0..self.element(idx).height() {
            let next = self.element(idx).links().skip(level);

            if let Some(prev) = self.predecessor_on_level(self.prev_node(level), level, idx) {
                self.links_mut(prev).set_skip(level, next);
            }
        }
    }

    /// Make every link to the element at `from` refer to `to` instead.
    ///
    /// Overwrites `self.prev_nodes`.
    fn repoint_links(&mut self, from: usize, to: usize) {
        let mut prev_nodes = mem::take(&mut self.prev_nodes);

        let moved = self.element(from);
        let height = moved.height();
        self.fill_preceding_neighbors(moved.key(), &mut prev_nodes);

        for (level, &hint) in prev_nodes.iter().enumerate().take(height) {
            if let Some(prev) = self.predecessor_on_level(hint, level, from) {
                self.links_mut(prev).set_skip(level, Some(to));
            }
        }

        self.prev_nodes = prev_nodes;
    }
}

impl<V> Default for SkipMap<V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Debug, Cmp> Debug for SkipMap<V, Cmp> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: AsRef<[u8]>, V, Cmp: Comparator> Extend<(K, V)> for SkipMap<V, Cmp> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key.as_ref(), value);
        }
    }
}

impl<K: AsRef<[u8]>, V> FromIterator<(K, V)> for SkipMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<'a, V, Cmp> IntoIterator for &'a SkipMap<V, Cmp> {
    type Item     = (&'a [u8], &'a V);
    type IntoIter = Iter<'a, V, Cmp>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
