use std::fmt::{Debug, Formatter, Result as FmtResult};


/// A forward link to the element at the given index of a skipmap's element storage, or `None`
/// if there is no successor on that level.
pub(crate) type Link = Option<usize>;


/// A node of a skipmap which a search can stop at: the header, or an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Position {
    Head,
    Element(usize),
}

/// The forward links of a node, one per level that the node participates in.
///
/// Callers in this crate only link a node on levels below its height, and a node linked on some
/// level is also linked on every level beneath it.
#[derive(Debug, Clone)]
pub(crate) struct Links(Box<[Link]>);

impl Links {
    #[must_use]
    pub(crate) fn new(height: usize) -> Self {
        Self(vec![None; height].into_boxed_slice())
    }

    #[inline]
    #[must_use]
    pub(crate) fn height(&self) -> usize {
        self.0.len()
    }

    /// Returns `None` if `level` is at least the height of this node.
    #[inline]
    #[must_use]
    pub(crate) fn skip(&self, level: usize) -> Link {
        self.0.get(level).copied().flatten()
    }

    /// # Panics
    /// May or may not panic if `level` is at least the height of this node; in release builds,
    /// the link is ignored.
    #[inline]
    pub(crate) fn set_skip(&mut self, level: usize, link: Link) {
        debug_assert!(
            level < self.height(),
            "this crate should never set a skip above the height of a node",
        );

        if let Some(skip) = self.0.get_mut(level) {
            *skip = link;
        }
    }
}

/// An entry of a [`SkipMap`]: an owned key, its value, and the links placing it in the map.
///
/// Elements removed from a map with [`SkipMap::remove`] are detached; their height is kept
/// for inspection, but they no longer link to anything meaningful.
///
/// [`SkipMap`]: crate::SkipMap
/// [`SkipMap::remove`]: crate::SkipMap::remove
pub struct Element<V> {
    links: Links,
    key:   Box<[u8]>,
    value: V,
}

impl<V> Element<V> {
    #[must_use]
    pub(crate) fn new(key: &[u8], value: V, height: usize) -> Self {
        Self {
            links: Links::new(height),
            key:   key.into(),
            value,
        }
    }

    #[inline]
    #[must_use]
    pub(crate) const fn links(&self) -> &Links {
        &self.links
    }

    #[inline]
    #[must_use]
    pub(crate) const fn links_mut(&mut self) -> &mut Links {
        &mut self.links
    }

    #[inline]
    pub(crate) fn set_value(&mut self, value: V) {
        self.value = value;
    }

    #[inline]
    #[must_use]
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    #[inline]
    #[must_use]
    pub const fn value(&self) -> &V {
        &self.value
    }

    #[inline]
    #[must_use]
    pub const fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// The number of levels this element was linked into, in `1..=max_level` of the map it was
    /// inserted into.
    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.links.height()
    }

    #[inline]
    #[must_use]
    pub fn into_parts(self) -> (Vec<u8>, V) {
        (self.key.into_vec(), self.value)
    }
}

impl<V: Debug> Debug for Element<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Element")
            .field("key",    &self.key)
            .field("value",  &self.value)
            .field("height", &self.height())
            .finish()
    }
}
