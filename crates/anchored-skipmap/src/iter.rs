use std::iter::FusedIterator;
use std::fmt::{Debug, Formatter, Result as FmtResult};

use crate::{list::SkipMap, node::Link};


/// An iterator over the `(key, value)` pairs of a [`SkipMap`], in ascending order of keys.
///
/// Created by [`SkipMap::iter`] or [`SkipMap::iter_from`]. It follows the bottom level of the
/// map, which links every element, so it is finite; once it returns `None`, it keeps returning
/// `None`.
pub struct Iter<'a, V, Cmp> {
    map:    &'a SkipMap<V, Cmp>,
    cursor: Link,
}

impl<'a, V, Cmp> Iter<'a, V, Cmp> {
    #[inline]
    #[must_use]
    pub(crate) const fn new(map: &'a SkipMap<V, Cmp>, cursor: Link) -> Self {
        Self { map, cursor }
    }
}

impl<'a, V, Cmp> Iterator for Iter<'a, V, Cmp> {
    type Item = (&'a [u8], &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.map.element(self.cursor?);
        self.cursor = element.links().skip(0);

        Some((element.key(), element.value()))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.cursor.is_some() {
            (1, Some(self.map.len()))
        } else {
            (0, Some(0))
        }
    }
}

impl<V, Cmp> FusedIterator for Iter<'_, V, Cmp> {}

impl<V, Cmp> Clone for Iter<'_, V, Cmp> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            map:    self.map,
            cursor: self.cursor,
        }
    }
}

impl<V, Cmp> Debug for Iter<'_, V, Cmp> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Iter")
            .field("map",    &format!("<skipmap of length {}>", self.map.len()))
            .field("cursor", &self.cursor)
            .finish()
    }
}
