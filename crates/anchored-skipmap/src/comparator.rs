use std::cmp::Ordering;


/// Interface for comparing the keys of a [`SkipMap`].
///
/// The comparator must be a total order for the map to behave sensibly. A broken comparator
/// causes logic errors (lost or duplicated keys), never memory unsafety.
///
/// [`SkipMap`]: crate::SkipMap
pub trait Comparator {
    /// Compare two keys of a [`SkipMap`].
    ///
    /// [`SkipMap`]: crate::SkipMap
    #[must_use]
    fn cmp(&self, lhs: &[u8], rhs: &[u8]) -> Ordering;
}

/// A [`Comparator`] which uses the [`Ord`] implementation of `[u8]`: lexicographic over raw
/// bytes, where a strict prefix sorts before the longer key.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BytewiseComparator;

impl Comparator for BytewiseComparator {
    /// Equivalent to `Ord::cmp(lhs, rhs)`.
    #[inline]
    fn cmp(&self, lhs: &[u8], rhs: &[u8]) -> Ordering {
        Ord::cmp(lhs, rhs)
    }
}

impl<C: ?Sized + Comparator> Comparator for &C {
    #[inline]
    fn cmp(&self, lhs: &[u8], rhs: &[u8]) -> Ordering {
        C::cmp(self, lhs, rhs)
    }
}

impl<C: ?Sized + Comparator> Comparator for Box<C> {
    #[inline]
    fn cmp(&self, lhs: &[u8], rhs: &[u8]) -> Ordering {
        C::cmp(self, lhs, rhs)
    }
}
