use std::iter::FusedIterator;
use std::slice;

use crate::SegmentTree;

impl<T, O> SegmentTree<T, O> {
    /// Returns an iterator over the current element values in logical order.
    ///
    /// The iterator is double-ended; `iter().rev()` walks the elements in
    /// reverse. It borrows the tree, so it always observes a fully updated
    /// buffer.
    ///
    /// # Examples
    ///
    /// ```
    /// use segment_tree::SegmentTree;
    ///
    /// let tree = SegmentTree::new(vec![1, 2, 3]);
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    /// assert_eq!(tree.iter().rev().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.as_slice().iter(),
        }
    }
}

impl<'a, T, O> IntoIterator for &'a SegmentTree<T, O> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the elements of a [`SegmentTree`].
///
/// Leaves are stored contiguously in the upper half of the node buffer, so
/// this is a thin wrapper around a slice iterator.
#[derive(Clone)]
pub struct Iter<'a, T> {
    inner: slice::Iter<'a, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.inner.nth(n)
    }

    fn last(self) -> Option<Self::Item> {
        self.inner.last()
    }

    fn count(self) -> usize {
        self.inner.count()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }

    fn nth_back(&mut self, n: usize) -> Option<Self::Item> {
        self.inner.nth_back(n)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

#[cfg(test)]
mod tests {
    use crate::SegmentTree;

    #[test]
    fn forward_and_reverse_traversal() {
        let tree = SegmentTree::new(vec![1, 2, 3, 4]);
        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert_eq!(
            tree.iter().rev().copied().collect::<Vec<_>>(),
            vec![4, 3, 2, 1],
        );
        assert_eq!(tree.iter().len(), 4);
    }

    #[test]
    fn iteration_is_restartable_and_sees_updates() {
        let mut tree = SegmentTree::new(vec![1, 2, 3]);
        assert_eq!(tree.iter().sum::<i32>(), 6);

        tree.update(1, 10);
        assert_eq!(tree.iter().sum::<i32>(), 14);
        assert_eq!((&tree).into_iter().count(), 3);
    }

    #[test]
    fn empty_tree_yields_nothing() {
        let tree: SegmentTree<i32> = SegmentTree::new(vec![]);
        assert_eq!(tree.iter().next(), None);
        assert_eq!(tree.iter().next_back(), None);
    }
}
