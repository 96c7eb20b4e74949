use std::ops::Index;

use crate::{Error, SegmentTree};

impl<T, O> SegmentTree<T, O> {
    /// Returns the element at `index`, or `None` if out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use segment_tree::SegmentTree;
    ///
    /// let tree = SegmentTree::new(vec![1, 2, 3]);
    /// assert_eq!(tree.get(1), Some(&2));
    /// assert_eq!(tree.get(3), None);
    /// ```
    ///
    /// # Time complexity
    ///
    /// *O*(1)
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len() {
            return None;
        }

        Some(&self.nodes[self.leaf_position(index)])
    }

    /// Returns the element at `index`, or [`Error::IndexOutOfBounds`].
    ///
    /// # Examples
    ///
    /// ```
    /// use segment_tree::{Error, SegmentTree};
    ///
    /// let tree = SegmentTree::new(vec![1, 2, 3]);
    /// assert_eq!(tree.at(1), Ok(&2));
    /// assert_eq!(tree.at(3), Err(Error::IndexOutOfBounds { index: 3, len: 3 }));
    /// ```
    pub fn at(&self, index: usize) -> Result<&T, Error> {
        self.get(index).ok_or(Error::IndexOutOfBounds {
            index,
            len: self.len(),
        })
    }

    /// Returns the element at `index` without bounds checking.
    ///
    /// # Safety
    ///
    /// `index` must be less than [`len`]. Calling this with an out-of-bounds
    /// index is undefined behavior.
    ///
    /// [`len`]: SegmentTree::len
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        let pos = self.leaf_position(index);
        unsafe { self.nodes.get_unchecked(pos) }
    }
}

impl<T, O> Index<usize> for SegmentTree<T, O> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    fn index(&self, index: usize) -> &Self::Output {
        // Any index >= len() offsets past the buffer end, so slice indexing
        // is the whole bounds check; internal nodes are never reachable.
        &self.nodes[self.leaf_position(index)]
    }
}

#[cfg(test)]
mod tests {
    use crate::SegmentTree;

    #[test]
    fn reads_see_current_leaf_values() {
        let mut tree = SegmentTree::new(vec![1, 2, 3]);
        assert_eq!(tree[0], 1);
        assert_eq!(tree[2], 3);

        tree.update(0, 5);
        assert_eq!(tree[0], 5);
        assert_eq!(tree.get(0), Some(&5));
        assert_eq!(unsafe { tree.get_unchecked(0) }, &5);
    }

    #[test]
    #[should_panic]
    fn index_panics_out_of_bounds() {
        let tree = SegmentTree::new(vec![1, 2, 3]);
        let _ = tree[3];
    }
}
