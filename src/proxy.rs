//! Write access to elements, routed through [`SegmentTree::update`].
//!
//! A plain `&mut T` into the leaf half would let callers change an element
//! without the ancestor aggregates being recomputed, so the tree never hands
//! one out. [`ElementMut`] is the write surface instead: it reads like a
//! reference and turns assignment into an update.

use std::fmt;
use std::ops::Deref;

use crate::op::BinaryOp;
use crate::{Error, SegmentTree};

impl<T, O> SegmentTree<T, O> {
    /// Returns a write handle for the element at `index`.
    ///
    /// # Examples
    ///
    /// ```
    /// use segment_tree::SegmentTree;
    ///
    /// let mut tree = SegmentTree::new(vec![1, 2, 3, 4, 5]);
    /// tree.element_mut(2).set(10);
    /// assert_eq!(tree.query(1, 4), 16);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`. Use [`at_mut`] to get an [`Error`]
    /// instead.
    ///
    /// [`at_mut`]: SegmentTree::at_mut
    pub fn element_mut(&mut self, index: usize) -> ElementMut<'_, T, O> {
        assert!(
            index < self.len(),
            "index {index} out of bounds for tree of {} elements",
            self.len()
        );

        ElementMut { tree: self, index }
    }

    /// Checked variant of [`element_mut`].
    ///
    /// # Examples
    ///
    /// ```
    /// use segment_tree::{Error, SegmentTree};
    ///
    /// let mut tree = SegmentTree::new(vec![1, 2, 3]);
    /// tree.at_mut(0)?.set(9);
    /// assert_eq!(tree.query(0, 3), 14);
    /// assert!(tree.at_mut(3).is_err());
    /// # Ok::<(), Error>(())
    /// ```
    ///
    /// [`element_mut`]: SegmentTree::element_mut
    pub fn at_mut(&mut self, index: usize) -> Result<ElementMut<'_, T, O>, Error> {
        if index >= self.len() {
            return Err(Error::IndexOutOfBounds {
                index,
                len: self.len(),
            });
        }

        Ok(ElementMut { tree: self, index })
    }
}

/// A write handle for one element of a [`SegmentTree`].
///
/// Dereferences to the current leaf value; [`set`] is equivalent to calling
/// [`SegmentTree::update`] with the handle's index. The handle borrows the
/// tree mutably, so it cannot outlive the tree and no query can observe the
/// buffer while a write is in flight.
///
/// [`set`]: ElementMut::set
pub struct ElementMut<'a, T, O> {
    tree: &'a mut SegmentTree<T, O>,
    index: usize,
}

impl<T, O> ElementMut<'_, T, O> {
    /// The element index this handle is bound to.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Reads the current value of the element.
    pub fn get(&self) -> &T {
        &self.tree.nodes[self.tree.leaf_position(self.index)]
    }
}

impl<T, O> ElementMut<'_, T, O>
where
    T: Default,
    O: BinaryOp<T>,
{
    /// Writes `value` through [`SegmentTree::update`], restoring every
    /// ancestor aggregate before returning.
    pub fn set(&mut self, value: T) {
        self.tree.update(self.index, value);
    }
}

impl<T, O> Deref for ElementMut<'_, T, O> {
    type Target = T;

    fn deref(&self) -> &T {
        self.get()
    }
}

impl<T, O> fmt::Debug for ElementMut<'_, T, O>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementMut")
            .field("index", &self.index)
            .field("value", self.get())
            .finish()
    }
}
