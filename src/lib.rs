//! [`SegmentTree`] is a fixed-size, array-backed aggregation structure.
//!
//! # Overview
//!
//! It stores `n` elements and maintains, for every aligned segment of them,
//! the fold of a user-supplied associative binary operation (default: sum).
//! This gives you:
//! * *O*(log *n*) to [`update`] a single element.
//! * *O*(log *n*) to [`query`] the fold over any half-open range `left..right`.
//! * *O*(1) indexed reads, since elements are stored in a [`Vec`] that forms
//!   an implicit tree for compact size.
//!
//! The element count is fixed at construction. There is no push/insert/remove
//! and no lazy range update; if you need an appendable prefix-sum structure,
//! use a Fenwick-style tree instead.
//!
//! The operation is not required to be commutative: [`query`] always combines
//! partial results in left-to-right index order, so operations like string
//! concatenation or matrix multiplication behave correctly.
//!
//! # Encoding layout
//!
//! Nodes live in a single `Vec` of length `2 * n`. Node `i`'s children are
//! `2 * i` and `2 * i + 1`, its parent is `i / 2`. Leaves occupy the upper
//! half `n..2 * n` in logical order, internal aggregates occupy `1..n`, and
//! index `0` is an unused sentinel.
//!
//! For `n = 4` and elements `[a, b, c, d]`:
//!
//! ```text
//! nodes:  [ _ ] [ abcd ] [ ab ] [ cd ] [ a ] [ b ] [ c ] [ d ]
//! index:    0      1       2      3      4     5     6     7
//! ```
//!
//! Every internal node satisfies `nodes[i] == op(nodes[2 * i], nodes[2 * i + 1])`
//! after each completed construction or [`update`]. The layout works for any
//! `n`, not just powers of two: [`query`] walks the two range boundaries
//! upward and folds in a node exactly when it is an odd (right-child)
//! boundary, which covers each queried leaf exactly once.
//!
//! # Zero-element folds
//!
//! An empty range query folds two default-constructed accumulators, so
//! `query(k, k)` returns `op(T::default(), T::default())`. Callers relying on
//! empty or boundary queries must supply an operation for which
//! `T::default()` acts as a neutral element (`0` for sum, `""` for
//! concatenation). This is a documented precondition, not a runtime check.
//!
//! [`update`]: SegmentTree::update
//! [`query`]: SegmentTree::query

mod error;
mod index;
mod iterator;
mod op;
mod proxy;

pub use crate::error::Error;
pub use crate::iterator::Iter;
pub use crate::op::{BinaryOp, Sum};
pub use crate::proxy::ElementMut;

use std::fmt;
use std::mem;
use std::ops::AddAssign;

/// A fixed-size array-backed segment tree over an associative operation.
pub struct SegmentTree<T, O = Sum> {
    pub(crate) nodes: Vec<T>,
    pub(crate) op: O,
}

// `nodes` holds 2 * len() entries.
const MAX_LEN: usize = usize::MAX / 2;

// construction
impl<T> SegmentTree<T>
where
    for<'a> T: AddAssign<&'a T> + Default,
{
    /// Builds a sum tree over `elements`.
    ///
    /// # Examples
    ///
    /// ```
    /// use segment_tree::SegmentTree;
    ///
    /// let tree = SegmentTree::new(vec![1, 2, 3, 4, 5]);
    /// assert_eq!(tree.query(1, 4), 9);
    /// assert_eq!(tree.query(0, 5), 15);
    /// ```
    ///
    /// # Time complexity
    ///
    /// *O*([`len`])
    ///
    /// [`len`]: SegmentTree::len
    pub fn new(elements: Vec<T>) -> Self {
        Self::with_op(elements, Sum)
    }
}

impl<T, O> SegmentTree<T, O>
where
    T: Default,
    O: BinaryOp<T>,
{
    /// Builds a tree over `elements` folding with `op`.
    ///
    /// `op` must be associative. It does not have to be commutative; see the
    /// crate docs for the ordering guarantee and the `T::default()`
    /// precondition on empty folds.
    ///
    /// # Examples
    ///
    /// ```
    /// use segment_tree::SegmentTree;
    ///
    /// let tree = SegmentTree::with_op(vec![3, 1, 4, 1, 5], |a: &i32, b: &i32| *a.min(b));
    /// assert_eq!(tree.query(0, 3), 1);
    /// assert_eq!(tree.query(2, 5), 1);
    /// ```
    ///
    /// # Time complexity
    ///
    /// *O*([`len`])
    ///
    /// [`len`]: SegmentTree::len
    pub fn with_op(elements: Vec<T>, op: O) -> Self {
        let len = elements.len();
        assert!(len <= MAX_LEN);

        let mut nodes = Vec::with_capacity(len * 2);
        nodes.resize_with(len, T::default);
        nodes.extend(elements);

        let mut tree = SegmentTree { nodes, op };
        tree.build();
        tree
    }

    /// Recomputes every internal node from the leaves.
    ///
    /// Runs once, at construction. Descending order guarantees both children
    /// of `i` are final before `i` is computed, so a single pass suffices.
    fn build(&mut self) {
        for i in (1..self.len()).rev() {
            let aggregate = self.op.combine(&self.nodes[2 * i], &self.nodes[2 * i + 1]);
            self.nodes[i] = aggregate;
        }
    }
}

impl<T> From<Vec<T>> for SegmentTree<T>
where
    for<'a> T: AddAssign<&'a T> + Default,
{
    fn from(elements: Vec<T>) -> Self {
        Self::new(elements)
    }
}

impl<T, O> FromIterator<T> for SegmentTree<T, O>
where
    T: Default,
    O: BinaryOp<T> + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::with_op(iter.into_iter().collect(), O::default())
    }
}

// size and storage accessors
impl<T, O> SegmentTree<T, O> {
    /// Returns the number of elements, which is the number of leaf nodes.
    ///
    /// # Examples
    ///
    /// ```
    /// use segment_tree::SegmentTree;
    ///
    /// let tree = SegmentTree::new(vec![1, 2, 3]);
    /// assert_eq!(tree.len(), 3);
    /// ```
    pub fn len(&self) -> usize {
        self.nodes.len() / 2
    }

    /// Returns `true` if the tree holds no elements.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the elements as a contiguous slice, in logical order.
    ///
    /// # Examples
    ///
    /// ```
    /// use segment_tree::SegmentTree;
    ///
    /// let tree = SegmentTree::new(vec![1, 2, 3]);
    /// assert_eq!(tree.as_slice(), &[1, 2, 3]);
    /// ```
    pub fn as_slice(&self) -> &[T] {
        &self.nodes[self.nodes.len() / 2..]
    }

    /// Exchanges the entire state of two trees: buffers, operations, and
    /// therefore sizes. The trees need not have the same length.
    ///
    /// # Examples
    ///
    /// ```
    /// use segment_tree::SegmentTree;
    ///
    /// let mut a = SegmentTree::new(vec![1, 2, 3]);
    /// let mut b = SegmentTree::new(vec![10, 20]);
    /// a.swap(&mut b);
    /// assert_eq!(a.as_slice(), &[10, 20]);
    /// assert_eq!(b.query(0, 3), 6);
    /// ```
    ///
    /// # Time complexity
    ///
    /// *O*(1)
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Buffer position of the leaf holding element `index`.
    pub(crate) fn leaf_position(&self, index: usize) -> usize {
        self.len() + index
    }
}

// point update
impl<T, O> SegmentTree<T, O>
where
    T: Default,
    O: BinaryOp<T>,
{
    /// Writes `value` at element `index` and recomputes the aggregates on the
    /// path from that leaf to the root. No other node is touched.
    ///
    /// # Examples
    ///
    /// ```
    /// use segment_tree::SegmentTree;
    ///
    /// let mut tree = SegmentTree::new(vec![1, 2, 3, 4, 5]);
    /// tree.update(2, 10);
    /// assert_eq!(tree[2], 10);
    /// assert_eq!(tree.query(1, 4), 16);
    /// assert_eq!(tree.query(0, 5), 22);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`. Use [`try_update`] to get an
    /// [`Error`] instead.
    ///
    /// # Time complexity
    ///
    /// *O*(log [`len`])
    ///
    /// [`try_update`]: SegmentTree::try_update
    /// [`len`]: SegmentTree::len
    pub fn update(&mut self, index: usize, value: T) {
        assert!(
            index < self.len(),
            "index {index} out of bounds for tree of {} elements",
            self.len()
        );

        self.write_leaf(index, value);
    }

    /// Checked variant of [`update`]: rejects an out-of-bounds index with
    /// [`Error::IndexOutOfBounds`] before anything is written, so a failed
    /// call leaves the tree untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use segment_tree::{Error, SegmentTree};
    ///
    /// let mut tree = SegmentTree::new(vec![1, 2, 3]);
    /// assert!(tree.try_update(1, 7).is_ok());
    /// assert_eq!(
    ///     tree.try_update(3, 7),
    ///     Err(Error::IndexOutOfBounds { index: 3, len: 3 }),
    /// );
    /// ```
    ///
    /// [`update`]: SegmentTree::update
    pub fn try_update(&mut self, index: usize, value: T) -> Result<(), Error> {
        if index >= self.len() {
            return Err(Error::IndexOutOfBounds {
                index,
                len: self.len(),
            });
        }

        self.write_leaf(index, value);
        Ok(())
    }

    /// Overwrites the leaf for `index`, then climbs to the root recomputing
    /// each parent from its (now final) children. The climb uses only
    /// already-validated positions, so it cannot fail once the write begins.
    fn write_leaf(&mut self, index: usize, value: T) {
        let mut pos = self.leaf_position(index);
        self.nodes[pos] = value;

        while pos > 1 {
            // An even position is a left child, an odd one a right child;
            // combine the sibling pair in left-to-right order either way.
            let aggregate = if pos % 2 == 0 {
                self.op.combine(&self.nodes[pos], &self.nodes[pos + 1])
            } else {
                self.op.combine(&self.nodes[pos - 1], &self.nodes[pos])
            };
            pos /= 2;
            self.nodes[pos] = aggregate;
        }
    }
}

// range query
impl<T, O> SegmentTree<T, O>
where
    T: Default,
    O: BinaryOp<T>,
{
    /// Returns the fold of the operation over elements `left..right`, in
    /// index order.
    ///
    /// An empty range returns `op(T::default(), T::default())`; see the crate
    /// docs for the neutral-element precondition.
    ///
    /// # Examples
    ///
    /// ```
    /// use segment_tree::SegmentTree;
    ///
    /// let tree = SegmentTree::new(vec![1, 2, 3, 4, 5]);
    /// assert_eq!(tree.query(1, 4), 9);
    /// assert_eq!(tree.query(2, 2), 0);
    /// assert_eq!(tree.query(0, 5), 15);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `left > right` or `right > self.len()`. Use [`try_query`]
    /// to get an [`Error`] instead.
    ///
    /// # Time complexity
    ///
    /// *O*(log [`len`])
    ///
    /// [`try_query`]: SegmentTree::try_query
    /// [`len`]: SegmentTree::len
    pub fn query(&self, left: usize, right: usize) -> T {
        assert!(
            left <= right && right <= self.len(),
            "invalid range {left}..{right} for tree of {} elements",
            self.len()
        );

        self.fold_range(left, right)
    }

    /// Checked variant of [`query`]: rejects `left > right` or
    /// `right > self.len()` with [`Error::InvalidRange`].
    ///
    /// # Examples
    ///
    /// ```
    /// use segment_tree::{Error, SegmentTree};
    ///
    /// let tree = SegmentTree::new(vec![1, 2, 3]);
    /// assert_eq!(tree.try_query(0, 2), Ok(3));
    /// assert_eq!(
    ///     tree.try_query(1, 4),
    ///     Err(Error::InvalidRange { left: 1, right: 4, len: 3 }),
    /// );
    /// ```
    ///
    /// [`query`]: SegmentTree::query
    pub fn try_query(&self, left: usize, right: usize) -> Result<T, Error> {
        if left > right || right > self.len() {
            return Err(Error::InvalidRange {
                left,
                right,
                len: self.len(),
            });
        }

        Ok(self.fold_range(left, right))
    }

    /// Iterative boundary climb over the implicit tree.
    ///
    /// Both boundaries are translated to leaf positions and walked upward one
    /// level per iteration. A boundary node that is a right child is not
    /// covered by its parent (the parent would drag in a sibling outside the
    /// range), so it is folded into an accumulator before ascending. Nodes
    /// consumed at the left boundary are appended to `front`, nodes consumed
    /// at the right boundary are prepended to `back`; the final
    /// `op(front, back)` therefore preserves index order even for
    /// non-commutative operations.
    fn fold_range(&self, left: usize, right: usize) -> T {
        let mut left = self.len() + left;
        let mut right = self.len() + right;
        let mut front = T::default();
        let mut back = T::default();

        while left < right {
            if left % 2 == 1 {
                front = self.op.combine(&front, &self.nodes[left]);
                left += 1;
            }
            if right % 2 == 1 {
                right -= 1;
                back = self.op.combine(&self.nodes[right], &back);
            }
            left /= 2;
            right /= 2;
        }

        self.op.combine(&front, &back)
    }
}

impl<T, O> Clone for SegmentTree<T, O>
where
    T: Clone,
    O: Clone,
{
    fn clone(&self) -> Self {
        SegmentTree {
            nodes: self.nodes.clone(),
            op: self.op.clone(),
        }
    }
}

impl<T, O> fmt::Debug for SegmentTree<T, O>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn concat(a: &String, b: &String) -> String {
        format!("{a}{b}")
    }

    /// Full-buffer inspection: every internal node must equal the fold of its
    /// two children.
    fn assert_aggregates<T, O>(tree: &SegmentTree<T, O>)
    where
        T: PartialEq + std::fmt::Debug,
        O: BinaryOp<T>,
    {
        for i in 1..tree.len() {
            assert_eq!(
                tree.nodes[i],
                tree.op.combine(&tree.nodes[2 * i], &tree.nodes[2 * i + 1]),
                "aggregate broken at node {i}",
            );
        }
    }

    #[test]
    fn sum_scenario() {
        let mut tree = SegmentTree::new(vec![1, 2, 3, 4, 5]);
        assert_eq!(tree.query(1, 4), 9);

        tree.update(2, 10);
        assert_eq!(tree.as_slice(), &[1, 2, 10, 4, 5]);
        assert_eq!(tree.query(1, 4), 16);
        assert_eq!(tree.query(0, 5), 22);
        assert_aggregates(&tree);
    }

    #[test]
    fn empty_tree() {
        let mut tree: SegmentTree<i64> = SegmentTree::new(vec![]);
        assert_eq!(tree.len(), 0);
        assert!(tree.is_empty());
        assert_eq!(tree.query(0, 0), 0);
        assert_eq!(
            tree.try_update(0, 1),
            Err(Error::IndexOutOfBounds { index: 0, len: 0 }),
        );
    }

    #[test]
    fn single_element() {
        let mut tree = SegmentTree::new(vec![7]);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.query(0, 1), 7);
        tree.update(0, 9);
        assert_eq!(tree.query(0, 1), 9);
        assert_eq!(tree.query(1, 1), 0);
    }

    #[test]
    fn build_matches_naive_fold_for_awkward_sizes() {
        // Sizes that are not powers of two exercise the unaligned layout.
        for n in 1..=17usize {
            let elements: Vec<i64> = (0..n as i64).map(|x| x * x - 3).collect();
            let tree = SegmentTree::new(elements.clone());
            assert_aggregates(&tree);
            for left in 0..=n {
                for right in left..=n {
                    let expected: i64 = elements[left..right].iter().sum();
                    assert_eq!(tree.query(left, right), expected, "{left}..{right} of {n}");
                }
            }
        }
    }

    #[test]
    fn update_is_idempotent_on_the_buffer() {
        let mut once = SegmentTree::new(vec![5, 1, 4, 2, 3, 6]);
        once.update(3, 42);

        let mut twice = SegmentTree::new(vec![5, 1, 4, 2, 3, 6]);
        twice.update(3, 42);
        twice.update(3, 42);

        assert_eq!(once.nodes, twice.nodes);
    }

    #[test]
    fn non_commutative_concat_preserves_order() {
        let words: Vec<String> = ["a", "b", "c", "d", "e"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let mut tree = SegmentTree::with_op(words, concat);

        assert_eq!(tree.query(1, 4), "bcd");
        assert_eq!(tree.query(0, 5), "abcde");

        tree.update(2, "X".to_string());
        assert_eq!(tree.query(1, 4), "bXd");
    }

    #[test]
    fn closure_operation() {
        let tree =
            SegmentTree::with_op(vec![3, 1, 4, 1, 5, 9, 2, 6], |a: &i64, b: &i64| *a.max(b));
        assert_eq!(tree.query(0, 4), 4);
        assert_eq!(tree.query(4, 8), 9);
    }

    #[test]
    fn swap_exchanges_full_state() {
        let mut a = SegmentTree::new(vec![1, 2, 3]);
        let mut b = SegmentTree::new(vec![10, 20, 30, 40, 50]);
        let a_snapshot = a.clone();
        let b_snapshot = b.clone();

        a.swap(&mut b);

        assert_eq!(a.nodes, b_snapshot.nodes);
        assert_eq!(b.nodes, a_snapshot.nodes);
        assert_eq!(a.len(), 5);
        assert_eq!(b.len(), 3);
        assert_eq!(a.query(0, 5), 150);
        assert_eq!(b.query(0, 3), 6);
    }

    #[test]
    fn checked_surfaces_report_bounds_violations() {
        let tree = SegmentTree::new(vec![1, 2, 3]);
        assert_eq!(
            tree.try_query(2, 1),
            Err(Error::InvalidRange {
                left: 2,
                right: 1,
                len: 3,
            }),
        );
        assert_eq!(
            tree.try_query(0, 4),
            Err(Error::InvalidRange {
                left: 0,
                right: 4,
                len: 3,
            }),
        );
        assert_eq!(tree.at(3), Err(Error::IndexOutOfBounds { index: 3, len: 3 }));
        assert_eq!(tree.at(2), Ok(&3));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn update_panics_out_of_bounds() {
        let mut tree = SegmentTree::new(vec![1, 2, 3]);
        tree.update(3, 0);
    }

    #[test]
    #[should_panic(expected = "invalid range")]
    fn query_panics_on_reversed_range() {
        let tree = SegmentTree::new(vec![1, 2, 3]);
        tree.query(2, 1);
    }

    #[test]
    fn from_iterator_collects() {
        let tree: SegmentTree<i32> = (1..=4).collect();
        assert_eq!(tree.query(0, 4), 10);

        let tree = SegmentTree::from(vec![1, 2, 3]);
        assert_eq!(tree.query(0, 3), 6);
    }

    #[test]
    fn debug_prints_logical_elements() {
        let tree = SegmentTree::new(vec![1, 2, 3]);
        assert_eq!(format!("{tree:?}"), "[1, 2, 3]");
    }

    proptest! {
        #[test]
        fn aggregates_hold_after_update_sequences(
            elements in prop::collection::vec(-1_000i64..1_000, 1..48),
            updates in prop::collection::vec((0usize..48, -1_000i64..1_000), 0..32),
        ) {
            let mut tree = SegmentTree::new(elements.clone());
            for (index, value) in updates {
                tree.update(index % elements.len(), value);
                assert_aggregates(&tree);
            }
        }
    }
}
