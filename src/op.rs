//! The binary operation a tree folds with.
//!
//! Build, update, and query all go through the same [`BinaryOp`] value stored
//! in the tree. Any `Fn(&T, &T) -> T` works out of the box; named operations
//! can implement the trait directly, like [`Sum`] does.

use std::ops::AddAssign;

/// An associative combining operation over `T`.
///
/// Implementations must be associative:
/// `combine(combine(a, b), c) == combine(a, combine(b, c))` for all operands.
/// Commutativity is not required; the tree never swaps operands.
pub trait BinaryOp<T> {
    /// Folds two adjacent partial results, `left` covering the elements
    /// immediately before those covered by `right`.
    fn combine(&self, left: &T, right: &T) -> T;
}

impl<T, F> BinaryOp<T> for F
where
    F: Fn(&T, &T) -> T,
{
    fn combine(&self, left: &T, right: &T) -> T {
        self(left, right)
    }
}

/// The default operation: addition, with `T::default()` as the zero.
///
/// # Examples
///
/// ```
/// use segment_tree::{BinaryOp, Sum};
///
/// assert_eq!(Sum.combine(&2, &3), 5);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Sum;

impl<T> BinaryOp<T> for Sum
where
    for<'a> T: AddAssign<&'a T> + Default,
{
    fn combine(&self, left: &T, right: &T) -> T {
        let mut sum = T::default();
        sum += left;
        sum += right;
        sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sum_combines_in_order() {
        assert_eq!(Sum.combine(&1u64, &2), 3);
        assert_eq!(Sum.combine(&-5i32, &5), 0);
    }

    #[test]
    fn closures_are_operations() {
        let max = |a: &i32, b: &i32| *a.max(b);
        assert_eq!(max.combine(&3, &7), 7);
    }
}
