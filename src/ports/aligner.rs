//! Sequence alignment port (trait).
//! Defines the alignment primitive the renderer runs at line, word and
//! whitespace granularity, without coupling to any algorithm.

use crate::domain::Hunk;
use std::hash::Hash;

/// Port for aligning two sequences.
///
/// Element equality is whatever `T: Eq` says, so callers control what
/// counts as a match by choosing the element type (tokens compare by word).
/// `Ord` must agree with `Eq`; implementations may sort or bucket elements.
///
/// Implementations must return hunks in increasing order that together
/// cover `0..left.len()` and `0..right.len()` without gaps or overlap, and
/// never two adjacent hunks with the same `same` flag.
pub trait Aligner {
    fn align<T: Eq + Hash + Ord>(&self, left: &[T], right: &[T]) -> Vec<Hunk>;
}

impl<A: Aligner + ?Sized> Aligner for &A {
    fn align<T: Eq + Hash + Ord>(&self, left: &[T], right: &[T]) -> Vec<Hunk> {
        (**self).align(left, right)
    }
}
