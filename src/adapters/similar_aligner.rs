//! `similar` implementation of the Aligner port.

use crate::domain::{Hunk, Range};
use crate::ports::Aligner;
use serde::Deserialize;
use similar::{capture_diff_slices, Algorithm, DiffOp, DiffTag};
use std::hash::Hash;

/// Alignment algorithm selectable from config and the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AlignAlgorithm {
    #[default]
    Myers,
    Patience,
    Lcs,
}

impl From<AlignAlgorithm> for Algorithm {
    fn from(value: AlignAlgorithm) -> Self {
        match value {
            AlignAlgorithm::Myers => Algorithm::Myers,
            AlignAlgorithm::Patience => Algorithm::Patience,
            AlignAlgorithm::Lcs => Algorithm::Lcs,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarAligner {
    algorithm: AlignAlgorithm,
}

impl SimilarAligner {
    pub fn new(algorithm: AlignAlgorithm) -> Self {
        Self { algorithm }
    }
}

impl Aligner for SimilarAligner {
    fn align<T: Eq + Hash + Ord>(&self, left: &[T], right: &[T]) -> Vec<Hunk> {
        let ops = capture_diff_slices(self.algorithm.into(), left, right);
        hunks_from_ops(&ops)
    }
}

/// Fold diff ops into hunks. Neighbouring non-equal ops (a delete next to an
/// insert) become one differing hunk so the renderer can pair their lines.
///
/// Starts come from running cursors, not from the ops: `similar` can report a
/// stale index on the empty side of a delete or insert.
fn hunks_from_ops(ops: &[DiffOp]) -> Vec<Hunk> {
    let mut hunks: Vec<Hunk> = Vec::with_capacity(ops.len());
    let mut left_next = 0;
    let mut right_next = 0;

    for op in ops {
        let old_len = op.old_range().len();
        let new_len = op.new_range().len();
        if old_len == 0 && new_len == 0 {
            continue;
        }

        let same = op.tag() == DiffTag::Equal;
        match hunks.last_mut() {
            Some(last) if last.same == same => {
                last.left.count += old_len;
                last.right.count += new_len;
            }
            _ => hunks.push(Hunk {
                left: Range::new(left_next, old_len),
                right: Range::new(right_next, new_len),
                same,
            }),
        }
        left_next += old_len;
        right_next += new_len;
    }

    hunks
}
