//! Side-by-side diff rendering with word-level and whitespace-level highlighting.
//!
//! Rendering runs in two steps, mirroring the row model in [`DiffRow`]:
//! the line alignment is walked into rows (context windows, changed pairs,
//! deletions and additions), then each row becomes a table row of markup.

use crate::adapters::{AlignAlgorithm, SimilarAligner};
use crate::domain::{split_words, DiffRow, EditId, Hunk, LineSnapshot, Token};
use crate::error::UndoError;
use crate::ports::Aligner;
use crate::ui::html::{
    self, escape, ActionBinding, DataBinding, CHANGE_CLOSE, CHANGE_OPEN, WHITESPACE_MARK,
};
use crate::ui::styles::{StyleCache, TABLE_FOOTER, TABLE_HEADER};
use tracing::{debug, trace};

/// Renders diffs using an injected alignment primitive.
///
/// Holds no per-diff state; every [`render`](Self::render) call works on its
/// own line arrays and row buffer.
#[derive(Debug, Clone, Default)]
pub struct DiffRenderer<A = SimilarAligner> {
    aligner: A,
}

impl DiffRenderer {
    pub fn with_algorithm(algorithm: AlignAlgorithm) -> Self {
        Self::new(SimilarAligner::new(algorithm))
    }
}

impl<A: Aligner> DiffRenderer<A> {
    pub fn new(aligner: A) -> Self {
        Self { aligner }
    }

    /// Diff `right_text` against `left_text`, showing up to `context_lines`
    /// unchanged lines around each change.
    pub fn render(&self, left_text: &str, right_text: &str, context_lines: usize) -> RenderedDiff {
        let snapshot = LineSnapshot::from_texts(left_text, right_text);
        let rows = RenderPass::new(&self.aligner, &snapshot, context_lines).run();

        debug!(
            left_lines = snapshot.left().len(),
            right_lines = snapshot.right().len(),
            context_lines,
            rows = rows.len(),
            "rendered diff"
        );

        RenderedDiff { rows, snapshot }
    }
}

/// Output of one rendering call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDiff {
    pub rows: Vec<DiffRow>,
    /// Lines the rows refer to; keep it to undo edits later.
    pub snapshot: LineSnapshot,
}

impl RenderedDiff {
    pub fn has_changes(&self) -> bool {
        self.rows.iter().any(DiffRow::is_change)
    }

    pub fn to_html(&self, binding: &dyn ActionBinding) -> String {
        let mut out = String::with_capacity(self.rows.len() * 160);
        for row in &self.rows {
            html::write_row(&mut out, row, &self.snapshot, binding);
        }
        out
    }

    /// Rows markup with actions in data attributes.
    pub fn html(&self) -> String {
        self.to_html(&DataBinding)
    }

    pub fn undo(&self, edit: &EditId) -> Result<String, UndoError> {
        self.snapshot.undo(edit)
    }
}

/// A standalone HTML document around the rendered rows.
pub fn diff_page(diff: &RenderedDiff, binding: &dyn ActionBinding, styles: &StyleCache) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset='utf-8'>\n{}\n</head>\n<body>\n{}{}{}</body>\n</html>\n",
        styles.diff_head(),
        TABLE_HEADER,
        diff.to_html(binding),
        TABLE_FOOTER
    )
}

/// State for a single rendering call.
struct RenderPass<'a, A> {
    aligner: &'a A,
    left: &'a [String],
    right: &'a [String],
    context_lines: usize,
    rows: Vec<DiffRow>,
}

impl<'a, A: Aligner> RenderPass<'a, A> {
    fn new(aligner: &'a A, snapshot: &'a LineSnapshot, context_lines: usize) -> Self {
        Self {
            aligner,
            left: snapshot.left(),
            right: snapshot.right(),
            context_lines,
            rows: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<DiffRow> {
        let hunks = self.aligner.align(self.left, self.right);
        debug!(hunks = hunks.len(), "aligned lines");

        for hunk in &hunks {
            if hunk.same {
                self.render_context(hunk);
            } else {
                self.render_difference(hunk);
            }
        }
        self.rows
    }

    fn render_difference(&mut self, hunk: &Hunk) {
        let left = hunk.left;
        let right = hunk.right;
        trace!(?left, ?right, "difference");

        if right.start == 0 {
            self.rows.push(DiffRow::Header { left: 0, right: 0 });
        }

        let changes = left.count.min(right.count);
        for i in 0..changes {
            self.line_changed(left.start + i, right.start + i);
        }

        let anchor = right.start + changes;
        if left.count > right.count {
            for i in changes..left.count {
                self.rows.push(DiffRow::Deleted {
                    left: left.start + i,
                    anchor,
                });
            }
        } else {
            for i in changes..right.count {
                self.rows.push(DiffRow::Added {
                    right: right.start + i,
                });
            }
        }
    }

    /// Leading context follows the previous change; trailing context is
    /// computed from what is left of the hunk and precedes the next change.
    fn render_context(&mut self, hunk: &Hunk) {
        let left = hunk.left;
        let right = hunk.right;

        // Nothing rendered yet means no change precedes this hunk.
        let mut displayed = 0;
        if !self.rows.is_empty() {
            displayed = self.context_lines.min(right.count);
            for i in 0..displayed {
                self.rows.push(DiffRow::Context {
                    right: right.start + i,
                });
            }
        }

        let to_display = (right.count - displayed).min(self.context_lines);
        let is_last = right.end_exclusive() >= self.right.len();
        trace!(?right, displayed, to_display, is_last, "context");
        if is_last || to_display == 0 {
            return;
        }

        if right.count > displayed + to_display {
            self.rows.push(DiffRow::Header {
                left: left.end_exclusive() - to_display,
                right: right.end_exclusive() - to_display,
            });
        }
        let first = right.end_exclusive() - to_display;
        for line in first..right.end_exclusive() {
            self.rows.push(DiffRow::Context { right: line });
        }
    }

    fn line_changed(&mut self, left: usize, right: usize) {
        let old = &self.left[left];
        let new = &self.right[right];

        // The line aligner can pair up identical lines as a change.
        if old == new {
            self.rows.push(DiffRow::Context { right });
            return;
        }

        let (left_cell, right_cell) = changed_cells(self.aligner, old, new);
        self.rows.push(DiffRow::Changed {
            left,
            right,
            left_cell,
            right_cell,
        });
    }
}

/// Word-diff two lines into (left cell, right cell) markup.
pub fn changed_cells<A: Aligner>(aligner: &A, old: &str, new: &str) -> (String, String) {
    let old_words = split_words(old);
    let new_words = split_words(new);
    let mut left = String::with_capacity(old.len() + 32);
    let mut right = String::with_capacity(new.len() + 32);

    for hunk in aligner.align(&old_words, &new_words) {
        if hunk.same {
            let pairs = hunk.left.indices().zip(hunk.right.indices());
            for (l, r) in pairs {
                push_word(aligner, &mut left, &new_words[r], &old_words[l]);
                push_word(aligner, &mut right, &old_words[l], &new_words[r]);
            }
        } else {
            push_changed(&mut left, &old_words[hunk.left.indices()]);
            push_changed(&mut right, &new_words[hunk.right.indices()]);
        }
    }

    (left, right)
}

fn push_changed(out: &mut String, words: &[Token<'_>]) {
    if words.is_empty() {
        return;
    }
    out.push_str(CHANGE_OPEN);
    for word in words {
        out.push_str(&escape(word.word));
        out.push_str(&escape(word.whitespace));
    }
    out.push_str(CHANGE_CLOSE);
}

/// Append `shown`, marking whitespace it has that `other` lacks.
fn push_word<A: Aligner>(aligner: &A, out: &mut String, other: &Token<'_>, shown: &Token<'_>) {
    out.push_str(&escape(shown.word));
    if other.whitespace == shown.whitespace {
        out.push_str(shown.whitespace);
        return;
    }

    let theirs: Vec<char> = other.whitespace.chars().collect();
    let ours: Vec<char> = shown.whitespace.chars().collect();
    for hunk in aligner.align(&theirs, &ours) {
        if hunk.same {
            out.extend(&ours[hunk.right.indices()]);
        } else if !hunk.right.is_empty() {
            out.push_str(CHANGE_OPEN);
            for _ in hunk.right.indices() {
                out.push_str(WHITESPACE_MARK);
            }
            out.push_str(CHANGE_CLOSE);
        }
    }
}
