//! Pure data types for the diff domain.
//! No I/O, nothing beyond std and serde.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Hard line-break sequence documents are split on and rejoined with.
pub const LINE_BREAK: &str = "\r\n";

/// Index interval into one side of an alignment.
///
/// Stored as a start and a count, so an empty range still has a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Range {
    pub start: usize,
    pub count: usize,
}

impl Range {
    pub fn new(start: usize, count: usize) -> Self {
        Self { start, count }
    }

    /// One past the last index.
    pub fn end_exclusive(&self) -> usize {
        self.start + self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn indices(&self) -> std::ops::Range<usize> {
        self.start..self.end_exclusive()
    }
}

/// One alignment region: a pair of ranges plus whether they match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hunk {
    pub left: Range,
    pub right: Range,
    pub same: bool,
}

impl Hunk {
    pub fn same(left: Range, right: Range) -> Self {
        Self {
            left,
            right,
            same: true,
        }
    }

    pub fn different(left: Range, right: Range) -> Self {
        Self {
            left,
            right,
            same: false,
        }
    }
}

/// A word plus the whitespace run that trails it.
///
/// Equality, ordering and hashing look at the word only, so two tokens that differ
/// just in spacing align as a match.
#[derive(Debug, Clone, Copy)]
pub struct Token<'a> {
    pub word: &'a str,
    pub whitespace: &'a str,
}

impl<'a> Token<'a> {
    pub fn new(word: &'a str, whitespace: &'a str) -> Self {
        Self { word, whitespace }
    }

    pub fn len(&self) -> usize {
        self.word.len() + self.whitespace.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PartialEq for Token<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.word == other.word
    }
}

impl Eq for Token<'_> {}

impl Hash for Token<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.word.hash(state);
    }
}

impl PartialOrd for Token<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Token<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.word.cmp(other.word)
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.word, self.whitespace)
    }
}

/// Which document an index refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left-hand"),
            Side::Right => f.write_str("right-hand"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditKind {
    ChangedLine,
    AddedLine,
    DeletedLine,
}

/// One reversible edit against a right-hand snapshot.
///
/// `left` is present for changed and deleted lines: it names the line whose
/// content gets put back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditId {
    pub kind: EditKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<usize>,
    pub right: usize,
}

impl EditId {
    pub fn changed(left: usize, right: usize) -> Self {
        Self {
            kind: EditKind::ChangedLine,
            left: Some(left),
            right,
        }
    }

    pub fn added(right: usize) -> Self {
        Self {
            kind: EditKind::AddedLine,
            left: None,
            right,
        }
    }

    pub fn deleted(left: usize, right: usize) -> Self {
        Self {
            kind: EditKind::DeletedLine,
            left: Some(left),
            right,
        }
    }
}

impl fmt::Display for EditId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, self.left) {
            (EditKind::ChangedLine, Some(left)) => write!(f, "change:{}:{}", left, self.right),
            (EditKind::DeletedLine, Some(left)) => write!(f, "delete:{}:{}", left, self.right),
            (EditKind::AddedLine, _) => write!(f, "add:{}", self.right),
            (_, None) => write!(f, "{:?}:?:{}", self.kind, self.right),
        }
    }
}

/// Host-facing action a rendered row can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Focus the editor on a right-hand line.
    GoTo { line: usize },
    Undo(EditId),
}

/// A rendered row before it becomes markup.
///
/// Line indices are 0-based positions in the left or right line array of
/// the call that produced the row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffRow {
    /// Elision marker placed before context that follows hidden lines.
    Header { left: usize, right: usize },
    Context { right: usize },
    /// A changed pair; the cells are already-escaped markup with word and
    /// whitespace highlighting applied.
    Changed {
        left: usize,
        right: usize,
        left_cell: String,
        right_cell: String,
    },
    /// A left line missing from the right text, shown next to `anchor`.
    Deleted { left: usize, anchor: usize },
    Added { right: usize },
}

impl DiffRow {
    pub fn is_change(&self) -> bool {
        matches!(
            self,
            DiffRow::Changed { .. } | DiffRow::Deleted { .. } | DiffRow::Added { .. }
        )
    }

    /// Navigation triggered by a single click.
    pub fn click(&self) -> Action {
        let line = match *self {
            DiffRow::Header { right, .. }
            | DiffRow::Context { right }
            | DiffRow::Changed { right, .. }
            | DiffRow::Added { right } => right,
            DiffRow::Deleted { anchor, .. } => anchor,
        };
        Action::GoTo { line }
    }

    /// Undo triggered by a double click, if the row is an edit.
    pub fn double_click(&self) -> Option<Action> {
        match *self {
            DiffRow::Changed { left, right, .. } => Some(Action::Undo(EditId::changed(left, right))),
            DiffRow::Deleted { left, anchor } => Some(Action::Undo(EditId::deleted(left, anchor))),
            DiffRow::Added { right } => Some(Action::Undo(EditId::added(right))),
            DiffRow::Header { .. } | DiffRow::Context { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_range_keeps_its_position() {
        let range = Range::new(4, 0);
        assert!(range.is_empty());
        assert_eq!(range.end_exclusive(), 4);
        assert!(range.indices().next().is_none());
    }

    #[test]
    fn range_indices_stop_before_end() {
        let range = Range::new(2, 3);
        assert_eq!(range.end_exclusive(), 5);
        assert_eq!(range.indices().collect::<Vec<_>>(), vec![2, 3, 4]);
    }

    #[test]
    fn tokens_compare_by_word_only() {
        assert_eq!(Token::new("foo", " "), Token::new("foo", "  "));
        assert_ne!(Token::new("foo", " "), Token::new("bar", " "));
    }

    #[test]
    fn tokens_order_by_word_only() {
        assert_eq!(Token::new("foo", " ").cmp(&Token::new("foo", "\t")), Ordering::Equal);
        assert!(Token::new("bar", "  ") < Token::new("foo", ""));
    }

    #[test]
    fn token_display_rejoins_word_and_whitespace() {
        assert_eq!(Token::new("foo", "\t ").to_string(), "foo\t ");
    }

    #[test]
    fn action_serializes_with_tag() {
        let json = serde_json::to_string(&Action::Undo(EditId::added(3))).unwrap();
        assert_eq!(json, r#"{"action":"undo","kind":"added_line","right":3}"#);

        let json = serde_json::to_string(&Action::GoTo { line: 7 }).unwrap();
        assert_eq!(json, r#"{"action":"go_to","line":7}"#);
    }

    #[test]
    fn deleted_row_navigates_to_anchor() {
        let row = DiffRow::Deleted { left: 5, anchor: 2 };
        assert_eq!(row.click(), Action::GoTo { line: 2 });
        assert_eq!(
            row.double_click(),
            Some(Action::Undo(EditId::deleted(5, 2)))
        );
    }

    #[test]
    fn context_rows_have_no_undo() {
        assert_eq!(DiffRow::Context { right: 1 }.double_click(), None);
        assert!(!DiffRow::Header { left: 0, right: 0 }.is_change());
    }
}
