//! Reverting a single edit against the right-hand text of a rendered diff.
//! No I/O - every operation rebuilds the text from the retained lines.

use super::types::{EditId, EditKind, Side, LINE_BREAK};
use crate::error::{EditParseError, UndoError};
use std::str::FromStr;

/// Left and right line arrays captured by a rendering call.
///
/// Hosts keep this around after rendering and hand it edit identifiers
/// taken from the rendered rows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineSnapshot {
    left: Vec<String>,
    right: Vec<String>,
}

impl LineSnapshot {
    /// Split both texts on the hard line break. An empty text is one empty line.
    pub fn from_texts(left: &str, right: &str) -> Self {
        Self {
            left: split_lines(left),
            right: split_lines(right),
        }
    }

    pub fn left(&self) -> &[String] {
        &self.left
    }

    pub fn right(&self) -> &[String] {
        &self.right
    }

    pub fn undo(&self, edit: &EditId) -> Result<String, UndoError> {
        let left = || {
            edit.left
                .ok_or(UndoError::MissingLeftIndex { kind: edit.kind })
        };
        match edit.kind {
            EditKind::ChangedLine => self.undo_change(left()?, edit.right),
            EditKind::AddedLine => self.undo_addition(edit.right),
            EditKind::DeletedLine => self.undo_deletion(left()?, edit.right),
        }
    }

    /// Put `left[left_idx]` back in place of `right[right_idx]`.
    pub fn undo_change(&self, left_idx: usize, right_idx: usize) -> Result<String, UndoError> {
        let restored = self.left_line(left_idx)?;
        self.check_right(right_idx)?;

        let lines = self.right.iter().enumerate().map(|(i, line)| {
            if i == right_idx {
                restored
            } else {
                line.as_str()
            }
        });
        Ok(join_lines(lines))
    }

    /// Drop `right[right_idx]`.
    pub fn undo_addition(&self, right_idx: usize) -> Result<String, UndoError> {
        self.check_right(right_idx)?;

        let lines = self
            .right
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != right_idx)
            .map(|(_, line)| line.as_str());
        Ok(join_lines(lines))
    }

    /// Reinsert `left[left_idx]` just before `right[right_idx]`.
    ///
    /// `right_idx` may equal the number of right lines, for deletions at the
    /// end of the document.
    pub fn undo_deletion(&self, left_idx: usize, right_idx: usize) -> Result<String, UndoError> {
        let restored = self.left_line(left_idx)?;
        if right_idx > self.right.len() {
            return Err(UndoError::InsertionOutOfRange {
                index: right_idx,
                len: self.right.len(),
            });
        }

        let (before, after) = self.right.split_at(right_idx);
        let lines = before
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(restored))
            .chain(after.iter().map(String::as_str));
        Ok(join_lines(lines))
    }

    fn left_line(&self, index: usize) -> Result<&str, UndoError> {
        self.left
            .get(index)
            .map(String::as_str)
            .ok_or(UndoError::LineOutOfRange {
                side: Side::Left,
                index,
                len: self.left.len(),
            })
    }

    fn check_right(&self, index: usize) -> Result<(), UndoError> {
        if index < self.right.len() {
            Ok(())
        } else {
            Err(UndoError::LineOutOfRange {
                side: Side::Right,
                index,
                len: self.right.len(),
            })
        }
    }
}

pub fn split_lines(text: &str) -> Vec<String> {
    text.split(LINE_BREAK).map(str::to_string).collect()
}

fn join_lines<'a>(lines: impl Iterator<Item = &'a str>) -> String {
    lines.collect::<Vec<_>>().join(LINE_BREAK)
}

impl FromStr for EditId {
    type Err = EditParseError;

    /// Accepts `change:L:R`, `add:R`, `delete:L:R`, or the JSON form emitted
    /// in rendered markup.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with('{') {
            return Ok(serde_json::from_str(s)?);
        }

        let mut parts = s.split(':');
        let kind = parts.next().unwrap_or_default();
        let indices = parts
            .map(|p| {
                p.trim()
                    .parse::<usize>()
                    .map_err(|e| EditParseError::BadIndex(p.to_string(), e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let arity = |expected: usize| {
            if indices.len() == expected {
                Ok(())
            } else {
                Err(EditParseError::WrongArity {
                    input: s.to_string(),
                    expected,
                })
            }
        };

        match kind {
            "change" | "changed" => {
                arity(2)?;
                Ok(EditId::changed(indices[0], indices[1]))
            }
            "add" | "added" => {
                arity(1)?;
                Ok(EditId::added(indices[0]))
            }
            "delete" | "deleted" => {
                arity(2)?;
                Ok(EditId::deleted(indices[0], indices[1]))
            }
            other => Err(EditParseError::UnknownKind(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn snapshot(left: &str, right: &str) -> LineSnapshot {
        LineSnapshot::from_texts(left, right)
    }

    #[test]
    fn empty_text_is_one_empty_line() {
        let snap = snapshot("", "");
        assert_eq!(snap.left(), &[String::new()]);
        assert_eq!(snap.right(), &[String::new()]);
    }

    #[test]
    fn undo_change_restores_left_line() {
        let snap = snapshot("A\r\nB\r\nC", "A\r\nX\r\nC");
        let text = snap.undo_change(1, 1).unwrap();
        assert_eq!(text, "A\r\nB\r\nC");
        assert_eq!(split_lines(&text)[1], snap.left()[1]);
    }

    #[test]
    fn undo_change_keeps_bytes_exactly() {
        let snap = snapshot("  tabs\tand  spaces ", "other");
        assert_eq!(snap.undo_change(0, 0).unwrap(), "  tabs\tand  spaces ");
    }

    #[test]
    fn undo_addition_drops_the_line() {
        let snap = snapshot("A\r\nB", "A\r\nB\r\nC");
        assert_eq!(snap.undo_addition(2).unwrap(), "A\r\nB");
        assert_eq!(snap.undo_addition(0).unwrap(), "B\r\nC");
    }

    #[test]
    fn undo_deletion_reinserts_before_anchor() {
        let snap = snapshot("A\r\nB\r\nC", "A\r\nC");
        assert_eq!(snap.undo_deletion(1, 1).unwrap(), "A\r\nB\r\nC");
    }

    #[test]
    fn undo_deletion_at_end_appends() {
        let snap = snapshot("A\r\nB", "A");
        assert_eq!(snap.undo_deletion(1, 1).unwrap(), "A\r\nB");
    }

    #[test]
    fn deletion_then_addition_round_trips() {
        let right = "one\r\ntwo\r\nthree";
        let snap = snapshot("zero\r\none\r\ntwo\r\nthree", right);
        for anchor in 0..=3 {
            let restored = snap.undo_deletion(0, anchor).unwrap();
            let again = snapshot("zero\r\none\r\ntwo\r\nthree", &restored);
            assert_eq!(again.undo_addition(anchor).unwrap(), right);
        }
    }

    #[test]
    fn out_of_range_indices_are_reported() {
        let snap = snapshot("A\r\nB", "A");
        assert_eq!(
            snap.undo_change(5, 0),
            Err(UndoError::LineOutOfRange {
                side: Side::Left,
                index: 5,
                len: 2
            })
        );
        assert_eq!(
            snap.undo_addition(1),
            Err(UndoError::LineOutOfRange {
                side: Side::Right,
                index: 1,
                len: 1
            })
        );
        assert_eq!(
            snap.undo_deletion(0, 2),
            Err(UndoError::InsertionOutOfRange { index: 2, len: 1 })
        );
    }

    #[test]
    fn error_message_names_side_and_bound() {
        let err = snapshot("A", "A").undo_addition(3).unwrap_err();
        assert_eq!(
            err.to_string(),
            "right-hand line index 3 is out of range (document has 1 lines)"
        );
    }

    #[test]
    fn undo_dispatches_on_kind() {
        let snap = snapshot("A\r\nB\r\nC", "A\r\nX\r\nC");
        assert_eq!(snap.undo(&EditId::changed(1, 1)).unwrap(), "A\r\nB\r\nC");
        assert_eq!(snap.undo(&EditId::added(1)).unwrap(), "A\r\nC");

        let missing = EditId {
            kind: EditKind::DeletedLine,
            left: None,
            right: 0,
        };
        assert_eq!(
            snap.undo(&missing),
            Err(UndoError::MissingLeftIndex {
                kind: EditKind::DeletedLine
            })
        );
    }

    #[test]
    fn parses_textual_edits() {
        assert_eq!("change:1:2".parse::<EditId>().unwrap(), EditId::changed(1, 2));
        assert_eq!("add:4".parse::<EditId>().unwrap(), EditId::added(4));
        assert_eq!("delete:0:3".parse::<EditId>().unwrap(), EditId::deleted(0, 3));
    }

    #[test]
    fn parses_json_edits() {
        let edit: EditId = r#"{"kind":"deleted_line","left":2,"right":1}"#.parse().unwrap();
        assert_eq!(edit, EditId::deleted(2, 1));
    }

    #[test]
    fn rejects_malformed_edits() {
        assert!(matches!(
            "move:1".parse::<EditId>(),
            Err(EditParseError::UnknownKind(_))
        ));
        assert!(matches!(
            "add:1:2".parse::<EditId>(),
            Err(EditParseError::WrongArity { expected: 1, .. })
        ));
        assert!(matches!(
            "change:x:2".parse::<EditId>(),
            Err(EditParseError::BadIndex(..))
        ));
    }
}
