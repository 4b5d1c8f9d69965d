//! Markup for diff rows and the host actions embedded in them.

use crate::domain::{Action, DiffRow, EditKind, LineSnapshot};
use std::fmt::Write as _;

pub const CHANGE_OPEN: &str = "<span class='diffchange'>";
pub const CHANGE_CLOSE: &str = "</span>";

/// Placeholder for a whitespace character that differs between the sides.
pub const WHITESPACE_MARK: &str = "&nbsp;";

/// Escape text for element content and single- or double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

/// Turns row actions into element attributes for a particular host.
pub trait ActionBinding {
    /// Attributes for an element, each preceded by a space.
    fn attributes(&self, click: &Action, double_click: Option<&Action>) -> String;
}

/// Embeds actions as JSON in `data-click` / `data-dblclick` attributes, for
/// hosts that attach their own listeners.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataBinding;

impl ActionBinding for DataBinding {
    fn attributes(&self, click: &Action, double_click: Option<&Action>) -> String {
        let mut attrs = format!(" data-click='{}'", escape(&action_json(click)));
        if let Some(action) = double_click {
            let _ = write!(attrs, " data-dblclick='{}'", escape(&action_json(action)));
        }
        attrs
    }
}

fn action_json(action: &Action) -> String {
    match serde_json::to_string(action) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!(error = %e, ?action, "failed to encode row action");
            String::from("null")
        }
    }
}

/// Inline `window.external` callbacks, for embedded browser hosts that
/// expose navigation and undo as script methods.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptBinding;

impl ScriptBinding {
    fn call(action: &Action) -> String {
        match *action {
            Action::GoTo { line } => format!("window.external.GoTo({})", line),
            Action::Undo(edit) => match (edit.kind, edit.left) {
                (EditKind::ChangedLine, Some(left)) => {
                    format!("window.external.UndoChange({},{})", left, edit.right)
                }
                (EditKind::DeletedLine, Some(left)) => {
                    format!("window.external.UndoDeletion({}, {})", left, edit.right)
                }
                _ => format!("window.external.UndoAddition({})", edit.right),
            },
        }
    }
}

impl ActionBinding for ScriptBinding {
    fn attributes(&self, click: &Action, double_click: Option<&Action>) -> String {
        let mut attrs = format!(" onclick='{}'", Self::call(click));
        if let Some(action) = double_click {
            let _ = write!(attrs, " ondblclick='{}'", Self::call(action));
        }
        attrs
    }
}

/// Append the markup for one row.
pub fn write_row(
    out: &mut String,
    row: &DiffRow,
    lines: &LineSnapshot,
    binding: &dyn ActionBinding,
) {
    let click = row.click();
    let double_click = row.double_click();
    let attrs = binding.attributes(&click, double_click.as_ref());

    match row {
        DiffRow::Header { left, right } => {
            let _ = write!(
                out,
                "<tr{attrs}>
  <td colspan='2' align='left'><strong>Line {}</strong></td>
  <td colspan='2' align='left'><strong>Line {}</strong></td>
</tr>
",
                left + 1,
                right + 1
            );
        }
        DiffRow::Context { right } => {
            let html = escape(&lines.right()[*right]);
            let _ = write!(
                out,
                "<tr{attrs}>
  <td> </td>
  <td class='diff-context'>{html}</td>
  <td> </td>
  <td class='diff-context'>{html}</td>
</tr>
"
            );
        }
        DiffRow::Changed {
            left_cell,
            right_cell,
            ..
        } => {
            let _ = write!(
                out,
                "<tr{attrs}>
  <td>-</td>
  <td class='diff-deletedline'>{left_cell}</td>
  <td>+</td>
  <td class='diff-addedline'>{right_cell}</td>
</tr>
"
            );
        }
        DiffRow::Deleted { left, .. } => {
            let html = escape(&lines.left()[*left]);
            let _ = write!(
                out,
                "<tr>
  <td>-</td>
  <td class='diff-deletedline'{attrs}>{html}</td>
  <td> </td>
  <td> </td>
</tr>
"
            );
        }
        DiffRow::Added { right } => {
            let html = escape(&lines.right()[*right]);
            let _ = write!(
                out,
                "<tr>
  <td> </td>
  <td> </td>
  <td>+</td>
  <td class='diff-addedline'{attrs}>{html}</td>
</tr>
"
            );
        }
    }
}
