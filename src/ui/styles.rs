//! Table chrome and the style sheet used by rendered diffs.
//!
//! A custom style sheet file is read at most once per [`StyleCache`]; a
//! failed read is remembered so the file isn't retried until [`StyleCache::reset`].
//! The cache tolerates sequential use from several callers, but a reset racing
//! a concurrent read is left for callers to serialize.

use once_cell::sync::Lazy;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Style sheet file looked up relative to the working directory when none is configured.
pub const DEFAULT_STYLE_SHEET: &str = "style.css";

pub const TABLE_HEADER: &str = "<p style='font-family: arial; size:75%;'>Double-click on a line to undo all changes on that line, or single click to focus the edit box to that line.</p>
<table border='0' width='98%' cellpadding='0' cellspacing='4' class='diff'>
\t<tr>
\t\t<td colspan='2' width='50%' align='center' class='diff-otitle'><strong>Current revision</strong></td>
\t\t<td colspan='2' width='50%' align='center' class='diff-ntitle'><strong>Your text</strong></td>
\t</tr>
\t<tr height='0px'>
\t\t<td width='1'></td>
\t\t<td width='50%'></td>
\t\t<td width='1'></td>
\t\t<td width='50%'></td>
\t</tr>
";

pub const TABLE_FOOTER: &str = "</table>\n";

pub const DEFAULT_STYLES: &str = "
td{
    border: 1px solid white;
}

table.diff, td.diff-otitle, td.diff-ntitle {
\tbackground-color: white;
    border: 1px solid gray;
}
td.diff-addedline {
\tbackground: #cfc;
\tfont-size: smaller;
}
td.diff-deletedline {
\tbackground: #ffa;
\tfont-size: smaller;
}
td.diff-context {
\tbackground: #eee;
\tfont-size: smaller;
}
.diffchange {
\tcolor: red;
\tfont-weight: bold;
\ttext-decoration: none;
}

td.diff-deletedline span.diffchange {
    background-color: #FFD754; color:black;
}

td.diff-addedline span.diffchange {
    background-color: #73E5A1; color:black;
}

.d{
    overflow: auto;
}
";

/// What the cache knows about the custom style sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Loaded {
    Unset,
    Custom(String),
    /// Read failed or the file was empty; use the defaults until reset.
    Failed,
}

#[derive(Debug)]
pub struct StyleCache {
    path: PathBuf,
    state: Mutex<Loaded>,
}

impl StyleCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            state: Mutex::new(Loaded::Unset),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The custom style sheet if one loaded, otherwise [`DEFAULT_STYLES`].
    ///
    /// A missing file is not remembered: it is looked for again next time.
    pub fn styles(&self) -> String {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        match &*state {
            Loaded::Custom(css) => return css.clone(),
            Loaded::Failed => return DEFAULT_STYLES.to_string(),
            Loaded::Unset => {}
        }

        if !self.path.exists() {
            return DEFAULT_STYLES.to_string();
        }

        match fs::read_to_string(&self.path) {
            Ok(css) if !css.is_empty() => {
                tracing::debug!(path = %self.path.display(), bytes = css.len(), "loaded style sheet");
                *state = Loaded::Custom(css.clone());
                css
            }
            Ok(_) => {
                *state = Loaded::Failed;
                DEFAULT_STYLES.to_string()
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "could not read style sheet, using default styles"
                );
                *state = Loaded::Failed;
                DEFAULT_STYLES.to_string()
            }
        }
    }

    /// `<style>` element for the document head.
    pub fn diff_head(&self) -> String {
        format!("<style type='text/css'>{}</style>", self.styles())
    }

    /// Forget whatever was loaded; the next access reads the file again.
    pub fn reset(&self) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = Loaded::Unset;
    }
}

impl Default for StyleCache {
    fn default() -> Self {
        Self::new(DEFAULT_STYLE_SHEET)
    }
}

static GLOBAL: Lazy<StyleCache> = Lazy::new(StyleCache::default);

/// Process-wide cache reading `style.css` from the working directory.
pub fn global() -> &'static StyleCache {
    &GLOBAL
}
