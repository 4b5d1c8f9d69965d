//! wikidiff - side-by-side HTML diffs of wiki text with per-line undo.
//!
//! Lines are aligned first; changed line pairs are then diffed word by word,
//! and matched words by their trailing whitespace, so that collapsed or added
//! spacing stays visible. Every edit row carries an action a host page can
//! hand back to [`LineSnapshot::undo`] to revert just that edit.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod ports;
pub mod ui;

#[cfg(test)]
mod test_support;

pub use adapters::{AlignAlgorithm, SimilarAligner};
pub use config::{BindingKind, Config};
pub use domain::{Action, DiffRow, EditId, EditKind, LineSnapshot, LINE_BREAK};
pub use error::{EditParseError, UndoError};
pub use ports::Aligner;
pub use ui::{diff_page, ActionBinding, DataBinding, DiffRenderer, RenderedDiff, ScriptBinding, StyleCache};

/// Render the rows of a diff between two `\r\n`-separated texts.
pub fn render(left_text: &str, right_text: &str, context_lines: usize) -> String {
    DiffRenderer::with_algorithm(AlignAlgorithm::default())
        .render(left_text, right_text, context_lines)
        .html()
}

/// `<style>` element from the process-wide style cache.
pub fn diff_head() -> String {
    ui::styles::global().diff_head()
}

/// Make the next [`diff_head`] call read the style sheet file again.
pub fn reset_custom_styles() {
    ui::styles::global().reset();
}
