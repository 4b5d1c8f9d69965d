pub mod tokenizer;
pub mod types;
pub mod undo;

pub use tokenizer::split_words;
pub use types::{Action, DiffRow, EditId, EditKind, Hunk, Range, Side, Token, LINE_BREAK};
pub use undo::{split_lines, LineSnapshot};
