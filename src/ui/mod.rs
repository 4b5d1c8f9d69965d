pub mod diff_view;
pub mod html;
pub mod styles;

pub use diff_view::{changed_cells, diff_page, DiffRenderer, RenderedDiff};
pub use html::{escape, ActionBinding, DataBinding, ScriptBinding};
pub use styles::StyleCache;
