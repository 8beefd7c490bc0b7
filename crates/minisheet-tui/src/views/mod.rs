pub mod editor;
pub mod grid;

pub use editor::EditorView;
pub use grid::GridView;
