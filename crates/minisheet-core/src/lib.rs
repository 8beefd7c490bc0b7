pub mod display;
pub mod position;
pub mod sheet;
pub mod state;

pub use display::truncate_with_ellipsis;
pub use position::{col_to_label, CellPosition};
pub use sheet::Sheet;
pub use state::{
    key_to_action, EditMode, EditState, FocusState, GridState, InputAction, Key, Modifiers,
    ViewportState, VisibleRange,
};
