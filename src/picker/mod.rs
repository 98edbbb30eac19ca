//! Target picker: tree construction, traversal, and the widget tying them to a network.

mod builder;
mod node;
mod text;
mod view;
mod widget;

pub use builder::{TreeBuilder, NO_TARGET_LABEL};
pub use node::{Iter, Node, Tree};
pub use text::{format_tree, TextSurface};
pub use view::{
    Ambient, AmbientScope, LabelAlign, PickerStyle, Row, RowResponse, RowSurface, TreeView,
};
pub use widget::AntennaPicker;
