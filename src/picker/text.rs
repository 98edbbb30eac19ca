//! Plain-text rendering of a target tree.

use super::node::Tree;
use super::view::{Ambient, PickerStyle, Row, RowResponse, RowSurface, TreeView};

/// A non-interactive surface that writes one line per row.
///
/// ```text
/// *   No Target
///   ▼ Kerbol
///       Moho
/// ```
#[derive(Debug, Default)]
pub struct TextSurface {
    output: String,
    ambient: Ambient,
    show_colors: bool,
}

impl TextSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append each row's background color as `[#rrggbb]`.
    pub fn with_colors(mut self, enabled: bool) -> Self {
        self.show_colors = enabled;
        self
    }

    pub fn into_string(self) -> String {
        self.output
    }
}

impl RowSurface for TextSurface {
    fn ambient(&self) -> Ambient {
        self.ambient
    }

    fn set_ambient(&mut self, ambient: Ambient) {
        self.ambient = ambient;
    }

    fn row(&mut self, row: &Row<'_>) -> RowResponse {
        let marker = if row.selected { "* " } else { "  " };
        let toggle = match row.toggle {
            Some(true) => "▼",
            Some(false) => "►",
            None => "",
        };

        self.output.push_str(marker);
        self.output.push_str(&" ".repeat(row.indent as usize));
        self.output.push_str(&format!(
            "{:<width$}",
            toggle,
            width = row.toggle_width as usize
        ));
        self.output.push_str(row.label);
        if self.show_colors {
            if let Some(color) = self.ambient.background {
                self.output.push_str(&format!("  [{}]", color));
            }
        }
        self.output.push('\n');

        RowResponse::default()
    }
}

/// Render the visible part of `tree` as text.
pub fn format_tree(tree: &mut Tree, style: PickerStyle, show_colors: bool) -> String {
    let mut surface = TextSurface::new().with_colors(show_colors);
    TreeView::new(style).render(tree, &mut surface);
    surface.into_string()
}
