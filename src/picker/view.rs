//! Depth-first rendering and interaction over a [`Tree`].
//!
//! The view knows nothing about a concrete toolkit. It walks the tree and hands
//! each visible node to a [`RowSurface`], which paints the row and reports what
//! the operator did to it during this frame. Toggles are applied immediately,
//! before the node's children are considered, so the walk uses an explicit
//! stack that is inspected after every row.

use std::ops::{Deref, DerefMut};

use super::node::{Node, Tree};
use crate::config::PickerConfig;
use crate::network::{Rgba, TargetId};

/// Horizontal placement of row labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelAlign {
    Left,
    #[default]
    Center,
}

/// Style a surface applies to rows when nothing overrides it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Ambient {
    pub background: Option<Rgba>,
    pub align: LabelAlign,
}

/// Everything a surface needs to paint one node.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    pub id: TargetId,
    pub label: &'a str,
    pub depth: usize,
    /// Left margin in cells.
    pub indent: u16,
    /// `Some(expanded)` for nodes with children, `None` for leaves.
    pub toggle: Option<bool>,
    pub toggle_width: u16,
    pub selected: bool,
}

/// What the operator did to a row this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowResponse {
    pub toggled: bool,
    pub clicked: bool,
}

/// A host rendering surface.
pub trait RowSurface {
    fn ambient(&self) -> Ambient;

    fn set_ambient(&mut self, ambient: Ambient);

    /// Paint one row using the current ambient style.
    fn row(&mut self, row: &Row<'_>) -> RowResponse;
}

/// Overrides a surface's ambient style and restores it when dropped.
pub struct AmbientScope<'s, S: RowSurface + ?Sized> {
    surface: &'s mut S,
    saved: Ambient,
}

impl<'s, S: RowSurface + ?Sized> AmbientScope<'s, S> {
    pub fn enter(surface: &'s mut S, ambient: Ambient) -> Self {
        let saved = surface.ambient();
        surface.set_ambient(ambient);
        Self { surface, saved }
    }

    pub fn set_background(&mut self, color: Rgba) {
        let ambient = Ambient {
            background: Some(color),
            ..self.surface.ambient()
        };
        self.surface.set_ambient(ambient);
    }
}

impl<S: RowSurface + ?Sized> Deref for AmbientScope<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: RowSurface + ?Sized> DerefMut for AmbientScope<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: RowSurface + ?Sized> Drop for AmbientScope<'_, S> {
    fn drop(&mut self) {
        self.surface.set_ambient(self.saved);
    }
}

/// Layout metrics for the picker, passed explicitly into every render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickerStyle {
    /// Cells of indentation per depth level.
    pub indent_width: u16,
    /// Cells reserved for the expand/collapse toggle.
    pub toggle_width: u16,
}

impl Default for PickerStyle {
    fn default() -> Self {
        Self {
            indent_width: 2,
            toggle_width: 2,
        }
    }
}

impl PickerStyle {
    pub fn indent_for(&self, depth: usize) -> u16 {
        u16::try_from(depth)
            .unwrap_or(u16::MAX)
            .saturating_mul(self.indent_width)
    }
}

impl From<&PickerConfig> for PickerStyle {
    fn from(config: &PickerConfig) -> Self {
        Self {
            indent_width: config.indent_width,
            toggle_width: config.toggle_width,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TreeView {
    style: PickerStyle,
}

impl TreeView {
    pub fn new(style: PickerStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &PickerStyle {
        &self.style
    }

    /// Paint every visible node and apply this frame's interaction.
    ///
    /// Returns the identity of a node the operator clicked, which is also
    /// made the tree's selection. Collapsed subtrees are skipped but kept.
    pub fn render<S: RowSurface + ?Sized>(
        &self,
        tree: &mut Tree,
        surface: &mut S,
    ) -> Option<TargetId> {
        let (root, selection) = tree.parts_mut();
        let mut surface = AmbientScope::enter(
            surface,
            Ambient {
                background: None,
                align: LabelAlign::Left,
            },
        );
        let mut request = None;

        // Children are stored in display order; push them reversed so they pop in order.
        let mut stack: Vec<&mut Node> = root.children.iter_mut().rev().collect();
        while let Some(node) = stack.pop() {
            surface.set_background(node.color);

            let response = surface.row(&Row {
                id: node.id,
                label: &node.label,
                depth: node.depth,
                indent: self.style.indent_for(node.depth),
                toggle: (!node.is_leaf()).then_some(node.expanded),
                toggle_width: self.style.toggle_width,
                selected: node.id == *selection,
            });

            if response.toggled && !node.is_leaf() {
                node.expanded = !node.expanded;
                tracing::trace!(node = %node.label, expanded = node.expanded, "Toggled node");
            }
            if response.clicked {
                *selection = node.id;
                request = Some(node.id);
            }

            if node.expanded {
                stack.extend(node.children.iter_mut().rev());
            }
        }

        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{Body, BodyGraph, Satellite, SatelliteRegistry};
    use crate::picker::TreeBuilder;

    /// Records painted rows and replays scripted interaction by label.
    #[derive(Default)]
    struct Script {
        ambient: Ambient,
        toggle: Vec<&'static str>,
        click: Vec<&'static str>,
        rows: Vec<(String, u16, Option<bool>, bool, Option<Rgba>)>,
    }

    impl RowSurface for Script {
        fn ambient(&self) -> Ambient {
            self.ambient
        }

        fn set_ambient(&mut self, ambient: Ambient) {
            self.ambient = ambient;
        }

        fn row(&mut self, row: &Row<'_>) -> RowResponse {
            self.rows.push((
                row.label.to_string(),
                row.indent,
                row.toggle,
                row.selected,
                self.ambient.background,
            ));
            RowResponse {
                toggled: self.toggle.iter().any(|l| *l == row.label),
                clicked: self.click.iter().any(|l| *l == row.label),
            }
        }
    }

    impl Script {
        fn labels(&self) -> Vec<&str> {
            self.rows.iter().map(|r| r.0.as_str()).collect()
        }
    }

    fn id(name: &str) -> TargetId {
        TargetId::from_name(name)
    }

    fn tree() -> Tree {
        let bodies: BodyGraph = [
            Body::new(id("Sun"), "Sun"),
            Body::new(id("Far"), "Far").orbiting(id("Sun"), 200.0),
            Body::new(id("Near"), "Near").orbiting(id("Sun"), 100.0),
            Body::new(id("Moon"), "Moon").orbiting(id("Near"), 5.0),
        ]
        .into_iter()
        .collect();
        let mut satellites = SatelliteRegistry::new();
        satellites.register(Satellite::new(id("Probe"), "Probe", id("Near")));
        TreeBuilder::new().build(&bodies, &satellites, TargetId::NONE)
    }

    #[test]
    fn test_render_order_and_indent() {
        let mut tree = tree();
        let mut surface = Script::default();
        TreeView::default().render(&mut tree, &mut surface);

        assert_eq!(
            surface.labels(),
            vec!["No Target", "Sun", "Near", "Moon", "Probe", "Far"]
        );
        let indents: Vec<u16> = surface.rows.iter().map(|r| r.1).collect();
        assert_eq!(indents, vec![0, 0, 2, 4, 4, 2]);
    }

    #[test]
    fn test_toggle_markers_only_on_parents() {
        let mut tree = tree();
        let mut surface = Script::default();
        TreeView::default().render(&mut tree, &mut surface);

        let toggles: Vec<Option<bool>> = surface.rows.iter().map(|r| r.2).collect();
        assert_eq!(toggles, vec![None, Some(true), Some(true), None, None, None]);
    }

    #[test]
    fn test_collapse_hides_descendants_immediately() {
        let mut tree = tree();
        let mut surface = Script {
            toggle: vec!["Near"],
            ..Default::default()
        };
        TreeView::default().render(&mut tree, &mut surface);

        assert_eq!(surface.labels(), vec!["No Target", "Sun", "Near", "Far"]);
        assert!(!tree.find(id("Near")).unwrap().expanded);
        assert!(tree.find(id("Sun")).unwrap().expanded);
        assert!(tree.find(id("Moon")).is_some());

        let mut surface = Script {
            toggle: vec!["Near"],
            ..Default::default()
        };
        TreeView::default().render(&mut tree, &mut surface);
        assert_eq!(surface.labels().len(), 6);
    }

    #[test]
    fn test_toggle_on_leaf_is_ignored() {
        let mut tree = tree();
        let before = tree.clone();
        let mut surface = Script {
            toggle: vec!["Moon", "No Target"],
            ..Default::default()
        };
        TreeView::default().render(&mut tree, &mut surface);
        assert_eq!(tree, before);
    }

    #[test]
    fn test_click_selects_and_requests() {
        let mut tree = tree();
        let mut surface = Script {
            click: vec!["Probe"],
            ..Default::default()
        };
        let request = TreeView::default().render(&mut tree, &mut surface);

        assert_eq!(request, Some(id("Probe")));
        assert_eq!(tree.selection(), id("Probe"));

        let mut surface = Script::default();
        assert_eq!(TreeView::default().render(&mut tree, &mut surface), None);
        let selected: Vec<_> = surface
            .rows
            .iter()
            .filter(|r| r.3)
            .map(|r| r.0.as_str())
            .collect();
        assert_eq!(selected, vec!["Probe"]);
    }

    #[test]
    fn test_background_follows_node_color_and_is_restored() {
        let mut tree = tree();
        let ambient = Ambient {
            background: Some(Rgba::new(0.1, 0.2, 0.3, 1.0)),
            align: LabelAlign::Center,
        };
        let mut surface = Script {
            ambient,
            ..Default::default()
        };
        TreeView::default().render(&mut tree, &mut surface);

        assert_eq!(surface.rows[0].4, Some(Rgba::WHITE));
        assert_eq!(surface.rows[1].4, Some(Rgba::YELLOW));
        assert_eq!(surface.ambient, ambient);
    }

    #[test]
    fn test_custom_indent_width() {
        let mut tree = tree();
        let mut surface = Script::default();
        let view = TreeView::new(PickerStyle {
            indent_width: 3,
            toggle_width: 1,
        });
        view.render(&mut tree, &mut surface);
        assert_eq!(surface.rows[3].1, 6);
    }
}
