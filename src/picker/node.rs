//! The selection tree produced by [`TreeBuilder`](super::TreeBuilder).

use serde::Serialize;

use crate::network::{Rgba, TargetId};

/// One selectable entry: a body, a satellite, or the "no target" sentinel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub label: String,
    pub id: TargetId,
    pub color: Rgba,
    /// Children in display order.
    pub children: Vec<Node>,
    pub expanded: bool,
    /// 0 for top-level nodes.
    pub depth: usize,
}

impl Node {
    pub fn new(label: impl Into<String>, id: TargetId, color: Rgba) -> Self {
        Self {
            label: label.into(),
            id,
            color,
            children: Vec::new(),
            expanded: true,
            depth: 0,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// A built selection tree plus the identity of the selected node.
///
/// The root is synthetic and never rendered. Its first child is always the
/// "no target" sentinel.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    root: Node,
    selection: TargetId,
}

#[derive(Serialize)]
struct TreeJson<'a> {
    selection: TargetId,
    nodes: &'a [Node],
}

impl Tree {
    pub(crate) fn new(root: Node, selection: TargetId) -> Self {
        Self { root, selection }
    }

    pub(crate) fn parts_mut(&mut self) -> (&mut Node, &mut TargetId) {
        (&mut self.root, &mut self.selection)
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn top_level(&self) -> &[Node] {
        &self.root.children
    }

    /// The "no target" node.
    pub fn sentinel(&self) -> &Node {
        &self.root.children[0]
    }

    pub fn selection(&self) -> TargetId {
        self.selection
    }

    pub fn selected_node(&self) -> &Node {
        self.find(self.selection).unwrap_or_else(|| self.sentinel())
    }

    /// Make `id` the selection. Returns false (and changes nothing) if no node has that id.
    pub fn select(&mut self, id: TargetId) -> bool {
        if self.find(id).is_none() {
            return false;
        }
        self.selection = id;
        true
    }

    pub fn find(&self, id: TargetId) -> Option<&Node> {
        self.iter().find(|node| node.id == id)
    }

    pub fn find_mut(&mut self, id: TargetId) -> Option<&mut Node> {
        let mut stack: Vec<&mut Node> = self.root.children.iter_mut().rev().collect();
        while let Some(node) = stack.pop() {
            if node.id == id {
                return Some(node);
            }
            stack.extend(node.children.iter_mut().rev());
        }
        None
    }

    /// The parent of `id`, or `None` for top-level nodes and unknown ids.
    pub fn parent_of(&self, id: TargetId) -> Option<&Node> {
        self.iter()
            .find(|node| node.children.iter().any(|child| child.id == id))
    }

    /// Flip a node's expansion. Returns the new state, or `None` for unknown ids.
    pub fn toggle(&mut self, id: TargetId) -> Option<bool> {
        let node = self.find_mut(id)?;
        node.expanded = !node.expanded;
        Some(node.expanded)
    }

    pub fn set_expanded(&mut self, id: TargetId, expanded: bool) -> bool {
        match self.find_mut(id) {
            Some(node) => {
                node.expanded = expanded;
                true
            }
            None => false,
        }
    }

    /// Every node in display order, ignoring expansion state.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            stack: self.root.children.iter().rev().collect(),
        }
    }

    /// Number of nodes, sentinel included.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }

    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        let json = TreeJson {
            selection: self.selection,
            nodes: &self.root.children,
        };
        if pretty {
            serde_json::to_string_pretty(&json)
        } else {
            serde_json::to_string(&json)
        }
    }
}

/// Pre-order iterator over a [`Tree`].
pub struct Iter<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
