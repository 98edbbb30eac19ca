//! Builds the selection tree from the body graph and the satellite registry.

use std::collections::HashMap;

use super::node::{Node, Tree};
use crate::network::{BodyGraph, Rgba, SatelliteRegistry, TargetId};

pub const NO_TARGET_LABEL: &str = "No Target";

/// Builder-side record for one body. Created the first time the body is seen,
/// either as itself or as somebody's reference body.
#[derive(Default)]
struct Slot {
    /// `None` until the body itself is visited.
    node: Option<Node>,
    distance: f64,
    bodies: Vec<usize>,
    satellites: Vec<Node>,
}

/// Turns registry snapshots into a [`Tree`].
///
/// Ordering contract:
/// - the sentinel comes first, then top-level bodies in graph order;
/// - body children are nearest first (ascending distance, ties in graph order);
/// - satellites follow the body children of their body, in registry order.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    no_target_label: String,
    body_fallback: Rgba,
    satellite_color: Rgba,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self {
            no_target_label: NO_TARGET_LABEL.to_string(),
            body_fallback: Rgba::YELLOW,
            satellite_color: Rgba::WHITE,
        }
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_no_target_label(mut self, label: impl Into<String>) -> Self {
        self.no_target_label = label.into();
        self
    }

    pub fn build(
        &self,
        bodies: &BodyGraph,
        satellites: &SatelliteRegistry,
        target: TargetId,
    ) -> Tree {
        let mut slots: Vec<Slot> = Vec::with_capacity(bodies.len());
        let mut index: HashMap<TargetId, usize> = HashMap::with_capacity(bodies.len());
        let mut top_level = Vec::new();

        let mut slot_for = |slots: &mut Vec<Slot>, id: TargetId| -> usize {
            *index.entry(id).or_insert_with(|| {
                slots.push(Slot::default());
                slots.len() - 1
            })
        };

        for body in bodies.iter() {
            let slot = slot_for(&mut slots, body.id);
            let color = body.orbit_color.unwrap_or(self.body_fallback).opaque();
            slots[slot].node = Some(Node::new(body.name.clone(), body.id, color));
            slots[slot].distance = body.distance;

            match body.parent() {
                Some(parent) => {
                    let parent = slot_for(&mut slots, parent);
                    slots[parent].bodies.push(slot);
                }
                None => top_level.push(slot),
            }
        }

        // A reference body missing from the graph leaves a placeholder that was
        // never filled in. Its children move to the top level.
        for placeholder in slots.iter_mut().filter(|s| s.node.is_none()) {
            let orphans = std::mem::take(&mut placeholder.bodies);
            tracing::warn!(orphans = orphans.len(), "Reference body missing from body graph");
            top_level.extend(orphans);
        }

        let distances: Vec<f64> = slots.iter().map(|s| s.distance).collect();
        for slot in &mut slots {
            slot.bodies
                .sort_by(|&a, &b| distances[a].total_cmp(&distances[b]));
        }

        for satellite in satellites.iter() {
            match index.get(&satellite.body) {
                Some(&slot) if slots[slot].node.is_some() => slots[slot].satellites.push(Node::new(
                    satellite.name.clone(),
                    satellite.id,
                    self.satellite_color,
                )),
                _ => tracing::warn!(
                    satellite = %satellite.name,
                    body = %satellite.body,
                    "Satellite orbits an unknown body"
                ),
            }
        }

        let mut root = Node::new("", TargetId::NONE, Rgba::WHITE);
        root.children.push(Node::new(
            self.no_target_label.clone(),
            TargetId::NONE,
            Rgba::WHITE,
        ));
        for slot in top_level {
            if let Some(node) = assemble(&mut slots, slot) {
                root.children.push(node);
            }
        }

        let unreachable = slots.iter().filter(|s| s.node.is_some()).count();
        if unreachable > 0 {
            tracing::warn!(unreachable, "Bodies in a reference cycle were left out");
        }

        assign_depths(&mut root);

        let mut tree = Tree::new(root, TargetId::NONE);
        if !target.is_none() && !tree.select(target) {
            tracing::debug!(%target, "Target has no node, selecting the sentinel");
        }

        tracing::debug!(
            bodies = bodies.len(),
            satellites = satellites.len(),
            nodes = tree.len(),
            selection = %tree.selection(),
            "Built target tree"
        );

        tree
    }
}

/// Move a slot and its descendants into an owned node. Each slot is taken once.
///
/// Nodes are taken in pre-order, then finished in reverse so every child is
/// complete before its parent collects it.
fn assemble(slots: &mut [Slot], slot: usize) -> Option<Node> {
    let mut taken: Vec<(usize, Node)> = Vec::new();
    let mut stack = vec![slot];
    while let Some(slot) = stack.pop() {
        let Some(node) = slots[slot].node.take() else {
            continue;
        };
        taken.push((slot, node));
        stack.extend(slots[slot].bodies.iter().copied());
    }

    let mut finished: HashMap<usize, Node> = HashMap::with_capacity(taken.len());
    for (slot, mut node) in taken.into_iter().rev() {
        let bodies = std::mem::take(&mut slots[slot].bodies);
        let mut satellites = std::mem::take(&mut slots[slot].satellites);

        node.children.reserve(bodies.len() + satellites.len());
        node.children
            .extend(bodies.iter().filter_map(|child| finished.remove(child)));
        node.children.append(&mut satellites);
        finished.insert(slot, node);
    }
    finished.remove(&slot)
}

/// Recompute every depth from the top level down, without recursion.
fn assign_depths(root: &mut Node) {
    let mut stack: Vec<&mut Node> = Vec::with_capacity(root.children.len());
    for child in root.children.iter_mut() {
        child.depth = 0;
        stack.push(child);
    }
    while let Some(node) = stack.pop() {
        let depth = node.depth + 1;
        for child in node.children.iter_mut() {
            child.depth = depth;
            stack.push(child);
        }
    }
}
