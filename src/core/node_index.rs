// src/core/node_index.rs

use super::error::{NodeId, Result, SimError};
use std::collections::HashMap;

/// Bijection between live node labels and tensor axes.
///
/// `order[axis]` is the label on that axis; `axes` is the inverse map for
/// O(1) lookups. Insertion order only determines axis layout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeIndex {
    order: Vec<NodeId>,
    axes: HashMap<NodeId, usize>,
}

impl NodeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an index over `nodes` in axis order, rejecting duplicates.
    pub fn from_nodes(nodes: &[NodeId]) -> Result<Self> {
        let mut index = Self::new();
        for &node in nodes {
            index.push(node)?;
        }
        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.axes.contains_key(&node)
    }

    /// Labels in axis order.
    pub fn nodes(&self) -> &[NodeId] {
        &self.order
    }

    pub fn axis_of(&self, node: NodeId) -> Result<usize> {
        self.axes.get(&node).copied().ok_or(SimError::NodeNotFound { node })
    }

    /// Appends `node` as the new last axis and returns that axis.
    pub fn push(&mut self, node: NodeId) -> Result<usize> {
        if self.contains(node) {
            return Err(SimError::DuplicateNode { node });
        }
        let axis = self.order.len();
        self.order.push(node);
        self.axes.insert(node, axis);
        Ok(axis)
    }

    /// Drops `node`; every axis above it shifts down by one.
    /// Returns the axis the node occupied.
    pub fn remove(&mut self, node: NodeId) -> Result<usize> {
        let axis = self.axes.remove(&node).ok_or(SimError::NodeNotFound { node })?;
        self.order.remove(axis);
        for (shifted, label) in self.order.iter().enumerate().skip(axis) {
            self.axes.insert(*label, shifted);
        }
        Ok(axis)
    }
}
