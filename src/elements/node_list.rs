//! Node store keyed by caller-chosen node IDs

use std::collections::HashMap;
use std::ops::{Index, IndexMut};

use crate::elements::Node;
use crate::error::{TrussError, TrussResult};

/// Append-only node storage
///
/// Nodes are addressed either by the external ID they were added with, or by
/// their dense internal position (insertion order). The internal position is
/// what drives DOF numbering and output ordering.
#[derive(Debug, Clone, Default)]
pub struct NodeList {
    index_of: HashMap<usize, usize>,
    ids: Vec<usize>,
    nodes: Vec<Node>,
}

impl NodeList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty list with room for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            index_of: HashMap::with_capacity(capacity),
            ids: Vec::with_capacity(capacity),
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Add a node, rejecting an ID that is already present
    pub fn add_node(&mut self, id: usize, x: f64, y: f64, z: f64) -> TrussResult<()> {
        if self.index_of.contains_key(&id) {
            return Err(TrussError::DuplicateNode(id));
        }
        self.index_of.insert(id, self.nodes.len());
        self.ids.push(id);
        self.nodes.push(Node::new(x, y, z));
        Ok(())
    }

    /// Internal position of the node with the given ID
    pub fn index_of(&self, id: usize) -> TrussResult<usize> {
        self.index_of
            .get(&id)
            .copied()
            .ok_or(TrussError::NodeNotFound(id))
    }

    /// External ID of the node at internal position `index`
    pub fn id_at(&self, index: usize) -> Option<usize> {
        self.ids.get(index).copied()
    }

    pub fn get_by_id(&self, id: usize) -> TrussResult<&Node> {
        let index = self.index_of(id)?;
        Ok(&self.nodes[index])
    }

    pub fn get_by_id_mut(&mut self, id: usize) -> TrussResult<&mut Node> {
        let index = self.index_of(id)?;
        Ok(&mut self.nodes[index])
    }

    pub fn contains(&self, id: usize) -> bool {
        self.index_of.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Nodes in internal order
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.iter_mut()
    }

    /// `(id, node)` pairs in internal order
    pub fn iter_with_ids(&self) -> impl Iterator<Item = (usize, &Node)> {
        self.ids.iter().copied().zip(self.nodes.iter())
    }
}

impl Index<usize> for NodeList {
    type Output = Node;

    fn index(&self, index: usize) -> &Node {
        &self.nodes[index]
    }
}

impl IndexMut<usize> for NodeList {
    fn index_mut(&mut self, index: usize) -> &mut Node {
        &mut self.nodes[index]
    }
}
