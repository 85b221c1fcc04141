//! The host's layer tree as a tagged union.
//!
//! Whether a node is a group is decided once, when the tree is built from
//! host state, and never re-checked during traversal. Sibling order is the
//! host's stacking order: the first child is the topmost.

use crate::geometry::Offset;
use crate::ids::LayerId;
use serde::{Deserialize, Serialize};

/// A single raster layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub id: LayerId,
    pub name: String,
    pub offset: Offset,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

/// A layer group containing nested layers and groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerGroup {
    pub id: LayerId,
    pub name: String,
    pub offset: Offset,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub children: Vec<LayerNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LayerNode {
    Group(LayerGroup),
    Leaf(Layer),
}

fn default_visible() -> bool {
    true
}

impl Layer {
    pub fn new(id: impl Into<LayerId>, name: impl Into<String>, offset: impl Into<Offset>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            offset: offset.into(),
            visible: true,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

impl LayerGroup {
    pub fn new(
        id: impl Into<LayerId>,
        name: impl Into<String>,
        offset: impl Into<Offset>,
        children: Vec<LayerNode>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            offset: offset.into(),
            visible: true,
            children,
        }
    }
}

impl LayerNode {
    pub fn id(&self) -> LayerId {
        match self {
            LayerNode::Group(g) => g.id,
            LayerNode::Leaf(l) => l.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            LayerNode::Group(g) => &g.name,
            LayerNode::Leaf(l) => &l.name,
        }
    }

    pub fn offset(&self) -> Offset {
        match self {
            LayerNode::Group(g) => g.offset,
            LayerNode::Leaf(l) => l.offset,
        }
    }

    pub fn visible(&self) -> bool {
        match self {
            LayerNode::Group(g) => g.visible,
            LayerNode::Leaf(l) => l.visible,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, LayerNode::Group(_))
    }

    /// Child nodes in stacking order; empty for leaves.
    pub fn children(&self) -> &[LayerNode] {
        match self {
            LayerNode::Group(g) => &g.children,
            LayerNode::Leaf(_) => &[],
        }
    }

    /// Number of leaf layers reachable from this node, this node included.
    pub fn leaf_count(&self) -> usize {
        match self {
            LayerNode::Group(g) => g.children.iter().map(LayerNode::leaf_count).sum(),
            LayerNode::Leaf(_) => 1,
        }
    }
}

impl From<Layer> for LayerNode {
    fn from(layer: Layer) -> Self {
        LayerNode::Leaf(layer)
    }
}

impl From<LayerGroup> for LayerNode {
    fn from(group: LayerGroup) -> Self {
        LayerNode::Group(group)
    }
}
