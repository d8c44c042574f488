//! Renderer-agnostic graph produced from a model.
//!
//! Node ids come from two separate spaces: model nodes are identified by
//! their position in the model's node list, output nodes by the model node
//! they hang off plus their label text. Both render to plain strings only at
//! the renderer boundary.

use std::collections::HashMap;
use std::fmt;

use strum_macros::{Display, EnumString, IntoStaticStr};

/// Label text of a synthetic output node, attached to a model node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OutputId {
    pub source: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeId {
    /// Position in the model's node list.
    Model(usize),
    /// Synthetic terminal node added for a model output.
    Output(OutputId),
}

impl NodeId {
    pub fn output(source: usize, text: impl Into<String>) -> Self {
        NodeId::Output(OutputId {
            source,
            text: text.into(),
        })
    }

    pub fn as_model(&self) -> Option<usize> {
        match self {
            NodeId::Model(index) => Some(*index),
            NodeId::Output(_) => None,
        }
    }
}

/// Renderer key: `"3"` for model nodes, `"out_3_<text>"` for output nodes.
impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Model(index) => write!(f, "{}", index),
            NodeId::Output(OutputId { source, text }) => write!(f, "out_{}_{}", source, text),
        }
    }
}

/// Node outline. `Default` defers to the graph-wide node shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumString, IntoStaticStr, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Shape {
    Ellipse,
    Rectangle,
    #[default]
    Default,
}

impl Shape {
    /// Shape attribute to emit, or `None` to inherit the graph default.
    pub fn override_name(&self) -> Option<&'static str> {
        match self {
            Shape::Default => None,
            other => Some((*other).into()),
        }
    }
}

/// Layout direction of the drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumString, IntoStaticStr, Display)]
pub enum RankDir {
    #[default]
    #[strum(serialize = "top-to-bottom")]
    TopToBottom,
    #[strum(serialize = "left-to-right")]
    LeftToRight,
}

impl RankDir {
    pub fn horizontal(horizontal: bool) -> Self {
        if horizontal {
            RankDir::LeftToRight
        } else {
            RankDir::TopToBottom
        }
    }
}

/// Graph-wide attributes, overridden per node where a node says so.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphDefaults {
    pub rankdir: RankDir,
    /// Merge parallel edges into one line.
    pub concentrate: bool,
    pub node_shape: &'static str,
}

impl Default for GraphDefaults {
    fn default() -> Self {
        Self {
            rankdir: RankDir::TopToBottom,
            concentrate: true,
            node_shape: "record",
        }
    }
}

impl GraphDefaults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rankdir(mut self, rankdir: RankDir) -> Self {
        self.rankdir = rankdir;
        self
    }

    pub fn with_concentrate(mut self, concentrate: bool) -> Self {
        self.concentrate = concentrate;
        self
    }

    pub fn with_node_shape(mut self, shape: &'static str) -> Self {
        self.node_shape = shape;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub id: NodeId,
    pub label: String,
    pub shape: Shape,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
}

/// Nodes in insertion order plus an ordered edge list.
///
/// Only the builders in this crate write to a graph; everything downstream
/// sees it read-only.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    defaults: GraphDefaults,
    nodes: Vec<GraphNode>,
    index: HashMap<NodeId, usize>,
    edges: Vec<Edge>,
}

impl Graph {
    pub(crate) fn new(defaults: GraphDefaults) -> Self {
        Self {
            defaults,
            ..Self::default()
        }
    }

    pub fn defaults(&self) -> &GraphDefaults {
        &self.defaults
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: &NodeId) -> Option<&GraphNode> {
        self.index.get(id).map(|&idx| &self.nodes[idx])
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Edges pointing at `id`, in emission order.
    pub fn inbound<'a>(&'a self, id: &'a NodeId) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |edge| &edge.to == id)
    }

    /// Insert a node, or overwrite the label and shape of an existing node
    /// with the same id in place. Returns the replaced node.
    pub(crate) fn insert_node(&mut self, node: GraphNode) -> Option<GraphNode> {
        match self.index.get(&node.id) {
            Some(&idx) => Some(std::mem::replace(&mut self.nodes[idx], node)),
            None => {
                self.index.insert(node.id.clone(), self.nodes.len());
                self.nodes.push(node);
                None
            }
        }
    }

    pub(crate) fn add_edge(&mut self, from: NodeId, to: NodeId) {
        self.edges.push(Edge { from, to });
    }
}
