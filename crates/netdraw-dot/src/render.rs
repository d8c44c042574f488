//! Abstract graph to DOT source.

use netdraw_core::{Graph, RankDir};

use crate::dot::DotBuilder;

/// Graphviz value of the `rankdir` attribute.
pub fn rankdir_value(rankdir: RankDir) -> &'static str {
    match rankdir {
        RankDir::TopToBottom => "TB",
        RankDir::LeftToRight => "LR",
    }
}

/// Serialize a finished graph as a DOT digraph.
///
/// Graph-wide defaults come first, then nodes in insertion order, then edges
/// in emission order. Nodes with the default shape carry no shape attribute.
pub fn render_dot(graph: &Graph) -> String {
    let defaults = graph.defaults();
    let mut dot = DotBuilder::new("G");
    dot.attr("rankdir", rankdir_value(defaults.rankdir));
    if defaults.concentrate {
        dot.attr("concentrate", "true");
    }
    dot.node_defaults(&[("shape", defaults.node_shape)]);
    dot.blank();

    for node in graph.nodes() {
        let id = node.id.to_string();
        match node.shape.override_name() {
            Some(shape) => dot.node(&id, &[("label", node.label.as_str()), ("shape", shape)]),
            None => dot.node(&id, &[("label", node.label.as_str())]),
        };
    }

    if !graph.edges().is_empty() {
        dot.blank();
    }
    for edge in graph.edges() {
        dot.edge(&edge.from.to_string(), &edge.to.to_string());
    }

    dot.build()
}
