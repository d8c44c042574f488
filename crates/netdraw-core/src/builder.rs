//! Model nodes to graph nodes and edges.

use tracing::debug;

use netdraw_error::{Error, Result};

use crate::graph::{Graph, GraphDefaults, GraphNode, NodeId, Shape};
use crate::model::{InputSpec, Layer, LayerKind, Model, ModelNode, NodeKind};

/// Builds the base graph: one node per model node, one edge per source of
/// every non-input node.
#[derive(Debug)]
pub struct GraphBuilder<'m> {
    model: &'m Model,
    defaults: GraphDefaults,
}

impl<'m> GraphBuilder<'m> {
    pub fn new(model: &'m Model, defaults: GraphDefaults) -> Self {
        Self { model, defaults }
    }

    pub fn build(self) -> Result<Graph> {
        let mut graph = Graph::new(self.defaults.clone());

        for (index, node) in self.model.nodes.iter().enumerate() {
            let (label, shape) = self
                .resolve_node(node)
                .map_err(|e| e.with_context("node", index.to_string()))?;
            debug!(index, kind = node.kind.tag(), label = %label.escape_debug(), "graph node");
            graph.insert_node(GraphNode {
                id: NodeId::Model(index),
                label,
                shape,
            });
        }

        let node_count = self.model.nodes.len();
        for (dest, node) in self.model.nodes.iter().enumerate() {
            // Input sources index the input tables, not the node list.
            if node.kind.is_input() {
                continue;
            }
            for &source in &node.sources {
                if source >= node_count {
                    return Err(Error::invalid_reference("nodes", source, node_count)
                        .with_operation("builder::connect")
                        .with_context("node", dest.to_string()));
                }
                graph.add_edge(NodeId::Model(source), NodeId::Model(dest));
            }
        }

        Ok(graph)
    }

    fn resolve_node(&self, node: &ModelNode) -> Result<(String, Shape)> {
        match &node.kind {
            NodeKind::LayerBacked(kind) => {
                let layer = self.resolve_layer(node, *kind)?;
                Ok((layer_label(layer)?, Shape::Ellipse))
            }
            NodeKind::Input => {
                let input = resolve_input(node, &self.model.inputs, "inputs")?;
                Ok((input_label(input), Shape::Rectangle))
            }
            NodeKind::InputSequence => {
                let input = resolve_input(node, &self.model.input_sequences, "input_sequences")?;
                Ok((input_label(input), Shape::Rectangle))
            }
            NodeKind::Other(tag) => Ok((tag.clone(), Shape::Default)),
        }
    }

    fn resolve_layer(&self, node: &ModelNode, kind: LayerKind) -> Result<&'m Layer> {
        let model: &'m Model = self.model;
        let layers = &model.layers;
        let index = node.layer_index.ok_or_else(|| {
            Error::missing_field("layer_index")
                .with_operation("builder::resolve_layer")
                .with_context("type", kind.to_string())
        })?;
        layers.get(index).ok_or_else(|| {
            Error::invalid_reference("layers", index, layers.len())
                .with_operation("builder::resolve_layer")
        })
    }
}

fn resolve_input<'a>(
    node: &ModelNode,
    table: &'a [InputSpec],
    table_name: &'static str,
) -> Result<&'a InputSpec> {
    let index = *node.sources.first().ok_or_else(|| {
        Error::missing_field("sources").with_operation("builder::resolve_input")
    })?;
    table.get(index).ok_or_else(|| {
        Error::invalid_reference(table_name, index, table.len())
            .with_operation("builder::resolve_input")
    })
}

fn input_label(input: &InputSpec) -> String {
    format!("{}\n({})", input.name, input.variables.len())
}

/// Label of a layer-backed node, by architecture.
pub fn layer_label(layer: &Layer) -> Result<String> {
    match layer.architecture.as_str() {
        "dense" => {
            let activation = layer
                .activation
                .as_ref()
                .ok_or_else(|| {
                    Error::missing_field("activation").with_operation("builder::layer_label")
                })?
                .text();
            match layer.bias_len() {
                Some(width) => Ok(format!("dense ({})\n{}", width, activation)),
                // Bias-free dense layers only apply their activation.
                None => Ok(activation.to_string()),
            }
        }
        arch @ ("lstm" | "gru") => Ok(format!("{} ({})", arch, component_width(layer)?)),
        other => Ok(other.to_string()),
    }
}

/// Common bias length of a recurrent layer's components.
fn component_width(layer: &Layer) -> Result<usize> {
    let mut widths = layer
        .components
        .iter()
        .map(|(name, component)| (name, component.bias.len()));

    let Some((first_name, width)) = widths.next() else {
        return Err(Error::invariant_violation(format!(
            "{} layer has no components",
            layer.architecture
        ))
        .with_operation("builder::component_width"));
    };

    for (name, other) in widths {
        if other != width {
            return Err(Error::invariant_violation(format!(
                "{} components disagree on bias length: '{}' has {}, '{}' has {}",
                layer.architecture, first_name, width, name, other
            ))
            .with_operation("builder::component_width")
            .with_context("component", name.clone()));
        }
    }

    Ok(width)
}
