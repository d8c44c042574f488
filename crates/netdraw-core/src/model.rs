//! Model description schema.
//!
//! The document is a graph-format network description: an ordered list of
//! nodes, the layers they reference, the input tables and the named outputs.
//! Only the fields needed to draw the network are modeled; everything else in
//! the document (weights, offsets, scales) is ignored during deserialization.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::Deserialize;
use serde::de::IgnoredAny;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};
use tracing::debug;

use netdraw_error::{Error, Result};

/// A complete network description.
#[derive(Debug, Clone, Deserialize)]
pub struct Model {
    pub nodes: Vec<ModelNode>,
    pub layers: Vec<Layer>,
    #[serde(default)]
    pub inputs: Vec<InputSpec>,
    #[serde(default)]
    pub input_sequences: Vec<InputSpec>,
    /// Named outputs, in document order.
    pub outputs: IndexMap<String, OutputSpec>,
}

impl Model {
    /// Read and parse a model document from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|err| {
            let display = path.display().to_string();
            let base = if err.kind() == std::io::ErrorKind::NotFound {
                Error::file_not_found(display)
            } else {
                Error::from(err).with_context("path", display)
            };
            base.with_operation("model::from_path")
        })?;
        Self::from_json_str(&contents)
            .map_err(|e| e.with_context("path", path.display().to_string()))
    }

    /// Parse a model document.
    ///
    /// A document with `layers` but no `nodes` is a sequential-format model,
    /// which has to be converted to graph form before it can be drawn.
    pub fn from_json_str(contents: &str) -> Result<Self> {
        let outline: DocumentOutline = serde_json::from_str(contents)
            .map_err(|e| Error::from(e).with_operation("model::parse"))?;
        if outline.nodes.is_none() && outline.layers.is_some() {
            return Err(Error::unsupported(
                "sequential models are not supported, convert the model to graph form first",
            )
            .with_operation("model::parse"));
        }

        // Straight into `Model` so `outputs` keeps the document's key order.
        let model: Model = serde_json::from_str(contents)
            .map_err(|e| Error::from(e).with_operation("model::parse"))?;
        debug!(
            nodes = model.nodes.len(),
            layers = model.layers.len(),
            outputs = model.outputs.len(),
            "model parsed"
        );
        Ok(model)
    }
}

/// Top-level keys that tell graph-format documents from sequential ones.
#[derive(Deserialize)]
struct DocumentOutline {
    nodes: Option<IgnoredAny>,
    layers: Option<IgnoredAny>,
}

/// One entry of the model's node list. Its position is its id.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelNode {
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Node ids this node consumes, or for input kinds a single index into
    /// the matching input table.
    #[serde(default)]
    pub sources: Vec<usize>,
    #[serde(default)]
    pub layer_index: Option<usize>,
}

/// The kinds of layer-backed nodes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, IntoStaticStr, Display,
)]
#[strum(serialize_all = "snake_case")]
pub enum LayerKind {
    FeedForward,
    TimeDistributed,
    Sequence,
}

/// What a model node is, decided once from its `type` tag.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum NodeKind {
    Input,
    InputSequence,
    LayerBacked(LayerKind),
    /// Any other node type (concatenate, add, sum, ...), drawn by its tag.
    Other(String),
}

impl NodeKind {
    pub fn is_input(&self) -> bool {
        matches!(self, NodeKind::Input | NodeKind::InputSequence)
    }

    pub fn tag(&self) -> &str {
        match self {
            NodeKind::Input => "input",
            NodeKind::InputSequence => "input_sequence",
            NodeKind::LayerBacked(kind) => (*kind).into(),
            NodeKind::Other(tag) => tag.as_str(),
        }
    }
}

impl From<String> for NodeKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "input" => NodeKind::Input,
            "input_sequence" => NodeKind::InputSequence,
            other => match LayerKind::from_str(other) {
                Ok(kind) => NodeKind::LayerBacked(kind),
                Err(_) => NodeKind::Other(tag),
            },
        }
    }
}

/// A weight-bearing layer definition.
#[derive(Debug, Clone, Deserialize)]
pub struct Layer {
    pub architecture: String,
    #[serde(default)]
    pub bias: Option<Vec<f64>>,
    #[serde(default)]
    pub activation: Option<Activation>,
    /// Gate components of recurrent layers (`i`, `f`, `o`, `c` for lstm).
    #[serde(default)]
    pub components: BTreeMap<String, Component>,
}

impl Layer {
    /// Bias width, if the layer has a non-empty bias.
    pub fn bias_len(&self) -> Option<usize> {
        self.bias.as_ref().map(Vec::len).filter(|len| *len > 0)
    }
}

/// A layer activation, written either as a bare function name or as a
/// record carrying the name plus parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Activation {
    Plain(String),
    Named { function: String },
}

impl Activation {
    /// The function name, whichever way the activation was written.
    pub fn text(&self) -> &str {
        match self {
            Activation::Plain(function) | Activation::Named { function } => function,
        }
    }
}

/// One gate of a recurrent layer.
#[derive(Debug, Clone, Deserialize)]
pub struct Component {
    pub bias: Vec<f64>,
}

/// An entry of the `inputs` or `input_sequences` table.
#[derive(Debug, Clone, Deserialize)]
pub struct InputSpec {
    pub name: String,
    pub variables: Vec<serde_json::Value>,
}

/// A named model output.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputSpec {
    pub node_index: usize,
    pub labels: Vec<String>,
}
