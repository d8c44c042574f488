use pretty_assertions::assert_eq;

use netdraw_core::{
    ErrorKind, Graph, GraphDefaults, Model, NodeId, OutputOptions, RankDir, Shape,
    build_model_graph,
};

/// Jet tagger: a track sequence through a GRU, merged with jet-level inputs
/// and fed through two dense layers into two output heads.
fn tagger_model() -> &'static str {
    r#"{
        "inputs": [
            {"name": "jets", "variables": [{"name": "pt"}, {"name": "eta"}, {"name": "mass"}]}
        ],
        "input_sequences": [
            {"name": "tracks", "variables": [{"name": "d0"}, {"name": "z0"}]}
        ],
        "nodes": [
            {"type": "input", "sources": [0], "size": 3},
            {"type": "input_sequence", "sources": [0], "size": 2},
            {"type": "sequence", "sources": [1], "layer_index": 0},
            {"type": "time_distributed", "sources": [2], "layer_index": 1},
            {"type": "sum", "sources": [3]},
            {"type": "concatenate", "sources": [0, 4]},
            {"type": "feed_forward", "sources": [5], "layer_index": 2},
            {"type": "feed_forward", "sources": [6], "layer_index": 3}
        ],
        "layers": [
            {"architecture": "gru", "activation": "tanh", "inner_activation": "sigmoid",
             "components": {"r": {"bias": [0, 0]}, "z": {"bias": [0, 0]}, "h": {"bias": [0, 0]}}},
            {"architecture": "dense", "bias": [0, 0, 0, 0], "activation": "relu", "weights": []},
            {"architecture": "dense", "bias": [0, 0, 0], "activation": {"function": "elu", "alpha": 1.0}},
            {"architecture": "dense", "bias": null, "activation": "softmax"}
        ],
        "outputs": {
            "flavor": {"node_index": 7, "labels": ["pb", "pc", "pu"]},
            "regression": {"node_index": 6, "labels": ["a", "b", "c", "d", "e", "f"]}
        }
    }"#
}

fn build(json: &str, defaults: GraphDefaults, max_outputs: usize) -> Graph {
    let model = Model::from_json_str(json).expect("model parses");
    build_model_graph(
        &model,
        defaults,
        OutputOptions::new().with_max_outputs(max_outputs),
    )
    .expect("graph builds")
}

fn label_of(graph: &Graph, id: NodeId) -> (String, Shape) {
    let node = graph.node(&id).expect("node exists");
    (node.label.clone(), node.shape)
}

#[test]
fn labels_and_shapes_per_node_kind() {
    let graph = build(tagger_model(), GraphDefaults::default(), 5);

    let expected = [
        ("jets\n(3)", Shape::Rectangle),
        ("tracks\n(2)", Shape::Rectangle),
        ("gru (2)", Shape::Ellipse),
        ("dense (4)\nrelu", Shape::Ellipse),
        ("sum", Shape::Default),
        ("concatenate", Shape::Default),
        ("dense (3)\nelu", Shape::Ellipse),
        ("softmax", Shape::Ellipse),
    ];
    for (index, (label, shape)) in expected.iter().enumerate() {
        assert_eq!(
            label_of(&graph, NodeId::Model(index)),
            (label.to_string(), *shape),
            "node {index}"
        );
    }
}

#[test]
fn edges_follow_sources_except_for_inputs() {
    let graph = build(tagger_model(), GraphDefaults::default(), 5);
    let model = Model::from_json_str(tagger_model()).unwrap();

    let model_edges: Vec<(String, String)> = graph
        .edges()
        .iter()
        .filter(|e| e.to.as_model().is_some())
        .map(|e| (e.from.to_string(), e.to.to_string()))
        .collect();
    let expected: Vec<(String, String)> = [
        ("1", "2"),
        ("2", "3"),
        ("3", "4"),
        ("0", "5"),
        ("4", "5"),
        ("5", "6"),
        ("6", "7"),
    ]
    .iter()
    .map(|(a, b)| (a.to_string(), b.to_string()))
    .collect();
    assert_eq!(model_edges, expected);

    for (index, node) in model.nodes.iter().enumerate() {
        let id = NodeId::Model(index);
        let inbound = graph.inbound(&id).count();
        if node.kind.is_input() {
            assert_eq!(inbound, 0, "input node {index} has no inbound edges");
        } else {
            assert_eq!(inbound, node.sources.len(), "node {index}");
        }
    }
}

#[test]
fn node_count_matches_outputs() {
    let model = Model::from_json_str(tagger_model()).unwrap();
    for max_outputs in [0, 2, 3, 5, 6, 10] {
        let graph = build(tagger_model(), GraphDefaults::default(), max_outputs);
        let synthetic: usize = model
            .outputs
            .values()
            .map(|spec| {
                if spec.labels.len() > max_outputs {
                    1
                } else {
                    spec.labels.len()
                }
            })
            .sum();
        assert_eq!(graph.len(), model.nodes.len() + synthetic, "max_outputs {max_outputs}");
    }
}

#[test]
fn output_threshold_boundary() {
    let graph = build(tagger_model(), GraphDefaults::default(), 5);

    // flavor has 3 labels and expands, regression has 6 and collapses.
    for label in ["pb", "pc", "pu"] {
        assert_eq!(
            label_of(&graph, NodeId::output(7, label)).0,
            label.to_string()
        );
    }
    assert_eq!(
        label_of(&graph, NodeId::output(6, "regression")).0,
        "regression(6)"
    );
    assert!(graph.node(&NodeId::output(6, "a")).is_none());

    // Exactly at the threshold everything expands.
    let graph = build(tagger_model(), GraphDefaults::default(), 6);
    assert!(graph.node(&NodeId::output(6, "regression")).is_none());
    assert_eq!(label_of(&graph, NodeId::output(6, "f")).0, "f");
}

#[test]
fn outputs_are_appended_in_document_order() {
    let graph = build(tagger_model(), GraphDefaults::default(), 5);
    let synthetic: Vec<String> = graph.nodes()[8..].iter().map(|n| n.id.to_string()).collect();
    assert_eq!(
        synthetic,
        ["out_7_pb", "out_7_pc", "out_7_pu", "out_6_regression"]
    );
}

#[test]
fn outputs_follow_document_order_not_name_order() {
    let graph = build(
        r#"{
            "nodes": [{"type": "sum", "sources": []}],
            "layers": [],
            "outputs": {
                "zeta": {"node_index": 0, "labels": ["z1"]},
                "alpha": {"node_index": 0, "labels": ["a1", "a2"]},
                "mu": {"node_index": 0, "labels": ["m1", "m2", "m3"]}
            }
        }"#,
        GraphDefaults::default(),
        2,
    );
    let synthetic: Vec<String> = graph.nodes()[1..].iter().map(|n| n.id.to_string()).collect();
    assert_eq!(synthetic, ["out_0_z1", "out_0_a1", "out_0_a2", "out_0_mu"]);
    let targets: Vec<String> = graph.edges().iter().map(|e| e.to.to_string()).collect();
    assert_eq!(targets, ["out_0_z1", "out_0_a1", "out_0_a2", "out_0_mu"]);
}

#[test]
fn layout_direction_is_the_only_difference() {
    let vertical = build(tagger_model(), GraphDefaults::default(), 5);
    let horizontal = build(
        tagger_model(),
        GraphDefaults::default().with_rankdir(RankDir::horizontal(true)),
        5,
    );

    assert_eq!(vertical.defaults().rankdir, RankDir::TopToBottom);
    assert_eq!(horizontal.defaults().rankdir, RankDir::LeftToRight);
    assert_eq!(vertical.defaults().concentrate, horizontal.defaults().concentrate);
    assert_eq!(vertical.defaults().node_shape, horizontal.defaults().node_shape);
    assert_eq!(vertical.nodes(), horizontal.nodes());
    assert_eq!(vertical.edges(), horizontal.edges());
}

#[test]
fn structural_errors_name_the_offending_node() {
    let cases = [
        (
            r#"{"nodes": [{"type": "feed_forward", "sources": []}], "layers": [], "outputs": {}}"#,
            ErrorKind::InvalidReference,
        ),
        (
            r#"{"nodes": [{"type": "feed_forward", "sources": [], "layer_index": 3}], "layers": [], "outputs": {}}"#,
            ErrorKind::InvalidReference,
        ),
        (
            r#"{"nodes": [{"type": "input", "sources": []}], "layers": [], "inputs": [], "outputs": {}}"#,
            ErrorKind::InvalidReference,
        ),
        (
            r#"{"nodes": [{"type": "input_sequence", "sources": [1]}], "layers": [],
                "input_sequences": [{"name": "t", "variables": []}], "outputs": {}}"#,
            ErrorKind::InvalidReference,
        ),
        (
            r#"{"nodes": [{"type": "sequence", "sources": [], "layer_index": 0}],
                "layers": [{"architecture": "lstm", "components": {"i": {"bias": [0]}, "f": {"bias": [0, 0]}}}],
                "outputs": {}}"#,
            ErrorKind::InvariantViolation,
        ),
    ];

    for (json, kind) in cases {
        let model = Model::from_json_str(json).expect("model parses");
        let err = build_model_graph(&model, GraphDefaults::default(), OutputOptions::default())
            .expect_err("graph build fails");
        assert_eq!(err.kind(), kind, "{json}");
        assert_eq!(err.context_value("node"), Some("0"), "{json}");
    }
}

#[test]
fn out_of_range_edge_source_fails() {
    let model = Model::from_json_str(
        r#"{"nodes": [{"type": "sum", "sources": [4]}], "layers": [], "outputs": {}}"#,
    )
    .unwrap();
    let err = build_model_graph(&model, GraphDefaults::default(), OutputOptions::default())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidReference);
    assert_eq!(err.operation(), "builder::connect");
}
