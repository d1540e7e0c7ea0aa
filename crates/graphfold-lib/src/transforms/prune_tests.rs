use graphfold_core::{GraphDef, NodeDef};

use super::remove_unused_nodes;
use crate::Error;

fn names(graph: &GraphDef) -> Vec<&str> {
    graph.names().collect()
}

/// a -> b -> c, plus an unrelated d.
fn chain() -> GraphDef {
    GraphDef::new(vec![
        NodeDef::new("a", "Placeholder"),
        NodeDef::new("b", "Neg").with_input("a"),
        NodeDef::new("c", "Neg").with_input("b"),
        NodeDef::new("d", "Neg").with_input("a"),
    ])
}

#[test]
fn drops_nodes_outputs_do_not_need() {
    let pruned = remove_unused_nodes(&chain(), &[], &["c"]).unwrap();

    assert_eq!(names(&pruned), ["a", "b", "c"]);
    // Nodes are copied verbatim.
    assert_eq!(pruned.node[2], chain().node[2]);
}

#[test]
fn keeps_original_relative_order() {
    let graph = GraphDef::new(vec![
        NodeDef::new("out", "Add").with_inputs(["y", "x"]),
        NodeDef::new("unused", "NoOp"),
        NodeDef::new("y", "Placeholder"),
        NodeDef::new("x", "Placeholder"),
    ]);

    let pruned = remove_unused_nodes(&graph, &[], &["out"]).unwrap();

    assert_eq!(names(&pruned), ["out", "y", "x"]);
}

#[test]
fn follows_control_and_indexed_references() {
    let graph = GraphDef::new(vec![
        NodeDef::new("split", "Split"),
        NodeDef::new("init", "NoOp"),
        NodeDef::new("out", "Identity").with_inputs(["split:1", "^init"]),
    ]);

    let pruned = remove_unused_nodes(&graph, &[], &["out"]).unwrap();

    assert_eq!(names(&pruned), ["split", "init", "out"]);
}

#[test]
fn inputs_stop_the_walk() {
    // Everything above `b` is cut off once `b` is a declared input.
    let pruned = remove_unused_nodes(&chain(), &["b"], &["c"]).unwrap();

    assert_eq!(names(&pruned), ["b", "c"]);
}

#[test]
fn declared_inputs_are_always_kept() {
    let pruned = remove_unused_nodes(&chain(), &["d"], &["b"]).unwrap();

    assert_eq!(names(&pruned), ["a", "b", "d"]);
}

#[test]
fn missing_declared_input_is_not_an_error() {
    let pruned = remove_unused_nodes(&chain(), &["ghost"], &["b"]).unwrap();

    assert_eq!(names(&pruned), ["a", "b"]);
}

#[test]
fn missing_output_is_a_structural_error() {
    let err = remove_unused_nodes(&chain(), &[], &["missing_node"]).unwrap_err();

    assert_eq!(
        err,
        Error::Structural {
            node: "missing_node".into()
        }
    );
    assert_eq!(
        err.to_string(),
        "bad graph structure, no node named 'missing_node' found for input lookup"
    );
}

#[test]
fn dangling_reference_is_a_structural_error() {
    let graph = GraphDef::new(vec![NodeDef::new("out", "Neg").with_input("^gone")]);

    let err = remove_unused_nodes(&graph, &[], &["out"]).unwrap_err();

    assert_eq!(err, Error::Structural { node: "gone".into() });
}

#[test]
fn dangling_reference_behind_an_input_is_ignored() {
    let graph = GraphDef::new(vec![
        NodeDef::new("feed", "Identity").with_input("gone"),
        NodeDef::new("out", "Neg").with_input("feed"),
    ]);

    let pruned = remove_unused_nodes(&graph, &["feed"], &["out"]).unwrap();

    assert_eq!(names(&pruned), ["feed", "out"]);
}

#[test]
fn output_that_is_also_an_input_is_looked_up() {
    let err = remove_unused_nodes(&chain(), &["ghost"], &["ghost"]).unwrap_err();

    assert_eq!(err, Error::Structural { node: "ghost".into() });
}

#[test]
fn duplicates_are_harmless() {
    let graph = GraphDef::new(vec![
        NodeDef::new("x", "Placeholder"),
        NodeDef::new("sq", "Mul").with_inputs(["x", "x", "^x"]),
    ]);

    let pruned = remove_unused_nodes(&graph, &[], &["sq", "sq"]).unwrap();

    assert_eq!(names(&pruned), ["x", "sq"]);
}

#[test]
fn pruning_is_idempotent() {
    let graph = GraphDef::new(vec![
        NodeDef::new("a", "Placeholder"),
        NodeDef::new("junk", "Neg").with_input("a"),
        NodeDef::new("b", "Neg").with_input("a"),
        NodeDef::new("c", "Add").with_inputs(["a", "b"]),
        NodeDef::new("more_junk", "Neg").with_input("junk"),
    ]);

    let once = remove_unused_nodes(&graph, &["a"], &["c"]).unwrap();
    let twice = remove_unused_nodes(&once, &["a"], &["c"]).unwrap();

    assert_eq!(names(&once), ["a", "b", "c"]);
    assert_eq!(once, twice);
}

#[test]
fn empty_outputs_keep_only_inputs() {
    let pruned = remove_unused_nodes(&chain(), &["a"], &[]).unwrap();

    assert_eq!(names(&pruned), ["a"]);
}
