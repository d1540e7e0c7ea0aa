use graphfold_core::{AttrValue, DataType, GraphDef, NodeDef, Tensor, TensorValues};

use super::{ConstantFolder, FoldPipeline, RewriteError, fold_constants};
use crate::Error;
use crate::dump::GraphPrinter;
use crate::graph::ImportError;
use crate::ops::StandardOps;
use crate::options::FoldOptions;

fn dump(graph: &GraphDef) -> String {
    GraphPrinter::new(graph).dump()
}

fn int(name: &str, v: i64) -> NodeDef {
    NodeDef::constant(name, Tensor::scalar_int(v))
}

fn placeholder(name: &str) -> NodeDef {
    NodeDef::new(name, "Placeholder").with_attr("dtype", AttrValue::Type(DataType::Int))
}

#[test]
fn folds_to_a_single_constant() {
    let graph = GraphDef::new(vec![
        int("Const2", 2),
        int("Const3", 3),
        NodeDef::new("Sum", "Add").with_inputs(["Const2", "Const3"]),
        NodeDef::new("Out", "Identity").with_input("Sum"),
    ]);

    let folded = fold_constants(&graph, &[], &["Out"]).unwrap();

    insta::assert_snapshot!(dump(&folded), @"Out = Const() {dtype=int, value=5}");
}

#[test]
fn fed_inputs_keep_their_identity() {
    let graph = GraphDef::new(vec![
        placeholder("x"),
        int("two", 2),
        int("three", 3),
        NodeDef::new("six", "Mul").with_inputs(["two", "three"]),
        NodeDef::new("scaled", "Mul").with_inputs(["x", "six"]),
        NodeDef::new("out", "Neg").with_inputs(["scaled", "^x"]),
        NodeDef::new("dead", "Neg").with_input("x"),
    ]);

    let folded = fold_constants(&graph, &["x"], &["out"]).unwrap();

    insta::assert_snapshot!(dump(&folded), @r"
    six = Const() {dtype=int, value=6}
    scaled = Mul(x, six)
    out = Neg(scaled, ^x)
    x = Placeholder() {dtype=int}
    ");
    assert!(folded.names().all(|n| !n.starts_with("_recv_") && !n.starts_with("_send_")));
}

#[test]
fn feeding_cuts_off_upstream_constants() {
    // `mid` would fold, but it is fed, so its producers are irrelevant.
    let graph = GraphDef::new(vec![
        int("a", 1),
        NodeDef::new("mid", "Neg").with_input("a"),
        NodeDef::new("out", "Square").with_input("mid"),
    ]);

    let folded = fold_constants(&graph, &["mid"], &["out"]).unwrap();

    insta::assert_snapshot!(dump(&folded), @r"
    out = Square(mid)
    mid = Neg(a)
    ");
}

#[test]
fn fetched_input_is_returned_as_is() {
    let graph = GraphDef::new(vec![placeholder("x"), int("unused", 1)]);

    let folded = fold_constants(&graph, &["x"], &["x"]).unwrap();

    assert_eq!(folded, GraphDef::new(vec![placeholder("x")]));
}

#[test]
fn folding_is_idempotent() {
    let graph = GraphDef::new(vec![
        placeholder("x"),
        int("a", 4),
        NodeDef::new("b", "Square").with_input("a"),
        NodeDef::new("y", "Sub").with_inputs(["x", "b"]),
    ]);

    let once = fold_constants(&graph, &["x"], &["y"]).unwrap();
    let twice = fold_constants(&once, &["x"], &["y"]).unwrap();

    assert_eq!(once, twice);
}

#[test]
fn missing_output_is_reported_by_the_rewriter() {
    let graph = GraphDef::new(vec![int("a", 1)]);

    let err = fold_constants(&graph, &[], &["missing_node"]).unwrap_err();

    assert_eq!(
        err,
        Error::Rewrite(RewriteError::FetchNotFound("missing_node".into()))
    );
}

#[test]
fn import_errors_propagate() {
    let graph = GraphDef::new(vec![NodeDef::new("n", "Neg").with_input("ghost")]);

    let err = fold_constants(&graph, &[], &["n"]).unwrap_err();

    assert!(matches!(err, Error::Import(ImportError::DanglingInput { .. })));
    assert_eq!(
        err.to_string(),
        "node 'n': input 'ghost' refers to a node that does not exist"
    );
}

#[test]
fn evaluation_errors_propagate() {
    let graph = GraphDef::new(vec![NodeDef::new("c", "Const")]);

    let err = fold_constants(&graph, &[], &["c"]).unwrap_err();

    assert!(matches!(err, Error::Evaluation(_)));
}

#[test]
fn oversized_constant_shape_is_an_error() {
    let huge = Tensor::new(vec![usize::MAX, 2], TensorValues::Int(vec![1, 2]));
    let graph = GraphDef::new(vec![
        NodeDef::constant("c", huge),
        NodeDef::new("out", "Identity").with_input("c"),
    ]);

    let err = fold_constants(&graph, &[], &["out"]).unwrap_err();

    assert!(matches!(err, Error::Evaluation(_)));
}

#[test]
fn custom_collaborators() {
    let graph = GraphDef::new(vec![
        int("a", 3),
        NodeDef::new("sq", "Square").with_input("a"),
        NodeDef::new("conv", "Conv2D").with_input("sq"),
    ]);

    let strict = fold_constants(&graph, &[], &["conv"]).unwrap_err();
    assert!(matches!(strict, Error::Import(ImportError::UnknownOp { .. })));

    let pipeline = FoldPipeline::new()
        .with_ops(StandardOps::permissive())
        .with_evaluator(ConstantFolder::new(FoldOptions {
            excluded_ops: vec!["Square".into()],
            ..FoldOptions::default()
        }));
    let folded = pipeline.run(&graph, &[], &["conv"]).unwrap();

    insta::assert_snapshot!(dump(&folded), @r"
    a = Const() {dtype=int, value=3}
    sq = Square(a)
    conv = Conv2D(sq)
    ");
}
