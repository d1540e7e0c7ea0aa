use crate::graph_def::{GraphDef, NodeDef};
use crate::node_ref::*;

#[test]
fn bare_name() {
    let r = parse_input("add");
    assert_eq!((r.prefix, r.name, r.suffix), ("", "add", ""));
    assert!(!r.is_control());
}

#[test]
fn output_suffix() {
    let r = parse_input("split:1");
    assert_eq!((r.prefix, r.name, r.suffix), ("", "split", ":1"));
    assert_eq!(r.output_index(), Some(1));
}

#[test]
fn control_prefix() {
    let r = parse_input("^init");
    assert_eq!((r.prefix, r.name, r.suffix), ("^", "init", ""));
    assert!(r.is_control());
}

#[test]
fn scoped_names_keep_slashes() {
    let r = parse_input("^block_3/conv/BiasAdd:0");
    assert_eq!(r.prefix, "^");
    assert_eq!(r.name, "block_3/conv/BiasAdd");
    assert_eq!(r.suffix, ":0");
}

#[test]
fn suffix_starts_at_first_colon() {
    let r = parse_input("a:1:2");
    assert_eq!(r.name, "a");
    assert_eq!(r.suffix, ":1:2");
    assert_eq!(r.output_index(), None);
}

#[test]
fn degenerate_strings_still_decompose() {
    for input in ["", "^", ":", "^:", "^^a", ":7", "a:"] {
        let r = parse_input(input);
        assert_eq!(r.to_string(), input);
    }
    assert_eq!(parse_input("^^a").name, "^a");
    assert_eq!(parse_input(":7").name, "");
}

#[test]
fn round_trip_reproduces_input() {
    let inputs = [
        "x",
        "x:0",
        "x:12",
        "^x",
        "^x:3",
        "scope/x",
        "_recv_input_0",
        "^_recv_input_0",
        "name with spaces:1",
    ];
    for input in inputs {
        let r = parse_input(input);
        assert_eq!(format!("{}{}{}", r.prefix, r.name, r.suffix), input);
    }
}

#[test]
fn with_name_keeps_prefix_and_suffix() {
    assert_eq!(parse_input("^_recv_a_0").with_name("a"), "^a");
    assert_eq!(parse_input("_recv_a_0:0").with_name("a"), "a:0");
    assert_eq!(parse_input("_recv_a_0").with_name("a"), "a");
}

#[test]
fn output_index_rules() {
    assert_eq!(parse_input("a").output_index(), Some(0));
    assert_eq!(parse_input("a:0").output_index(), Some(0));
    assert_eq!(parse_input("^a").output_index(), Some(0));
    assert_eq!(parse_input("a:").output_index(), None);
    assert_eq!(parse_input("a:x").output_index(), None);
    assert_eq!(parse_input("a:-1").output_index(), None);
}

#[test]
fn base_name_projection() {
    assert_eq!(node_name_from_input("^a:1"), "a");
    assert_eq!(node_name_from_input("b"), "b");
}

#[test]
fn control_detection() {
    assert!(is_control_input("^a"));
    assert!(!is_control_input("a"));
    assert!(!is_control_input("a:1"));
}

#[test]
fn canonical_names() {
    assert_eq!(canonical_input_name("a"), "a:0");
    assert_eq!(canonical_input_name("a:2"), "a:2");
    assert_eq!(canonical_input_name("^a"), "^a");
}

#[test]
fn map_names_last_write_wins() {
    let graph = GraphDef::new(vec![
        NodeDef::new("a", "Const"),
        NodeDef::new("b", "Identity").with_input("a"),
        NodeDef::new("a", "Placeholder"),
    ]);

    let map = map_names_to_nodes(&graph);

    assert_eq!(map.len(), 2);
    assert_eq!(map["a"].op, "Placeholder");
    assert_eq!(map["b"].input, vec!["a".to_string()]);
}

#[test]
fn filter_preserves_order() {
    let graph = GraphDef::new(vec![
        NodeDef::new("c", "NoOp"),
        NodeDef::new("a", "NoOp"),
        NodeDef::new("b", "NoOp"),
    ]);

    let filtered = filter_graph_def(&graph, |n| n.name != "a");

    assert_eq!(filtered.names().collect::<Vec<_>>(), ["c", "b"]);
}
