//! Undo the boundary rewrite.
//!
//! Restricting a graph to its inputs and outputs replaces every fed node `X`
//! with a receive node named `_recv_X_<suffix>` and hangs a send node off every
//! fetched one. Neither may reach the caller: this pass drops them, points
//! consumers of a receive node back at `X`, and restores `X` from the original
//! graph.

use std::collections::{BTreeMap, HashSet};

use graphfold_core::node_ref::{map_names_to_nodes, parse_input};
use graphfold_core::{GraphDef, NodeDef};

use super::subgraph::{BOUNDARY_SEPARATOR, RECV_PREFIX};
use crate::ops::{RECV_OP, SEND_OP};

/// Replace the boundary nodes in `rewritten` with the original input nodes.
///
/// A node counts as a boundary node when its op is `_Recv` or `_Send` and
/// `original` has no node of that name; boundary nodes are dropped. A dropped
/// receive node named after a declared input is renamed back to that input in
/// every reference, keeping the `^` prefix and `:k` suffix. The original input
/// nodes are appended after everything else, ordered by the receive node names.
///
/// `outputs` is not consulted.
pub fn replace_boundary_placeholders(
    original: &GraphDef,
    rewritten: &GraphDef,
    inputs: &[&str],
    _outputs: &[&str],
) -> GraphDef {
    let original_nodes = map_names_to_nodes(original);
    let is_new = |node: &NodeDef| !original_nodes.contains_key(node.name.as_str());

    let mut renames: BTreeMap<&str, &str> = BTreeMap::new();
    for node in &rewritten.node {
        if node.op != RECV_OP || !is_new(node) {
            continue;
        }
        if let Some(input) = placeholder_input(&node.name, inputs) {
            tracing::debug!(placeholder = %node.name, input, "restoring boundary input");
            renames.insert(node.name.as_str(), input);
        }
    }

    let mut out = Vec::with_capacity(rewritten.len());
    for node in &rewritten.node {
        if (node.op == RECV_OP || node.op == SEND_OP) && is_new(node) {
            continue;
        }
        let mut node = node.clone();
        for input in &mut node.input {
            let parsed = parse_input(input);
            let renamed = renames.get(parsed.name).map(|name| parsed.with_name(name));
            if let Some(renamed) = renamed {
                *input = renamed;
            }
        }
        out.push(node);
    }

    let mut present: HashSet<String> = out.iter().map(|n| n.name.clone()).collect();
    for &input in renames.values() {
        if present.contains(input) {
            continue;
        }
        match original_nodes.get(input) {
            Some(node) => {
                out.push((*node).clone());
                present.insert(input.to_string());
            }
            None => {
                tracing::warn!(input, "boundary input has no node in the original graph");
            }
        }
    }

    GraphDef::new(out)
}

/// The declared input a receive node stands in for.
///
/// When several inputs match (`a` and `a_b` both match `_recv_a_b_0`), the
/// longest wins.
fn placeholder_input<'a>(name: &str, inputs: &[&'a str]) -> Option<&'a str> {
    let rest = name.strip_prefix(RECV_PREFIX)?;
    inputs
        .iter()
        .copied()
        .filter(|input| {
            rest.strip_prefix(input)
                .is_some_and(|tail| tail.starts_with(BOUNDARY_SEPARATOR))
        })
        .max_by_key(|input| input.len())
}
