//! Restrict a graph to the part that runs between declared inputs and outputs.
//!
//! Fed nodes are cut loose from their producers by routing their consumers
//! through a fresh `_Recv` node; fetched nodes get a `_Send` consumer. Only
//! what the boundary nodes reach survives.

use std::collections::{HashMap, HashSet};

use graphfold_core::AttrValue;

use crate::graph::{Edge, EdgeKind, Graph, Node, NodeId};
use crate::ops::{RECV_OP, SEND_OP};

/// Name prefix of receive nodes standing in for fed inputs.
pub const RECV_PREFIX: &str = "_recv_";
/// Name prefix of send nodes attached to fetched outputs.
pub const SEND_PREFIX: &str = "_send_";
/// Separates the node name from the output slot in boundary node names.
pub const BOUNDARY_SEPARATOR: &str = "_";

/// `_recv_<input>_0`
pub fn recv_node_name(input: &str) -> String {
    format!("{RECV_PREFIX}{input}{BOUNDARY_SEPARATOR}0")
}

/// `_send_<output>_0`
pub fn send_node_name(output: &str) -> String {
    format!("{SEND_PREFIX}{output}{BOUNDARY_SEPARATOR}0")
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RewriteError {
    #[error("feed node '{0}' not found in graph")]
    FeedNotFound(String),

    #[error("fetch node '{0}' not found in graph")]
    FetchNotFound(String),

    #[error("boundary node name '{0}' is already taken")]
    NameCollision(String),
}

/// Cuts a graph down to what executes between `inputs` and `outputs`.
///
/// Every declared input and output must remain reachable in the result.
/// Implementations may add boundary nodes; receive nodes must be `_Recv` ops
/// named with [`recv_node_name`] so the boundary can be undone afterwards.
pub trait BoundaryRewriter {
    fn rewrite(
        &self,
        graph: Graph,
        inputs: &[&str],
        outputs: &[&str],
    ) -> Result<Graph, RewriteError>;
}

/// The default rewriter: one `_Recv` per feed, one `_Send` per fetch.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeedFetchRewriter;

impl BoundaryRewriter for FeedFetchRewriter {
    fn rewrite(
        &self,
        mut graph: Graph,
        inputs: &[&str],
        outputs: &[&str],
    ) -> Result<Graph, RewriteError> {
        for &name in inputs {
            if !graph.contains(name) {
                return Err(RewriteError::FeedNotFound(name.to_string()));
            }
        }
        for &name in outputs {
            if !graph.contains(name) {
                return Err(RewriteError::FetchNotFound(name.to_string()));
            }
        }

        let original_len = graph.len();
        let mut boundary: Vec<NodeId> = Vec::new();

        let mut feeds: HashMap<NodeId, NodeId> = HashMap::new();
        for &name in inputs {
            let Some(fed) = graph.find(name) else {
                continue;
            };
            if feeds.contains_key(&fed) {
                continue;
            }
            let recv_name = recv_node_name(name);
            if graph.contains(&recv_name) {
                return Err(RewriteError::NameCollision(recv_name));
            }
            let mut recv = Node::new(recv_name, RECV_OP);
            recv.attrs
                .insert("tensor_name".into(), AttrValue::S(format!("{name}:0")));
            let recv = graph.add_node(recv);
            feeds.insert(fed, recv);
            boundary.push(recv);
        }

        // Consumers of a fed node read the receive node instead. Only output 0
        // is fed; other outputs keep their producer.
        for id in 0..original_len as NodeId {
            for edge in &mut graph.node_mut(id).inputs {
                let fed_slot = matches!(
                    edge.kind,
                    EdgeKind::Data { output: 0 } | EdgeKind::Control
                );
                if fed_slot && let Some(&recv) = feeds.get(&edge.source) {
                    edge.source = recv;
                }
            }
        }

        let mut fetched: HashSet<NodeId> = HashSet::new();
        for &name in outputs {
            let Some(target) = graph.find(name) else {
                continue;
            };
            if !fetched.insert(target) {
                continue;
            }
            let send_name = send_node_name(name);
            if graph.contains(&send_name) {
                return Err(RewriteError::NameCollision(send_name));
            }
            let source = feeds.get(&target).copied().unwrap_or(target);
            let mut send = Node::new(send_name, SEND_OP);
            send.inputs.push(Edge::data(source, 0));
            boundary.push(graph.add_node(send));
        }

        let reachable = reverse_reachable(&graph, &boundary);
        graph.retain(|id, _| reachable[id as usize]);

        tracing::debug!(
            feeds = feeds.len(),
            fetches = fetched.len(),
            nodes = graph.len(),
            "restricted graph to boundary"
        );
        Ok(graph)
    }
}

fn reverse_reachable(graph: &Graph, roots: &[NodeId]) -> Vec<bool> {
    let mut seen = vec![false; graph.len()];
    let mut stack: Vec<NodeId> = roots.to_vec();

    while let Some(id) = stack.pop() {
        if std::mem::replace(&mut seen[id as usize], true) {
            continue;
        }
        stack.extend(graph.node(id).inputs.iter().map(|e| e.source));
    }
    seen
}
