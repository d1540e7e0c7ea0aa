//! Arena-backed executable graph.
//!
//! Nodes live in a flat vector and refer to their producers by `NodeId`.
//! A name index maps the serialized identities back to ids. Nodes are copied
//! and filtered between passes, so ids are only stable within one `Graph`.

use std::collections::{HashMap, VecDeque};

use graphfold_core::node_ref::CONTROL_PREFIX;
use graphfold_core::{AttrValue, GraphDef, NodeDef};
use indexmap::IndexMap;

/// Index into `Graph::nodes`.
pub type NodeId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// Carries the value of one producer output.
    Data { output: u32 },
    /// Ordering only.
    Control,
}

/// Incoming edge of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub source: NodeId,
    pub kind: EdgeKind,
}

impl Edge {
    pub fn data(source: NodeId, output: u32) -> Self {
        Self {
            source,
            kind: EdgeKind::Data { output },
        }
    }

    pub fn control(source: NodeId) -> Self {
        Self {
            source,
            kind: EdgeKind::Control,
        }
    }

    pub fn is_control(&self) -> bool {
        matches!(self.kind, EdgeKind::Control)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: String,
    pub op: String,
    pub attrs: IndexMap<String, AttrValue>,
    /// Data edges first, then control edges.
    pub inputs: Vec<Edge>,
}

impl Node {
    pub fn new(name: impl Into<String>, op: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            op: op.into(),
            attrs: IndexMap::new(),
            inputs: Vec::new(),
        }
    }

    pub fn data_inputs(&self) -> impl Iterator<Item = &Edge> {
        self.inputs.iter().filter(|e| !e.is_control())
    }

    pub fn control_inputs(&self) -> impl Iterator<Item = &Edge> {
        self.inputs.iter().filter(|e| e.is_control())
    }
}

/// Largest node count the importer accepts, leaving id room for one receive
/// and one send node per imported node.
pub const MAX_NODES: usize = (NodeId::MAX / 3) as usize;

/// Executable graph: node arena plus name index.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    index: HashMap<String, NodeId>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, returning its ID.
    ///
    /// The name must not already be present; callers check with `contains`.
    /// Ids are `u32`: a graph holds at most `NodeId::MAX` nodes, and
    /// [`MAX_NODES`] bounds what import and boundary rewriting can reach.
    pub fn add_node(&mut self, node: Node) -> NodeId {
        debug_assert!(
            !self.index.contains_key(&node.name),
            "duplicate node name '{}'",
            node.name
        );
        let id =
            NodeId::try_from(self.nodes.len()).expect("node count exceeds the NodeId range");
        self.index.insert(node.name.clone(), id);
        self.nodes.push(node);
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id as usize]
    }

    /// Mutable access for rewiring and op replacement. Renaming through this
    /// handle leaves the name index stale.
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id as usize]
    }

    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (i as NodeId, n))
    }

    /// Consumers of each node, indexed by producer id. A consumer appears once
    /// per edge.
    pub fn consumers(&self) -> Vec<Vec<NodeId>> {
        let mut consumers = vec![Vec::new(); self.nodes.len()];
        for (id, node) in self.iter() {
            for edge in &node.inputs {
                consumers[edge.source as usize].push(id);
            }
        }
        consumers
    }

    /// Producers-before-consumers order (Kahn's algorithm, ties broken by id).
    ///
    /// Nodes on a cycle, and everything downstream of one, are left out.
    pub fn topological_order(&self) -> Vec<NodeId> {
        let consumers = self.consumers();
        let mut pending: Vec<usize> = self.nodes.iter().map(|n| n.inputs.len()).collect();

        let mut queue: VecDeque<NodeId> = self
            .iter()
            .filter(|(_, n)| n.inputs.is_empty())
            .map(|(id, _)| id)
            .collect();

        let mut order = Vec::with_capacity(self.nodes.len());
        while let Some(id) = queue.pop_front() {
            order.push(id);
            for &consumer in &consumers[id as usize] {
                let count = &mut pending[consumer as usize];
                *count -= 1;
                if *count == 0 {
                    queue.push_back(consumer);
                }
            }
        }
        order
    }

    /// Keep only the nodes accepted by `keep`, renumbering the survivors.
    ///
    /// Edges from removed producers are dropped.
    pub fn retain(&mut self, mut keep: impl FnMut(NodeId, &Node) -> bool) {
        let mut remap: Vec<Option<NodeId>> = Vec::with_capacity(self.nodes.len());
        let mut next: NodeId = 0;
        for (id, node) in self.iter() {
            if keep(id, node) {
                remap.push(Some(next));
                next += 1;
            } else {
                remap.push(None);
            }
        }

        let old = std::mem::take(&mut self.nodes);
        self.index.clear();
        for (node, slot) in old.into_iter().zip(&remap) {
            if slot.is_none() {
                continue;
            }
            let mut node = node;
            node.inputs = node
                .inputs
                .iter()
                .filter_map(|e| {
                    remap[e.source as usize].map(|source| Edge {
                        source,
                        kind: e.kind,
                    })
                })
                .collect();
            self.add_node(node);
        }
    }

    /// Render an edge as an input reference string.
    pub fn input_name(&self, edge: &Edge) -> String {
        let source = &self.node(edge.source).name;
        match edge.kind {
            EdgeKind::Control => format!("{CONTROL_PREFIX}{source}"),
            EdgeKind::Data { output: 0 } => source.clone(),
            EdgeKind::Data { output } => format!("{source}:{output}"),
        }
    }

    /// Serialize back to the node-list form, in arena order.
    pub fn to_graph_def(&self) -> GraphDef {
        let node = self
            .nodes
            .iter()
            .map(|n| NodeDef {
                name: n.name.clone(),
                op: n.op.clone(),
                input: n.inputs.iter().map(|e| self.input_name(e)).collect(),
                attr: n.attrs.clone(),
            })
            .collect();
        GraphDef { node }
    }
}
