//! Serialized graph schema.
//!
//! A `GraphDef` is an ordered list of `NodeDef` records. Nodes refer to their
//! producers by name through the strings in `NodeDef::input`; there are no
//! structural edges at this layer.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::tensor::{DataType, Tensor};

/// A serialized computation graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDef {
    #[serde(default)]
    pub node: Vec<NodeDef>,
}

impl GraphDef {
    pub fn new(node: Vec<NodeDef>) -> Self {
        Self { node }
    }

    pub fn len(&self) -> usize {
        self.node.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node.is_empty()
    }

    /// First node with the given name.
    pub fn find(&self, name: &str) -> Option<&NodeDef> {
        self.node.iter().find(|n| n.name == name)
    }

    /// Node names in graph order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.node.iter().map(|n| n.name.as_str())
    }
}

/// One operation in a `GraphDef`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDef {
    pub name: String,
    pub op: String,
    /// Input references, see [`crate::node_ref`].
    #[serde(default)]
    pub input: Vec<String>,
    /// Operation-specific attributes, opaque to the rewriting passes.
    #[serde(default)]
    pub attr: IndexMap<String, AttrValue>,
}

impl NodeDef {
    pub fn new(name: impl Into<String>, op: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            op: op.into(),
            input: Vec::new(),
            attr: IndexMap::new(),
        }
    }

    /// A `Const` node holding `value`.
    pub fn constant(name: impl Into<String>, value: Tensor) -> Self {
        Self::new(name, "Const")
            .with_attr("dtype", AttrValue::Type(value.dtype()))
            .with_attr("value", AttrValue::Tensor(value))
    }

    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input.push(input.into());
        self
    }

    pub fn with_inputs<I, S>(mut self, inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.input.extend(inputs.into_iter().map(Into::into));
        self
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: AttrValue) -> Self {
        self.attr.insert(key.into(), value);
        self
    }
}

/// Attribute value. Variant tags follow the short names used by model
/// exporters (`i`, `f`, `b`, `s`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttrValue {
    I(i64),
    F(f64),
    B(bool),
    S(String),
    Type(DataType),
    Shape(Vec<i64>),
    Tensor(Tensor),
    List(Vec<AttrValue>),
}

impl AttrValue {
    pub fn as_tensor(&self) -> Option<&Tensor> {
        match self {
            AttrValue::Tensor(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_type(&self) -> Option<DataType> {
        match self {
            AttrValue::Type(t) => Some(*t),
            _ => None,
        }
    }
}
