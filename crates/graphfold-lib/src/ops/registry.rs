//! Operation registry.
//!
//! The importer and the constant folder only learn about operations through
//! an `OpRegistry` handed to them, so tests can run against a small custom
//! set of ops instead of a process-wide table.

use std::collections::HashMap;

use graphfold_core::Tensor;

use super::kernels::{self, KernelError};
use crate::graph::Node;

pub const CONST_OP: &str = "Const";
pub const PLACEHOLDER_OP: &str = "Placeholder";
/// Boundary receive inserted at feed points.
pub const RECV_OP: &str = "_Recv";
/// Boundary send inserted at fetch points.
pub const SEND_OP: &str = "_Send";

/// Evaluates one node given the values of its data inputs.
pub type Kernel = fn(&Node, &[&Tensor]) -> Result<Tensor, KernelError>;

/// Static description of an operation.
#[derive(Debug, Clone)]
pub struct OpDef {
    pub name: String,
    /// Number of data inputs, `None` for variadic ops.
    pub num_inputs: Option<usize>,
    pub num_outputs: u32,
    /// Stateful ops have effects or nondeterministic results and never fold.
    pub stateful: bool,
    pub kernel: Option<Kernel>,
}

impl OpDef {
    pub fn new(name: impl Into<String>, num_inputs: Option<usize>, num_outputs: u32) -> Self {
        Self {
            name: name.into(),
            num_inputs,
            num_outputs,
            stateful: false,
            kernel: None,
        }
    }

    pub fn stateful(mut self) -> Self {
        self.stateful = true;
        self
    }

    pub fn with_kernel(mut self, kernel: Kernel) -> Self {
        self.kernel = Some(kernel);
        self
    }

    pub fn is_foldable(&self) -> bool {
        !self.stateful && self.kernel.is_some()
    }
}

/// Lookup of operation definitions by op name.
pub trait OpRegistry {
    fn lookup(&self, op: &str) -> Option<&OpDef>;
}

impl<T: OpRegistry + ?Sized> OpRegistry for &T {
    fn lookup(&self, op: &str) -> Option<&OpDef> {
        (*self).lookup(op)
    }
}

/// The built-in operation set.
#[derive(Debug, Clone)]
pub struct StandardOps {
    ops: HashMap<String, OpDef>,
    /// Stand-in for unregistered ops in permissive mode.
    opaque: Option<OpDef>,
}

impl StandardOps {
    pub fn new() -> Self {
        let mut ops = Self {
            ops: HashMap::new(),
            opaque: None,
        };

        ops.register(OpDef::new(CONST_OP, Some(0), 1));
        ops.register(OpDef::new(PLACEHOLDER_OP, Some(0), 1));
        ops.register(OpDef::new("NoOp", Some(0), 0));
        ops.register(OpDef::new("Identity", Some(1), 1).with_kernel(kernels::identity));

        ops.register(OpDef::new("Add", Some(2), 1).with_kernel(kernels::add));
        ops.register(OpDef::new("Sub", Some(2), 1).with_kernel(kernels::sub));
        ops.register(OpDef::new("Mul", Some(2), 1).with_kernel(kernels::mul));
        ops.register(OpDef::new("Div", Some(2), 1).with_kernel(kernels::div));
        ops.register(OpDef::new("Maximum", Some(2), 1).with_kernel(kernels::maximum));
        ops.register(OpDef::new("Minimum", Some(2), 1).with_kernel(kernels::minimum));

        ops.register(OpDef::new("Neg", Some(1), 1).with_kernel(kernels::neg));
        ops.register(OpDef::new("Abs", Some(1), 1).with_kernel(kernels::abs));
        ops.register(OpDef::new("Square", Some(1), 1).with_kernel(kernels::square));

        ops.register(OpDef::new("RandomUniform", Some(1), 1).stateful());
        ops.register(OpDef::new(RECV_OP, Some(0), 1).stateful());
        ops.register(OpDef::new(SEND_OP, Some(1), 0).stateful());

        ops
    }

    /// Standard ops, with every unknown op accepted as opaque: variadic,
    /// any number of outputs, never folded.
    pub fn permissive() -> Self {
        let mut ops = Self::new();
        ops.opaque = Some(OpDef::new("<opaque>", None, u32::MAX).stateful());
        ops
    }

    /// Add or replace an op definition.
    pub fn register(&mut self, def: OpDef) {
        self.ops.insert(def.name.clone(), def);
    }

    pub fn is_permissive(&self) -> bool {
        self.opaque.is_some()
    }
}

impl Default for StandardOps {
    fn default() -> Self {
        Self::new()
    }
}

impl OpRegistry for StandardOps {
    fn lookup(&self, op: &str) -> Option<&OpDef> {
        self.ops.get(op).or(self.opaque.as_ref())
    }
}
