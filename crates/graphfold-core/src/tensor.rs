//! Literal tensor values carried by `Const` nodes.

use serde::{Deserialize, Serialize};

/// Element type of a tensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    Float,
    Int,
    Bool,
}

impl DataType {
    pub fn as_str(self) -> &'static str {
        match self {
            DataType::Float => "float",
            DataType::Int => "int",
            DataType::Bool => "bool",
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flat element storage, row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TensorValues {
    Float(Vec<f64>),
    Int(Vec<i64>),
    Bool(Vec<bool>),
}

impl TensorValues {
    pub fn len(&self) -> usize {
        match self {
            TensorValues::Float(v) => v.len(),
            TensorValues::Int(v) => v.len(),
            TensorValues::Bool(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dtype(&self) -> DataType {
        match self {
            TensorValues::Float(_) => DataType::Float,
            TensorValues::Int(_) => DataType::Int,
            TensorValues::Bool(_) => DataType::Bool,
        }
    }
}

/// A dense tensor literal.
///
/// An empty `shape` denotes a scalar holding exactly one element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tensor {
    #[serde(default)]
    pub shape: Vec<usize>,
    pub values: TensorValues,
}

impl Tensor {
    pub fn new(shape: Vec<usize>, values: TensorValues) -> Self {
        Self { shape, values }
    }

    pub fn scalar_float(v: f64) -> Self {
        Self::new(Vec::new(), TensorValues::Float(vec![v]))
    }

    pub fn scalar_int(v: i64) -> Self {
        Self::new(Vec::new(), TensorValues::Int(vec![v]))
    }

    pub fn scalar_bool(v: bool) -> Self {
        Self::new(Vec::new(), TensorValues::Bool(vec![v]))
    }

    pub fn dtype(&self) -> DataType {
        self.values.dtype()
    }

    /// Number of stored elements.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_scalar(&self) -> bool {
        self.shape.is_empty()
    }

    /// Element count implied by the shape, `None` when it overflows `usize`.
    pub fn num_elements(&self) -> Option<usize> {
        self.shape
            .iter()
            .try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
    }

    /// Check that the stored elements fill the declared shape exactly.
    pub fn validate(&self) -> Result<(), String> {
        let Some(expected) = self.num_elements() else {
            return Err(format!("element count of shape {:?} overflows", self.shape));
        };
        if self.len() != expected {
            return Err(format!(
                "shape {:?} holds {} elements but {} were given",
                self.shape,
                expected,
                self.len()
            ));
        }
        Ok(())
    }
}
