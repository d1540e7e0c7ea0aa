//! Reference kernels for the standard ops.
//!
//! Element-wise only. Binary kernels accept equal shapes or a scalar on
//! either side; integer arithmetic is checked.

use graphfold_core::{DataType, Tensor, TensorValues};

use crate::graph::Node;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KernelError {
    #[error("incompatible shapes {left:?} and {right:?}")]
    ShapeMismatch { left: Vec<usize>, right: Vec<usize> },

    #[error("mismatched element types {left} and {right}")]
    TypeMismatch { left: DataType, right: DataType },

    #[error("element type {0} is not supported")]
    Unsupported(DataType),

    #[error("expected {expected} inputs, got {actual}")]
    Arity { expected: usize, actual: usize },

    #[error("integer division by zero")]
    DivisionByZero,

    #[error("integer overflow")]
    Overflow,
}

type IntOp = fn(i64, i64) -> Result<i64, KernelError>;
type FloatOp = fn(f64, f64) -> f64;

fn expect_inputs(inputs: &[&Tensor], n: usize) -> Result<(), KernelError> {
    if inputs.len() != n {
        return Err(KernelError::Arity {
            expected: n,
            actual: inputs.len(),
        });
    }
    Ok(())
}

fn broadcast_shape(a: &Tensor, b: &Tensor) -> Result<Vec<usize>, KernelError> {
    if a.shape == b.shape || b.is_scalar() {
        Ok(a.shape.clone())
    } else if a.is_scalar() {
        Ok(b.shape.clone())
    } else {
        Err(KernelError::ShapeMismatch {
            left: a.shape.clone(),
            right: b.shape.clone(),
        })
    }
}

fn zip_with<T: Copy, U>(
    x: &[T],
    y: &[T],
    x_scalar: bool,
    y_scalar: bool,
    len: usize,
    f: impl Fn(T, T) -> Result<U, KernelError>,
) -> Result<Vec<U>, KernelError> {
    (0..len)
        .map(|i| {
            let a = x[if x_scalar { 0 } else { i }];
            let b = y[if y_scalar { 0 } else { i }];
            f(a, b)
        })
        .collect()
}

fn binary(inputs: &[&Tensor], float: FloatOp, int: IntOp) -> Result<Tensor, KernelError> {
    expect_inputs(inputs, 2)?;
    let (a, b) = (inputs[0], inputs[1]);
    let shape = broadcast_shape(a, b)?;
    // Inputs are validated, so the broadcast side already holds the count.
    let len = if shape == a.shape { a.len() } else { b.len() };
    let (xs, ys) = (a.is_scalar(), b.is_scalar());

    let values = match (&a.values, &b.values) {
        (TensorValues::Float(x), TensorValues::Float(y)) => {
            TensorValues::Float(zip_with(x, y, xs, ys, len, |p, q| Ok(float(p, q)))?)
        }
        (TensorValues::Int(x), TensorValues::Int(y)) => {
            TensorValues::Int(zip_with(x, y, xs, ys, len, int)?)
        }
        (TensorValues::Bool(_), TensorValues::Bool(_)) => {
            return Err(KernelError::Unsupported(DataType::Bool));
        }
        _ => {
            return Err(KernelError::TypeMismatch {
                left: a.dtype(),
                right: b.dtype(),
            });
        }
    };
    Ok(Tensor::new(shape, values))
}

fn unary(
    inputs: &[&Tensor],
    float: fn(f64) -> f64,
    int: fn(i64) -> Option<i64>,
) -> Result<Tensor, KernelError> {
    expect_inputs(inputs, 1)?;
    let a = inputs[0];
    let values = match &a.values {
        TensorValues::Float(x) => TensorValues::Float(x.iter().map(|&v| float(v)).collect()),
        TensorValues::Int(x) => TensorValues::Int(
            x.iter()
                .map(|&v| int(v).ok_or(KernelError::Overflow))
                .collect::<Result<_, _>>()?,
        ),
        TensorValues::Bool(_) => return Err(KernelError::Unsupported(DataType::Bool)),
    };
    Ok(Tensor::new(a.shape.clone(), values))
}

pub(crate) fn identity(_node: &Node, inputs: &[&Tensor]) -> Result<Tensor, KernelError> {
    expect_inputs(inputs, 1)?;
    Ok(inputs[0].clone())
}

pub(crate) fn add(_node: &Node, inputs: &[&Tensor]) -> Result<Tensor, KernelError> {
    binary(inputs, |a, b| a + b, |a, b| {
        a.checked_add(b).ok_or(KernelError::Overflow)
    })
}

pub(crate) fn sub(_node: &Node, inputs: &[&Tensor]) -> Result<Tensor, KernelError> {
    binary(inputs, |a, b| a - b, |a, b| {
        a.checked_sub(b).ok_or(KernelError::Overflow)
    })
}

pub(crate) fn mul(_node: &Node, inputs: &[&Tensor]) -> Result<Tensor, KernelError> {
    binary(inputs, |a, b| a * b, |a, b| {
        a.checked_mul(b).ok_or(KernelError::Overflow)
    })
}

/// Float division follows IEEE 754; integer division truncates toward zero.
pub(crate) fn div(_node: &Node, inputs: &[&Tensor]) -> Result<Tensor, KernelError> {
    binary(inputs, |a, b| a / b, |a, b| {
        if b == 0 {
            return Err(KernelError::DivisionByZero);
        }
        a.checked_div(b).ok_or(KernelError::Overflow)
    })
}

pub(crate) fn maximum(_node: &Node, inputs: &[&Tensor]) -> Result<Tensor, KernelError> {
    binary(inputs, f64::max, |a, b| Ok(a.max(b)))
}

pub(crate) fn minimum(_node: &Node, inputs: &[&Tensor]) -> Result<Tensor, KernelError> {
    binary(inputs, f64::min, |a, b| Ok(a.min(b)))
}

pub(crate) fn neg(_node: &Node, inputs: &[&Tensor]) -> Result<Tensor, KernelError> {
    unary(inputs, |v| -v, i64::checked_neg)
}

pub(crate) fn abs(_node: &Node, inputs: &[&Tensor]) -> Result<Tensor, KernelError> {
    unary(inputs, f64::abs, i64::checked_abs)
}

pub(crate) fn square(_node: &Node, inputs: &[&Tensor]) -> Result<Tensor, KernelError> {
    unary(inputs, |v| v * v, |v| v.checked_mul(v))
}
