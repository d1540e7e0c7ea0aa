//! Operation definitions and reference kernels.

mod kernels;
mod registry;


pub use kernels::KernelError;
pub use registry::{
    CONST_OP, Kernel, OpDef, OpRegistry, PLACEHOLDER_OP, RECV_OP, SEND_OP, StandardOps,
};
