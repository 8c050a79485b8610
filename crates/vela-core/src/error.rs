use crate::dims::Dims;

/// Errors raised by array operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VelaError {
    #[error("Dims mismatch: {lhs} vs {rhs}")]
    DimsMismatch { lhs: Dims, rhs: Dims },

    #[error("Invalid dims: {0:?}")]
    InvalidDims(Vec<i64>),

    #[error("Dims {dims} require {expected} elements, got {got}")]
    ElementCountMismatch {
        dims: Dims,
        expected: usize,
        got: usize,
    },

    #[error("Element count of {0} overflows the address space")]
    ElementCountOverflow(Dims),

    #[error("Cannot allocate {elements} elements")]
    AllocationFailed { elements: usize },

    #[error("Operation '{0}' is undefined on an empty array")]
    EmptyArray(&'static str),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
