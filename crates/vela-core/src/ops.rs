//! Array operations: arithmetic, comparison, unary math, reduction.
//!
//! All operations return new arrays (functional style).

pub mod arithmetic;
pub mod comparison;
pub mod math;
pub mod reduction;
