//! # vela-core
//!
//! Eager, CPU-only array library behind the Vela handle layer.
//!
//! Provides the `Array` type with:
//! - Column-major storage over four axes (`Dims`)
//! - `F32` and boolean (`B8`) element types
//! - Element-wise arithmetic with axis-wise broadcasting
//! - Comparisons, unary math, and whole-array reductions

pub mod array;
pub mod dims;
pub mod dtype;
pub mod error;
pub mod ops;
pub mod prelude;
pub mod storage;

pub use array::Array;
pub use dims::{Dims, MAX_AXES};
pub use dtype::DType;
pub use error::VelaError;

pub type Result<T> = std::result::Result<T, VelaError>;
