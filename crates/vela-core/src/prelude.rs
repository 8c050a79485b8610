//! Convenience re-exports for common vela-core types.
//!
//! ```rust
//! use vela_core::prelude::*;
//! ```

pub use crate::Array;
pub use crate::DType;
pub use crate::Dims;
pub use crate::Result;
pub use crate::VelaError;
