//! Fallible element buffers.
//!
//! Every buffer sized from caller-supplied dims goes through here so a
//! request the allocator cannot satisfy comes back as an error instead of
//! aborting the process.

use crate::dims::Dims;
use crate::error::VelaError;
use crate::Result;

/// A buffer of `len` copies of `value`.
pub fn filled(value: f32, len: usize) -> Result<Vec<f32>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| VelaError::AllocationFailed { elements: len })?;
    buf.resize(len, value);
    Ok(buf)
}

/// A buffer holding one `value` per element of `dims`.
pub fn for_dims(value: f32, dims: Dims) -> Result<Vec<f32>> {
    let len = dims
        .checked_elements()
        .ok_or(VelaError::ElementCountOverflow(dims))?;
    filled(value, len)
}

/// An owned copy of `src`.
pub fn copied(src: &[f32]) -> Result<Vec<f32>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(src.len())
        .map_err(|_| VelaError::AllocationFailed { elements: src.len() })?;
    buf.extend_from_slice(src);
    Ok(buf)
}
