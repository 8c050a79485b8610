//! Element-wise arithmetic between arrays and between an array and a scalar.

use crate::array::Array;
use crate::dims::{Dims, MAX_AXES};
use crate::dtype::DType;
use crate::error::VelaError;
use crate::storage;
use crate::Result;

impl Array {
    /// Element-wise addition with broadcasting.
    pub fn add(&self, other: &Array) -> Result<Array> {
        binary_op(self, other, DType::F32, |a, b| a + b)
    }

    /// Element-wise subtraction with broadcasting.
    pub fn sub(&self, other: &Array) -> Result<Array> {
        binary_op(self, other, DType::F32, |a, b| a - b)
    }

    /// Element-wise multiplication with broadcasting.
    pub fn mul(&self, other: &Array) -> Result<Array> {
        binary_op(self, other, DType::F32, |a, b| a * b)
    }

    /// Element-wise division with broadcasting.
    pub fn div(&self, other: &Array) -> Result<Array> {
        binary_op(self, other, DType::F32, |a, b| a / b)
    }

    /// self + scalar.
    pub fn add_scalar(&self, s: f32) -> Array {
        unary_op(self, DType::F32, |a| a + s)
    }

    /// self - scalar.
    pub fn sub_scalar(&self, s: f32) -> Array {
        unary_op(self, DType::F32, |a| a - s)
    }

    /// self * scalar.
    pub fn mul_scalar(&self, s: f32) -> Array {
        unary_op(self, DType::F32, |a| a * s)
    }

    /// self / scalar.
    pub fn div_scalar(&self, s: f32) -> Array {
        unary_op(self, DType::F32, |a| a / s)
    }

    /// scalar - self.
    pub fn scalar_sub(&self, s: f32) -> Array {
        unary_op(self, DType::F32, |a| s - a)
    }

    /// scalar / self.
    pub fn scalar_div(&self, s: f32) -> Array {
        unary_op(self, DType::F32, |a| s / a)
    }

    /// self ^ exponent.
    pub fn pow_scalar(&self, exponent: f32) -> Array {
        unary_op(self, DType::F32, |a| a.powf(exponent))
    }
}

/// Apply `op` to every element, tagging the result with `dtype`.
pub(crate) fn unary_op(a: &Array, dtype: DType, op: impl Fn(f32) -> f32) -> Array {
    let data: Vec<f32> = a.as_slice().iter().map(|&v| op(v)).collect();
    Array::with_dtype(data, a.dims(), dtype)
}

/// Apply `op` pairwise with axis-wise broadcasting, tagging the result with `dtype`.
pub(crate) fn binary_op(
    a: &Array,
    b: &Array,
    dtype: DType,
    op: impl Fn(f32, f32) -> f32,
) -> Result<Array> {
    let out_dims = a
        .dims()
        .broadcast_with(&b.dims())
        .ok_or(VelaError::DimsMismatch {
            lhs: a.dims(),
            rhs: b.dims(),
        })?;

    let a_data = a.as_slice();
    let b_data = b.as_slice();

    // Fast path: identical dims
    if a.dims() == b.dims() {
        let data = a_data
            .iter()
            .zip(b_data.iter())
            .map(|(&x, &y)| op(x, y))
            .collect();
        return Ok(Array::with_dtype(data, out_dims, dtype));
    }

    let mut data = storage::for_dims(0.0, out_dims)?;
    for (i, slot) in data.iter_mut().enumerate() {
        let ai = broadcast_index(i, &out_dims, &a.dims());
        let bi = broadcast_index(i, &out_dims, &b.dims());
        *slot = op(a_data[ai], b_data[bi]);
    }
    Ok(Array::with_dtype(data, out_dims, dtype))
}

/// Map a flat index in the broadcast output to the source's flat index.
fn broadcast_index(flat: usize, out: &Dims, src: &Dims) -> usize {
    let out_ext = out.as_array();
    let src_ext = src.as_array();
    let src_strides = src.strides();

    let mut remaining = flat;
    let mut idx = 0;
    for axis in 0..MAX_AXES {
        let coord = remaining % out_ext[axis];
        remaining /= out_ext[axis];
        // unit axis is broadcast: coordinate collapses to 0
        if src_ext[axis] > 1 {
            idx += coord * src_strides[axis];
        }
    }
    idx
}
