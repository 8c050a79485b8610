use std::fmt;

use crate::dims::{Dims, MAX_AXES};
use crate::dtype::DType;
use crate::error::VelaError;
use crate::storage;
use crate::Result;

/// A dense column-major array of up to four axes.
///
/// Values are stored as `f32` regardless of dtype; a `B8` array holds only
/// `0.0` and `1.0`. Arrays are immutable once built except through
/// [`Array::set_slice`], which the caller applies to an owned value.
///
/// # Examples
///
/// ```
/// use vela_core::{Array, Dims};
///
/// let a = Array::from_host(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], [3, 2].into()).unwrap();
/// assert_eq!(a.dims().as_array(), [3, 2, 1, 1]);
/// // column-major: element (row 1, col 1) is the fifth sample
/// assert_eq!(a.get([1, 1, 0, 0]), Some(5.0));
/// ```
#[derive(Clone, PartialEq)]
pub struct Array {
    data: Vec<f32>,
    dims: Dims,
    dtype: DType,
}

impl Array {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Array filled with `value`.
    ///
    /// Fails if the element count overflows or the buffer cannot be
    /// allocated.
    pub fn constant(value: f32, dims: Dims) -> Result<Self> {
        Ok(Self {
            data: storage::for_dims(value, dims)?,
            dims,
            dtype: DType::F32,
        })
    }

    /// Zero-filled `F32` array.
    pub fn zeros(dims: Dims) -> Result<Self> {
        Self::constant(0.0, dims)
    }

    /// Copy host data (column-major) into a new `F32` array.
    pub fn from_host(data: &[f32], dims: Dims) -> Result<Self> {
        check_count(dims, data.len())?;
        Self::from_vec(storage::copied(data)?, dims)
    }

    /// Take ownership of column-major data.
    pub fn from_vec(data: Vec<f32>, dims: Dims) -> Result<Self> {
        check_count(dims, data.len())?;
        Ok(Self {
            data,
            dims,
            dtype: DType::F32,
        })
    }

    /// Build a `B8` array from booleans.
    pub fn from_bool(values: &[bool], dims: Dims) -> Result<Self> {
        let data = values.iter().map(|&b| if b { 1.0 } else { 0.0 }).collect();
        let mut out = Self::from_vec(data, dims)?;
        out.dtype = DType::B8;
        Ok(out)
    }

    pub(crate) fn with_dtype(data: Vec<f32>, dims: Dims, dtype: DType) -> Self {
        debug_assert_eq!(data.len(), dims.elements());
        Self { data, dims, dtype }
    }

    // =========================================================================
    // Properties
    // =========================================================================

    pub fn dims(&self) -> Dims {
        self.dims
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// Total number of elements.
    pub fn elements(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    // =========================================================================
    // Data access
    // =========================================================================

    /// Borrow the column-major samples.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Fresh copy of every element in column-major order.
    pub fn host(&self) -> Result<Vec<f32>> {
        storage::copied(&self.data)
    }

    /// Copy every element into `out`, which must hold at least
    /// [`Array::elements`] values. Returns the number written.
    pub fn host_into(&self, out: &mut [f32]) -> Result<usize> {
        let n = self.data.len();
        if out.len() < n {
            return Err(VelaError::InvalidArgument(format!(
                "host buffer holds {} elements, array has {}",
                out.len(),
                n
            )));
        }
        out[..n].copy_from_slice(&self.data);
        Ok(n)
    }

    /// Element at a 4-axis coordinate.
    pub fn get(&self, coord: [usize; MAX_AXES]) -> Option<f32> {
        let extents = self.dims.as_array();
        if coord.iter().zip(extents.iter()).any(|(c, e)| c >= e) {
            return None;
        }
        self.data.get(self.dims.offset(coord)).copied()
    }

    /// Convert to another dtype. Casting to `B8` maps non-zero to `1.0`.
    pub fn cast(&self, dtype: DType) -> Array {
        if self.dtype == dtype {
            return self.clone();
        }
        let data = match dtype {
            DType::F32 => self.data.clone(),
            DType::B8 => self
                .data
                .iter()
                .map(|&v| if v != 0.0 { 1.0 } else { 0.0 })
                .collect(),
        };
        Array::with_dtype(data, self.dims, dtype)
    }

    /// Shorthand for `cast(DType::F32)`.
    pub fn as_f32(&self) -> Array {
        self.cast(DType::F32)
    }

    /// Fill every element whose axis-2 index is `index` with `value`.
    ///
    /// This is the `a(span, span, index) = value` assignment of the engine.
    pub fn set_slice(&mut self, index: usize, value: f32) -> Result<()> {
        let [d0, d1, d2, d3] = self.dims.as_array();
        if index >= d2 {
            return Err(VelaError::InvalidArgument(format!(
                "axis-2 index {} out of range for {}",
                index, self.dims
            )));
        }
        let plane = d0 * d1;
        for l in 0..d3 {
            let start = (l * d2 + index) * plane;
            self.data[start..start + plane].fill(value);
        }
        Ok(())
    }
}

fn check_count(dims: Dims, got: usize) -> Result<()> {
    let expected = dims
        .checked_elements()
        .ok_or(VelaError::ElementCountOverflow(dims))?;
    if got != expected {
        return Err(VelaError::ElementCountMismatch { dims, expected, got });
    }
    Ok(())
}

impl fmt::Debug for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Array(dims={}, dtype={})", self.dims, self.dtype)
    }
}

impl fmt::Display for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.data.len();
        if n <= 16 {
            write!(f, "array({:?}, dims={})", self.data, self.dims)
        } else {
            write!(
                f,
                "array([{:.4}, {:.4}, ..., {:.4}], dims={})",
                self.data[0],
                self.data[1],
                self.data[n - 1],
                self.dims
            )
        }
    }
}
