use std::fmt;

use crate::error::VelaError;
use crate::Result;

/// Number of axes every array carries internally.
pub const MAX_AXES: usize = 4;

/// Extents of an array along its four axes.
///
/// Axis 0 varies fastest in memory (column-major). Unused trailing axes
/// have extent 1, so a 5x3 matrix is `[5, 3, 1, 1]`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dims {
    extents: [usize; MAX_AXES],
}

impl Dims {
    /// Create dims from all four extents.
    pub fn new(extents: [usize; MAX_AXES]) -> Self {
        Self { extents }
    }

    /// Create dims from up to four extents; missing axes become 1.
    ///
    /// Extents past the fourth are ignored.
    pub fn from_slice(extents: &[usize]) -> Self {
        let mut out = [1usize; MAX_AXES];
        for (slot, &e) in out.iter_mut().zip(extents.iter()) {
            *slot = e;
        }
        Self { extents: out }
    }

    /// Convert signed caller-supplied extents.
    ///
    /// Rejects negative extents and extents whose element count does not
    /// fit in `usize`.
    pub fn from_signed(extents: &[i64]) -> Result<Self> {
        let mut out = [1usize; MAX_AXES];
        for (slot, &e) in out.iter_mut().zip(extents.iter()) {
            *slot = usize::try_from(e).map_err(|_| VelaError::InvalidDims(extents.to_vec()))?;
        }
        let dims = Self { extents: out };
        if dims.checked_elements().is_none() {
            return Err(VelaError::InvalidDims(extents.to_vec()));
        }
        Ok(dims)
    }

    /// Total number of elements.
    ///
    /// Callers building dims from untrusted extents go through
    /// [`Dims::from_signed`] or [`Dims::checked_elements`] first.
    pub fn elements(&self) -> usize {
        self.extents.iter().product()
    }

    /// Total number of elements, `None` if the product overflows.
    pub fn checked_elements(&self) -> Option<usize> {
        if self.extents.contains(&0) {
            return Some(0);
        }
        self.extents
            .iter()
            .try_fold(1usize, |acc, &e| acc.checked_mul(e))
    }

    /// Extent of a single axis, `None` past the last axis.
    pub fn get(&self, axis: usize) -> Option<usize> {
        self.extents.get(axis).copied()
    }

    /// All four extents.
    pub fn as_array(&self) -> [usize; MAX_AXES] {
        self.extents
    }

    /// Number of meaningful axes: index of the last non-unit axis plus one.
    ///
    /// An all-unit array (a single element) reports 1.
    pub fn ndims(&self) -> usize {
        self.extents
            .iter()
            .rposition(|&e| e != 1)
            .map(|i| i + 1)
            .unwrap_or(1)
    }

    /// Column-major strides in elements.
    pub fn strides(&self) -> [usize; MAX_AXES] {
        let mut strides = [1usize; MAX_AXES];
        for i in 1..MAX_AXES {
            strides[i] = strides[i - 1] * self.extents[i - 1];
        }
        strides
    }

    /// Flat column-major offset of a 4-axis coordinate.
    pub fn offset(&self, coord: [usize; MAX_AXES]) -> usize {
        let strides = self.strides();
        coord.iter().zip(strides.iter()).map(|(c, s)| c * s).sum()
    }

    /// Axis-wise broadcast: extents must match or one of them must be 1.
    ///
    /// Returns `None` if any axis is incompatible.
    pub fn broadcast_with(&self, other: &Dims) -> Option<Dims> {
        let mut out = [1usize; MAX_AXES];
        for i in 0..MAX_AXES {
            let a = self.extents[i];
            let b = other.extents[i];
            out[i] = if a == b {
                a
            } else if a == 1 {
                b
            } else if b == 1 {
                a
            } else {
                return None;
            };
        }
        Some(Dims { extents: out })
    }
}

impl fmt::Debug for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dims({:?})", self.extents)
    }
}

impl fmt::Display for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let e = &self.extents;
        write!(f, "[{} {} {} {}]", e[0], e[1], e[2], e[3])
    }
}

impl From<[usize; MAX_AXES]> for Dims {
    fn from(extents: [usize; MAX_AXES]) -> Self {
        Dims::new(extents)
    }
}

macro_rules! impl_dims_from_array {
    ($($n:expr),*) => {
        $(
            impl From<[usize; $n]> for Dims {
                fn from(extents: [usize; $n]) -> Self {
                    Dims::from_slice(&extents)
                }
            }
        )*
    };
}

impl_dims_from_array!(1, 2, 3);
