//! Per-plane iteration shared by the 2-D image operations.
//!
//! An image array `[d0, d1, d2, d3]` is `d2 * d3` contiguous planes of
//! `d0 * d1` samples. Planes are processed independently and in parallel.

use rayon::prelude::*;

use vela_core::{storage, Array, DType, Dims, Result, VelaError};

/// Read-only view of one image plane.
#[derive(Clone, Copy)]
pub(crate) struct Plane<'a> {
    pub data: &'a [f32],
    pub d0: usize,
    pub d1: usize,
}

impl<'a> Plane<'a> {
    /// Sample at `(x, y)`, or `None` outside the plane.
    #[inline]
    pub fn get(&self, x: isize, y: isize) -> Option<f32> {
        if x < 0 || y < 0 || x as usize >= self.d0 || y as usize >= self.d1 {
            return None;
        }
        Some(self.data[y as usize * self.d0 + x as usize])
    }

    /// Sample at `(x, y)` with coordinates clamped into the plane.
    #[inline]
    pub fn get_clamped(&self, x: isize, y: isize) -> f32 {
        let x = x.clamp(0, self.d0 as isize - 1) as usize;
        let y = y.clamp(0, self.d1 as isize - 1) as usize;
        self.data[y * self.d0 + x]
    }

    #[inline]
    pub fn at(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.d0 + x]
    }
}

/// Run `f` over every plane of `input`, producing planes of `out_d0 x out_d1`.
///
/// `f` receives the input plane and a zeroed output plane in column-major
/// order (`out[y * out_d0 + x]`).
pub(crate) fn map_planes<F>(input: &Array, out_d0: usize, out_d1: usize, f: F) -> Result<Array>
where
    F: Fn(Plane<'_>, &mut [f32]) + Sync,
{
    let src = if input.dtype() == DType::F32 {
        None
    } else {
        Some(input.as_f32())
    };
    let src = src.as_ref().unwrap_or(input);

    let [d0, d1, d2, d3] = src.dims().as_array();
    let out_dims = Dims::new([out_d0, out_d1, d2, d3]);
    let in_plane = d0 * d1;
    let out_plane = out_d0
        .checked_mul(out_d1)
        .ok_or(VelaError::ElementCountOverflow(out_dims))?;
    let mut out = storage::for_dims(0.0, out_dims)?;

    if in_plane > 0 && out_plane > 0 {
        out.par_chunks_mut(out_plane)
            .zip(src.as_slice().par_chunks(in_plane))
            .for_each(|(dst, data)| f(Plane { data, d0, d1 }, dst));
    }

    Array::from_vec(out, out_dims)
}
