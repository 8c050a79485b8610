//! Value histograms.

use vela_core::{storage, Array, Dims, Result, VelaError};

/// Histogram over the array's own value range.
///
/// An empty array yields `nbins` zero counts.
pub fn histogram(input: &Array, nbins: usize) -> Result<Array> {
    if input.is_empty() {
        return histogram_range(input, nbins, 0.0, 1.0);
    }
    let (min, max) = finite_range(input.as_slice());
    histogram_range(input, nbins, min, max)
}

/// Histogram of `nbins` equal bins spanning `[min, max]`.
///
/// Bin index is `floor((v - min) * nbins / (max - min))`, clamped into
/// `0..nbins`, so out-of-range values land in the first or last bin.
/// NaNs are not counted. The result is an `nbins x 1` array of counts.
pub fn histogram_range(input: &Array, nbins: usize, min: f32, max: f32) -> Result<Array> {
    if nbins == 0 {
        return Err(VelaError::InvalidArgument("histogram needs at least one bin".into()));
    }
    if !(min.is_finite() && max.is_finite()) || max < min {
        return Err(VelaError::InvalidArgument(format!(
            "invalid histogram range [{min}, {max}]"
        )));
    }

    let mut counts = storage::filled(0.0, nbins)?;
    let span = max - min;
    let last = (nbins - 1) as isize;
    for &v in input.as_slice() {
        if v.is_nan() {
            continue;
        }
        let bin = if span > 0.0 {
            (((v - min) * nbins as f32 / span).floor() as isize).clamp(0, last)
        } else {
            0
        };
        counts[bin as usize] += 1.0;
    }

    Array::from_vec(counts, Dims::from_slice(&[nbins, 1]))
}

fn finite_range(data: &[f32]) -> (f32, f32) {
    let mut lo = f32::INFINITY;
    let mut hi = f32::NEG_INFINITY;
    for &v in data.iter().filter(|v| v.is_finite()) {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if lo > hi {
        (0.0, 0.0)
    } else {
        (lo, hi)
    }
}
