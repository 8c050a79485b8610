//! Filter kernel construction.

use vela_core::{Array, Dims, Result, VelaError};

/// Gaussian taps for one axis, unnormalised.
fn gaussian_1d(n: usize, sigma: f64) -> Vec<f64> {
    let sigma = if sigma > 0.0 { sigma } else { 0.25 * n as f64 + 0.75 };
    let center = (n as f64 - 1.0) / 2.0;
    (0..n)
        .map(|i| {
            let x = i as f64 - center;
            (-(x * x) / (2.0 * sigma * sigma)).exp()
        })
        .collect()
}

/// Build a `rows x cols` gaussian kernel normalised to sum 1.
///
/// A sigma of zero or less selects `0.25 * n + 0.75` for that axis.
/// `cols == 0` yields a 1-D kernel of `rows` taps.
pub fn gaussian_kernel(rows: usize, cols: usize, sigma_r: f64, sigma_c: f64) -> Result<Array> {
    if rows == 0 {
        return Err(VelaError::InvalidArgument(
            "gaussian kernel needs at least one row".into(),
        ));
    }
    let cols = cols.max(1);
    let gr = gaussian_1d(rows, sigma_r);
    let gc = if cols == 1 { vec![1.0] } else { gaussian_1d(cols, sigma_c) };

    let mut data = Vec::with_capacity(rows * cols);
    for &c in &gc {
        for &r in &gr {
            data.push(r * c);
        }
    }
    let total: f64 = data.iter().sum();
    let data: Vec<f32> = data.iter().map(|&v| (v / total) as f32).collect();

    Array::from_vec(data, Dims::from_slice(&[rows, cols]))
}
