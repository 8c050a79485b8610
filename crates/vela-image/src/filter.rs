//! Neighbourhood filters: median, bilateral, mean-shift.

use std::ops::Range;

use smallvec::SmallVec;

use vela_core::{Array, Result, VelaError};

use crate::plane::{map_planes, Plane};

/// Window radius shared by the bilateral and mean-shift filters.
///
/// Never wider than the larger plane extent, so a huge sigma still walks a
/// bounded window.
fn spatial_radius(spatial_sigma: f32, d0: usize, d1: usize) -> isize {
    let cap = d0.max(d1).max(1) as f32;
    (1.5 * spatial_sigma).round().clamp(1.0, cap) as isize
}

/// In-plane part of a window of `width` samples starting `half` before `at`.
fn window_span(at: usize, half: isize, width: isize, extent: usize) -> Range<isize> {
    let start = at as isize - half;
    start.max(0)..start.saturating_add(width).min(extent as isize)
}

fn require_positive(name: &str, v: f32) -> Result<()> {
    if v > 0.0 && v.is_finite() {
        Ok(())
    } else {
        Err(VelaError::InvalidArgument(format!("{name} must be positive, got {v}")))
    }
}

/// Median over a `wind_length x wind_width` window with zero padding.
///
/// For even window sizes the upper median (index `n / 2`) is taken.
/// Only in-plane samples are gathered; the padding zeros are counted, so
/// the window may be far larger than the image.
pub fn medfilt(image: &Array, wind_length: usize, wind_width: usize) -> Result<Array> {
    if wind_length == 0 || wind_width == 0 {
        return Err(VelaError::InvalidArgument(format!(
            "median window must be positive, got {wind_length}x{wind_width}"
        )));
    }
    let too_large = || {
        VelaError::InvalidArgument(format!("median window {wind_length}x{wind_width} is too large"))
    };
    let window_len = wind_length.checked_mul(wind_width).ok_or_else(too_large)?;
    let w0 = isize::try_from(wind_length).map_err(|_| too_large())?;
    let w1 = isize::try_from(wind_width).map_err(|_| too_large())?;
    let (h0, h1) = (w0 / 2, w1 / 2);
    let [d0, d1, ..] = image.dims().as_array();
    let rank = window_len / 2;

    map_planes(image, d0, d1, |plane: Plane<'_>, out| {
        let mut window: SmallVec<[f32; 64]> =
            SmallVec::with_capacity(wind_length.min(d0) * wind_width.min(d1));
        for y in 0..d1 {
            let ys = window_span(y, h1, w1, d1);
            for x in 0..d0 {
                let xs = window_span(x, h0, w0, d0);
                window.clear();
                for sy in ys.clone() {
                    for sx in xs.clone() {
                        window.push(plane.at(sx as usize, sy as usize));
                    }
                }
                window.sort_unstable_by(|p, q| p.total_cmp(q));

                // padding zeros sit between the negative and non-negative samples
                let pad = window_len - window.len();
                let neg = window.partition_point(|v| v.total_cmp(&0.0).is_lt());
                out[y * d0 + x] = if rank < neg {
                    window[rank]
                } else if rank < neg + pad {
                    0.0
                } else {
                    window[rank - pad]
                };
            }
        }
    })
}

/// Edge-preserving smoothing.
///
/// Each output is the weighted mean of its neighbourhood, weighted by a
/// spatial gaussian (`spatial_sigma`) times a range gaussian on the value
/// difference (`chromatic_sigma`). Samples beyond the border are clamped.
pub fn bilateral(image: &Array, spatial_sigma: f32, chromatic_sigma: f32) -> Result<Array> {
    require_positive("spatial sigma", spatial_sigma)?;
    require_positive("chromatic sigma", chromatic_sigma)?;

    let [d0, d1, ..] = image.dims().as_array();
    let radius = spatial_radius(spatial_sigma, d0, d1);
    let inv_s = 1.0 / (2.0 * spatial_sigma * spatial_sigma);
    let inv_c = 1.0 / (2.0 * chromatic_sigma * chromatic_sigma);

    map_planes(image, d0, d1, |plane: Plane<'_>, out| {
        for y in 0..d1 {
            for x in 0..d0 {
                let center = plane.at(x, y);
                let mut num = 0.0f32;
                let mut den = 0.0f32;
                for dy in -radius..=radius {
                    for dx in -radius..=radius {
                        let v = plane.get_clamped(x as isize + dx, y as isize + dy);
                        let dist2 = (dx * dx + dy * dy) as f32;
                        let diff = v - center;
                        let w = (-dist2 * inv_s).exp() * (-(diff * diff) * inv_c).exp();
                        num += w * v;
                        den += w;
                    }
                }
                out[y * d0 + x] = if den > 0.0 { num / den } else { center };
            }
        }
    })
}

/// Mean-shift smoothing on intensity.
///
/// Every pixel starts at its own position and value. Each iteration moves
/// it to the mean position and mean value of the window neighbours whose
/// squared value distance is within `chromatic_sigma²`. Iteration stops
/// early once the move is under one pixel and 1e-3 in value.
pub fn meanshift(
    image: &Array,
    spatial_sigma: f32,
    chromatic_sigma: f32,
    iterations: u32,
) -> Result<Array> {
    require_positive("spatial sigma", spatial_sigma)?;
    require_positive("chromatic sigma", chromatic_sigma)?;

    let [d0, d1, ..] = image.dims().as_array();
    let radius = spatial_radius(spatial_sigma, d0, d1);
    let color_limit = chromatic_sigma * chromatic_sigma;

    map_planes(image, d0, d1, |plane: Plane<'_>, out| {
        for y in 0..d1 {
            for x in 0..d0 {
                let (mut cx, mut cy) = (x as f32, y as f32);
                let mut cv = plane.at(x, y);

                for _ in 0..iterations {
                    let (px, py) = (cx.round() as isize, cy.round() as isize);
                    let (mut sx, mut sy, mut sv) = (0.0f32, 0.0f32, 0.0f32);
                    let mut count = 0u32;

                    for ny in (py - radius)..=(py + radius) {
                        for nx in (px - radius)..=(px + radius) {
                            let Some(v) = plane.get(nx, ny) else { continue };
                            let d = v - cv;
                            if d * d <= color_limit {
                                sx += nx as f32;
                                sy += ny as f32;
                                sv += v;
                                count += 1;
                            }
                        }
                    }
                    if count == 0 {
                        break;
                    }

                    let n = count as f32;
                    let (mx, my, mv) = (sx / n, sy / n, sv / n);
                    let shift = (mx - cx) * (mx - cx) + (my - cy) * (my - cy);
                    let dv = (mv - cv).abs();
                    cx = mx;
                    cy = my;
                    cv = mv;
                    if shift < 1.0 && dv < 1e-3 {
                        break;
                    }
                }
                out[y * d0 + x] = cv;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn impulse() -> Array {
        let mut data = vec![1.0f32; 25];
        data[12] = 100.0;
        Array::from_host(&data, [5, 5].into()).unwrap()
    }

    #[test]
    fn test_medfilt_removes_impulse() {
        let out = medfilt(&impulse(), 3, 3).unwrap();
        assert_eq!(out.get([2, 2, 0, 0]), Some(1.0));
    }

    #[test]
    fn test_medfilt_zero_padding_at_corner() {
        let img = Array::constant(1.0, [5, 5].into()).unwrap();
        let out = medfilt(&img, 3, 3).unwrap();
        // corner window: 4 ones and 5 zeros
        assert_eq!(out.get([0, 0, 0, 0]), Some(0.0));
        assert_eq!(out.get([0, 2, 0, 0]), Some(1.0));
    }

    #[test]
    fn test_medfilt_rejects_empty_window() {
        assert!(medfilt(&impulse(), 0, 3).is_err());
        assert!(medfilt(&impulse(), usize::MAX, 2).is_err());
    }

    #[test]
    fn test_medfilt_padding_with_negative_samples() {
        let img = Array::constant(-1.0, [3, 3].into()).unwrap();
        let out = medfilt(&img, 3, 3).unwrap();
        // corner: four -1 and five padding zeros
        assert_eq!(out.get([0, 0, 0, 0]), Some(0.0));
        assert_eq!(out.get([1, 1, 0, 0]), Some(-1.0));
        // 5x1 at the edge: three -1 and two zeros
        let out = medfilt(&img, 5, 1).unwrap();
        assert_eq!(out.get([0, 1, 0, 0]), Some(-1.0));
    }

    #[test]
    fn test_medfilt_window_larger_than_image() {
        let out = medfilt(&impulse(), 1 << 20, 1 << 20).unwrap();
        assert!(out.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_huge_spatial_sigma_is_bounded() {
        assert_eq!(spatial_radius(1e30, 6, 4), 6);
        assert_eq!(spatial_radius(f32::MAX, 0, 0), 1);
        assert_eq!(spatial_radius(2.0, 6, 4), 3);

        let img = Array::constant(4.0, [6, 4].into()).unwrap();
        let b = bilateral(&img, 1e30, 0.5).unwrap();
        assert!(b.as_slice().iter().all(|&v| (v - 4.0).abs() < 1e-5));
        let m = meanshift(&img, 1e30, 0.5, 3).unwrap();
        assert!(m.as_slice().iter().all(|&v| (v - 4.0).abs() < 1e-5));
    }

    #[test]
    fn test_bilateral_constant_is_fixed_point() {
        let img = Array::constant(4.0, [6, 6, 2].into()).unwrap();
        let out = bilateral(&img, 2.0, 0.5).unwrap();
        assert!(out.as_slice().iter().all(|&v| (v - 4.0).abs() < 1e-5));
    }

    #[test]
    fn test_bilateral_preserves_edges() {
        // left half 0, right half 10
        let mut data = vec![0.0f32; 64];
        for y in 4..8 {
            for x in 0..8 {
                data[y * 8 + x] = 10.0;
            }
        }
        let img = Array::from_host(&data, [8, 8].into()).unwrap();
        let out = bilateral(&img, 1.0, 0.1).unwrap();
        assert!(out.get([3, 3, 0, 0]).unwrap() < 0.01);
        assert!(out.get([3, 4, 0, 0]).unwrap() > 9.99);
    }

    #[test]
    fn test_bilateral_rejects_bad_sigma() {
        assert!(bilateral(&impulse(), 0.0, 1.0).is_err());
        assert!(bilateral(&impulse(), 1.0, -2.0).is_err());
    }

    #[test]
    fn test_meanshift_zero_iterations_is_identity() {
        let img = impulse();
        let out = meanshift(&img, 1.0, 1.0, 0).unwrap();
        assert_eq!(out.as_slice(), img.as_slice());
    }

    #[test]
    fn test_meanshift_flattens_small_noise() {
        let data: Vec<f32> = (0..36).map(|i| if i % 2 == 0 { 5.0 } else { 5.2 }).collect();
        let img = Array::from_host(&data, [6, 6].into()).unwrap();
        let out = meanshift(&img, 2.0, 1.0, 5).unwrap();
        let first = out.as_slice()[14];
        assert!((first - 5.1).abs() < 0.1);
        assert!(out.as_slice().iter().all(|&v| v > 4.9 && v < 5.3));
    }

    #[test]
    fn test_meanshift_keeps_distinct_regions() {
        let out = meanshift(&impulse(), 1.0, 1.0, 3).unwrap();
        assert_eq!(out.get([2, 2, 0, 0]), Some(100.0));
        assert_eq!(out.get([0, 0, 0, 0]), Some(1.0));
    }
}
