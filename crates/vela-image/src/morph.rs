//! Morphological erosion and dilation with an arbitrary 2-D mask.

use vela_core::{Array, Result, VelaError};

use crate::plane::{map_planes, Plane};

/// Minimum over the masked neighbourhood of each pixel.
pub fn erode(image: &Array, mask: &Array) -> Result<Array> {
    morph(image, mask, f32::INFINITY, f32::min)
}

/// Maximum over the masked neighbourhood of each pixel.
pub fn dilate(image: &Array, mask: &Array) -> Result<Array> {
    morph(image, mask, f32::NEG_INFINITY, f32::max)
}

fn morph(image: &Array, mask: &Array, init: f32, pick: fn(f32, f32) -> f32) -> Result<Array> {
    let [m0, m1, m2, m3] = mask.dims().as_array();
    if m2 != 1 || m3 != 1 || mask.is_empty() {
        return Err(VelaError::InvalidArgument(format!(
            "morphology mask must be a non-empty 2-D array, got {}",
            mask.dims()
        )));
    }

    // Offsets of the active mask taps relative to the anchor.
    let (h0, h1) = ((m0 / 2) as isize, (m1 / 2) as isize);
    let taps: Vec<(isize, isize)> = (0..m1)
        .flat_map(|b| (0..m0).map(move |a| (a, b)))
        .filter(|&(a, b)| mask.as_slice()[b * m0 + a] != 0.0)
        .map(|(a, b)| (a as isize - h0, b as isize - h1))
        .collect();

    let [d0, d1, ..] = image.dims().as_array();
    map_planes(image, d0, d1, |plane: Plane<'_>, out| {
        for y in 0..d1 {
            for x in 0..d0 {
                let mut acc = init;
                let mut hit = false;
                for &(dx, dy) in &taps {
                    if let Some(v) = plane.get(x as isize + dx, y as isize + dy) {
                        acc = pick(acc, v);
                        hit = true;
                    }
                }
                out[y * d0 + x] = if hit { acc } else { plane.at(x, y) };
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spot() -> Array {
        // 5x5 zeros with a single 1 in the centre
        let mut data = vec![0.0f32; 25];
        data[12] = 1.0;
        Array::from_host(&data, [5, 5].into()).unwrap()
    }

    #[test]
    fn test_dilate_grows_spot() {
        let mask = Array::constant(1.0, [3, 3].into()).unwrap();
        let out = dilate(&spot(), &mask).unwrap();
        assert_eq!(out.sum(), 9.0);
        assert_eq!(out.get([1, 1, 0, 0]), Some(1.0));
        assert_eq!(out.get([0, 0, 0, 0]), Some(0.0));
    }

    #[test]
    fn test_erode_removes_spot() {
        let mask = Array::constant(1.0, [3, 3].into()).unwrap();
        let out = erode(&spot(), &mask).unwrap();
        assert_eq!(out.sum(), 0.0);
    }

    #[test]
    fn test_cross_mask() {
        let mask = Array::from_host(
            &[0.0, 1.0, 0.0, 1.0, 1.0, 1.0, 0.0, 1.0, 0.0],
            [3, 3].into(),
        )
        .unwrap();
        let out = dilate(&spot(), &mask).unwrap();
        assert_eq!(out.sum(), 5.0);
        assert_eq!(out.get([1, 1, 0, 0]), Some(0.0));
    }

    #[test]
    fn test_erode_border_ignores_outside() {
        let img = Array::constant(3.0, [4, 4].into()).unwrap();
        let mask = Array::constant(1.0, [3, 3].into()).unwrap();
        let out = erode(&img, &mask).unwrap();
        assert!(out.as_slice().iter().all(|&v| v == 3.0));
    }

    #[test]
    fn test_3d_mask_rejected() {
        let mask = Array::constant(1.0, [3, 3, 2].into()).unwrap();
        assert!(erode(&spot(), &mask).is_err());
    }
}
