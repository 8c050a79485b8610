//! Geometric resampling: rotation and resizing.
//!
//! Both operate on the image plane (axes 0 and 1) and batch over the
//! remaining axes. Samples that fall outside the input are 0.

use vela_core::{Array, Result, VelaError};

use crate::interp::Interp;
use crate::plane::{map_planes, Plane};

/// Rotate by `theta` radians about the image centre.
///
/// With `crop` the output keeps the input size; otherwise it grows to the
/// bounding box of the rotated image.
pub fn rotate(image: &Array, theta: f32, crop: bool, method: Interp) -> Result<Array> {
    if !theta.is_finite() {
        return Err(VelaError::InvalidArgument(format!("invalid rotation angle {theta}")));
    }
    let [d0, d1, ..] = image.dims().as_array();
    let (c, s) = (theta.cos(), theta.sin());

    let (o0, o1) = if crop {
        (d0, d1)
    } else {
        let w = d0 as f32 * c.abs() + d1 as f32 * s.abs();
        let h = d0 as f32 * s.abs() + d1 as f32 * c.abs();
        // snap before ceil so exact right angles keep their extents
        let snap = |v: f32| ((v * 1e4).round() / 1e4).ceil() as usize;
        (snap(w), snap(h))
    };

    tracing::trace!(input = %image.dims(), o0, o1, theta, crop, %method, "rotate");

    let (icx, icy) = ((d0 as f32 - 1.0) / 2.0, (d1 as f32 - 1.0) / 2.0);
    let (ocx, ocy) = ((o0 as f32 - 1.0) / 2.0, (o1 as f32 - 1.0) / 2.0);

    map_planes(image, o0, o1, |plane: Plane<'_>, out| {
        for y in 0..o1 {
            for x in 0..o0 {
                let dx = x as f32 - ocx;
                let dy = y as f32 - ocy;
                // inverse rotation back into the source plane
                let sx = icx + dx * c + dy * s;
                let sy = icy - dx * s + dy * c;
                out[y * o0 + x] = method.sample(plane, sx, sy);
            }
        }
    })
}

/// Resize both plane axes by the same factor.
pub fn resize_scale(scale: f32, image: &Array, method: Interp) -> Result<Array> {
    resize_xy(scale, scale, image, method)
}

/// Resize axis 0 by `scale0` and axis 1 by `scale1`.
///
/// Output extents are `floor(extent * scale)`.
pub fn resize_xy(scale0: f32, scale1: f32, image: &Array, method: Interp) -> Result<Array> {
    if !(scale0 > 0.0 && scale1 > 0.0 && scale0.is_finite() && scale1.is_finite()) {
        return Err(VelaError::InvalidArgument(format!(
            "resize scales must be positive, got {scale0} x {scale1}"
        )));
    }
    let [d0, d1, ..] = image.dims().as_array();
    let o0 = (d0 as f32 * scale0).floor() as usize;
    let o1 = (d1 as f32 * scale1).floor() as usize;
    resize_to(o0, o1, image, method)
}

/// Resize the image plane to exactly `o0 x o1`.
pub fn resize_to(o0: usize, o1: usize, image: &Array, method: Interp) -> Result<Array> {
    if o0 == 0 || o1 == 0 {
        return Err(VelaError::InvalidArgument(format!(
            "resize target must be non-empty, got {o0} x {o1}"
        )));
    }
    let [d0, d1, ..] = image.dims().as_array();
    tracing::trace!(input = %image.dims(), o0, o1, %method, "resize");

    let r0 = d0 as f32 / o0 as f32;
    let r1 = d1 as f32 / o1 as f32;

    map_planes(image, o0, o1, |plane: Plane<'_>, out| {
        for y in 0..o1 {
            for x in 0..o0 {
                out[y * o0 + x] = match method {
                    Interp::Nearest => {
                        let sx = ((x as f32 * r0) as usize).min(d0 - 1);
                        let sy = ((y as f32 * r1) as usize).min(d1 - 1);
                        plane.at(sx, sy)
                    }
                    Interp::Linear | Interp::Bilinear => {
                        let sx = (x as f32 * r0).min((d0 - 1) as f32);
                        let sy = (y as f32 * r1).min((d1 - 1) as f32);
                        method.sample(plane, sx, sy)
                    }
                };
            }
        }
    })
}
