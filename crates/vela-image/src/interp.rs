use std::fmt;

use vela_core::{Result, VelaError};

use crate::plane::Plane;

/// Sampling method for geometric transforms.
///
/// Method codes match the engine's interpolation enum: 0 nearest,
/// 1 linear, 2 bilinear. On 2-D planes linear and bilinear sample alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interp {
    #[default]
    Nearest,
    Linear,
    Bilinear,
}

impl Interp {
    /// Decode a boundary method code.
    pub fn from_code(code: u32) -> Result<Self> {
        match code {
            0 => Ok(Interp::Nearest),
            1 => Ok(Interp::Linear),
            2 => Ok(Interp::Bilinear),
            other => Err(VelaError::InvalidArgument(format!(
                "unknown interpolation method {other}"
            ))),
        }
    }

    pub fn code(&self) -> u32 {
        match self {
            Interp::Nearest => 0,
            Interp::Linear => 1,
            Interp::Bilinear => 2,
        }
    }

    /// Sample `plane` at fractional `(x, y)`; 0 outside the plane.
    pub(crate) fn sample(&self, plane: Plane<'_>, x: f32, y: f32) -> f32 {
        match self {
            Interp::Nearest => plane
                .get(x.round() as isize, y.round() as isize)
                .unwrap_or(0.0),
            Interp::Linear | Interp::Bilinear => {
                const EPS: f32 = 1e-4;
                let max_x = (plane.d0 - 1) as f32;
                let max_y = (plane.d1 - 1) as f32;
                if x < -EPS || y < -EPS || x > max_x + EPS || y > max_y + EPS {
                    return 0.0;
                }
                let x = x.clamp(0.0, max_x);
                let y = y.clamp(0.0, max_y);
                let x0 = x.floor() as usize;
                let y0 = y.floor() as usize;
                let x1 = (x0 + 1).min(plane.d0 - 1);
                let y1 = (y0 + 1).min(plane.d1 - 1);
                let tx = x - x0 as f32;
                let ty = y - y0 as f32;
                let top = plane.at(x0, y0) * (1.0 - tx) + plane.at(x1, y0) * tx;
                let bottom = plane.at(x0, y1) * (1.0 - tx) + plane.at(x1, y1) * tx;
                top * (1.0 - ty) + bottom * ty
            }
        }
    }
}

impl fmt::Display for Interp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interp::Nearest => write!(f, "nearest"),
            Interp::Linear => write!(f, "linear"),
            Interp::Bilinear => write!(f, "bilinear"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        for code in 0..3 {
            assert_eq!(Interp::from_code(code).unwrap().code(), code);
        }
        assert!(Interp::from_code(7).is_err());
    }

    #[test]
    fn test_bilinear_midpoint() {
        let data = [0.0, 2.0, 4.0, 6.0];
        let p = Plane { data: &data, d0: 2, d1: 2 };
        assert_eq!(Interp::Bilinear.sample(p, 0.5, 0.5), 3.0);
        assert_eq!(Interp::Bilinear.sample(p, 3.0, 0.0), 0.0);
        assert_eq!(Interp::Nearest.sample(p, 0.9, 0.1), 2.0);
    }
}
