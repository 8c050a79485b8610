//! Example composition: gaussian blur of an interleaved RGBA-like image.

use vela_core::{Array, Dims, Result, VelaError};

use crate::convolve::convolve;
use crate::kernel::gaussian_kernel;
use crate::pixel::{convert_float2uchar, convert_uchar2float, ALPHA_CHANNEL};

/// Side of the square gaussian used by [`blur_logic`].
pub const BLUR_KERNEL_SIZE: usize = 5;

/// Layout of an interleaved 8-bit image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
}

impl ImageInfo {
    pub fn pixels(&self) -> usize {
        self.width * self.height
    }

    pub fn bytes(&self) -> usize {
        self.pixels() * self.channels
    }
}

/// Blur `buf_in` into `buf_out`.
///
/// Converts to planar floats, convolves every channel with a 5x5 gaussian,
/// forces the alpha channel fully opaque, and converts back. Needs at least
/// four channels.
pub fn blur_logic(buf_in: &[u8], buf_out: &mut [u8], info: ImageInfo) -> Result<()> {
    if info.channels <= ALPHA_CHANNEL {
        return Err(VelaError::InvalidArgument(format!(
            "blur needs an alpha channel, got {} channels",
            info.channels
        )));
    }
    if buf_out.len() < info.bytes() {
        return Err(VelaError::InvalidArgument(format!(
            "output holds {} bytes, image needs {}",
            buf_out.len(),
            info.bytes()
        )));
    }

    let size = info.pixels();
    let planar = convert_uchar2float(buf_in, size, info.channels)?;
    let img = Array::from_vec(planar, Dims::from_slice(&[info.width, info.height, info.channels]))?;

    let ker = gaussian_kernel(BLUR_KERNEL_SIZE, BLUR_KERNEL_SIZE, 0.0, 0.0)?;
    let mut res = convolve(&img, &ker)?;
    res.set_slice(ALPHA_CHANNEL, 1.0)?;

    let bytes = convert_float2uchar(res.as_slice(), size, info.channels)?;
    buf_out[..bytes.len()].copy_from_slice(&bytes);
    tracing::debug!(?info, "blurred image");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_image_interior_unchanged() {
        let info = ImageInfo { width: 8, height: 8, channels: 4 };
        let input: Vec<u8> = (0..info.pixels()).flat_map(|_| [100u8, 150, 200, 7]).collect();
        let mut out = vec![0u8; info.bytes()];
        blur_logic(&input, &mut out, info).unwrap();

        // pixel (4, 4) has the whole 5x5 window inside the image
        let k = 4 * info.width + 4;
        let px = &out[k * 4..k * 4 + 4];
        for (got, want) in px[..3].iter().zip([100u8, 150, 200]) {
            assert!((*got as i16 - want as i16).abs() <= 1);
        }
        assert_eq!(px[3], 255);
    }

    #[test]
    fn test_alpha_forced_everywhere() {
        let info = ImageInfo { width: 3, height: 2, channels: 4 };
        let input = vec![0u8; info.bytes()];
        let mut out = vec![1u8; info.bytes()];
        blur_logic(&input, &mut out, info).unwrap();
        for px in out.chunks(4) {
            assert_eq!(px, &[0, 0, 0, 255]);
        }
    }

    #[test]
    fn test_borders_darken() {
        let info = ImageInfo { width: 6, height: 6, channels: 4 };
        let input = vec![255u8; info.bytes()];
        let mut out = vec![0u8; info.bytes()];
        blur_logic(&input, &mut out, info).unwrap();
        // zero padding pulls the corner below full intensity
        assert!(out[0] < 200);
    }

    #[test]
    fn test_rejects_rgb() {
        let info = ImageInfo { width: 2, height: 2, channels: 3 };
        let mut out = vec![0u8; info.bytes()];
        assert!(blur_logic(&[0u8; 12], &mut out, info).is_err());
    }
}
