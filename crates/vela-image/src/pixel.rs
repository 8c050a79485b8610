//! Conversion between interleaved 8-bit pixels and planar normalised floats.
//!
//! Interleaved: `in[k * channels + j]` is channel `j` of pixel `k`.
//! Planar: `out[j * size + k]`, one contiguous plane per channel.

use vela_core::{Result, VelaError};

/// Channel forced to fully opaque when converting back to bytes.
pub const ALPHA_CHANNEL: usize = 3;

fn check_len(what: &str, len: usize, size: usize, channels: usize) -> Result<usize> {
    let needed = size
        .checked_mul(channels)
        .ok_or_else(|| VelaError::InvalidArgument(format!("{what}: {size} x {channels} overflows")))?;
    if len < needed {
        return Err(VelaError::InvalidArgument(format!(
            "{what}: buffer holds {len} samples, {size} pixels x {channels} channels need {needed}"
        )));
    }
    Ok(needed)
}

/// Interleaved bytes to planar floats in `[0, 1]`.
pub fn convert_uchar2float(input: &[u8], size: usize, channels: usize) -> Result<Vec<f32>> {
    let n = check_len("uchar2float", input.len(), size, channels)?;
    let mut out = vec![0.0f32; n];
    for k in 0..size {
        for j in 0..channels {
            out[j * size + k] = input[k * channels + j] as f32 / 255.0;
        }
    }
    Ok(out)
}

/// Planar floats to interleaved bytes.
///
/// Values are scaled by 255 and truncated, saturating at 0 and 255. When
/// there are at least four channels, channel [`ALPHA_CHANNEL`] is forced
/// to 255.
pub fn convert_float2uchar(input: &[f32], size: usize, channels: usize) -> Result<Vec<u8>> {
    let n = check_len("float2uchar", input.len(), size, channels)?;
    let mut out = vec![0u8; n];
    for k in 0..size {
        for j in 0..channels {
            out[k * channels + j] = (255.0 * input[j * size + k]) as u8;
        }
        if channels > ALPHA_CHANNEL {
            out[k * channels + ALPHA_CHANNEL] = 255;
        }
    }
    Ok(out)
}
