//! Same-size convolution with zero padding.

use rayon::prelude::*;

use vela_core::{storage, Array, Result, VelaError};

/// Convolve `signal` with `filter`, keeping the signal's size.
///
/// The filter's rank picks the kind of convolution:
/// - 1-D filter `[m]`: along axis 0, batched over axes 1-3
/// - 2-D filter `[m, n]`: over the image plane, batched over axes 2-3
/// - 3-D filter `[m, n, p]`: over the volume, batched over axis 3
///
/// The filter is flipped (true convolution) and anchored at `m / 2` on
/// each axis; samples outside the signal count as zero.
pub fn convolve(signal: &Array, filter: &Array) -> Result<Array> {
    let [f0, f1, f2, f3] = filter.dims().as_array();
    if f3 != 1 {
        return Err(VelaError::InvalidArgument(format!(
            "4-D filters are not supported, got {}",
            filter.dims()
        )));
    }
    if filter.is_empty() {
        return Err(VelaError::InvalidArgument("empty convolution filter".into()));
    }

    let signal = signal.as_f32();
    let filter = filter.as_f32();
    let [d0, d1, d2, _] = signal.dims().as_array();
    let volume = d0 * d1 * d2;

    tracing::trace!(signal = %signal.dims(), filter = %filter.dims(), "convolve");

    let mut out = storage::filled(0.0, signal.elements())?;
    if volume == 0 {
        return Array::from_vec(out, signal.dims());
    }

    let fdata = filter.as_slice();
    let (o0, o1, o2) = (f0 / 2, f1 / 2, f2 / 2);

    out.par_chunks_mut(volume)
        .zip(signal.as_slice().par_chunks(volume))
        .for_each(|(dst, src)| {
            for k in 0..d2 {
                for j in 0..d1 {
                    for i in 0..d0 {
                        let mut acc = 0.0f32;
                        for c in 0..f2 {
                            let z = (k + o2) as isize - c as isize;
                            if z < 0 || z as usize >= d2 {
                                continue;
                            }
                            for b in 0..f1 {
                                let y = (j + o1) as isize - b as isize;
                                if y < 0 || y as usize >= d1 {
                                    continue;
                                }
                                for a in 0..f0 {
                                    let x = (i + o0) as isize - a as isize;
                                    if x < 0 || x as usize >= d0 {
                                        continue;
                                    }
                                    let s = src[(z as usize * d1 + y as usize) * d0 + x as usize];
                                    acc += s * fdata[(c * f1 + b) * f0 + a];
                                }
                            }
                        }
                        dst[(k * d1 + j) * d0 + i] = acc;
                    }
                }
            }
        });

    Array::from_vec(out, signal.dims())
}
