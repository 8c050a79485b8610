//! `vela_image_*`: image-domain filters and geometry.

use vela_image::Interp;

use crate::boundary::{guard, NULL_HANDLE};
use crate::error::BindError;
use crate::registry::registry;

fn extent(what: &str, value: i32) -> Result<usize, BindError> {
    usize::try_from(value)
        .map_err(|_| BindError::InvalidArgument(format!("{what} must be non-negative, got {value}")))
}

macro_rules! mask_exports {
    ($($name:ident => $func:path),* $(,)?) => {$(
        #[no_mangle]
        pub extern "C" fn $name(a: u64, mask: u64) -> u64 {
            guard(stringify!($name), NULL_HANDLE, || {
                let reg = registry();
                let (a, mask) = (reg.resolve(a)?, reg.resolve(mask)?);
                reg.insert($func(&a, &mask)?)
            })
        }
    )*};
}

mask_exports! {
    vela_image_erode => vela_image::erode,
    vela_image_dilate => vela_image::dilate,
    vela_image_convolve => vela_image::convolve,
}

/// Median filter over a `wind_length x wind_width` window.
#[no_mangle]
pub extern "C" fn vela_image_medfilt(a: u64, wind_length: i32, wind_width: i32) -> u64 {
    guard("vela_image_medfilt", NULL_HANDLE, || {
        let (w, h) = (extent("window length", wind_length)?, extent("window width", wind_width)?);
        let reg = registry();
        let a = reg.resolve(a)?;
        reg.insert(vela_image::medfilt(&a, w, h)?)
    })
}

#[no_mangle]
pub extern "C" fn vela_image_bilateral(a: u64, spatial_sigma: f32, chromatic_sigma: f32) -> u64 {
    guard("vela_image_bilateral", NULL_HANDLE, || {
        let reg = registry();
        let a = reg.resolve(a)?;
        reg.insert(vela_image::bilateral(&a, spatial_sigma, chromatic_sigma)?)
    })
}

#[no_mangle]
pub extern "C" fn vela_image_meanshift(
    a: u64,
    spatial_sigma: f32,
    chromatic_sigma: f32,
    iterations: i32,
) -> u64 {
    guard("vela_image_meanshift", NULL_HANDLE, || {
        let iterations = u32::try_from(iterations).map_err(|_| {
            BindError::InvalidArgument(format!("iterations must be non-negative, got {iterations}"))
        })?;
        let reg = registry();
        let a = reg.resolve(a)?;
        reg.insert(vela_image::meanshift(&a, spatial_sigma, chromatic_sigma, iterations)?)
    })
}

/// Histogram spanning the data's own range.
#[no_mangle]
pub extern "C" fn vela_image_histogram(a: u64, nbins: i32) -> u64 {
    guard("vela_image_histogram", NULL_HANDLE, || {
        let nbins = extent("nbins", nbins)?;
        let reg = registry();
        let a = reg.resolve(a)?;
        reg.insert(vela_image::histogram(&a, nbins)?)
    })
}

/// Histogram spanning `[min, max]`.
#[no_mangle]
pub extern "C" fn vela_image_hist_mnmx(a: u64, nbins: i32, min: f32, max: f32) -> u64 {
    guard("vela_image_hist_mnmx", NULL_HANDLE, || {
        let nbins = extent("nbins", nbins)?;
        let reg = registry();
        let a = reg.resolve(a)?;
        reg.insert(vela_image::histogram_range(&a, nbins, min, max)?)
    })
}

/// Rotation by `theta` radians, nearest-neighbour sampling.
#[no_mangle]
pub extern "C" fn vela_image_rotate(a: u64, theta: f32, crop: bool) -> u64 {
    guard("vela_image_rotate", NULL_HANDLE, || {
        let reg = registry();
        let a = reg.resolve(a)?;
        reg.insert(vela_image::rotate(&a, theta, crop, Interp::Nearest)?)
    })
}

#[no_mangle]
pub extern "C" fn vela_image_resize1(a: u64, scale: f32, method: u32) -> u64 {
    guard("vela_image_resize1", NULL_HANDLE, || {
        let method = Interp::from_code(method)?;
        let reg = registry();
        let a = reg.resolve(a)?;
        reg.insert(vela_image::resize_scale(scale, &a, method)?)
    })
}

#[no_mangle]
pub extern "C" fn vela_image_resize2(a: u64, scale0: f32, scale1: f32, method: u32) -> u64 {
    guard("vela_image_resize2", NULL_HANDLE, || {
        let method = Interp::from_code(method)?;
        let reg = registry();
        let a = reg.resolve(a)?;
        reg.insert(vela_image::resize_xy(scale0, scale1, &a, method)?)
    })
}

/// Resize to `height` (axis 0) by `width` (axis 1).
#[no_mangle]
pub extern "C" fn vela_image_resize3(a: u64, height: i32, width: i32, method: u32) -> u64 {
    guard("vela_image_resize3", NULL_HANDLE, || {
        let (o0, o1) = (extent("height", height)?, extent("width", width)?);
        let method = Interp::from_code(method)?;
        let reg = registry();
        let a = reg.resolve(a)?;
        reg.insert(vela_image::resize_to(o0, o1, &a, method)?)
    })
}
