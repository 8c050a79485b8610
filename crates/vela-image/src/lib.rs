//! # vela-image
//!
//! Image-domain operations over `vela_core::Array`.
//!
//! Axes 0 and 1 are the image plane; axes 2 and 3 are batched (channels,
//! frames). Planes are processed in parallel with rayon.
//!
//! - Convolution and gaussian kernels
//! - Morphology (erode, dilate)
//! - Median, bilateral and mean-shift filters
//! - Histograms
//! - Rotation and resizing
//! - Pixel format conversion and an example blur pipeline

pub mod convolve;
pub mod filter;
pub mod geometry;
pub mod histogram;
pub mod interp;
pub mod kernel;
pub mod morph;
pub mod pipeline;
pub mod pixel;

mod plane;

pub use convolve::convolve;
pub use filter::{bilateral, meanshift, medfilt};
pub use geometry::{resize_scale, resize_to, resize_xy, rotate};
pub use histogram::{histogram, histogram_range};
pub use interp::Interp;
pub use kernel::gaussian_kernel;
pub use morph::{dilate, erode};
