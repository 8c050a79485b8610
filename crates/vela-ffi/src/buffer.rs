//! Raw buffers crossing the boundary.
//!
//! Buffers handed out are boxed slices leaked with `Box::into_raw`; the
//! caller returns them with the matching `vela_buffer_free_*` call and the
//! length it was given.

use vela_core::{Dims, VelaError};

use crate::error::BindError;

/// Axes a caller must describe when creating an array.
pub const MAX_DIMS_SUPPORTED: usize = 3;

pub(crate) fn export_f32(data: Vec<f32>) -> *mut f32 {
    Box::into_raw(data.into_boxed_slice()) as *mut f32
}

pub(crate) fn export_i32(data: Vec<i32>) -> *mut i32 {
    Box::into_raw(data.into_boxed_slice()) as *mut i32
}

/// Borrow `len` elements at `ptr`.
///
/// # Safety
/// When `len > 0`, `ptr` must be valid for reads of `len` elements for the
/// returned lifetime.
pub(crate) unsafe fn read_slice<'a, T>(
    what: &'static str,
    ptr: *const T,
    len: usize,
) -> Result<&'a [T], BindError> {
    if ptr.is_null() {
        return Err(BindError::NullPointer(what));
    }
    Ok(std::slice::from_raw_parts(ptr, len))
}

/// Read a dimension descriptor of at least [`MAX_DIMS_SUPPORTED`] entries.
/// Entries past the third are ignored.
///
/// # Safety
/// `ptr` must be valid for reads of `ndims` values.
pub(crate) unsafe fn read_dims(ptr: *const i32, ndims: usize) -> Result<Dims, BindError> {
    let raw = read_slice("dims", ptr, ndims)?;
    if raw.len() < MAX_DIMS_SUPPORTED {
        return Err(BindError::InvalidArgument(format!(
            "dims descriptor has {} entries, need {MAX_DIMS_SUPPORTED}",
            raw.len()
        )));
    }
    let extents: Vec<i64> = raw[..MAX_DIMS_SUPPORTED].iter().map(|&d| d as i64).collect();
    Ok(Dims::from_signed(&extents)?)
}

/// The first three extents as a fresh `i32` buffer.
pub(crate) fn dims_to_i32(dims: Dims) -> Result<Vec<i32>, BindError> {
    dims.as_array()[..MAX_DIMS_SUPPORTED]
        .iter()
        .map(|&d| {
            i32::try_from(d).map_err(|_| {
                BindError::Library(VelaError::InvalidArgument(format!(
                    "extent {d} does not fit in i32"
                )))
            })
        })
        .collect()
}

/// Release a buffer returned by `vela_array_host`.
///
/// # Safety
/// `ptr` must come from `vela_array_host` with exactly `len` elements and
/// must not be freed twice. Null is ignored.
#[no_mangle]
pub unsafe extern "C" fn vela_buffer_free_f32(ptr: *mut f32, len: usize) {
    if ptr.is_null() {
        return;
    }
    drop(Box::from_raw(std::ptr::slice_from_raw_parts_mut(ptr, len)));
}

/// Release a buffer returned by `vela_array_get_dims`.
///
/// # Safety
/// `ptr` must come from `vela_array_get_dims` with exactly `len` elements
/// and must not be freed twice. Null is ignored.
#[no_mangle]
pub unsafe extern "C" fn vela_buffer_free_i32(ptr: *mut i32, len: usize) {
    if ptr.is_null() {
        return;
    }
    drop(Box::from_raw(std::ptr::slice_from_raw_parts_mut(ptr, len)));
}
