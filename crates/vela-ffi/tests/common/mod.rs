//! Helpers that drive the C entry points the way a foreign caller would.

#![allow(dead_code)]

use vela_ffi::array::*;
use vela_ffi::buffer::{vela_buffer_free_f32, vela_buffer_free_i32};

pub fn assert_close(a: &[f32], b: &[f32], tol: f32) {
    assert_eq!(a.len(), b.len(), "length mismatch: {} vs {}", a.len(), b.len());
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        assert!(
            (x - y).abs() < tol,
            "element {} differs: {} vs {} (tol={})",
            i, x, y, tol
        );
    }
}

pub fn create(dims: [i32; 3]) -> u64 {
    unsafe { vela_array_create(dims.as_ptr(), dims.len()) }
}

pub fn create_with(dims: [i32; 3], data: &[f32]) -> u64 {
    unsafe { vela_array_create_elems(dims.as_ptr(), dims.len(), data.as_ptr(), data.len()) }
}

/// `vela_array_host`, copied into a `Vec` and released.
pub fn host(handle: u64) -> Option<Vec<f32>> {
    let mut len = 0usize;
    let ptr = unsafe { vela_array_host(handle, &mut len) };
    if ptr.is_null() {
        return None;
    }
    let out = unsafe { std::slice::from_raw_parts(ptr, len) }.to_vec();
    unsafe { vela_buffer_free_f32(ptr, len) };
    Some(out)
}

/// `vela_array_get_dims`, copied out and released.
pub fn dims(handle: u64) -> Option<[i32; 3]> {
    let ptr = vela_array_get_dims(handle);
    if ptr.is_null() {
        return None;
    }
    let d = unsafe { std::slice::from_raw_parts(ptr, 3) };
    let out = [d[0], d[1], d[2]];
    unsafe { vela_buffer_free_i32(ptr, 3) };
    Some(out)
}

pub fn destroy_all(handles: &[u64]) {
    for &h in handles {
        vela_array_destroy(h);
    }
}
