//! `vela_array_*`: construction, retrieval, elementwise math and reductions.
//!
//! Every call resolves its handles, makes one library call and registers
//! the result. Failures return the sentinel and set the last error.

use vela_core::{Array, DType};

use crate::boundary::{guard, FAILED_COUNT, NULL_HANDLE};
use crate::buffer::{dims_to_i32, export_f32, export_i32, read_dims, read_slice};
use crate::error::BindError;
use crate::registry::registry;

// =============================================================================
// Lifecycle
// =============================================================================

/// Zero-filled array. `dims` must hold at least three extents.
///
/// # Safety
/// `dims` must be valid for reads of `ndims` values.
#[no_mangle]
pub unsafe extern "C" fn vela_array_create(dims: *const i32, ndims: usize) -> u64 {
    guard("vela_array_create", NULL_HANDLE, || {
        let dims = read_dims(dims, ndims)?;
        registry().insert(Array::zeros(dims)?)
    })
}

/// Array initialised from `elems` in column-major order. Extra elements
/// past the described shape are ignored.
///
/// # Safety
/// `dims` must be valid for `ndims` reads and `elems` for `nelems` reads.
#[no_mangle]
pub unsafe extern "C" fn vela_array_create_elems(
    dims: *const i32,
    ndims: usize,
    elems: *const f32,
    nelems: usize,
) -> u64 {
    guard("vela_array_create_elems", NULL_HANDLE, || {
        let dims = read_dims(dims, ndims)?;
        let elems = read_slice("elems", elems, nelems)?;
        let take = nelems.min(dims.elements());
        registry().insert(Array::from_host(&elems[..take], dims)?)
    })
}

/// Release a handle. Zero or stale handles are reported, not dereferenced.
#[no_mangle]
pub extern "C" fn vela_array_destroy(handle: u64) {
    guard("vela_array_destroy", (), || registry().destroy(handle))
}

// =============================================================================
// Retrieval
// =============================================================================

/// Fresh copy of every element; its length is written to `out_len`.
/// Release with `vela_buffer_free_f32`.
///
/// # Safety
/// `out_len` must be valid for one write.
#[no_mangle]
pub unsafe extern "C" fn vela_array_host(handle: u64, out_len: *mut usize) -> *mut f32 {
    guard("vela_array_host", std::ptr::null_mut(), || {
        if out_len.is_null() {
            return Err(BindError::NullPointer("out_len"));
        }
        let data = registry().resolve(handle)?.host()?;
        *out_len = data.len();
        Ok(export_f32(data))
    })
}

/// Copy every element into `out` and return the count, `-1` on failure.
///
/// # Safety
/// `out` must be valid for writes of `capacity` values.
#[no_mangle]
pub unsafe extern "C" fn vela_array_host_into(handle: u64, out: *mut f32, capacity: usize) -> i64 {
    guard("vela_array_host_into", FAILED_COUNT, || {
        if out.is_null() {
            return Err(BindError::NullPointer("out"));
        }
        let array = registry().resolve(handle)?;
        let out = std::slice::from_raw_parts_mut(out, capacity);
        let n = array.host_into(out)?;
        Ok(n as i64)
    })
}

/// First three extents as a fresh 3-entry buffer.
/// Release with `vela_buffer_free_i32(ptr, 3)`.
#[no_mangle]
pub extern "C" fn vela_array_get_dims(handle: u64) -> *mut i32 {
    guard("vela_array_get_dims", std::ptr::null_mut(), || {
        let dims = registry().resolve(handle)?.dims();
        Ok(export_i32(dims_to_i32(dims)?))
    })
}

// =============================================================================
// Elementwise
// =============================================================================

// Operands are `Arc<Array>`; the calls go through `Array::` paths so
// `eq`/`ne` resolve to the elementwise methods rather than `PartialEq`.

macro_rules! arithmetic_exports {
    ($($name:ident => $method:ident),* $(,)?) => {$(
        #[no_mangle]
        pub extern "C" fn $name(a: u64, b: u64) -> u64 {
            guard(stringify!($name), NULL_HANDLE, || {
                let reg = registry();
                let (a, b) = (reg.resolve(a)?, reg.resolve(b)?);
                reg.insert(Array::$method(&a, &b)?.cast(DType::F32))
            })
        }
    )*};
}

macro_rules! comparison_exports {
    ($($name:ident => $method:ident),* $(,)?) => {$(
        #[no_mangle]
        pub extern "C" fn $name(a: u64, b: u64) -> u64 {
            guard(stringify!($name), NULL_HANDLE, || {
                let reg = registry();
                let (a, b) = (reg.resolve(a)?, reg.resolve(b)?);
                reg.insert(Array::$method(&a, &b)?)
            })
        }
    )*};
}

macro_rules! unary_exports {
    ($($name:ident => $method:ident),* $(,)?) => {$(
        #[no_mangle]
        pub extern "C" fn $name(a: u64) -> u64 {
            guard(stringify!($name), NULL_HANDLE, || {
                let reg = registry();
                let a = reg.resolve(a)?;
                reg.insert(Array::$method(&a))
            })
        }
    )*};
}

macro_rules! array_scalar_exports {
    ($($name:ident => $method:ident),* $(,)?) => {$(
        #[no_mangle]
        pub extern "C" fn $name(a: u64, s: f32) -> u64 {
            guard(stringify!($name), NULL_HANDLE, || {
                let reg = registry();
                let a = reg.resolve(a)?;
                reg.insert(Array::$method(&a, s))
            })
        }
    )*};
}

macro_rules! scalar_array_exports {
    ($($name:ident => $method:ident),* $(,)?) => {$(
        #[no_mangle]
        pub extern "C" fn $name(s: f32, a: u64) -> u64 {
            guard(stringify!($name), NULL_HANDLE, || {
                let reg = registry();
                let a = reg.resolve(a)?;
                reg.insert(Array::$method(&a, s))
            })
        }
    )*};
}

arithmetic_exports! {
    vela_array_add => add,
    vela_array_sub => sub,
    vela_array_mul => mul,
    vela_array_div => div,
}

comparison_exports! {
    vela_array_le => le,
    vela_array_lt => lt,
    vela_array_ge => ge,
    vela_array_gt => gt,
    vela_array_eq => eq,
    vela_array_ne => ne,
}

unary_exports! {
    vela_array_sin => sin,
    vela_array_cos => cos,
    vela_array_tan => tan,
    vela_array_asin => asin,
    vela_array_acos => acos,
    vela_array_atan => atan,
    vela_array_sinh => sinh,
    vela_array_cosh => cosh,
    vela_array_tanh => tanh,
    vela_array_asinh => asinh,
    vela_array_acosh => acosh,
    vela_array_atanh => atanh,
    vela_array_exp => exp,
    vela_array_log => log,
    vela_array_abs => abs,
    vela_array_sqrt => sqrt,
}

array_scalar_exports! {
    vela_array_addf => add_scalar,
    vela_array_subf => sub_scalar,
    vela_array_mulf => mul_scalar,
    vela_array_divf => div_scalar,
    vela_array_lef => le_scalar,
    vela_array_ltf => lt_scalar,
    vela_array_gef => ge_scalar,
    vela_array_gtf => gt_scalar,
    vela_array_eqf => eq_scalar,
    vela_array_nef => ne_scalar,
    vela_array_pow => pow_scalar,
}

// reversed operand order: s OP a
scalar_array_exports! {
    vela_array_fsub => scalar_sub,
    vela_array_fdiv => scalar_div,
    vela_array_fle => scalar_le,
    vela_array_flt => scalar_lt,
    vela_array_fge => scalar_ge,
    vela_array_fgt => scalar_gt,
}

// =============================================================================
// Reductions
// =============================================================================

/// Sum of all elements, `0.0` on failure.
#[no_mangle]
pub extern "C" fn vela_array_sum(a: u64) -> f32 {
    guard("vela_array_sum", 0.0, || {
        let a = registry().resolve(a)?;
        Ok(Array::sum(&a))
    })
}

/// Largest element, `0.0` on failure or for an empty array.
#[no_mangle]
pub extern "C" fn vela_array_max(a: u64) -> f32 {
    guard("vela_array_max", 0.0, || {
        let a = registry().resolve(a)?;
        Ok(Array::max(&a)?)
    })
}

/// Smallest element, `0.0` on failure or for an empty array.
#[no_mangle]
pub extern "C" fn vela_array_min(a: u64) -> f32 {
    guard("vela_array_min", 0.0, || {
        let a = registry().resolve(a)?;
        Ok(Array::min(&a)?)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{last_error_kind, ErrorKind};

    fn make(dims: [i32; 3], data: &[f32]) -> u64 {
        unsafe { vela_array_create_elems(dims.as_ptr(), 3, data.as_ptr(), data.len()) }
    }

    fn host(h: u64) -> Vec<f32> {
        let mut out = vec![f32::NAN; 64];
        let n = unsafe { vela_array_host_into(h, out.as_mut_ptr(), out.len()) };
        assert!(n >= 0);
        out.truncate(n as usize);
        out
    }

    #[test]
    fn test_arithmetic_is_f32() {
        let a = make([2, 1, 1], &[1.0, 2.0]);
        let b = make([2, 1, 1], &[3.0, 5.0]);
        let c = vela_array_mul(a, b);
        assert_eq!(host(c), vec![3.0, 10.0]);
        assert_eq!(registry().resolve(c).unwrap().dtype(), DType::F32);
        for h in [a, b, c] {
            vela_array_destroy(h);
        }
    }

    #[test]
    fn test_comparison_stays_bool() {
        let a = make([3, 1, 1], &[1.0, 2.0, 3.0]);
        let c = vela_array_gtf(a, 1.5);
        assert_eq!(registry().resolve(c).unwrap().dtype(), DType::B8);
        assert_eq!(host(c), vec![0.0, 1.0, 1.0]);
        let r = vela_array_fgt(1.5, a);
        assert_eq!(host(r), vec![1.0, 0.0, 0.0]);
        for h in [a, c, r] {
            vela_array_destroy(h);
        }
    }

    #[test]
    fn test_reversed_scalar_ops() {
        let a = make([2, 1, 1], &[2.0, 4.0]);
        let s = vela_array_fsub(10.0, a);
        let d = vela_array_fdiv(8.0, a);
        assert_eq!(host(s), vec![8.0, 6.0]);
        assert_eq!(host(d), vec![4.0, 2.0]);
        for h in [a, s, d] {
            vela_array_destroy(h);
        }
    }

    #[test]
    fn test_empty_max_is_sentinel() {
        let dims = [0, 1, 1];
        let e = unsafe { vela_array_create(dims.as_ptr(), 3) };
        assert_ne!(e, NULL_HANDLE);
        assert_eq!(vela_array_sum(e), 0.0);
        assert_eq!(last_error_kind(), ErrorKind::Ok);
        assert_eq!(vela_array_max(e), 0.0);
        assert_eq!(last_error_kind(), ErrorKind::Library);
        vela_array_destroy(e);
    }

    #[test]
    fn test_reductions_resolve_handle() {
        let a = make([4, 1, 1], &[3.0, -1.0, 7.0, 2.0]);
        assert_eq!(vela_array_sum(a), 11.0);
        assert_eq!(vela_array_max(a), 7.0);
        assert_eq!(vela_array_min(a), -1.0);
        assert_eq!(last_error_kind(), ErrorKind::Ok);
        vela_array_destroy(a);
        assert_eq!(vela_array_min(a), 0.0);
        assert_eq!(last_error_kind(), ErrorKind::StaleHandle);
    }

    #[test]
    fn test_oversized_create_is_sentinel() {
        let huge = [1 << 20, 1 << 20, 1 << 10];
        assert_eq!(unsafe { vela_array_create(huge.as_ptr(), 3) }, NULL_HANDLE);
        assert_eq!(last_error_kind(), ErrorKind::Library);

        let wrapping = [1 << 21, 1 << 21, 1 << 22];
        assert_eq!(unsafe { vela_array_create(wrapping.as_ptr(), 3) }, NULL_HANDLE);
        assert_eq!(last_error_kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_short_elems_is_shape_mismatch() {
        let dims = [2, 2, 1];
        let data = [1.0f32; 3];
        let h = unsafe { vela_array_create_elems(dims.as_ptr(), 3, data.as_ptr(), 3) };
        assert_eq!(h, NULL_HANDLE);
        assert_eq!(last_error_kind(), ErrorKind::ShapeMismatch);
    }
}
