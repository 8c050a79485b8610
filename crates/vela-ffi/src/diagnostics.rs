//! Error inspection and runtime configuration entry points.
//!
//! These read or replace state directly and do not go through the last-error
//! slot themselves, except `vela_configure`, which reports its own outcome.

use std::ffi::{c_char, CStr};

use crate::boundary::guard;
use crate::config::BindingConfig;
use crate::error::{last_error_kind, last_error_message, BindError};
use crate::registry::registry;

/// Error code of the calling thread's most recent call, `0` if it succeeded.
#[no_mangle]
pub extern "C" fn vela_last_error() -> i32 {
    last_error_kind().code()
}

/// Copy the last error message into `buf` as a NUL-terminated string,
/// truncating to `capacity`.
///
/// Returns the bytes needed for the whole message including the NUL, or
/// `0` when there is no error. Passing a null `buf` only queries the size.
///
/// # Safety
/// `buf` must be null or valid for writes of `capacity` bytes.
#[no_mangle]
pub unsafe extern "C" fn vela_last_error_message(buf: *mut c_char, capacity: usize) -> i64 {
    let Some(message) = last_error_message() else {
        return 0;
    };
    let bytes = message.as_bytes();
    if !buf.is_null() && capacity > 0 {
        let n = bytes.len().min(capacity - 1);
        std::ptr::copy_nonoverlapping(bytes.as_ptr(), buf.cast::<u8>(), n);
        *buf.add(n) = 0;
    }
    bytes.len() as i64 + 1
}

/// Number of live array handles in the process.
#[no_mangle]
pub extern "C" fn vela_live_arrays() -> u64 {
    registry().live() as u64
}

/// Apply a JSON `BindingConfig`. Returns the resulting error code.
///
/// # Safety
/// `json` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn vela_configure(json: *const c_char) -> i32 {
    guard("vela_configure", (), || {
        if json.is_null() {
            return Err(BindError::NullPointer("json"));
        }
        let text = CStr::from_ptr(json)
            .to_str()
            .map_err(|e| BindError::Config(format!("config is not UTF-8: {e}")))?;
        registry().apply_config(BindingConfig::from_json(text)?);
        Ok(())
    });
    last_error_kind().code()
}
