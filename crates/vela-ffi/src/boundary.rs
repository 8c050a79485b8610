//! Failure containment for exported calls.
//!
//! [`guard`] runs the body of an entry point, converts any error or panic
//! into the entry point's sentinel, and records the reason in the calling
//! thread's last-error slot.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::error::{self, BindError};
use crate::registry::registry;

/// Sentinel for handle-returning calls.
pub const NULL_HANDLE: u64 = 0;

/// Sentinel for count-returning calls.
pub const FAILED_COUNT: i64 = -1;

/// Run `body`, returning `sentinel` on error or panic.
pub fn guard<T, F>(op: &'static str, sentinel: T, body: F) -> T
where
    F: FnOnce() -> Result<T, BindError>,
{
    tracing::trace!(op, "enter");
    let outcome = match catch_unwind(AssertUnwindSafe(body)) {
        Ok(result) => result,
        Err(payload) => Err(BindError::Panic {
            op,
            message: panic_message(payload.as_ref()),
        }),
    };
    match outcome {
        Ok(value) => {
            error::clear_last_error();
            value
        }
        Err(e) => {
            report(op, &e);
            sentinel
        }
    }
}

fn report(op: &'static str, err: &BindError) {
    if registry().config().log_failures {
        tracing::warn!(op, kind = ?err.kind(), error = %err, "call failed, returning sentinel");
    }
    error::set_last_error(err);
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
