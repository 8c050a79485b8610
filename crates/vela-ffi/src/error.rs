//! Boundary error taxonomy and the per-thread last-error slot.
//!
//! Every entry point returns a sentinel on failure. The reason is kept in
//! a thread-local slot so the caller can ask for it with
//! `vela_last_error` / `vela_last_error_message`.

use std::cell::RefCell;

use vela_core::VelaError;

use crate::handle::HandleError;

/// Errors raised while marshaling a call.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BindError {
    #[error("null handle")]
    NullHandle,

    #[error("stale handle {0:#018x}")]
    StaleHandle(u64),

    #[error("null pointer passed for '{0}'")]
    NullPointer(&'static str),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Library(#[from] VelaError),

    #[error("handle table full: {limit} live arrays")]
    CapacityExhausted { limit: usize },

    #[error("panic in '{op}': {message}")]
    Panic { op: &'static str, message: String },

    #[error("config error: {0}")]
    Config(String),
}

impl From<HandleError> for BindError {
    fn from(e: HandleError) -> Self {
        match e {
            HandleError::Null => BindError::NullHandle,
            HandleError::Stale(raw) => BindError::StaleHandle(raw),
            HandleError::Full { limit } => BindError::CapacityExhausted { limit },
        }
    }
}

/// Error codes visible across the boundary.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Ok = 0,
    NullHandle = 1,
    StaleHandle = 2,
    NullPointer = 3,
    InvalidArgument = 4,
    ShapeMismatch = 5,
    Library = 6,
    CapacityExhausted = 7,
    Panic = 8,
    Config = 9,
}

impl ErrorKind {
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl BindError {
    /// Collapse to the boundary error code.
    pub fn kind(&self) -> ErrorKind {
        match self {
            BindError::NullHandle => ErrorKind::NullHandle,
            BindError::StaleHandle(_) => ErrorKind::StaleHandle,
            BindError::NullPointer(_) => ErrorKind::NullPointer,
            BindError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            BindError::Library(lib) => match lib {
                VelaError::DimsMismatch { .. } | VelaError::ElementCountMismatch { .. } => {
                    ErrorKind::ShapeMismatch
                }
                VelaError::InvalidDims(_)
                | VelaError::ElementCountOverflow(_)
                | VelaError::InvalidArgument(_) => ErrorKind::InvalidArgument,
                VelaError::AllocationFailed { .. } | VelaError::EmptyArray(_) => {
                    ErrorKind::Library
                }
            },
            BindError::CapacityExhausted { .. } => ErrorKind::CapacityExhausted,
            BindError::Panic { .. } => ErrorKind::Panic,
            BindError::Config(_) => ErrorKind::Config,
        }
    }
}

thread_local! {
    static LAST_ERROR: RefCell<Option<(ErrorKind, String)>> = const { RefCell::new(None) };
}

pub(crate) fn set_last_error(err: &BindError) {
    LAST_ERROR.with(|slot| *slot.borrow_mut() = Some((err.kind(), err.to_string())));
}

pub(crate) fn clear_last_error() {
    LAST_ERROR.with(|slot| *slot.borrow_mut() = None);
}

/// Kind of the calling thread's most recent failure, `Ok` if the last call succeeded.
pub fn last_error_kind() -> ErrorKind {
    LAST_ERROR.with(|slot| slot.borrow().as_ref().map_or(ErrorKind::Ok, |(k, _)| *k))
}

/// Message of the calling thread's most recent failure.
pub fn last_error_message() -> Option<String> {
    LAST_ERROR.with(|slot| slot.borrow().as_ref().map(|(_, m)| m.clone()))
}
