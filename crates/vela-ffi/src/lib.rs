//! # vela-ffi
//!
//! C ABI over `vela-core` and `vela-image`.
//!
//! Arrays never cross the boundary. The caller holds opaque 64-bit handles
//! issued by a process-wide, generation-checked table; every entry point
//! resolves its handles, makes one library call and registers the result.
//!
//! Failures never unwind into the caller. Each entry point returns a
//! sentinel instead (`0` for handles, null for buffers, `0.0` for scalars,
//! `-1` for counts) and records the reason, readable through
//! `vela_last_error` and `vela_last_error_message`.
//!
//! Entry points are grouped by prefix:
//! - `vela_array_*`: construction, retrieval, elementwise math, reductions
//! - `vela_image_*`: filters, histograms, geometry
//! - `vela_buffer_free_*`: release buffers handed out by the layer
//! - `vela_configure`, `vela_init_logging`, `vela_live_arrays`

pub mod array;
pub mod boundary;
pub mod buffer;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod handle;
pub mod image;
pub mod logging;
pub mod registry;

pub use buffer::MAX_DIMS_SUPPORTED;
pub use config::BindingConfig;
pub use error::{BindError, ErrorKind};
pub use handle::{Handle, HandleError, HandleTable};
pub use registry::{registry, Registry};
