// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Wayport FFI
//!
//! **C-Compatible Bindings for the Wayport Routing Boundary.**
//!
//! This crate lets hosts written in C, C++, Python, C#, Java or anything else
//! with a C FFI issue routing queries and run preprocessing jobs without
//! linking the routing engine's native object model. Everything crosses the
//! boundary as flat primitives: coordinate buffers, per-point arrays, string
//! tokens and a `(code, message)` result.
//!
//! ## Core Design Principles
//!
//! 1.  **Opaque Handles**: An engine instance is a pointer the host never
//!     dereferences. It is created by `wayport_create_with_config` (or the
//!     legacy `wayport_create`) and released by `wayport_destroy`.
//! 2.  **Sentinels Stop Here**: Negative numbers, null pointers and empty
//!     strings mean "absent" only at this layer. They are decoded into
//!     `Option` values before anything else sees them.
//! 3.  **Degrade, Don't Fail**: A per-point array whose length does not match
//!     the coordinate count is dropped as a whole. Unknown option tokens fall
//!     back to their documented default.
//! 4.  **One Owner Per Message**: Every `WayportResult::message` is a fresh
//!     allocation owned by the host until it is passed to
//!     `wayport_free_string`, exactly once.
//! 5.  **No Unwinding**: Panics never cross `extern "C"`. Backend failures
//!     come back as non-zero codes.
//!
//! ## Modules
//!
//! * `lifecycle`: Engine construction and destruction.
//! * `query`: Table, route, trip, match and nearest.
//! * `pipeline`: Extract, partition, customize and contract.
//! * `result`: `WayportResult`, message ownership and `wayport_free_string`.
//! * `backend`: Installation of the engine factory and pipeline stages.
//! * `logging`: `wayport_enable_logging`.

pub mod backend;
mod decode;
pub mod lifecycle;
pub mod logging;
pub mod pipeline;
pub mod query;
pub mod result;

pub use backend::{install_engine_factory, install_pipeline_stages, BackendError};
pub use result::WayportResult;

use libc::c_char;

static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();

/// Returns the library version as a static NUL-terminated string.
///
/// The returned pointer must not be freed.
#[no_mangle]
pub extern "C" fn wayport_version() -> *const c_char {
    VERSION.as_ptr().cast::<c_char>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;

    #[test]
    fn test_version_is_nul_terminated() {
        let version = unsafe { CStr::from_ptr(wayport_version()) };
        assert_eq!(version.to_str().unwrap(), env!("CARGO_PKG_VERSION"));
    }
}
