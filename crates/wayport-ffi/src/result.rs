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

//! # Result Ownership
//!
//! Every message-returning call hands back a `WayportResult`. Its `message`
//! is a NUL-terminated buffer allocated by this library whose ownership
//! passes to the caller.
//!
//! ## Contract
//!
//! * `message` is never null.
//! * The caller releases it with `wayport_free_string`, exactly once.
//! * After that call the pointer must not be read or freed again.
//! * Passing null to `wayport_free_string` is a no-op.
//!
//! Internally the text is held by an `OwnedMessage`, a safe wrapper that can
//! only be converted into a raw pointer by consuming it, so the transfer
//! happens in one place and in one direction.

use libc::c_char;
use std::ffi::CString;
use std::panic::{catch_unwind, AssertUnwindSafe, UnwindSafe};
use wayport_engine::{panic::panic_message, response::Response};

/// A C-compatible `(code, message)` pair.
///
/// `code == 0` means success and `message` holds the response document;
/// any other code means failure and `message` holds a diagnostic.
#[repr(C)]
#[derive(Debug)]
pub struct WayportResult {
    pub code: i32,
    pub message: *mut c_char,
}

impl From<Response> for WayportResult {
    fn from(response: Response) -> Self {
        let (code, message) = response.into_parts();
        Self {
            code,
            message: OwnedMessage::new(message).into_raw(),
        }
    }
}

/// Message text on its way to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedMessage(CString);

impl OwnedMessage {
    /// Creates a message. Interior NUL bytes are removed, since C would
    /// read them as the end of the text.
    pub fn new<S>(text: S) -> Self
    where
        S: Into<String>,
    {
        let mut bytes = text.into().into_bytes();
        bytes.retain(|b| *b != 0);
        Self(CString::new(bytes).unwrap_or_default())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.to_str().unwrap_or_default()
    }

    /// Transfers ownership of the buffer to the caller.
    #[inline]
    pub fn into_raw(self) -> *mut c_char {
        self.0.into_raw()
    }
}

/// Runs a boundary call, turning a panic into a failure result.
pub(crate) fn boundary<F>(operation: &str, call: F) -> WayportResult
where
    F: FnOnce() -> Response + UnwindSafe,
{
    let response = catch_unwind(call).unwrap_or_else(|payload| {
        let message = panic_message(payload);
        log::error!("`{}` panicked: {}", operation, message);
        Response::failure(Response::FAILURE, message)
    });
    WayportResult::from(response)
}

/// Like `boundary`, for closures that capture raw pointers.
pub(crate) fn boundary_raw<F>(operation: &str, call: F) -> WayportResult
where
    F: FnOnce() -> Response,
{
    boundary(operation, AssertUnwindSafe(call))
}

/// Frees a message returned in a `WayportResult`.
///
/// # Safety
///
/// This function is unsafe because it dereferences a raw pointer.
/// The caller must ensure that the pointer was returned by this library
/// and has not been freed before. Null is accepted and ignored.
#[no_mangle]
pub unsafe extern "C" fn wayport_free_string(message: *mut c_char) {
    if !message.is_null() {
        drop(CString::from_raw(message));
    }
}
