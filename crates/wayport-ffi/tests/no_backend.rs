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

//! Behavior before the host integration installed any backend. Lives in its
//! own test binary so that nothing installs one.

mod common;

use common::{c, take};
use wayport_ffi::lifecycle::{wayport_create, wayport_destroy};
use wayport_ffi::pipeline::{wayport_run_contract, wayport_run_customize};

#[test]
fn test_create_without_factory_is_null() {
    let dir = tempfile::tempdir().unwrap();
    let path = c(dir.path().join("berlin.osrm").to_str().unwrap());
    let handle = unsafe { wayport_create(path.as_ptr(), std::ptr::null(), 0) };
    assert!(handle.is_null());
    unsafe { wayport_destroy(handle) };
}

#[test]
fn test_stages_without_backend_fail() {
    let base = c("berlin.osrm");
    let expected = (1, "no pipeline backend installed".to_owned());
    assert_eq!(take(unsafe { wayport_run_contract(base.as_ptr(), 0) }), expected);
    assert_eq!(take(unsafe { wayport_run_customize(base.as_ptr(), 4) }), expected);
}
