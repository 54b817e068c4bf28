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

//! Logging setup for hosts that do not install their own `log` backend.

use crate::decode;
use env_logger::{Builder, Target};
use libc::c_char;
use log::LevelFilter;
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Enables diagnostic logging at `info` level, or as set by `RUST_LOG`.
///
/// Output goes to stderr, or is appended to `log_file` if it is non-null.
/// If the file cannot be opened, stderr is used instead. Only the first call
/// has an effect; later calls and calls made after the host installed its own
/// logger are ignored.
///
/// # Safety
///
/// This function is unsafe because it dereferences a raw pointer.
/// `log_file` must be null or NUL-terminated.
#[no_mangle]
pub unsafe extern "C" fn wayport_enable_logging(log_file: *const c_char) {
    let log_file = decode::non_empty_text(log_file).map(|s| s.into_owned());

    INIT_LOGGER.call_once(|| {
        let mut builder = Builder::new();

        builder.is_test(false);
        builder.filter_level(LevelFilter::Info);
        builder.parse_default_env();

        builder.format(|buf, record| {
            writeln!(buf, "[{}] {}", record.level(), record.args())?;
            buf.flush()?;
            Ok(())
        });

        if let Some(filename) = log_file {
            match OpenOptions::new().append(true).create(true).open(&filename) {
                Ok(file) => {
                    builder.target(Target::Pipe(Box::new(file)));
                }
                Err(err) => eprintln!("[WARN] cannot open log file `{}`: {}", filename, err),
            }
        }

        if let Err(err) = builder.try_init() {
            log::debug!("keeping the host's logger: {}", err);
        }
    });
}
