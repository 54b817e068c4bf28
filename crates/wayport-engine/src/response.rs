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

//! # Response Packaging
//!
//! Every host-facing call ends in a `Response`: an integer status code and
//! one text message.
//!
//! | Source              | Code                    | Message                                  |
//! | :------------------ | :---------------------- | :--------------------------------------- |
//! | Query, `Ok`         | `0`                     | payload rendered as JSON                 |
//! | Query, `Error`      | `1`                     | payload `message` field, else fallback   |
//! | Stage, success      | `0`                     | stage report rendered as JSON            |
//! | Stage, failure      | stage code (`0` → `1`)  | stage message                            |
//! | Missing instance    | `1`                     | `"instance not found"`                   |
//!
//! The fallback message is `"Unknown error"`. A response always carries a message.

use crate::{
    backend::StageError,
    outcome::{QueryOutcome, QueryStatus},
};
use serde_json::Value;

/// A status code and the text handed back to the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    code: i32,
    message: String,
}

impl Response {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
    pub const UNKNOWN_ERROR: &'static str = "Unknown error";
    pub const INSTANCE_NOT_FOUND: &'static str = "instance not found";

    /// Creates a successful response.
    #[inline]
    pub fn success<M>(message: M) -> Self
    where
        M: Into<String>,
    {
        Self {
            code: Self::SUCCESS,
            message: message.into(),
        }
    }

    /// Creates a failed response. A code of `0` is raised to `1`.
    pub fn failure<M>(code: i32, message: M) -> Self
    where
        M: Into<String>,
    {
        let code = if code == Self::SUCCESS {
            Self::FAILURE
        } else {
            code
        };
        Self {
            code,
            message: message.into(),
        }
    }

    /// The response for a call made without an engine instance.
    #[inline]
    pub fn instance_not_found() -> Self {
        Self::failure(Self::FAILURE, Self::INSTANCE_NOT_FOUND)
    }

    /// Packages a query outcome.
    pub fn from_query(outcome: QueryOutcome) -> Self {
        match outcome.into_parts() {
            (QueryStatus::Ok, payload) => Self::success(payload.to_string()),
            (QueryStatus::Error, payload) => {
                Self::failure(Self::FAILURE, error_message(&payload))
            }
        }
    }

    /// Packages the result of a preprocessing stage.
    pub fn from_stage(result: Result<Value, StageError>) -> Self {
        match result {
            Ok(report) => Self::success(report.to_string()),
            Err(StageError { code, message }) => Self::failure(code, message),
        }
    }

    #[inline]
    pub fn code(&self) -> i32 {
        self.code
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        self.code == Self::SUCCESS
    }

    #[inline]
    pub fn into_parts(self) -> (i32, String) {
        (self.code, self.message)
    }
}

impl std::fmt::Display for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

fn error_message(payload: &Value) -> &str {
    payload
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or(Response::UNKNOWN_ERROR)
}
