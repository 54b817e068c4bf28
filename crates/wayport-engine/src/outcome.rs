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

//! Structured results returned by a routing backend.

use serde_json::Value;

/// Whether the backend answered the query.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum QueryStatus {
    Ok,
    Error,
}

impl QueryStatus {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "Ok",
            Self::Error => "Error",
        }
    }
}

impl std::fmt::Display for QueryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A status plus the document the backend produced.
///
/// On `Ok` the payload is the response document. On `Error` it is expected
/// to be an object with a `code` and a `message` field, though backends are
/// not forced to follow that shape.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryOutcome {
    status: QueryStatus,
    payload: Value,
}

impl QueryOutcome {
    #[inline]
    pub fn new(status: QueryStatus, payload: Value) -> Self {
        Self { status, payload }
    }

    #[inline]
    pub fn ok(payload: Value) -> Self {
        Self::new(QueryStatus::Ok, payload)
    }

    /// Creates an error outcome with the conventional `{code, message}` payload.
    pub fn error<C, M>(code: C, message: M) -> Self
    where
        C: Into<String>,
        M: Into<String>,
    {
        let payload = serde_json::json!({
            "code": code.into(),
            "message": message.into(),
        });
        Self::new(QueryStatus::Error, payload)
    }

    #[inline]
    pub fn status(&self) -> QueryStatus {
        self.status
    }

    #[inline]
    pub fn payload(&self) -> &Value {
        &self.payload
    }

    #[inline]
    pub fn is_ok(&self) -> bool {
        self.status == QueryStatus::Ok
    }

    #[inline]
    pub fn into_parts(self) -> (QueryStatus, Value) {
        (self.status, self.payload)
    }
}

impl std::fmt::Display for QueryOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "QueryOutcome(status: {}, payload: {})", self.status, self.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_payload_shape() {
        let outcome = QueryOutcome::error("NoRoute", "Impossible route between points");
        assert!(!outcome.is_ok());
        assert_eq!(outcome.payload()["code"], "NoRoute");
        assert_eq!(outcome.payload()["message"], "Impossible route between points");
    }

    #[test]
    fn test_into_parts() {
        let (status, payload) = QueryOutcome::ok(serde_json::json!({"code": "Ok"})).into_parts();
        assert_eq!(status, QueryStatus::Ok);
        assert_eq!(payload["code"], "Ok");
    }
}
