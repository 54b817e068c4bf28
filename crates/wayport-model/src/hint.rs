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

//! Snapping hints.
//!
//! A hint is an opaque token previously issued by the engine. Passing it back
//! lets the engine skip re-snapping that coordinate. Tokens are base64 text;
//! the decoded bytes are only meaningful to the engine that produced them.
//!
//! Decoding here never fails. A token that is not valid base64 is kept as-is
//! and flagged, so the engine can report it as a request error instead of the
//! boundary silently dropping it.

use base64::{
    engine::general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE, URL_SAFE_NO_PAD},
    Engine,
};
use serde::{Serialize, Serializer};

/// A decoded snapping hint.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Hint {
    token: String,
    checkpoint: Option<Vec<u8>>,
}

impl Hint {
    /// Decodes a hint token.
    ///
    /// The URL-safe alphabet is tried first, then the standard one; padding
    /// is optional for both.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use wayport_model::hint::Hint;
    /// let hint = Hint::from_base64("AAEC");
    /// assert!(hint.is_decodable());
    /// assert_eq!(hint.checkpoint(), Some(&[0u8, 1, 2][..]));
    ///
    /// let broken = Hint::from_base64("not base64!");
    /// assert!(!broken.is_decodable());
    /// assert_eq!(broken.token(), "not base64!");
    /// ```
    pub fn from_base64(token: &str) -> Self {
        let checkpoint = [URL_SAFE, URL_SAFE_NO_PAD, STANDARD, STANDARD_NO_PAD]
            .iter()
            .find_map(|engine| engine.decode(token).ok());

        if checkpoint.is_none() {
            log::debug!("hint token `{}` is not valid base64", token);
        }

        Self {
            token: token.to_owned(),
            checkpoint,
        }
    }

    /// Returns the token as it was received.
    #[inline]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the decoded checkpoint bytes, if the token was decodable.
    #[inline]
    pub fn checkpoint(&self) -> Option<&[u8]> {
        self.checkpoint.as_deref()
    }

    #[inline]
    pub fn is_decodable(&self) -> bool {
        self.checkpoint.is_some()
    }
}

impl std::fmt::Display for Hint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.token)
    }
}

impl Serialize for Hint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_url_safe_and_standard() {
        // 0xfb 0xff encodes to "-_8" (url-safe) and "+/8" (standard)
        let url = Hint::from_base64("-_8=");
        let std = Hint::from_base64("+/8=");
        assert_eq!(url.checkpoint(), Some(&[0xfb, 0xff][..]));
        assert_eq!(std.checkpoint(), Some(&[0xfb, 0xff][..]));
    }

    #[test]
    fn test_padding_is_optional() {
        let padded = Hint::from_base64("AAE=");
        let unpadded = Hint::from_base64("AAE");
        assert_eq!(padded.checkpoint(), unpadded.checkpoint());
        assert_eq!(padded.checkpoint(), Some(&[0u8, 1][..]));
    }

    #[test]
    fn test_malformed_token_is_kept() {
        let hint = Hint::from_base64("%%%");
        assert!(!hint.is_decodable());
        assert_eq!(hint.checkpoint(), None);
        assert_eq!(hint.to_string(), "%%%");
    }

    #[test]
    fn test_serializes_as_token() {
        let hint = Hint::from_base64("AAEC");
        assert_eq!(serde_json::to_string(&hint).unwrap(), "\"AAEC\"");
    }
}
