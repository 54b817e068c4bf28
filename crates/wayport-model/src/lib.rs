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

//! # Wayport Model
//!
//! **Typed requests and configuration for the Wayport routing boundary.**
//!
//! Hosts talk to the routing engine through flat C arrays and string tokens.
//! This crate defines the structured side of that conversation: everything a
//! request can contain, already validated and free of sentinel values.
//!
//! ## Architecture
//!
//! * **`config`**: `EngineConfig` and its builder, the algorithm selector,
//!   storage mode, feature datasets and per-operation limits.
//! * **`options`**: Closed option sets (`Approach`, `Snapping`, `Geometries`, ...)
//!   resolved from case-sensitive tokens with a documented default.
//! * **`annotations`**: `AnnotationFlags`, the merged set of annotation facets.
//! * **`hint`**: Decoded snapping hints.
//! * **`point`**: Per-point attributes that are not plain scalars (`Bearing`).
//! * **`index`**: `CoordinateIndex`, a typed position into the coordinate list.
//! * **`request`**: One request type and builder per query operation.
//! * **`pipeline`**: Configurations for the four offline preprocessing stages.
//! * **`response`**: Typed views of the documents the engine answers with.
//!
//! ## Design Philosophy
//!
//! 1.  **No sentinels**: Absence is `Option`, never `-1` or an empty string.
//!     Sentinels are decoded once at the C boundary.
//! 2.  **Never half-built**: A request builder always produces a request whose
//!     per-point arrays either match the coordinate count or are absent.
//! 3.  **Degrade, don't fail**: Malformed optional input is dropped and logged;
//!     it never aborts the request.

pub mod annotations;
pub mod config;
pub mod hint;
pub mod index;
pub mod options;
pub mod pipeline;
pub mod point;
pub mod request;
pub mod response;
