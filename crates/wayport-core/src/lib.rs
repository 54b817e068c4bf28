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

//! # Wayport Core
//!
//! Foundational value types shared by every layer of the Wayport routing
//! boundary. Nothing in here knows about the C ABI or about a particular
//! routing engine; the types only describe *what* a query is made of.
//!
//! ## Modules
//!
//! - `geo`: The `Coordinate` (longitude, latitude) pair and helpers to read
//!   coordinates out of flat interleaved buffers.
//! - `optional`: `OptionalArray<T>`, the per-point container whose presence
//!   is all-or-nothing with respect to the coordinate count.
//! - `utils`: Phantom-tagged, strongly typed indices (`TypedIndex<T>`).

pub mod geo;
pub mod optional;
pub mod utils;
