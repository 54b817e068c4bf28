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

//! # Wayport Engine
//!
//! **The gateway between validated requests and an external routing engine.**
//!
//! The routing engine and the preprocessing stages live outside this
//! workspace. They are reached through three traits:
//!
//! * **`RoutingEngine`**: answers table, route, trip, match and nearest queries.
//! * **`EngineFactory`**: brings up a `RoutingEngine` from an `EngineConfig`.
//! * **`PipelineStages`**: runs extract, partition, customize and contract.
//!
//! `Engine` owns exactly one backend instance for its whole lifetime and is
//! the only way queries reach it. `run_stage` is its counterpart for the
//! preprocessing stages. Both capture panics raised by the backend, so a
//! misbehaving engine turns into an error result instead of unwinding into
//! the caller.
//!
//! `Response` is the final `(code, message)` pair handed to hosts. Rust
//! callers can use `Client` instead, which decodes each answer into the
//! typed documents of `wayport_model::response`.
//!
//! ## Concurrency
//!
//! `Engine` holds no locks and no mutable state. Queries borrow it
//! immutably, so one instance can serve many threads at once as far as the
//! backend allows it (`RoutingEngine: Send + Sync`). Every call blocks until
//! the backend returns; there is no timeout or cancellation.

pub mod backend;
pub mod client;
pub mod engine;
pub mod outcome;
pub mod panic;
pub mod response;
pub mod stage;
