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

//! # Gridlock Model
//!
//! **The Core Domain Model for the Gridlock Deadlock-Safety Analyzer.**
//!
//! This crate defines the fundamental data structures used to represent a
//! **resource-allocation snapshot**: a set of processes holding and demanding
//! finite, reusable resources. It serves as the data interchange layer between
//! the problem definition (caller input) and the analysis engines
//! (`gridlock_safety`, `gridlock_recovery`).
//!
//! ## Architecture
//!
//! The crate is designed around a strict separation of concerns between
//! **construction** and **analysis**:
//!
//! * **`index`**: Provides strongly-typed wrappers (`ProcessIndex`, `ResourceIndex`)
//!   to prevent logical indexing errors between the process and resource axes.
//! * **`num`**: Collects the numeric bounds required of a resource count type
//!   into the single `ResourceUnit` trait alias.
//! * **`vector`**: `ResourceVector<T>`, a fixed-length vector of per-type resource
//!   counts with elementwise arithmetic and dominance comparisons.
//! * **`snapshot`**: Contains the `Snapshot` (immutable once validated) and
//!   `SnapshotBuilder` (mutable, optimized for configuration).
//!
//! ## Design Philosophy
//!
//! 1.  **Type Safety**: Indices are distinct types. You cannot accidentally use a
//!     `ProcessIndex` to access a resource axis.
//! 2.  **Derived State**: The remaining demand (`need`) of a process is always
//!     derived as `maximum - allocation` and never stored, so it can never drift.
//! 3.  **Fail-Fast**: Builders and constructors validate dimensions and the
//!     `maximum >= allocation` invariant eagerly, so the analysis engines never
//!     encounter a malformed snapshot.

pub mod index;
pub mod num;
pub mod snapshot;
pub mod vector;
