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

//! # Gridlock Safety
//!
//! The resource-safety evaluator (Banker's algorithm) for the Gridlock
//! deadlock-safety analyzer. Given one validated `Snapshot`, the evaluator
//! decides whether a completion ordering exists in which every process can
//! eventually obtain its remaining need and finish.
//!
//! ## Modules
//!
//! - `evaluator`: The fixed-point round loop over a working pool and a set of
//!   finished processes.
//! - `verdict`: Structured results — a `CompletionSchedule` for safe systems,
//!   a `BlockedReport` for unsafe ones — so any presentation layer can render
//!   the run without re-executing it.
//!
//! ## Motivation
//!
//! An unsafe verdict is not an error: it is a normal, expected result
//! communicating that no completion ordering exists for the given snapshot.
//! Callers decide whether to hand the blocked set to `gridlock_recovery`.

pub mod evaluator;
pub mod verdict;
