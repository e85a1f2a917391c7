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

//! # Resource Unit Trait
//!
//! Unified numeric bounds for resource counts. `ResourceUnit` specifies the
//! integer capabilities required by the analysis engines: intrinsic traits
//! (`PrimInt`, `Unsigned`) plus formatting and thread-safety bounds.
//!
//! ## Motivation
//!
//! Safety evaluation should remain generic over the integer type used to
//! count resource instances while guaranteeing that counts can never be
//! negative. This trait collects the necessary bounds into a single alias,
//! simplifying generic signatures across the model, safety, and recovery
//! crates.
//!
//! ## Highlights
//!
//! - Requires `PrimInt + Unsigned` for numeric fundamentals; negative counts
//!   are unrepresentable by construction.
//! - `Debug + Display` for diagnostics and table rendering.
//! - `Send + Sync` so independent snapshots can be evaluated concurrently.

use num_traits::{PrimInt, Unsigned};

/// A trait alias for numeric types that can be used as resource counts.
///
/// These are usually the unsigned integer types `u8`, `u16`, `u32`, `u64`
/// and `usize`. Signed types are intentionally excluded: a resource count
/// below zero has no meaning in an allocation snapshot.
pub trait ResourceUnit:
    PrimInt + Unsigned + std::fmt::Debug + std::fmt::Display + Send + Sync
{
}

impl<T> ResourceUnit for T where
    T: PrimInt + Unsigned + std::fmt::Debug + std::fmt::Display + Send + Sync
{
}
