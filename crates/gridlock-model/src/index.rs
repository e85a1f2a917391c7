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

//! # Strongly Typed Indices (Zero-Cost)
//!
//! Transparent newtype wrappers around `usize` to prevent mixing indices
//! from the two axes of a resource-allocation snapshot: processes and
//! resource types. A `ProcessIndex` selects a row of the allocation/maximum
//! matrices; a `ResourceIndex` selects an entry within a `ResourceVector`.
//!
//! Both compile down to a plain `usize` (`#[repr(transparent)]`) and carry
//! no runtime overhead.

/// A strongly typed index identifying a process within a snapshot.
///
/// # Examples
///
/// ```rust
/// use gridlock_model::index::ProcessIndex;
///
/// let p = ProcessIndex::new(3);
/// assert_eq!(p.get(), 3);
/// assert_eq!(format!("{}", p), "ProcessIndex(3)");
/// ```
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ProcessIndex(usize);

impl ProcessIndex {
    /// Creates a new `ProcessIndex` with the given `usize` index.
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the underlying `usize` index.
    #[inline(always)]
    pub const fn get(&self) -> usize {
        self.0
    }
}

impl std::fmt::Debug for ProcessIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ProcessIndex({})", self.0)
    }
}

impl std::fmt::Display for ProcessIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ProcessIndex({})", self.0)
    }
}

impl From<usize> for ProcessIndex {
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

impl From<ProcessIndex> for usize {
    fn from(index: ProcessIndex) -> Self {
        index.0
    }
}

/// A strongly typed index identifying a resource type within a snapshot.
///
/// # Examples
///
/// ```rust
/// use gridlock_model::index::ResourceIndex;
///
/// let r = ResourceIndex::new(1);
/// assert_eq!(r.get(), 1);
/// assert_eq!(format!("{}", r), "ResourceIndex(1)");
/// ```
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ResourceIndex(usize);

impl ResourceIndex {
    /// Creates a new `ResourceIndex` with the given `usize` index.
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the underlying `usize` index.
    #[inline(always)]
    pub const fn get(&self) -> usize {
        self.0
    }
}

impl std::fmt::Debug for ResourceIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ResourceIndex({})", self.0)
    }
}

impl std::fmt::Display for ResourceIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ResourceIndex({})", self.0)
    }
}

impl From<usize> for ResourceIndex {
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

impl From<ResourceIndex> for usize {
    fn from(index: ResourceIndex) -> Self {
        index.0
    }
}
