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

//! # Resource Vectors
//!
//! `ResourceVector<T>` is a fixed-length, ordered sequence of non-negative
//! resource counts, one entry per resource type. It is the unit of arithmetic
//! for the entire analysis pipeline: the available pool, each allocation row,
//! each maximum row, and every derived need are all resource vectors of the
//! same length within a given snapshot.
//!
//! Arithmetic and comparison are defined **only between vectors of equal
//! length**. Length mismatches are caller bugs and are rejected eagerly with
//! descriptive panics rather than silently truncating.

use crate::{index::ResourceIndex, num::ResourceUnit};

/// A fixed-length vector of per-resource-type counts.
///
/// # Examples
///
/// ```rust
/// use gridlock_model::vector::ResourceVector;
///
/// let need = ResourceVector::new(vec![1u32, 2, 2]);
/// let work = ResourceVector::new(vec![3u32, 3, 2]);
/// assert!(need.fits_within(&work));
/// assert!(!work.fits_within(&need));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ResourceVector<T> {
    entries: Vec<T>,
}

impl<T> ResourceVector<T>
where
    T: ResourceUnit,
{
    /// Creates a new `ResourceVector` from the given entries.
    #[inline]
    pub fn new(entries: Vec<T>) -> Self {
        Self { entries }
    }

    /// Creates a new `ResourceVector` of the given length with every entry zero.
    #[inline]
    pub fn zeroed(len: usize) -> Self {
        Self {
            entries: vec![T::zero(); len],
        }
    }

    /// Returns the number of resource types in this vector.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if this vector has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the count for the specified resource type.
    ///
    /// # Panics
    ///
    /// Panics if `resource_index` is not in `0..len()`.
    #[inline]
    pub fn get(&self, resource_index: ResourceIndex) -> T {
        let index = resource_index.get();
        debug_assert!(
            index < self.len(),
            "called `ResourceVector::get` with resource index out of bounds: the len is {} but the index is {}",
            self.len(),
            index
        );

        self.entries[index]
    }

    /// Returns all entries as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.entries
    }

    /// Returns `true` if every entry of this vector is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.entries.iter().all(|v| v.is_zero())
    }

    /// Returns `true` if every entry of `self` is less than or equal to the
    /// corresponding entry of `other` (elementwise dominance).
    ///
    /// This is the admission test of the safety algorithm: a process whose
    /// remaining need fits within the working pool can run to completion.
    ///
    /// # Panics
    ///
    /// Panics if the two vectors have different lengths.
    #[inline]
    pub fn fits_within(&self, other: &Self) -> bool {
        assert_eq!(
            self.len(),
            other.len(),
            "called `ResourceVector::fits_within` with mismatched lengths: the left len is {} but the right len is {}",
            self.len(),
            other.len()
        );

        self.entries
            .iter()
            .zip(other.entries.iter())
            .all(|(a, b)| a <= b)
    }

    /// Computes `self - other` elementwise, returning `None` if any entry
    /// would underflow.
    ///
    /// # Panics
    ///
    /// Panics if the two vectors have different lengths.
    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        assert_eq!(
            self.len(),
            other.len(),
            "called `ResourceVector::checked_sub` with mismatched lengths: the left len is {} but the right len is {}",
            self.len(),
            other.len()
        );

        let mut entries = Vec::with_capacity(self.len());
        for (a, b) in self.entries.iter().zip(other.entries.iter()) {
            entries.push(a.checked_sub(b)?);
        }
        Some(Self { entries })
    }

    /// Adds `other` to `self` elementwise in place, clamping each entry to
    /// `T::max_value()` on overflow.
    ///
    /// Saturation keeps the accumulation total and monotone near the type
    /// bound instead of panicking inside the evaluation loop.
    ///
    /// # Panics
    ///
    /// Panics if the two vectors have different lengths.
    pub fn saturating_add_assign(&mut self, other: &Self) {
        assert_eq!(
            self.len(),
            other.len(),
            "called `ResourceVector::saturating_add_assign` with mismatched lengths: the left len is {} but the right len is {}",
            self.len(),
            other.len()
        );

        for (a, b) in self.entries.iter_mut().zip(other.entries.iter()) {
            *a = a.saturating_add(*b);
        }
    }
}

impl<T> std::ops::Index<ResourceIndex> for ResourceVector<T>
where
    T: ResourceUnit,
{
    type Output = T;

    #[inline]
    fn index(&self, resource_index: ResourceIndex) -> &Self::Output {
        &self.entries[resource_index.get()]
    }
}

impl<T> std::fmt::Display for ResourceVector<T>
where
    T: ResourceUnit,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", entry)?;
        }
        write!(f, "]")
    }
}

impl<T> From<Vec<T>> for ResourceVector<T>
where
    T: ResourceUnit,
{
    fn from(entries: Vec<T>) -> Self {
        Self::new(entries)
    }
}
