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

//! # Resource-Allocation Snapshots
//!
//! A `Snapshot<T>` captures one moment of a system of processes competing for
//! finite, reusable resources: the free pool (`available`), what each process
//! currently holds (`allocation`), and each process's declared peak demand
//! (`maximum`). The remaining demand (`need`) is always derived as
//! `maximum - allocation` and never stored, so it cannot drift out of sync.
//!
//! Snapshots are validated once, at construction: every row must have the
//! same length as the available vector, and `maximum >= allocation` must hold
//! elementwise for every process. The analysis engines therefore operate on
//! `&Snapshot` without re-checking dimensions in their inner loops.
//!
//! Use `SnapshotBuilder` for cell-by-cell configuration, or
//! `Snapshot::from_parts` when the matrices already exist.

use crate::{
    index::{ProcessIndex, ResourceIndex},
    num::ResourceUnit,
    vector::ResourceVector,
};

/// The error type for snapshot construction.
///
/// Every variant is a caller contract violation: the input matrices do not
/// describe a well-formed system. Construction fails immediately; no partial
/// snapshot is ever produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// The allocation and maximum matrices have different numbers of rows.
    ProcessCountMismatch {
        /// Number of rows in the allocation matrix.
        allocation: usize,
        /// Number of rows in the maximum matrix.
        maximum: usize,
    },
    /// A matrix row has a different length than the available vector.
    ResourceCountMismatch {
        /// The process whose row is malformed.
        process: ProcessIndex,
        /// Expected row length (`n_resources`, the available vector length).
        expected: usize,
        /// Actual row length.
        found: usize,
    },
    /// A process holds more of some resource than its declared maximum,
    /// i.e. `maximum[process] < allocation[process]` in some entry.
    NeedUnderflow {
        /// The process whose derived need would be negative.
        process: ProcessIndex,
    },
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProcessCountMismatch {
                allocation,
                maximum,
            } => write!(
                f,
                "allocation matrix has {} rows but maximum matrix has {}",
                allocation, maximum
            ),
            Self::ResourceCountMismatch {
                process,
                expected,
                found,
            } => write!(
                f,
                "process {} has a row of length {} but the snapshot has {} resource types",
                process.get(),
                found,
                expected
            ),
            Self::NeedUnderflow { process } => write!(
                f,
                "process {} holds more than its declared maximum demand",
                process.get()
            ),
        }
    }
}

impl std::error::Error for SnapshotError {}

/// An immutable, validated resource-allocation snapshot.
///
/// The allocation and maximum matrices are stored row-wise as
/// `Vec<ResourceVector<T>>`, indexed by `ProcessIndex`. All rows and the
/// available vector have the same length (`num_resources`).
///
/// Invariants (established at construction):
/// - `allocation.len() == maximum.len() == num_processes`
/// - every row length equals `available.len()`
/// - `maximum[p] >= allocation[p]` elementwise for every process `p`
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "RawSnapshot<T>",
        bound(deserialize = "T: ResourceUnit + serde::Deserialize<'de>")
    )
)]
pub struct Snapshot<T> {
    available: ResourceVector<T>,
    allocation: Vec<ResourceVector<T>>,
    maximum: Vec<ResourceVector<T>>,
}

/// Unvalidated mirror of `Snapshot` used as the deserialization target.
///
/// Deserialization funnels through `Snapshot::from_parts`, so a payload that
/// violates the snapshot invariants is rejected with a `SnapshotError` rather
/// than producing a snapshot the analysis engines would choke on.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawSnapshot<T> {
    available: ResourceVector<T>,
    allocation: Vec<ResourceVector<T>>,
    maximum: Vec<ResourceVector<T>>,
}

#[cfg(feature = "serde")]
impl<T> TryFrom<RawSnapshot<T>> for Snapshot<T>
where
    T: ResourceUnit,
{
    type Error = SnapshotError;

    fn try_from(raw: RawSnapshot<T>) -> Result<Self, Self::Error> {
        Self::from_parts(raw.available, raw.allocation, raw.maximum)
    }
}

impl<T> Snapshot<T>
where
    T: ResourceUnit,
{
    /// Constructs a validated `Snapshot` from an available vector and the
    /// allocation and maximum matrices.
    ///
    /// # Errors
    ///
    /// Returns a `SnapshotError` if the matrices disagree on the number of
    /// processes, if any row length differs from the available vector length,
    /// or if any process holds more than its declared maximum.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use gridlock_model::snapshot::Snapshot;
    /// use gridlock_model::vector::ResourceVector;
    ///
    /// let snapshot = Snapshot::from_parts(
    ///     ResourceVector::new(vec![3u32, 3, 2]),
    ///     vec![ResourceVector::new(vec![0, 1, 0])],
    ///     vec![ResourceVector::new(vec![7, 5, 3])],
    /// )
    /// .unwrap();
    /// assert_eq!(snapshot.num_processes(), 1);
    /// assert_eq!(snapshot.num_resources(), 3);
    /// ```
    pub fn from_parts(
        available: ResourceVector<T>,
        allocation: Vec<ResourceVector<T>>,
        maximum: Vec<ResourceVector<T>>,
    ) -> Result<Self, SnapshotError> {
        if allocation.len() != maximum.len() {
            return Err(SnapshotError::ProcessCountMismatch {
                allocation: allocation.len(),
                maximum: maximum.len(),
            });
        }

        let num_resources = available.len();
        for rows in [&allocation, &maximum] {
            for (i, row) in rows.iter().enumerate() {
                if row.len() != num_resources {
                    return Err(SnapshotError::ResourceCountMismatch {
                        process: ProcessIndex::new(i),
                        expected: num_resources,
                        found: row.len(),
                    });
                }
            }
        }

        for (i, (max, alloc)) in maximum.iter().zip(allocation.iter()).enumerate() {
            if max.checked_sub(alloc).is_none() {
                return Err(SnapshotError::NeedUnderflow {
                    process: ProcessIndex::new(i),
                });
            }
        }

        Ok(Self {
            available,
            allocation,
            maximum,
        })
    }

    /// Returns the number of processes in this snapshot.
    #[inline]
    pub fn num_processes(&self) -> usize {
        self.allocation.len()
    }

    /// Returns the number of resource types in this snapshot.
    #[inline]
    pub fn num_resources(&self) -> usize {
        self.available.len()
    }

    /// Returns the free resource pool.
    #[inline]
    pub fn available(&self) -> &ResourceVector<T> {
        &self.available
    }

    /// Returns the resources currently held by the specified process.
    ///
    /// # Panics
    ///
    /// Panics if `process_index` is not in `0..num_processes()`.
    #[inline]
    pub fn allocation(&self, process_index: ProcessIndex) -> &ResourceVector<T> {
        let index = process_index.get();
        debug_assert!(
            index < self.num_processes(),
            "called `Snapshot::allocation` with process index out of bounds: the len is {} but the index is {}",
            self.num_processes(),
            index
        );

        &self.allocation[index]
    }

    /// Returns the declared peak demand of the specified process.
    ///
    /// # Panics
    ///
    /// Panics if `process_index` is not in `0..num_processes()`.
    #[inline]
    pub fn maximum(&self, process_index: ProcessIndex) -> &ResourceVector<T> {
        let index = process_index.get();
        debug_assert!(
            index < self.num_processes(),
            "called `Snapshot::maximum` with process index out of bounds: the len is {} but the index is {}",
            self.num_processes(),
            index
        );

        &self.maximum[index]
    }

    /// Computes the remaining demand of the specified process:
    /// `need = maximum - allocation`.
    ///
    /// The result is derived on every call; it is never cached, so it always
    /// reflects the current allocation row.
    ///
    /// # Panics
    ///
    /// Panics if `process_index` is not in `0..num_processes()`.
    pub fn need(&self, process_index: ProcessIndex) -> ResourceVector<T> {
        let index = process_index.get();
        debug_assert!(
            index < self.num_processes(),
            "called `Snapshot::need` with process index out of bounds: the len is {} but the index is {}",
            self.num_processes(),
            index
        );

        self.maximum[index]
            .checked_sub(&self.allocation[index])
            .expect("snapshot invariant violated: maximum must dominate allocation")
    }

    /// Forcibly reclaims every resource held by the specified process: the
    /// held resources are returned to the available pool and the process's
    /// allocation row is zeroed.
    ///
    /// This is the preemption primitive used by the recovery planner. It is
    /// irreversible within this snapshot and strictly increases `available`
    /// (unless the process held nothing).
    ///
    /// # Panics
    ///
    /// Panics if `process_index` is not in `0..num_processes()`.
    pub fn reclaim(&mut self, process_index: ProcessIndex) {
        let index = process_index.get();
        debug_assert!(
            index < self.num_processes(),
            "called `Snapshot::reclaim` with process index out of bounds: the len is {} but the index is {}",
            self.num_processes(),
            index
        );

        let zero = ResourceVector::zeroed(self.num_resources());
        let released = std::mem::replace(&mut self.allocation[index], zero);
        self.available.saturating_add_assign(&released);
    }

    /// Returns the total resources in the system:
    /// `available + Σ allocation[p]` over all processes.
    ///
    /// This quantity is invariant under `reclaim` and equals the final
    /// working pool of any safe completion ordering.
    pub fn total_resources(&self) -> ResourceVector<T> {
        let mut total = self.available.clone();
        for row in &self.allocation {
            total.saturating_add_assign(row);
        }
        total
    }
}

/// A mutable, cell-by-cell builder for `Snapshot`.
///
/// All cells start at zero. Dimension errors are impossible by construction;
/// the `maximum >= allocation` invariant is checked in `build`.
///
/// # Examples
///
/// ```rust
/// use gridlock_model::index::{ProcessIndex, ResourceIndex};
/// use gridlock_model::snapshot::SnapshotBuilder;
///
/// let mut builder = SnapshotBuilder::<u32>::new(2, 3);
/// builder.set_available(ResourceIndex::new(0), 3);
/// builder.set_maximum(ProcessIndex::new(0), ResourceIndex::new(0), 7);
/// builder.set_allocation(ProcessIndex::new(0), ResourceIndex::new(0), 2);
/// let snapshot = builder.build().unwrap();
/// assert_eq!(snapshot.num_processes(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct SnapshotBuilder<T> {
    available: Vec<T>,
    allocation: Vec<Vec<T>>,
    maximum: Vec<Vec<T>>,
}

impl<T> SnapshotBuilder<T>
where
    T: ResourceUnit,
{
    /// Creates a new builder for the given dimensions with all cells zero.
    pub fn new(num_processes: usize, num_resources: usize) -> Self {
        Self {
            available: vec![T::zero(); num_resources],
            allocation: vec![vec![T::zero(); num_resources]; num_processes],
            maximum: vec![vec![T::zero(); num_resources]; num_processes],
        }
    }

    /// Returns the number of processes this builder is configured for.
    #[inline]
    pub fn num_processes(&self) -> usize {
        self.allocation.len()
    }

    /// Returns the number of resource types this builder is configured for.
    #[inline]
    pub fn num_resources(&self) -> usize {
        self.available.len()
    }

    /// Sets the free count of the specified resource type.
    ///
    /// # Panics
    ///
    /// Panics if `resource_index` is not in `0..num_resources()`.
    pub fn set_available(&mut self, resource_index: ResourceIndex, amount: T) -> &mut Self {
        let r = resource_index.get();
        assert!(
            r < self.num_resources(),
            "called `SnapshotBuilder::set_available` with resource index out of bounds: the len is {} but the index is {}",
            self.num_resources(),
            r
        );

        self.available[r] = amount;
        self
    }

    /// Sets the amount of a resource currently held by a process.
    ///
    /// # Panics
    ///
    /// Panics if `process_index` or `resource_index` is out of bounds.
    pub fn set_allocation(
        &mut self,
        process_index: ProcessIndex,
        resource_index: ResourceIndex,
        amount: T,
    ) -> &mut Self {
        let (p, r) = (process_index.get(), resource_index.get());
        assert!(
            p < self.num_processes(),
            "called `SnapshotBuilder::set_allocation` with process index out of bounds: the len is {} but the index is {}",
            self.num_processes(),
            p
        );
        assert!(
            r < self.num_resources(),
            "called `SnapshotBuilder::set_allocation` with resource index out of bounds: the len is {} but the index is {}",
            self.num_resources(),
            r
        );

        self.allocation[p][r] = amount;
        self
    }

    /// Sets the declared peak demand of a process for a resource.
    ///
    /// # Panics
    ///
    /// Panics if `process_index` or `resource_index` is out of bounds.
    pub fn set_maximum(
        &mut self,
        process_index: ProcessIndex,
        resource_index: ResourceIndex,
        amount: T,
    ) -> &mut Self {
        let (p, r) = (process_index.get(), resource_index.get());
        assert!(
            p < self.num_processes(),
            "called `SnapshotBuilder::set_maximum` with process index out of bounds: the len is {} but the index is {}",
            self.num_processes(),
            p
        );
        assert!(
            r < self.num_resources(),
            "called `SnapshotBuilder::set_maximum` with resource index out of bounds: the len is {} but the index is {}",
            self.num_resources(),
            r
        );

        self.maximum[p][r] = amount;
        self
    }

    /// Validates the configured cells and builds the snapshot.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::NeedUnderflow` if any process holds more of a
    /// resource than its declared maximum.
    pub fn build(self) -> Result<Snapshot<T>, SnapshotError> {
        Snapshot::from_parts(
            ResourceVector::new(self.available),
            self.allocation.into_iter().map(ResourceVector::new).collect(),
            self.maximum.into_iter().map(ResourceVector::new).collect(),
        )
    }
}
