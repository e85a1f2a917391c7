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

//! # Recovery Planner
//!
//! The greedy preemption loop. Blocked processes are tried in the order the
//! caller supplies them; each attempt reclaims one process's entire
//! allocation into the available pool and re-runs the safety evaluator on the
//! result. Preemptions are cumulative: a zeroed allocation stays zeroed
//! across subsequent attempts, so the working pool grows monotonically and
//! every re-check is strictly easier than the last.
//!
//! The planner operates on its own working copy of the snapshot; the caller's
//! snapshot is never touched.

use crate::outcome::RecoveryOutcome;
use fixedbitset::FixedBitSet;
use gridlock_model::{index::ProcessIndex, num::ResourceUnit, snapshot::Snapshot};
use gridlock_safety::{evaluator::SafetyEvaluator, verdict::SafetyVerdict};
use tracing::debug;

/// Attempts to rescue an unsafe snapshot by forcibly preempting blocked
/// processes one at a time.
///
/// # Examples
///
/// ```rust
/// use gridlock_model::snapshot::Snapshot;
/// use gridlock_model::vector::ResourceVector;
/// use gridlock_recovery::planner::RecoveryPlanner;
/// use gridlock_safety::evaluator::SafetyEvaluator;
///
/// let snapshot = Snapshot::from_parts(
///     ResourceVector::new(vec![1u32]),
///     vec![ResourceVector::new(vec![3]), ResourceVector::new(vec![1])],
///     vec![ResourceVector::new(vec![5]), ResourceVector::new(vec![3])],
/// )
/// .unwrap();
///
/// let verdict = SafetyEvaluator::new().evaluate(&snapshot);
/// let blocked = verdict.blocked().unwrap().blocked().to_vec();
///
/// let outcome = RecoveryPlanner::new().recover(&snapshot, &blocked);
/// assert!(outcome.is_recovered());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RecoveryPlanner {
    evaluator: SafetyEvaluator,
}

impl RecoveryPlanner {
    /// Creates a new `RecoveryPlanner`.
    #[inline]
    pub fn new() -> Self {
        Self {
            evaluator: SafetyEvaluator::new(),
        }
    }

    /// Runs the preemption loop over the given snapshot and blocked list.
    ///
    /// The blocked list fixes the iteration order; it is normally the blocked
    /// set of a prior `SafetyEvaluator` run on the same snapshot. Duplicate
    /// entries are skipped. If the list is empty, no preemption is attempted
    /// and the outcome is `Failed` with an empty tried-set.
    ///
    /// Returns `Recovered` with the safe schedule and the preemption order as
    /// soon as a re-check proves safety, or `Failed` after every entry has
    /// been preempted without reaching a safe ordering.
    ///
    /// # Panics
    ///
    /// Panics if any index in `blocked` is not in `0..snapshot.num_processes()`.
    pub fn recover<T>(
        &self,
        snapshot: &Snapshot<T>,
        blocked: &[ProcessIndex],
    ) -> RecoveryOutcome<T>
    where
        T: ResourceUnit,
    {
        let mut working = snapshot.clone();
        let mut tried = FixedBitSet::with_capacity(working.num_processes());
        let mut preempted = Vec::with_capacity(blocked.len());

        for &candidate in blocked {
            let index = candidate.get();
            debug_assert!(
                index < working.num_processes(),
                "called `RecoveryPlanner::recover` with process index out of bounds: the len is {} but the index is {}",
                working.num_processes(),
                index
            );

            if tried.contains(index) {
                continue;
            }

            working.reclaim(candidate);
            tried.insert(index);
            preempted.push(candidate);

            debug!(
                process = index,
                available = %working.available(),
                "reclaimed allocation, re-running safety evaluation"
            );

            match self.evaluator.evaluate(&working) {
                SafetyVerdict::Safe(schedule) => {
                    return RecoveryOutcome::Recovered {
                        schedule,
                        preempted,
                    };
                }
                SafetyVerdict::Unsafe(_) => {
                    // Keep going; the reclaimed allocation stays in the pool.
                }
            }
        }

        RecoveryOutcome::Failed { tried: preempted }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridlock_model::vector::ResourceVector;

    fn rv(entries: &[u32]) -> ResourceVector<u32> {
        ResourceVector::new(entries.to_vec())
    }

    fn pi(i: usize) -> ProcessIndex {
        ProcessIndex::new(i)
    }

    fn snapshot(
        available: &[u32],
        allocation: &[&[u32]],
        maximum: &[&[u32]],
    ) -> Snapshot<u32> {
        Snapshot::from_parts(
            rv(available),
            allocation.iter().map(|r| rv(r)).collect(),
            maximum.iter().map(|r| rv(r)).collect(),
        )
        .unwrap()
    }

    /// The unsafe five-process system from the evaluator tests.
    fn unsafe_system() -> Snapshot<u32> {
        snapshot(
            &[3, 3, 2],
            &[
                &[0, 1, 0],
                &[1, 0, 0],
                &[1, 0, 1],
                &[0, 1, 1],
                &[1, 1, 0],
            ],
            &[
                &[6, 5, 3],
                &[3, 2, 3],
                &[4, 2, 4],
                &[6, 3, 2],
                &[2, 3, 2],
            ],
        )
    }

    #[test]
    fn test_recovery_succeeds_on_the_blocked_set() {
        let system = unsafe_system();
        let verdict = SafetyEvaluator::new().evaluate(&system);
        let blocked = verdict.blocked().expect("system is unsafe").blocked().to_vec();

        let outcome = RecoveryPlanner::new().recover(&system, &blocked);

        let schedule = outcome.schedule().expect("recovery should succeed");
        assert_eq!(schedule.num_completed(), system.num_processes());
        assert!(!outcome.preempted().is_empty());
        assert!(outcome.preempted().len() <= blocked.len());
        // Every preempted process came from the blocked list.
        for p in outcome.preempted() {
            assert!(blocked.contains(p));
        }
    }

    #[test]
    fn test_recovery_preempts_in_list_order_and_cumulatively() {
        let system = unsafe_system();
        let blocked = vec![pi(0), pi(1), pi(2), pi(3)];

        let outcome = RecoveryPlanner::new().recover(&system, &blocked);

        // Preempting 0 and 1 is not enough; 2 tips the balance.
        assert_eq!(outcome.preempted(), &[pi(0), pi(1), pi(2)]);
        assert!(outcome.is_recovered());
    }

    #[test]
    fn test_recovered_schedule_log_is_monotone() {
        let system = unsafe_system();
        let blocked = vec![pi(0), pi(1), pi(2), pi(3)];

        let outcome = RecoveryPlanner::new().recover(&system, &blocked);
        let log = outcome.schedule().unwrap().available_log().to_vec();

        for window in log.windows(2) {
            assert!(window[0].fits_within(&window[1]));
        }
        // The recovered run starts from a pool at least as large as the
        // original available vector (preemption only adds resources).
        assert!(system.available().fits_within(&log[0]));
    }

    #[test]
    fn test_recovery_fails_when_demand_exceeds_system_total() {
        // Two processes, one resource type. The system holds 2 units in
        // total, but each process declares a maximum of 5: no amount of
        // preemption can ever satisfy either need.
        let system = snapshot(&[0], &[&[1], &[1]], &[&[5], &[5]]);
        let blocked = vec![pi(0), pi(1)];

        let outcome = RecoveryPlanner::new().recover(&system, &blocked);

        assert!(outcome.is_failed());
        assert_eq!(outcome.preempted(), &[pi(0), pi(1)]);
    }

    #[test]
    fn test_duplicate_blocked_entries_are_skipped() {
        let system = snapshot(&[0], &[&[1], &[1]], &[&[5], &[5]]);
        let blocked = vec![pi(0), pi(0), pi(1), pi(0)];

        let outcome = RecoveryPlanner::new().recover(&system, &blocked);

        assert_eq!(outcome.preempted(), &[pi(0), pi(1)]);
    }

    #[test]
    fn test_empty_blocked_list_fails_without_preempting() {
        let system = unsafe_system();
        let outcome = RecoveryPlanner::new().recover(&system, &[]);

        assert!(outcome.is_failed());
        assert!(outcome.preempted().is_empty());
    }

    #[test]
    fn test_caller_snapshot_is_not_mutated() {
        let system = unsafe_system();
        let before = system.clone();
        let blocked = vec![pi(0), pi(1), pi(2), pi(3)];

        let _ = RecoveryPlanner::new().recover(&system, &blocked);

        assert_eq!(system, before);
    }

    #[test]
    fn test_single_preemption_can_be_enough() {
        // Process 0 hoards most of the pool; once it is preempted, process 1
        // can finish and the enlarged pool covers process 0's full maximum.
        let system = snapshot(&[1], &[&[3], &[1]], &[&[5], &[3]]);
        let verdict = SafetyEvaluator::new().evaluate(&system);
        let blocked = verdict.blocked().unwrap().blocked().to_vec();

        let outcome = RecoveryPlanner::new().recover(&system, &blocked);

        assert!(outcome.is_recovered());
        assert_eq!(outcome.preempted(), &[pi(0)]);
        let schedule = outcome.schedule().unwrap();
        // Both processes appear in the recovered ordering.
        assert_eq!(schedule.num_completed(), 2);
    }
}
