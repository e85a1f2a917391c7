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

//! # Safety Evaluator
//!
//! The Banker's safety algorithm as a fixed-point iteration over rounds.
//! Each round scans all processes in ascending index order; every unfinished
//! process whose remaining need fits within the working pool completes
//! immediately within that same round, returning its allocation to the pool.
//! A process that becomes eligible mid-round (because an earlier process in
//! the same round just finished) is picked up in that round.
//!
//! The loop terminates within `num_processes` rounds: each round either
//! finishes at least one process or proves that no further progress is
//! possible. Scan order affects which round a process finishes in, never the
//! safe/unsafe verdict or the final pool value.
//!
//! The evaluator never mutates the caller's snapshot. All intermediate state
//! (working pool, finish flags) lives in locals discarded after the call, so
//! independent snapshots can be evaluated concurrently without coordination.

use crate::verdict::{BlockedReport, CompletionSchedule, SafetyVerdict};
use fixedbitset::FixedBitSet;
use gridlock_model::{index::ProcessIndex, num::ResourceUnit, snapshot::Snapshot};
use tracing::trace;

/// Decides whether a resource-allocation snapshot admits a completion
/// ordering in which every process eventually finishes.
///
/// The evaluator is stateless; one instance can serve any number of
/// evaluations, including concurrent ones.
///
/// # Examples
///
/// ```rust
/// use gridlock_model::snapshot::Snapshot;
/// use gridlock_model::vector::ResourceVector;
/// use gridlock_safety::evaluator::SafetyEvaluator;
///
/// let snapshot = Snapshot::from_parts(
///     ResourceVector::new(vec![2u32]),
///     vec![ResourceVector::new(vec![1])],
///     vec![ResourceVector::new(vec![3])],
/// )
/// .unwrap();
///
/// let verdict = SafetyEvaluator::new().evaluate(&snapshot);
/// assert!(verdict.is_safe());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SafetyEvaluator;

impl SafetyEvaluator {
    /// Creates a new `SafetyEvaluator`.
    #[inline]
    pub fn new() -> Self {
        Self
    }

    /// Runs the safety algorithm over the given snapshot.
    ///
    /// Returns `SafetyVerdict::Safe` with the completion ordering and the
    /// working-pool log (initial pool plus one entry per completion), or
    /// `SafetyVerdict::Unsafe` with the set of permanently blocked processes.
    ///
    /// Ties within a round are broken by ascending process index, so the
    /// result is deterministic for a fixed snapshot.
    pub fn evaluate<T>(&self, snapshot: &Snapshot<T>) -> SafetyVerdict<T>
    where
        T: ResourceUnit,
    {
        let num_processes = snapshot.num_processes();

        let mut work = snapshot.available().clone();
        let mut finished = FixedBitSet::with_capacity(num_processes);
        let mut sequence = Vec::with_capacity(num_processes);
        let mut available_log = Vec::with_capacity(num_processes + 1);
        available_log.push(work.clone());

        let mut rounds = 0;
        while finished.count_ones(..) < num_processes {
            rounds += 1;
            let mut progressed = false;

            for i in 0..num_processes {
                if finished.contains(i) {
                    continue;
                }

                let process = ProcessIndex::new(i);
                if snapshot.need(process).fits_within(&work) {
                    // Simulate completion: the process obtains its remaining
                    // need, runs to the end, and releases everything it held.
                    work.saturating_add_assign(snapshot.allocation(process));
                    finished.insert(i);
                    sequence.push(process);
                    available_log.push(work.clone());
                    progressed = true;

                    trace!(
                        process = i,
                        round = rounds,
                        work = %work,
                        "process can run to completion"
                    );
                }
            }

            if !progressed {
                let blocked: Vec<ProcessIndex> = (0..num_processes)
                    .filter(|&i| {
                        !finished.contains(i)
                            && !snapshot.need(ProcessIndex::new(i)).fits_within(&work)
                    })
                    .map(ProcessIndex::new)
                    .collect();

                trace!(
                    round = rounds,
                    blocked = blocked.len(),
                    "round stalled without progress"
                );
                return SafetyVerdict::Unsafe(BlockedReport::new(blocked, rounds));
            }
        }

        SafetyVerdict::Safe(CompletionSchedule::new(sequence, available_log, rounds))
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

    /// The classic five-process textbook system that admits a full ordering.
    fn safe_system() -> Snapshot<u32> {
        snapshot(
            &[3, 3, 2],
            &[
                &[0, 1, 0],
                &[2, 0, 0],
                &[3, 0, 2],
                &[2, 1, 1],
                &[0, 0, 2],
            ],
            &[
                &[7, 5, 3],
                &[3, 2, 2],
                &[9, 0, 2],
                &[2, 2, 2],
                &[4, 3, 3],
            ],
        )
    }

    /// A five-process system where only one process can ever finish.
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
    fn test_safe_system_yields_expected_sequence_and_final_pool() {
        let verdict = SafetyEvaluator::new().evaluate(&safe_system());

        let schedule = verdict.schedule().expect("system should be safe");
        assert_eq!(
            schedule.sequence(),
            &[pi(1), pi(3), pi(4), pi(0), pi(2)],
            "ties within a round break by ascending process index"
        );
        assert_eq!(schedule.final_available(), &rv(&[10, 5, 7]));
        assert_eq!(schedule.available_log().len(), 6);
        assert_eq!(schedule.rounds(), 2);
    }

    #[test]
    fn test_safe_log_is_elementwise_monotone() {
        let verdict = SafetyEvaluator::new().evaluate(&safe_system());
        let log = verdict.schedule().unwrap().available_log().to_vec();

        for window in log.windows(2) {
            assert!(
                window[0].fits_within(&window[1]),
                "the working pool only ever grows: {} then {}",
                window[0],
                window[1]
            );
        }
    }

    #[test]
    fn test_safe_final_pool_conserves_total_resources() {
        let system = safe_system();
        let verdict = SafetyEvaluator::new().evaluate(&system);

        assert_eq!(
            verdict.schedule().unwrap().final_available(),
            &system.total_resources()
        );
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let system = safe_system();
        let evaluator = SafetyEvaluator::new();

        assert_eq!(evaluator.evaluate(&system), evaluator.evaluate(&system));

        let unsafe_sys = unsafe_system();
        assert_eq!(
            evaluator.evaluate(&unsafe_sys),
            evaluator.evaluate(&unsafe_sys)
        );
    }

    #[test]
    fn test_unsafe_system_reports_blocked_processes() {
        let system = unsafe_system();
        let verdict = SafetyEvaluator::new().evaluate(&system);

        let report = verdict.blocked().expect("system should be unsafe");
        assert!(!report.is_empty());
        // Only process 4 can finish; everyone else stalls.
        assert_eq!(report.blocked(), &[pi(0), pi(1), pi(2), pi(3)]);
    }

    #[test]
    fn test_blocked_processes_over_demand_the_final_pool() {
        let system = unsafe_system();
        let verdict = SafetyEvaluator::new().evaluate(&system);
        let report = verdict.blocked().unwrap();

        // Recompute the final working pool: initial available plus the
        // allocations of every process that is not blocked (those finished).
        let mut final_work = system.available().clone();
        for i in 0..system.num_processes() {
            if !report.contains(pi(i)) {
                final_work.saturating_add_assign(system.allocation(pi(i)));
            }
        }

        for &b in report.blocked() {
            assert!(
                !system.need(b).fits_within(&final_work),
                "blocked process {} must over-demand the final pool",
                b.get()
            );
        }
    }

    #[test]
    fn test_empty_system_is_trivially_safe() {
        let system = Snapshot::<u32>::from_parts(rv(&[3, 3, 2]), vec![], vec![]).unwrap();
        let verdict = SafetyEvaluator::new().evaluate(&system);

        let schedule = verdict.schedule().expect("empty system is safe");
        assert!(schedule.sequence().is_empty());
        assert_eq!(schedule.available_log(), &[rv(&[3, 3, 2])]);
        assert_eq!(schedule.rounds(), 0);
    }

    #[test]
    fn test_single_over_demanding_process_is_unsafe() {
        let system = snapshot(&[1], &[&[1]], &[&[5]]);
        let verdict = SafetyEvaluator::new().evaluate(&system);

        let report = verdict.blocked().unwrap();
        assert_eq!(report.blocked(), &[pi(0)]);
        assert_eq!(report.rounds(), 1);
    }

    #[test]
    fn test_process_eligible_mid_round_finishes_in_that_round() {
        // Process 1 needs 3 but only 1 is free at the start of the round.
        // Process 0 finishes first in the scan and releases 2, which makes
        // process 1 eligible before the round ends.
        let system = snapshot(
            &[1],
            &[&[2], &[0]],
            &[&[3], &[3]],
        );
        let verdict = SafetyEvaluator::new().evaluate(&system);
        let schedule = verdict.schedule().unwrap();
        assert_eq!(schedule.sequence(), &[pi(0), pi(1)]);
        assert_eq!(schedule.rounds(), 1);
    }

    #[test]
    fn test_caller_snapshot_is_not_mutated() {
        let system = safe_system();
        let before = system.clone();
        let _ = SafetyEvaluator::new().evaluate(&system);
        assert_eq!(system, before);
    }
}
