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

use gridlock_model::{index::ProcessIndex, num::ResourceUnit, vector::ResourceVector};

/// A proven-safe completion ordering together with the evolution of the
/// working pool.
///
/// The log has length `sequence.len() + 1`: the initial available pool
/// followed by one entry per completed process. Each entry dominates its
/// predecessor elementwise, since the evaluator only ever returns resources
/// to the pool.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompletionSchedule<T> {
    /// Process indices in completion order (not necessarily index order).
    sequence: Vec<ProcessIndex>,
    /// Working pool snapshots: the initial pool, then one per completion.
    available_log: Vec<ResourceVector<T>>,
    /// Number of scan rounds the evaluator performed.
    rounds: usize,
}

impl<T> CompletionSchedule<T>
where
    T: ResourceUnit,
{
    /// Constructs a new `CompletionSchedule`.
    ///
    /// # Panics
    ///
    /// Panics if `available_log` does not contain exactly one more entry
    /// than `sequence`.
    pub fn new(
        sequence: Vec<ProcessIndex>,
        available_log: Vec<ResourceVector<T>>,
        rounds: usize,
    ) -> Self {
        assert_eq!(
            available_log.len(),
            sequence.len() + 1,
            "called CompletionSchedule::new with inconsistent lengths: available_log.len() = {}, sequence.len() = {}",
            available_log.len(),
            sequence.len()
        );

        Self {
            sequence,
            available_log,
            rounds,
        }
    }

    /// Returns the completion ordering.
    #[inline]
    pub fn sequence(&self) -> &[ProcessIndex] {
        &self.sequence
    }

    /// Returns the working-pool log (initial pool plus one entry per completion).
    #[inline]
    pub fn available_log(&self) -> &[ResourceVector<T>] {
        &self.available_log
    }

    /// Returns the number of scan rounds the evaluator performed.
    #[inline]
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Returns the number of processes that completed.
    #[inline]
    pub fn num_completed(&self) -> usize {
        self.sequence.len()
    }

    /// Returns the working pool after the last completion. For a whole-system
    /// schedule this equals the total resources of the snapshot.
    #[inline]
    pub fn final_available(&self) -> &ResourceVector<T> {
        self.available_log
            .last()
            .expect("available_log always holds at least the initial pool")
    }
}

impl<T> std::fmt::Display for CompletionSchedule<T>
where
    T: ResourceUnit,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Completion Schedule")?;
        writeln!(f, "   Rounds: {}", self.rounds)?;
        writeln!(f)?;

        if self.sequence.is_empty() {
            writeln!(f, "   (No processes; pool stays {})", self.available_log[0])?;
            return Ok(());
        }

        writeln!(f, "   {:<6} | {:<8} | {:<16}", "Step", "Process", "Available")?;
        writeln!(f, "   {:-<6}-+-{:-<8}-+-{:-<16}", "", "", "")?;
        writeln!(
            f,
            "   {:<6} | {:<8} | {:<16}",
            0,
            "-",
            format!("{}", self.available_log[0])
        )?;
        for (step, process) in self.sequence.iter().enumerate() {
            writeln!(
                f,
                "   {:<6} | {:<8} | {:<16}",
                step + 1,
                process.get(),
                format!("{}", self.available_log[step + 1])
            )?;
        }

        Ok(())
    }
}

/// The set of processes that can never obtain their remaining need given the
/// resources any currently-unfinished process could ever release.
///
/// Indices are stored in ascending order; the set is small and ordered so it
/// can be fed directly to the recovery planner or serialized for display.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockedReport {
    blocked: Vec<ProcessIndex>,
    rounds: usize,
}

impl BlockedReport {
    /// Constructs a new `BlockedReport`.
    ///
    /// # Panics
    ///
    /// In debug mode, panics if `blocked` is not strictly ascending.
    pub fn new(blocked: Vec<ProcessIndex>, rounds: usize) -> Self {
        debug_assert!(
            blocked.windows(2).all(|w| w[0] < w[1]),
            "called `BlockedReport::new` with a blocked list that is not strictly ascending"
        );

        Self { blocked, rounds }
    }

    /// Returns the blocked process indices in ascending order.
    #[inline]
    pub fn blocked(&self) -> &[ProcessIndex] {
        &self.blocked
    }

    /// Returns the number of scan rounds the evaluator performed.
    #[inline]
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Returns the number of blocked processes.
    #[inline]
    pub fn len(&self) -> usize {
        self.blocked.len()
    }

    /// Returns `true` if no process is blocked.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocked.is_empty()
    }

    /// Checks whether the specified process is in the blocked set.
    #[inline]
    pub fn contains(&self, process_index: ProcessIndex) -> bool {
        self.blocked.binary_search(&process_index).is_ok()
    }
}

impl std::fmt::Display for BlockedReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Blocked processes: [")?;
        for (i, p) in self.blocked.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", p.get())?;
        }
        write!(f, "] after {} rounds", self.rounds)
    }
}

/// The outcome of one safety evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SafetyVerdict<T> {
    /// A completion ordering exists; every process can eventually finish.
    Safe(CompletionSchedule<T>),
    /// No completion ordering exists for this snapshot.
    Unsafe(BlockedReport),
}

impl<T> SafetyVerdict<T>
where
    T: ResourceUnit,
{
    /// Returns `true` if the snapshot was proven safe.
    #[inline]
    pub fn is_safe(&self) -> bool {
        matches!(self, SafetyVerdict::Safe(_))
    }

    /// Returns `true` if the snapshot was proven unsafe.
    #[inline]
    pub fn is_unsafe(&self) -> bool {
        matches!(self, SafetyVerdict::Unsafe(_))
    }

    /// Returns the completion schedule if the verdict is safe.
    #[inline]
    pub fn schedule(&self) -> Option<&CompletionSchedule<T>> {
        match self {
            SafetyVerdict::Safe(schedule) => Some(schedule),
            SafetyVerdict::Unsafe(_) => None,
        }
    }

    /// Returns the blocked report if the verdict is unsafe.
    #[inline]
    pub fn blocked(&self) -> Option<&BlockedReport> {
        match self {
            SafetyVerdict::Safe(_) => None,
            SafetyVerdict::Unsafe(report) => Some(report),
        }
    }
}

impl<T> std::fmt::Display for SafetyVerdict<T>
where
    T: ResourceUnit,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SafetyVerdict::Safe(schedule) => {
                write!(f, "Safe({} completions)", schedule.num_completed())
            }
            SafetyVerdict::Unsafe(report) => write!(f, "Unsafe({} blocked)", report.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rv(entries: &[u32]) -> ResourceVector<u32> {
        ResourceVector::new(entries.to_vec())
    }

    fn pi(i: usize) -> ProcessIndex {
        ProcessIndex::new(i)
    }

    #[test]
    fn test_schedule_accessors() {
        let schedule = CompletionSchedule::new(
            vec![pi(1), pi(0)],
            vec![rv(&[1, 1]), rv(&[2, 1]), rv(&[3, 3])],
            1,
        );

        assert_eq!(schedule.sequence(), &[pi(1), pi(0)]);
        assert_eq!(schedule.num_completed(), 2);
        assert_eq!(schedule.rounds(), 1);
        assert_eq!(schedule.final_available(), &rv(&[3, 3]));
        assert_eq!(schedule.available_log().len(), 3);
    }

    #[test]
    #[should_panic(expected = "called CompletionSchedule::new with inconsistent lengths")]
    fn test_schedule_rejects_mismatched_log() {
        let _ = CompletionSchedule::new(vec![pi(0)], vec![rv(&[1])], 1);
    }

    #[test]
    fn test_empty_schedule_is_valid() {
        let schedule = CompletionSchedule::<u32>::new(vec![], vec![rv(&[3, 3, 2])], 0);
        assert_eq!(schedule.num_completed(), 0);
        assert_eq!(schedule.final_available(), &rv(&[3, 3, 2]));
    }

    #[test]
    fn test_blocked_report() {
        let report = BlockedReport::new(vec![pi(0), pi(2), pi(4)], 2);
        assert_eq!(report.len(), 3);
        assert!(!report.is_empty());
        assert!(report.contains(pi(2)));
        assert!(!report.contains(pi(1)));
        assert_eq!(
            format!("{}", report),
            "Blocked processes: [0, 2, 4] after 2 rounds"
        );
    }

    #[test]
    fn test_verdict_helpers() {
        let safe: SafetyVerdict<u32> =
            SafetyVerdict::Safe(CompletionSchedule::new(vec![], vec![rv(&[1])], 0));
        assert!(safe.is_safe());
        assert!(!safe.is_unsafe());
        assert!(safe.schedule().is_some());
        assert!(safe.blocked().is_none());
        assert_eq!(format!("{}", safe), "Safe(0 completions)");

        let unsafe_verdict: SafetyVerdict<u32> =
            SafetyVerdict::Unsafe(BlockedReport::new(vec![pi(1)], 1));
        assert!(unsafe_verdict.is_unsafe());
        assert!(unsafe_verdict.schedule().is_none());
        assert_eq!(unsafe_verdict.blocked().unwrap().blocked(), &[pi(1)]);
        assert_eq!(format!("{}", unsafe_verdict), "Unsafe(1 blocked)");
    }

    #[test]
    fn test_schedule_display_formatting() {
        let schedule = CompletionSchedule::new(
            vec![pi(1)],
            vec![rv(&[1, 1]), rv(&[3, 1])],
            1,
        );
        let displayed = format!("{}", schedule);
        assert!(displayed.contains("Completion Schedule"));
        assert!(displayed.contains("Rounds: 1"));
        assert!(displayed.contains("[1, 1]"));
        assert!(displayed.contains("[3, 1]"));
    }
}
