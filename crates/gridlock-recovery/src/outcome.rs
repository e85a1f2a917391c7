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

use gridlock_model::{index::ProcessIndex, num::ResourceUnit};
use gridlock_safety::verdict::CompletionSchedule;

/// The outcome of one recovery attempt over an unsafe snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RecoveryOutcome<T> {
    /// Preemption produced a safe snapshot. Carries the completion schedule
    /// of the recovered system and the processes that were forcibly
    /// preempted, in preemption order.
    Recovered {
        /// The safe completion ordering found after the last preemption.
        schedule: CompletionSchedule<T>,
        /// Processes whose allocations were reclaimed, in preemption order.
        preempted: Vec<ProcessIndex>,
    },
    /// Every blocked process was preempted and no safe ordering appeared.
    /// Carries the processes that were tried, in preemption order.
    Failed {
        /// All preempted processes, in preemption order.
        tried: Vec<ProcessIndex>,
    },
}

impl<T> RecoveryOutcome<T>
where
    T: ResourceUnit,
{
    /// Returns `true` if recovery reached a safe ordering.
    #[inline]
    pub fn is_recovered(&self) -> bool {
        matches!(self, RecoveryOutcome::Recovered { .. })
    }

    /// Returns `true` if recovery exhausted every blocked process.
    #[inline]
    pub fn is_failed(&self) -> bool {
        matches!(self, RecoveryOutcome::Failed { .. })
    }

    /// Returns the recovered completion schedule, if any.
    #[inline]
    pub fn schedule(&self) -> Option<&CompletionSchedule<T>> {
        match self {
            RecoveryOutcome::Recovered { schedule, .. } => Some(schedule),
            RecoveryOutcome::Failed { .. } => None,
        }
    }

    /// Returns the processes preempted during this attempt, in preemption
    /// order, regardless of whether recovery succeeded.
    #[inline]
    pub fn preempted(&self) -> &[ProcessIndex] {
        match self {
            RecoveryOutcome::Recovered { preempted, .. } => preempted,
            RecoveryOutcome::Failed { tried } => tried,
        }
    }
}

impl<T> std::fmt::Display for RecoveryOutcome<T>
where
    T: ResourceUnit,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecoveryOutcome::Recovered {
                schedule,
                preempted,
            } => write!(
                f,
                "Recovered({} completions after {} preemptions)",
                schedule.num_completed(),
                preempted.len()
            ),
            RecoveryOutcome::Failed { tried } => {
                write!(f, "Failed({} processes tried)", tried.len())
            }
        }
    }
}
