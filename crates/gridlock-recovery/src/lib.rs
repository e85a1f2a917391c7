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

//! # Gridlock Recovery
//!
//! Preemptive recovery for snapshots the safety evaluator has proven unsafe.
//! The planner forcibly reclaims the resources of blocked processes, one at a
//! time, re-running the safety evaluation after each reclaim until a
//! completion ordering appears or every blocked process has been tried.
//!
//! ## Modules
//!
//! - `planner`: The greedy preemption loop over the caller's blocked list.
//! - `outcome`: Structured results — a recovered schedule with the preemption
//!   order, or the exhausted tried-set.
//!
//! ## Motivation
//!
//! Preemption is irreversible and monotonic: every reclaim strictly grows the
//! available pool and shrinks total allocation, so each attempt is a valid
//! re-check rather than a backtracking search. The policy is greedy, not
//! optimal; it may miss solutions a different preemption order would find,
//! which is a deliberate simplicity tradeoff. A `Failed` outcome is a normal
//! terminal result, not a fault — escalation beyond preemption is the
//! caller's responsibility.

pub mod outcome;
pub mod planner;
