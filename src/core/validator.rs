// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Candidate assignment validation
//!
//! Decides whether a `CandidateRequest` may be committed. Three rules
//! are checked, in this order:
//! 1. **Capacity:** the faculty member is not already at their subject
//!    limit (adding a slot to a subject they already teach is exempt)
//! 2. **Conflict:** the slot does not overlap a committed slot
//! 3. **Availability:** the slot fits a declared free window (can be
//!    switched off per roster)
//!
//! Refusals are values, not panics. The caller only mutates state when
//! validation returns `Ok`.

use thiserror::Error;
use tracing::debug;

use crate::core::conflict::{ConflictChecker, ConflictInfo};
use crate::core::types::{CandidateRequest, Day, TimeRange};

/// Reasons a candidate cannot be committed
#[derive(Clone, Debug, Error, PartialEq)]
pub enum AssignmentError {
    /// Faculty member already holds the maximum number of subjects
    #[error("Faculty already holds {current} subject(s), the maximum is {max}")]
    CapacityExceeded { current: usize, max: usize },

    /// Candidate overlaps an existing commitment
    #[error("Schedule conflict with {0}")]
    Conflict(ConflictInfo),

    /// Candidate falls outside the declared free time
    #[error("{day} {range} is outside the faculty's declared availability")]
    OutsideAvailability { day: Day, range: TimeRange },
}

/// Subject limit when neither the roster nor the faculty sets one
pub const DEFAULT_MAX_SUBJECTS: usize = 6;

/// Limits applied when validating a candidate
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CheckPolicy {
    /// Maximum distinct subjects per faculty member
    pub max_subjects: usize,

    /// Refuse candidates outside declared availability
    pub enforce_availability: bool,
}

impl Default for CheckPolicy {
    fn default() -> Self {
        Self {
            max_subjects: DEFAULT_MAX_SUBJECTS,
            enforce_availability: true,
        }
    }
}

/// Checks the subject limit
pub fn validate_capacity(
    checker: &ConflictChecker<'_>,
    subject_code: &str,
    max_subjects: usize,
) -> Result<(), AssignmentError> {
    if checker.teaches(subject_code) {
        return Ok(());
    }

    let current = checker.subject_count();
    if current >= max_subjects {
        Err(AssignmentError::CapacityExceeded {
            current,
            max: max_subjects,
        })
    } else {
        Ok(())
    }
}

/// Checks the candidate slot against committed slots
pub fn validate_no_conflict(
    checker: &ConflictChecker<'_>,
    day: Day,
    range: &TimeRange,
) -> Result<(), AssignmentError> {
    match checker.find_conflict(day, range) {
        Some(conflict) => Err(AssignmentError::Conflict(conflict)),
        None => Ok(()),
    }
}

/// Checks the candidate slot against declared availability
pub fn validate_availability(
    checker: &ConflictChecker<'_>,
    day: Day,
    range: &TimeRange,
) -> Result<(), AssignmentError> {
    if checker.is_available(day, range) {
        Ok(())
    } else {
        Err(AssignmentError::OutsideAvailability { day, range: *range })
    }
}

/// Collects every rule the candidate breaks, in rule order
///
/// Used for reporting. An empty list means the candidate can be
/// committed.
pub fn assess_candidate(
    checker: &ConflictChecker<'_>,
    candidate: &CandidateRequest,
    policy: &CheckPolicy,
) -> Vec<AssignmentError> {
    let mut issues = Vec::new();

    if let Err(e) = validate_capacity(checker, &candidate.subject_code, policy.max_subjects) {
        issues.push(e);
    }
    if let Err(e) = validate_no_conflict(checker, candidate.day, &candidate.range) {
        issues.push(e);
    }
    if policy.enforce_availability {
        if let Err(e) = validate_availability(checker, candidate.day, &candidate.range) {
            issues.push(e);
        }
    }

    debug!(%candidate, issues = issues.len(), "candidate assessed");
    issues
}

/// Validates a candidate, returning the first rule it breaks
///
/// # Example
/// ```
/// use faculty_loading::core::{
///     validate_candidate, Assignment, AssignmentError, Availability, CandidateRequest,
///     CheckPolicy, ConflictChecker, Day, Subject,
/// };
///
/// let held = vec![Assignment::new(
///     "F-001",
///     Subject::new("CS101", "Intro to Computing"),
///     vec!["Monday 09:30-11:00".parse()?],
/// )];
/// let availability = Availability::new().with_window(Day::Monday, "08:00-17:00".parse()?);
/// let checker = ConflictChecker::new(&held, &availability);
///
/// let clash = CandidateRequest::new("F-001", "CS102", Day::Monday, "10:00-10:30".parse()?);
/// assert!(matches!(
///     validate_candidate(&checker, &clash, &CheckPolicy::default()),
///     Err(AssignmentError::Conflict(_))
/// ));
/// # Ok::<(), faculty_loading::core::parser::ParseError>(())
/// ```
pub fn validate_candidate(
    checker: &ConflictChecker<'_>,
    candidate: &CandidateRequest,
    policy: &CheckPolicy,
) -> Result<(), AssignmentError> {
    match assess_candidate(checker, candidate, policy).into_iter().next() {
        Some(issue) => Err(issue),
        None => Ok(()),
    }
}
