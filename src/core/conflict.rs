//! Scheduling conflict and availability checks
//!
//! Everything here is a pure function over data the caller owns: the
//! faculty member's committed assignments, their declared availability,
//! and a candidate day/time. Nothing is cached between calls, so every
//! check is idempotent and safe to repeat on each UI or CLI interaction.
//!
//! # Rules
//! - Two ranges conflict when `a.start < b.end && b.start < a.end`.
//!   Back-to-back slots (09:30-11:00 then 11:00-12:30) do not conflict.
//! - A candidate is available when one single declared window contains
//!   it. Adjacent windows are not merged.
//! - `find_conflict` stops at the first overlap. `audit` is the
//!   exhaustive variant for already-committed data.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;
use tracing::debug;

use crate::core::types::{Assignment, Availability, Day, TimeRange};

/// Returns true iff the two ranges overlap (touching endpoints do not).
pub fn ranges_overlap(a: &TimeRange, b: &TimeRange) -> bool {
    a.overlaps(b)
}

/// The existing slot a candidate collides with, ready for display.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ConflictInfo {
    pub subject_code: String,
    pub subject_name: String,
    pub day: Day,
    pub range: TimeRange,
}

impl fmt::Display for ConflictInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({} {})",
            self.subject_code, self.subject_name, self.day, self.range
        )
    }
}

/// Finds the first committed slot on `day` that overlaps `candidate`.
///
/// Assignments are visited in the order given, and slots within each
/// assignment in stored order. Returns at most one conflict; callers
/// needing every overlap should use [`audit`].
pub fn find_conflict<'a, I>(assignments: I, day: Day, candidate: &TimeRange) -> Option<ConflictInfo>
where
    I: IntoIterator<Item = &'a Assignment>,
{
    assignments.into_iter().find_map(|assignment| {
        assignment
            .slots_on(day)
            .find(|slot| ranges_overlap(&slot.range, candidate))
            .map(|slot| ConflictInfo {
                subject_code: assignment.subject.code.clone(),
                subject_name: assignment.subject.name.clone(),
                day,
                range: slot.range,
            })
    })
}

/// True iff a single window fully contains `candidate`.
///
/// Bounds are inclusive: a candidate may start exactly when a window
/// opens and end exactly when it closes.
pub fn is_within_availability(windows: &[TimeRange], candidate: &TimeRange) -> bool {
    windows.iter().any(|window| window.contains(candidate))
}

/// Days on which a multi-day assignment can go ahead
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct BatchPlan {
    pub assignable_days: BTreeSet<Day>,
    pub count: usize,
}

impl BatchPlan {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Plans a batch assignment over `selected_days`.
///
/// A day is kept iff `allowed(day)` holds and `has_conflict(day)` does
/// not. Rejected days are dropped without an error; only the resulting
/// count is reported. Repeated days are counted once.
pub fn count_assignable_days<D, A, C>(selected_days: D, mut allowed: A, mut has_conflict: C) -> BatchPlan
where
    D: IntoIterator<Item = Day>,
    A: FnMut(Day) -> bool,
    C: FnMut(Day) -> bool,
{
    let assignable_days: BTreeSet<Day> = selected_days
        .into_iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .filter(|&day| allowed(day) && !has_conflict(day))
        .collect();

    BatchPlan {
        count: assignable_days.len(),
        assignable_days,
    }
}

/// Checks candidates against one faculty member's load.
///
/// Borrows the committed assignments and declared availability; holds
/// no other state.
///
/// # Example
/// ```
/// use faculty_loading::core::{Assignment, Availability, ConflictChecker, Day, Subject};
///
/// let held = vec![Assignment::new(
///     "F-001",
///     Subject::new("CS101", "Intro to Computing"),
///     vec!["Monday 09:30-11:00".parse()?],
/// )];
/// let availability = Availability::new().with_window(Day::Monday, "08:00-17:00".parse()?);
///
/// let checker = ConflictChecker::new(&held, &availability);
/// assert!(checker.find_conflict(Day::Monday, &"11:00-12:30".parse()?).is_none());
/// assert!(checker.find_conflict(Day::Monday, &"10:00-10:30".parse()?).is_some());
/// # Ok::<(), faculty_loading::core::parser::ParseError>(())
/// ```
pub struct ConflictChecker<'a> {
    assignments: Vec<&'a Assignment>,
    availability: &'a Availability,
}

impl<'a> ConflictChecker<'a> {
    pub fn new<I>(assignments: I, availability: &'a Availability) -> Self
    where
        I: IntoIterator<Item = &'a Assignment>,
    {
        Self {
            assignments: assignments.into_iter().collect(),
            availability,
        }
    }

    /// First committed slot on `day` overlapping `range`
    pub fn find_conflict(&self, day: Day, range: &TimeRange) -> Option<ConflictInfo> {
        let conflict = find_conflict(self.assignments.iter().copied(), day, range);
        debug!(%day, %range, conflict = ?conflict.as_ref().map(|c| &c.subject_code), "conflict check");
        conflict
    }

    /// Whether `range` fits inside one declared window on `day`
    pub fn is_available(&self, day: Day, range: &TimeRange) -> bool {
        let available = is_within_availability(self.availability.windows_for(day), range);
        debug!(%day, %range, available, "availability check");
        available
    }

    /// Batch plan requiring both availability and no conflict on each day
    pub fn plan_batch<D>(&self, days: D, range: &TimeRange) -> BatchPlan
    where
        D: IntoIterator<Item = Day>,
    {
        count_assignable_days(
            days,
            |day| self.is_available(day, range),
            |day| self.find_conflict(day, range).is_some(),
        )
    }

    /// Number of distinct subjects already held
    pub fn subject_count(&self) -> usize {
        self.assignments
            .iter()
            .map(|assignment| assignment.subject.code.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    /// Whether the faculty member already teaches `subject_code`
    pub fn teaches(&self, subject_code: &str) -> bool {
        self.assignments
            .iter()
            .any(|assignment| assignment.subject.code == subject_code)
    }
}

/// Two committed slots of one faculty member that overlap
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct DoubleBooking {
    pub faculty_id: String,
    pub first: ConflictInfo,
    pub second: ConflictInfo,
}

impl fmt::Display for DoubleBooking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} overlaps {}", self.faculty_id, self.first, self.second)
    }
}

/// Reports every overlapping pair of committed slots, per faculty and day.
///
/// Results are ordered by faculty id, then day, then slot start.
pub fn audit(assignments: &[Assignment]) -> Vec<DoubleBooking> {
    // (faculty, day) -> every slot held that day
    let mut by_faculty_day: BTreeMap<(&str, Day), Vec<ConflictInfo>> = BTreeMap::new();

    for assignment in assignments {
        for slot in &assignment.slots {
            by_faculty_day
                .entry((assignment.faculty_id.as_str(), slot.day))
                .or_default()
                .push(ConflictInfo {
                    subject_code: assignment.subject.code.clone(),
                    subject_name: assignment.subject.name.clone(),
                    day: slot.day,
                    range: slot.range,
                });
        }
    }

    let mut bookings = Vec::new();

    for ((faculty_id, _), mut slots) in by_faculty_day {
        slots.sort_by_key(|info| info.range);

        for (i, first) in slots.iter().enumerate() {
            for second in &slots[i + 1..] {
                if ranges_overlap(&first.range, &second.range) {
                    bookings.push(DoubleBooking {
                        faculty_id: faculty_id.to_string(),
                        first: first.clone(),
                        second: second.clone(),
                    });
                }
            }
        }
    }

    bookings
}
