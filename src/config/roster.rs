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

//! In-memory roster document
//!
//! A `Roster` is the state the conflict checks run against: faculty
//! (with their availability), the subject catalogue, and committed
//! assignments. It is plain data loaded from and saved to TOML; all
//! mutation goes through `assign`, `assign_batch` and `unassign`, which
//! validate before touching anything.
//!
//! # Example
//! ```
//! use faculty_loading::config::Roster;
//! use faculty_loading::core::{CandidateRequest, Day};
//!
//! let mut roster = Roster::from_toml(r#"
//! [[faculty]]
//! id = "F-001"
//! name = "Ada Reyes"
//! [faculty.availability]
//! Monday = ["09:30-12:30"]
//!
//! [[subjects]]
//! code = "CS101"
//! name = "Intro to Computing"
//! "#)?;
//!
//! let candidate = CandidateRequest::new("F-001", "CS101", Day::Monday, "09:30-11:00".parse()?);
//! roster.assign(&candidate)?;
//! assert_eq!(roster.assignments_for("F-001").count(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::settings::Settings;
use crate::core::{
    assess_candidate, audit, count_assignable_days, validate_candidate,
    validator::validate_capacity, Assignment, AssignmentError, BatchPlan, CandidateRequest,
    ConflictChecker, Day, DaySlot, DoubleBooking, Faculty, Subject, TimeRange,
};

/// Roster-level failures (bad references or a refused assignment)
#[derive(Clone, Debug, Error, PartialEq)]
pub enum RosterError {
    #[error("Unknown faculty '{0}'")]
    UnknownFaculty(String),

    #[error("Unknown subject '{0}'")]
    UnknownSubject(String),

    #[error("{faculty_id} has no matching slots for {subject_code}")]
    NotAssigned {
        faculty_id: String,
        subject_code: String,
    },

    #[error("Assignment refused: {0}")]
    Rejected(#[from] AssignmentError),
}

/// Complete roster file contents
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Roster {
    #[serde(default)]
    pub settings: Settings,

    #[serde(default)]
    pub faculty: Vec<Faculty>,

    #[serde(default)]
    pub subjects: Vec<Subject>,

    #[serde(default)]
    pub assignments: Vec<Assignment>,
}

impl Roster {
    /// Parses a roster from TOML text
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialises the roster back to TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn faculty(&self, faculty_id: &str) -> Result<&Faculty, RosterError> {
        self.faculty
            .iter()
            .find(|f| f.id == faculty_id)
            .ok_or_else(|| RosterError::UnknownFaculty(faculty_id.to_string()))
    }

    pub fn subject(&self, subject_code: &str) -> Result<&Subject, RosterError> {
        self.subjects
            .iter()
            .find(|s| s.code == subject_code)
            .ok_or_else(|| RosterError::UnknownSubject(subject_code.to_string()))
    }

    /// Committed assignments of one faculty member, in file order
    pub fn assignments_for<'a>(&'a self, faculty_id: &'a str) -> impl Iterator<Item = &'a Assignment> + 'a {
        self.assignments
            .iter()
            .filter(move |a| a.faculty_id == faculty_id)
    }

    /// Conflict checker over one faculty member's current load
    pub fn checker_for(&self, faculty_id: &str) -> Result<ConflictChecker<'_>, RosterError> {
        let faculty = self.faculty(faculty_id)?;
        let assignments = self.assignments.iter().filter(|a| a.faculty_id == faculty_id);

        Ok(ConflictChecker::new(assignments, &faculty.availability))
    }

    /// Every rule the candidate would break, without committing anything
    pub fn check(&self, candidate: &CandidateRequest) -> Result<Vec<AssignmentError>, RosterError> {
        self.subject(&candidate.subject_code)?;
        let faculty = self.faculty(&candidate.faculty_id)?;
        let policy = self.settings.policy_for(faculty);
        let checker = self.checker_for(&candidate.faculty_id)?;

        Ok(assess_candidate(&checker, candidate, &policy))
    }

    /// Validates and commits a single-day candidate
    ///
    /// A slot for a subject the faculty member already teaches is added
    /// to that assignment; otherwise a new assignment is created. Nothing
    /// changes when validation fails.
    pub fn assign(&mut self, candidate: &CandidateRequest) -> Result<(), RosterError> {
        let subject = self.subject(&candidate.subject_code)?.clone();

        {
            let faculty = self.faculty(&candidate.faculty_id)?;
            let policy = self.settings.policy_for(faculty);
            let checker = self.checker_for(&candidate.faculty_id)?;

            if let Err(e) = validate_candidate(&checker, candidate, &policy) {
                warn!(%candidate, reason = %e, "assignment refused");
                return Err(e.into());
            }
        }

        self.commit_slot(&candidate.faculty_id, subject, candidate.slot());
        info!(%candidate, "assignment committed");
        Ok(())
    }

    /// Assigns one subject on several days at once
    ///
    /// Days that are unavailable (when availability is enforced) or that
    /// conflict are skipped without error; the returned plan says which
    /// days were committed. The subject limit is checked once up front
    /// and fails the whole batch.
    pub fn assign_batch<D>(
        &mut self,
        faculty_id: &str,
        subject_code: &str,
        days: D,
        range: TimeRange,
    ) -> Result<BatchPlan, RosterError>
    where
        D: IntoIterator<Item = Day>,
    {
        let subject = self.subject(subject_code)?.clone();

        let plan = {
            let faculty = self.faculty(faculty_id)?;
            let policy = self.settings.policy_for(faculty);
            let checker = self.checker_for(faculty_id)?;

            validate_capacity(&checker, subject_code, policy.max_subjects)?;

            count_assignable_days(
                days,
                |day| !policy.enforce_availability || checker.is_available(day, &range),
                |day| checker.find_conflict(day, &range).is_some(),
            )
        };

        if plan.is_empty() {
            warn!(faculty_id, subject_code, %range, "no assignable days in batch");
            return Ok(plan);
        }

        for &day in &plan.assignable_days {
            self.commit_slot(faculty_id, subject.clone(), DaySlot::new(day, range));
        }

        info!(faculty_id, subject_code, %range, count = plan.count, "batch assignment committed");
        Ok(plan)
    }

    /// Removes a faculty member's slots for a subject
    ///
    /// With `day` set only that day's slots go; otherwise the whole
    /// assignment is dropped. Returns the number of slots removed.
    pub fn unassign(
        &mut self,
        faculty_id: &str,
        subject_code: &str,
        day: Option<Day>,
    ) -> Result<usize, RosterError> {
        self.faculty(faculty_id)?;

        let mut removed = 0;
        for assignment in self
            .assignments
            .iter_mut()
            .filter(|a| a.faculty_id == faculty_id && a.subject.code == subject_code)
        {
            let before = assignment.slots.len();
            assignment.slots.retain(|slot| day.is_some_and(|d| slot.day != d));
            removed += before - assignment.slots.len();
        }

        if removed == 0 {
            return Err(RosterError::NotAssigned {
                faculty_id: faculty_id.to_string(),
                subject_code: subject_code.to_string(),
            });
        }

        self.assignments.retain(|a| !a.slots.is_empty());
        info!(faculty_id, subject_code, removed, "slots unassigned");
        Ok(removed)
    }

    /// All double bookings already present in the roster
    pub fn audit(&self) -> Vec<DoubleBooking> {
        audit(&self.assignments)
    }

    fn commit_slot(&mut self, faculty_id: &str, subject: Subject, slot: DaySlot) {
        let existing = self
            .assignments
            .iter()
            .position(|a| a.faculty_id == faculty_id && a.subject.code == subject.code);

        match existing {
            Some(pos) => self.assignments[pos].add_slot(slot),
            None => self
                .assignments
                .push(Assignment::new(faculty_id, subject, vec![slot])),
        }
    }
}
