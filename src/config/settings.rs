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

//! Roster-wide settings (`[settings]` table)
//!
//! Every field has a default, so a roster without a `[settings]` table
//! (or with only some keys) is valid.

use serde::{Deserialize, Serialize};

use crate::core::{CheckPolicy, Faculty, DEFAULT_MAX_SUBJECTS};

const DEFAULT_MAX_BACKUPS: usize = 10;

/// Settings stored alongside the roster data
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Subject limit for faculty without their own `max_subjects`
    pub max_subjects_per_faculty: usize,

    /// Refuse assignments outside declared availability
    pub enforce_availability: bool,

    /// Number of timestamped backups kept after each commit (the backup
    /// of the commit itself is always kept)
    pub max_backups: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_subjects_per_faculty: DEFAULT_MAX_SUBJECTS,
            enforce_availability: true,
            max_backups: DEFAULT_MAX_BACKUPS,
        }
    }
}

impl Settings {
    /// Validation policy for one faculty member
    ///
    /// A per-faculty `max_subjects` overrides the roster-wide limit.
    pub fn policy_for(&self, faculty: &Faculty) -> CheckPolicy {
        CheckPolicy {
            max_subjects: faculty.max_subjects.unwrap_or(self.max_subjects_per_faculty),
            enforce_availability: self.enforce_availability,
        }
    }
}
