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

//! src/core/mod.rs
//!
//! Core scheduling logic
//!
//! This module contains the data structures and decision functions for
//! faculty loading:
//! - Type definitions for days, time ranges, slots and assignments
//! - Parsing of `HH:MM-HH:MM` and `;`-joined slot strings
//! - Conflict and availability checks
//! - Candidate validation (capacity, conflict, availability)
//!
//! Nothing here performs I/O, so all of it is unit-testable without a
//! roster file.

pub mod conflict;
pub mod parser;
pub mod types;
pub mod validator;

pub use conflict::{
    audit, count_assignable_days, find_conflict, is_within_availability, ranges_overlap,
    BatchPlan, ConflictChecker, ConflictInfo, DoubleBooking,
};
pub use parser::{parse_range, ParseError};
pub use types::*;
pub use validator::{
    assess_candidate, validate_candidate, AssignmentError, CheckPolicy, DEFAULT_MAX_SUBJECTS,
};

#[cfg(test)]
mod tests;
