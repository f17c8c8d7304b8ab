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

//! Faculty Loading
//!
//! Conflict and availability checking for faculty-loading assignments,
//! with a small file-backed roster around it.
//!
//! # Features
//!
//! - **Conflict Detection:** A proposed day/time is checked against the
//!   faculty member's committed slots (back-to-back slots are fine)
//! - **Availability Containment:** The slot must fit one declared free window
//! - **Subject Limits:** Faculty cannot exceed their maximum subject count
//! - **Batch Assignment:** One subject across several days in one action
//! - **Audit:** Finds double bookings already present in a roster
//! - **Atomic Operations:** Safe roster writes with timestamped backups
//!
//! # Architecture
//!
//! - **`core`:** Pure logic (types, parser, conflict checks, validation)
//! - **`config`:** Roster file handling (load, atomic save, backups)
//!
//! # Examples
//!
//! ## Checking a candidate slot
//!
//! ```
//! use faculty_loading::core::{Assignment, Availability, ConflictChecker, Day, Subject};
//!
//! let held = vec![Assignment::new(
//!     "F-001",
//!     Subject::new("CS101", "Intro to Computing"),
//!     vec!["Monday 09:30-11:00".parse()?],
//! )];
//! let availability = Availability::new().with_window(Day::Tuesday, "09:30-12:30".parse()?);
//! let checker = ConflictChecker::new(&held, &availability);
//!
//! // Touching the end of an existing slot is not a conflict
//! assert!(checker.find_conflict(Day::Monday, &"11:00-12:30".parse()?).is_none());
//!
//! // Fully inside the Tuesday window
//! assert!(checker.is_available(Day::Tuesday, &"09:30-11:00".parse()?));
//! # Ok::<(), faculty_loading::core::ParseError>(())
//! ```
//!
//! ## Committing to a roster file
//!
//! ```no_run
//! use faculty_loading::config::RosterManager;
//! use faculty_loading::core::Day;
//! use std::path::PathBuf;
//!
//! let manager = RosterManager::new(PathBuf::from("roster.toml"))?;
//! let mut roster = manager.load()?;
//!
//! let plan = roster.assign_batch(
//!     "F-001",
//!     "CS102",
//!     [Day::Monday, Day::Wednesday],
//!     "13:00-14:30".parse()?,
//! )?;
//! println!("Assigned on {} day(s)", plan.count);
//!
//! manager.begin_transaction()?.commit(&roster)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod config;
pub mod core;

// Re-export commonly used types for convenience
pub use crate::core::{Assignment, CandidateRequest, ConflictChecker, Day, DaySlot, TimeRange};
