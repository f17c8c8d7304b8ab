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

//! src/core/types.rs
//!
//! Core type definitions for faculty loading
//!
//! This module defines the fundamental types used throughout the application:
//! - `Day`: Teaching days (Monday to Saturday, no Sunday classes)
//! - `TimeOfDay` / `TimeRange`: Minute-resolution clock times and spans
//! - `DaySlot`: A time range bound to a weekday
//! - `Assignment`: A subject given to a faculty member, with its slots
//! - `Availability` / `Faculty`: Declared free time per faculty member
//! - `CandidateRequest`: A proposed, not yet committed, assignment
//!
//! `TimeRange` can only be built with `start < end`, so every range in
//! the system is non-empty.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::core::parser::{self, ParseError};

/// Teaching day of the week
///
/// Ordered Monday first. Sunday is not a teaching day and is rejected
/// by the parser.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Day {
    /// All teaching days in week order
    pub const ALL: [Day; 6] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
    ];

    /// Full English name, as used in slot strings
    pub fn name(self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Day {
    type Err = ParseError;

    /// Accepts full names and three-letter abbreviations, any case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();

        Day::ALL
            .into_iter()
            .find(|day| {
                let name = day.name().to_lowercase();
                lowered == name || (lowered.len() == 3 && name.starts_with(&lowered))
            })
            .ok_or_else(|| ParseError::InvalidDay(s.trim().to_string()))
    }
}

impl TryFrom<String> for Day {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Day> for String {
    fn from(day: Day) -> Self {
        day.name().to_string()
    }
}

/// Minutes since midnight
///
/// Valid values are `0..=1440`. 24:00 exists so a range may end at
/// midnight; it is never a valid start.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Last representable minute (24:00)
    pub const MIDNIGHT_END: u16 = 24 * 60;

    /// Builds a time from hours and minutes, `None` when out of range
    pub fn from_hm(hour: u16, minute: u16) -> Option<Self> {
        if minute >= 60 || hour > 24 || (hour == 24 && minute != 0) {
            return None;
        }

        Some(Self(hour * 60 + minute))
    }

    pub fn from_minutes(minutes: u16) -> Option<Self> {
        (minutes <= Self::MIDNIGHT_END).then_some(Self(minutes))
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    pub fn minute(self) -> u16 {
        self.0 % 60
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// A half-open span of time within one day, `[start, end)`
///
/// Serialised as `"HH:MM-HH:MM"`.
///
/// # Example
/// ```
/// use faculty_loading::core::TimeRange;
///
/// let range: TimeRange = "09:30-11:00".parse()?;
/// assert_eq!(range.duration_minutes(), 90);
/// assert_eq!(range.to_string(), "09:30-11:00");
/// # Ok::<(), faculty_loading::core::parser::ParseError>(())
/// ```
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeRange {
    start: TimeOfDay,
    end: TimeOfDay,
}

impl TimeRange {
    /// Creates a range, `None` unless `start < end`
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    pub fn start(&self) -> TimeOfDay {
        self.start
    }

    pub fn end(&self) -> TimeOfDay {
        self.end
    }

    pub fn duration_minutes(&self) -> u16 {
        self.end.minutes() - self.start.minutes()
    }

    /// True when the two ranges share at least one minute.
    ///
    /// Touching ranges (one ends exactly when the other starts) do not
    /// overlap.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// True when `other` lies entirely inside this range (bounds inclusive)
    pub fn contains(&self, other: &TimeRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl FromStr for TimeRange {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parser::parse_range(s)
    }
}

impl TryFrom<String> for TimeRange {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeRange> for String {
    fn from(range: TimeRange) -> Self {
        range.to_string()
    }
}

/// A time range on a particular teaching day
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct DaySlot {
    pub day: Day,
    pub range: TimeRange,
}

impl DaySlot {
    pub fn new(day: Day, range: TimeRange) -> Self {
        Self { day, range }
    }
}

impl fmt::Display for DaySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.day, self.range)
    }
}

impl FromStr for DaySlot {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parser::parse_day_slot(s)
    }
}

/// A subject from the course catalogue
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Subject {
    /// Catalogue code (e.g., "CS101"), unique within a roster
    pub code: String,

    /// Display name
    pub name: String,
}

impl Subject {
    pub fn new(code: &str, name: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.name)
    }
}

/// A subject given to a faculty member on one or more day slots
///
/// On disk the slots use the `;`-joined form
/// (`"Monday 09:30-11:00; Wednesday 13:00-14:30"`); in memory they
/// are a plain list, kept sorted by day then start time.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Assignment {
    pub faculty_id: String,

    #[serde(with = "crate::core::parser::slot_list")]
    pub slots: Vec<DaySlot>,

    pub subject: Subject,
}

impl Assignment {
    pub fn new(faculty_id: &str, subject: Subject, mut slots: Vec<DaySlot>) -> Self {
        slots.sort();
        slots.dedup();

        Self {
            faculty_id: faculty_id.to_string(),
            subject,
            slots,
        }
    }

    /// Slots falling on `day`, in stored order
    pub fn slots_on(&self, day: Day) -> impl Iterator<Item = &DaySlot> + '_ {
        self.slots.iter().filter(move |slot| slot.day == day)
    }

    /// Adds a slot, keeping the list sorted and free of duplicates
    pub fn add_slot(&mut self, slot: DaySlot) {
        if let Err(pos) = self.slots.binary_search(&slot) {
            self.slots.insert(pos, slot);
        }
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} → {}: {}",
            self.faculty_id,
            self.subject,
            parser::format_slot_list(&self.slots)
        )
    }
}

/// Declared free time of one faculty member
///
/// Windows for a day are kept in ascending order. Windows are never
/// merged: a candidate must fit inside a single window to count as
/// available.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(from = "BTreeMap<Day, Vec<TimeRange>>", into = "BTreeMap<Day, Vec<TimeRange>>")]
pub struct Availability {
    windows: BTreeMap<Day, Vec<TimeRange>>,
}

impl From<BTreeMap<Day, Vec<TimeRange>>> for Availability {
    fn from(raw: BTreeMap<Day, Vec<TimeRange>>) -> Self {
        let mut availability = Self::new();
        for (day, ranges) in raw {
            for range in ranges {
                availability.add_window(day, range);
            }
        }
        availability
    }
}

impl From<Availability> for BTreeMap<Day, Vec<TimeRange>> {
    fn from(availability: Availability) -> Self {
        availability.windows
    }
}

impl Availability {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a free window for `day`
    pub fn add_window(&mut self, day: Day, range: TimeRange) {
        let windows = self.windows.entry(day).or_default();
        if let Err(pos) = windows.binary_search(&range) {
            windows.insert(pos, range);
        }
    }

    /// Builder-style variant of `add_window`
    pub fn with_window(mut self, day: Day, range: TimeRange) -> Self {
        self.add_window(day, range);
        self
    }

    /// Free windows on `day`, empty when none are declared
    pub fn windows_for(&self, day: Day) -> &[TimeRange] {
        self.windows.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Days with at least one declared window, in week order
    pub fn days(&self) -> impl Iterator<Item = Day> + '_ {
        self.windows
            .iter()
            .filter(|(_, windows)| !windows.is_empty())
            .map(|(day, _)| *day)
    }

    pub fn is_empty(&self) -> bool {
        self.windows.values().all(Vec::is_empty)
    }
}

/// A faculty member who can be loaded with subjects
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Faculty {
    /// Unique identifier (e.g., "F-001")
    pub id: String,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,

    /// Per-faculty override for the roster-wide subject limit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_subjects: Option<usize>,

    #[serde(default)]
    pub availability: Availability,
}

impl Faculty {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            department: None,
            max_subjects: None,
            availability: Availability::new(),
        }
    }
}

impl fmt::Display for Faculty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// A proposed assignment that has not been committed yet
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct CandidateRequest {
    pub faculty_id: String,
    pub subject_code: String,
    pub day: Day,
    pub range: TimeRange,
}

impl CandidateRequest {
    pub fn new(faculty_id: &str, subject_code: &str, day: Day, range: TimeRange) -> Self {
        Self {
            faculty_id: faculty_id.to_string(),
            subject_code: subject_code.to_string(),
            day,
            range,
        }
    }

    pub fn slot(&self) -> DaySlot {
        DaySlot::new(self.day, self.range)
    }
}

impl fmt::Display for CandidateRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} → {} on {} {}",
            self.faculty_id, self.subject_code, self.day, self.range
        )
    }
}
