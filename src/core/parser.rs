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

//! src/core/parser.rs
//!
//! Parser for schedule strings
//!
//! This module turns the textual forms used on rosters and on the
//! command line into typed values:
//! - `"HH:MM"` clock times (one or two hour digits, two minute digits)
//! - `"HH:MM-HH:MM"` time ranges
//! - `"Monday 09:30-11:00"` day slots
//! - `"Monday 09:30-11:00; Wednesday 13:00-14:30"` slot lists
//!
//! # Architecture
//! The low-level pieces are nom combinators. The public `parse_*`
//! functions run them with `all_consuming` and translate nom failures
//! into `ParseError`, so trailing garbage is always an error.
//!
//! Malformed input is rejected. Nothing is coerced to midnight or
//! silently dropped.

use nom::{
    bytes::complete::take_while_m_n,
    character::complete::{alpha1, char, space0, space1},
    combinator::{all_consuming, map_opt, map_res},
    IResult, Parser,
};
use thiserror::Error;

use crate::core::types::{Day, DaySlot, TimeOfDay, TimeRange};

/// Separator between slots in the joined form
pub const SLOT_SEPARATOR: char = ';';

/// Parse errors carrying the offending input
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("Invalid time format '{0}': expected HH:MM-HH:MM")]
    InvalidTimeFormat(String),

    #[error("Empty time range '{0}': start must be before end")]
    EmptyRange(String),

    #[error("Invalid day '{0}': expected Monday to Saturday")]
    InvalidDay(String),

    #[error("Invalid slot '{input}': {message}")]
    InvalidSlot { input: String, message: String },
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// Parse a clock time (`9:30`, `09:30`, `24:00`)
///
/// Hours take one or two digits, minutes exactly two. Values outside
/// 00:00..=24:00 are rejected.
pub fn parse_time(input: &str) -> IResult<&str, TimeOfDay> {
    map_opt(
        (
            map_res(take_while_m_n(1, 2, is_digit), str::parse::<u16>),
            char(':'),
            map_res(take_while_m_n(2, 2, is_digit), str::parse::<u16>),
        ),
        |(hour, _, minute)| TimeOfDay::from_hm(hour, minute),
    )
    .parse(input)
}

/// Parse `HH:MM-HH:MM`, tolerating spaces around the dash
///
/// Returns the two endpoints without checking their order; use
/// `parse_range` for a validated `TimeRange`.
pub fn parse_time_pair(input: &str) -> IResult<&str, (TimeOfDay, TimeOfDay)> {
    let (input, (_, start, _, _, _, end, _)) =
        (space0, parse_time, space0, char('-'), space0, parse_time, space0).parse(input)?;

    Ok((input, (start, end)))
}

/// Parse a complete time range string
///
/// # Errors
/// - `InvalidTimeFormat` if the text is not `HH:MM-HH:MM`
/// - `EmptyRange` if the end is not after the start
///
/// # Example
/// ```
/// use faculty_loading::core::parser::{parse_range, ParseError};
///
/// let range = parse_range("09:30-11:00")?;
/// assert_eq!(range.start().minutes(), 570);
///
/// assert!(matches!(parse_range("0930-1100"), Err(ParseError::InvalidTimeFormat(_))));
/// assert!(matches!(parse_range("11:00-09:30"), Err(ParseError::EmptyRange(_))));
/// # Ok::<(), ParseError>(())
/// ```
pub fn parse_range(input: &str) -> Result<TimeRange, ParseError> {
    let (_, (start, end)) = all_consuming(parse_time_pair)
        .parse(input)
        .map_err(|_| ParseError::InvalidTimeFormat(input.trim().to_string()))?;

    TimeRange::new(start, end).ok_or_else(|| ParseError::EmptyRange(input.trim().to_string()))
}

/// Parse a single `"<Day> HH:MM-HH:MM"` slot
pub fn parse_day_slot(input: &str) -> Result<DaySlot, ParseError> {
    let trimmed = input.trim();
    let split: IResult<&str, (&str, &str)> = (alpha1, space1).parse(trimmed);

    match split {
        Ok((rest, (day_word, _))) => {
            let day: Day = day_word.parse()?;
            let range = parse_range(rest)?;
            Ok(DaySlot::new(day, range))
        }
        Err(_) => Err(ParseError::InvalidSlot {
            input: trimmed.to_string(),
            message: "expected '<Day> HH:MM-HH:MM'".to_string(),
        }),
    }
}

/// Parse a `;`-joined slot list
///
/// Empty segments (a trailing `;`, or an empty string) are skipped.
/// The first malformed segment fails the whole list.
///
/// # Example
/// ```
/// use faculty_loading::core::parser::parse_slot_list;
///
/// let slots = parse_slot_list("Monday 09:30-11:00; Wednesday 13:00-14:30")?;
/// assert_eq!(slots.len(), 2);
/// # Ok::<(), faculty_loading::core::parser::ParseError>(())
/// ```
pub fn parse_slot_list(input: &str) -> Result<Vec<DaySlot>, ParseError> {
    input
        .split(SLOT_SEPARATOR)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(parse_day_slot)
        .collect()
}

/// Joins slots back into the `;`-separated display form
pub fn format_slot_list(slots: &[DaySlot]) -> String {
    slots
        .iter()
        .map(|slot| slot.to_string())
        .collect::<Vec<_>>()
        .join(&format!("{} ", SLOT_SEPARATOR))
}

/// Serde adapter storing `Vec<DaySlot>` as one joined string
///
/// Used with `#[serde(with = "...")]` on `Assignment::slots` so roster
/// files keep the familiar `"Monday 09:30-11:00; Wednesday 13:00-14:30"`
/// form.
pub mod slot_list {
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    use super::{format_slot_list, parse_slot_list};
    use crate::core::types::DaySlot;

    pub fn serialize<S: Serializer>(slots: &[DaySlot], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_slot_list(slots))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<DaySlot>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let mut slots = parse_slot_list(&raw).map_err(D::Error::custom)?;
        slots.sort();
        slots.dedup();
        Ok(slots)
    }
}
