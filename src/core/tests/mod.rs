//! Core module tests
//!
//! Contains test suites for core functionality:
//! - Conflict and availability checks
//! - Candidate validation tests
//! - Parser tests
//! - Type tests (Day, TimeRange, Assignment, etc.)

#[cfg(test)]
mod conflict_tests;
