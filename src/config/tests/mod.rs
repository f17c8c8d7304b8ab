//! Config module tests
//!
//! - Roster manager: file validation, backups, restore
//! - Transactions: commit, rollback, retention
//! - Roster document: TOML round trip, assign/unassign, batch, settings

#[cfg(test)]
mod transaction_tests;

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Small roster used across the config tests
pub(crate) const SAMPLE_ROSTER: &str = r#"
[settings]
max_subjects_per_faculty = 3

[[faculty]]
id = "F-001"
name = "Ada Reyes"
department = "Computer Science"

[faculty.availability]
Monday = ["09:30-12:30", "13:00-17:00"]
Tuesday = ["09:30-12:30"]
Friday = ["11:00-12:30", "13:00-14:30"]

[[faculty]]
id = "F-002"
name = "Ben Okafor"
max_subjects = 1

[faculty.availability]
Wednesday = ["08:00-17:00"]

[[subjects]]
code = "CS101"
name = "Intro to Computing"

[[subjects]]
code = "CS102"
name = "Data Structures"

[[subjects]]
code = "CS103"
name = "Discrete Mathematics"

[[subjects]]
code = "CS104"
name = "Computer Organisation"

[[assignments]]
faculty_id = "F-001"
slots = "Monday 09:30-11:00"
subject = { code = "CS101", name = "Intro to Computing" }
"#;

/// Helper: Creates a temporary roster file for testing.
pub(crate) fn create_test_roster() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let roster_path = temp_dir.path().join("roster.toml");
    fs::write(&roster_path, SAMPLE_ROSTER).unwrap();
    (temp_dir, roster_path)
}
