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

use super::create_test_roster;
use crate::config::*;
use crate::core::{CandidateRequest, Day};
use std::{fs, thread, time::Duration};

/// Helper to create a valid candidate for the sample roster
fn tuesday_cs102() -> CandidateRequest {
    CandidateRequest::new("F-001", "CS102", Day::Tuesday, "09:30-11:00".parse().unwrap())
}

// ============================================================================
// RosterTransaction Tests
// ============================================================================

#[test]
fn test_transaction_basic_flow() {
    let (_temp_dir, roster_path) = create_test_roster();
    let manager = RosterManager::new(roster_path.clone()).unwrap();

    let mut roster = manager.load().unwrap();
    roster.assign(&tuesday_cs102()).unwrap();

    // Begin transaction (creates backup)
    let tx = manager.begin_transaction().unwrap();
    assert_eq!(manager.list_backups().unwrap().len(), 1, "Should have created one backup");

    tx.commit(&roster).unwrap();

    // Reloading gives back what was committed
    let reloaded = manager.load().unwrap();
    assert_eq!(reloaded, roster);
    assert_eq!(reloaded.assignments_for("F-001").count(), 2);

    // Backup survives the commit
    assert_eq!(manager.list_backups().unwrap().len(), 1);
}

#[test]
fn test_transaction_backup_holds_original() {
    let (_temp_dir, roster_path) = create_test_roster();
    let manager = RosterManager::new(roster_path.clone()).unwrap();
    let original = fs::read_to_string(&roster_path).unwrap();

    let tx = RosterTransaction::begin(&manager).unwrap();
    assert_eq!(fs::read_to_string(tx.backup_path()).unwrap(), original);
}

#[test]
fn test_transaction_rollback() {
    let (_temp_dir, roster_path) = create_test_roster();
    let manager = RosterManager::new(roster_path.clone()).unwrap();
    let original = fs::read_to_string(&roster_path).unwrap();

    let tx = RosterTransaction::begin(&manager).unwrap();

    // Something else scribbles over the roster, then we roll back
    fs::write(&roster_path, "garbage").unwrap();
    tx.rollback().unwrap();

    assert_eq!(fs::read_to_string(&roster_path).unwrap(), original);

    // Rollback can be repeated
    tx.rollback().unwrap();
    assert_eq!(fs::read_to_string(&roster_path).unwrap(), original);
}

#[test]
fn test_transaction_rollback_after_content_commit() {
    let (_temp_dir, roster_path) = create_test_roster();
    let manager = RosterManager::new(roster_path.clone()).unwrap();
    let original = fs::read_to_string(&roster_path).unwrap();

    let tx = RosterTransaction::begin(&manager).unwrap();
    tx.commit_content("[settings]\nmax_backups = 3\n").unwrap();
    assert_ne!(fs::read_to_string(&roster_path).unwrap(), original);

    tx.rollback().unwrap();
    assert_eq!(fs::read_to_string(&roster_path).unwrap(), original);
}

#[test]
fn test_commit_prunes_backups_to_setting() {
    let (_temp_dir, roster_path) = create_test_roster();
    let manager = RosterManager::new(roster_path.clone()).unwrap();

    let mut roster = manager.load().unwrap();
    roster.settings.max_backups = 2;

    for _ in 0..3 {
        let tx = manager.begin_transaction().unwrap();
        tx.commit(&roster).unwrap();
        thread::sleep(Duration::from_secs(1));
    }

    assert_eq!(manager.list_backups().unwrap().len(), 2);
}

#[test]
fn test_back_to_back_commits_keep_separate_backups() {
    let (_temp_dir, roster_path) = create_test_roster();
    let manager = RosterManager::new(roster_path.clone()).unwrap();
    let original = fs::read_to_string(&roster_path).unwrap();

    let mut roster = manager.load().unwrap();
    roster.assign(&tuesday_cs102()).unwrap();

    let first = manager.begin_transaction().unwrap();
    let first_backup = first.backup_path().clone();
    first.commit(&roster).unwrap();
    let after_first = fs::read_to_string(&roster_path).unwrap();

    roster.unassign("F-001", "CS102", None).unwrap();
    let second = manager.begin_transaction().unwrap();
    let second_backup = second.backup_path().clone();
    second.commit(&roster).unwrap();

    assert_ne!(first_backup, second_backup);
    assert_eq!(manager.list_backups().unwrap().len(), 2);
    assert_eq!(fs::read_to_string(&first_backup).unwrap(), original);
    assert_eq!(fs::read_to_string(&second_backup).unwrap(), after_first);
}

#[test]
fn test_zero_max_backups_keeps_latest_backup() {
    let (_temp_dir, roster_path) = create_test_roster();
    let manager = RosterManager::new(roster_path.clone()).unwrap();

    let mut roster = manager.load().unwrap();
    roster.settings.max_backups = 0;
    manager.begin_transaction().unwrap().commit(&roster).unwrap();
    let before_tx = fs::read_to_string(&roster_path).unwrap();

    roster.assign(&tuesday_cs102()).unwrap();
    let tx = manager.begin_transaction().unwrap();
    let backup = tx.backup_path().clone();
    tx.commit(&roster).unwrap();

    // Only the backup of the latest commit survives, and it can be restored
    assert_eq!(manager.list_backups().unwrap(), vec![backup.clone()]);
    manager.restore_backup(&backup).unwrap();
    assert_eq!(fs::read_to_string(&roster_path).unwrap(), before_tx);
}

#[test]
fn test_refused_assignment_never_reaches_disk() {
    let (_temp_dir, roster_path) = create_test_roster();
    let manager = RosterManager::new(roster_path.clone()).unwrap();
    let original = fs::read_to_string(&roster_path).unwrap();

    let mut roster = manager.load().unwrap();
    let clash = CandidateRequest::new("F-001", "CS102", Day::Monday, "10:00-10:30".parse().unwrap());
    assert!(roster.assign(&clash).is_err());

    // Caller only commits on success; the file is untouched
    assert_eq!(fs::read_to_string(&roster_path).unwrap(), original);
    assert!(manager.list_backups().unwrap().is_empty());
}
