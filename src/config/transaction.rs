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

//! Roster transaction management with automatic backups
//!
//! Provides atomic write operations for the roster file.

use std::{fs, path::PathBuf};
use tracing::info;

use crate::config::{roster::Roster, write_atomically, ConfigError, RosterManager};

/// Atomic roster transaction with automatic backup.
///
/// - **Atomic**: Changes are all-or-nothing (temp file + rename)
/// - **Consistent**: The roster is never half-written
/// - **Durable**: Backup created before any modification
///
/// # Lifecycle
///
/// 1. `begin()` - Creates timestamped backup immediately
/// 2. Caller mutates a `Roster` in memory (validation happens there)
/// 3. `commit()` - Writes atomically, or `rollback()` - Restores original
///
/// # Example
///
/// ```no_run
/// use faculty_loading::config::{RosterManager, RosterTransaction};
/// use std::path::PathBuf;
///
/// let manager = RosterManager::new(PathBuf::from("roster.toml"))?;
/// let mut roster = manager.load()?;
/// roster.unassign("F-001", "CS101", None)?;
///
/// let tx = RosterTransaction::begin(&manager)?;
/// tx.commit(&roster)?;
/// # Ok::<(), faculty_loading::config::ConfigError>(())
/// ```
pub struct RosterTransaction<'a> {
    manager: &'a RosterManager,
    backup_path: PathBuf,
}

impl<'a> RosterTransaction<'a> {
    /// Begins a new transaction by creating a timestamped backup.
    ///
    /// # Errors
    ///
    /// Returns an error if the roster cannot be read or the backup
    /// cannot be written. Nothing has been modified in that case.
    pub fn begin(manager: &'a RosterManager) -> Result<Self, ConfigError> {
        let backup_path = manager.create_timestamped_backup()?;

        Ok(Self {
            manager,
            backup_path,
        })
    }

    /// Path of the backup taken by `begin()`
    pub fn backup_path(&self) -> &PathBuf {
        &self.backup_path
    }

    /// Serialises `roster` and writes it atomically, then prunes backups
    /// down to `roster.settings.max_backups`.
    ///
    /// The backup taken by `begin()` is always kept, even with
    /// `max_backups = 0`, so `rollback()` stays possible afterwards.
    ///
    /// Consumes the transaction, preventing accidental double-commits.
    ///
    /// # Errors
    ///
    /// On failure the original roster file is unchanged and the backup
    /// from `begin()` is still in place.
    pub fn commit(self, roster: &Roster) -> Result<(), ConfigError> {
        let content = roster.to_toml()?;
        self.commit_content(&content)?;

        self.manager.cleanup_old_backups(roster.settings.max_backups.max(1))?;
        Ok(())
    }

    /// Writes raw content atomically.
    pub fn commit_content(&self, new_content: &str) -> Result<(), ConfigError> {
        write_atomically(self.manager.roster_path(), new_content)?;
        info!(path = %self.manager.roster_path().display(), "roster committed");
        Ok(())
    }

    /// Rolls back to the backup created during `begin()`.
    ///
    /// Borrows `self`, so it can be retried.
    pub fn rollback(&self) -> Result<(), ConfigError> {
        let backup_content = fs::read_to_string(&self.backup_path)?;
        write_atomically(self.manager.roster_path(), &backup_content)?;
        info!(backup = %self.backup_path.display(), "roster rolled back");
        Ok(())
    }
}
