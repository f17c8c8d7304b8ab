//! Roster file management with atomic writes and backup support.
//!
//! This module provides safe, transactional operations for the roster
//! file that holds faculty, availability, subjects and assignments. Key
//! features:
//!
//! - **Atomic writes**: Uses temp-file-then-rename to prevent corruption
//! - **Automatic backups**: Every write creates a timestamped backup
//! - **Rollback safety**: Failed transactions leave the original roster untouched
//! - **Backup retention**: Old backups are pruned after each commit
//!
//! # Example
//!
//! ```no_run
//! use faculty_loading::config::RosterManager;
//! use faculty_loading::core::{CandidateRequest, Day};
//!
//! let manager = RosterManager::new("/home/user/.config/faculty-loading/roster.toml".into())?;
//! let mut roster = manager.load()?;
//!
//! let candidate = CandidateRequest::new("F-001", "CS101", Day::Monday, "09:30-11:00".parse()?);
//! roster.assign(&candidate)?;
//!
//! // Backup first, then atomic write
//! manager.begin_transaction()?.commit(&roster)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod roster;
pub mod settings;
pub mod transaction;

use atomic_write_file::AtomicWriteFile;
use chrono::{Local, NaiveDateTime, TimeDelta};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub use error::ConfigError;
pub use roster::{Roster, RosterError};
pub use settings::Settings;
pub use transaction::RosterTransaction;

/// Timestamp suffix of backup files (`roster.toml.2025-10-10_221500.123456`)
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H%M%S%.6f";

/// Second-resolution suffix of older backups, still listed and restorable
const LEGACY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H%M%S";

fn parse_backup_timestamp(stamp: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(stamp, BACKUP_TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(stamp, LEGACY_TIMESTAMP_FORMAT))
        .ok()
}

/// Manages the roster file with safe atomic operations.
///
/// Reads are direct; writes go through `RosterTransaction` so that a
/// backup always exists before the file changes.
#[derive(Debug)]
pub struct RosterManager {
    /// Path to the roster file.
    roster_path: PathBuf,
    backup_dir: PathBuf,
}

impl RosterManager {
    /// Creates a new RosterManager for the given roster file.
    ///
    /// Validates that the file exists and creates a `backups` directory
    /// next to it if needed. Symlinked rosters are allowed but logged.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the roster file doesn't exist.
    /// Returns `ConfigError::BackupDirNotWritable` if the backup directory
    /// cannot be created.
    pub fn new(roster_path: PathBuf) -> Result<Self, ConfigError> {
        if !roster_path.exists() {
            return Err(ConfigError::NotFound(roster_path));
        }

        if roster_path.read_link().is_ok() {
            warn!(path = %roster_path.display(), "roster file is a symlink");
        }

        // e.g., ~/.config/faculty-loading/roster.toml → ~/.config/faculty-loading/backups/
        let backup_dir = roster_path
            .parent()
            .ok_or_else(|| {
                ConfigError::BackupDirNotWritable(PathBuf::from("Roster file has no parent directory"))
            })?
            .join("backups");

        if !backup_dir.exists() {
            fs::create_dir_all(&backup_dir)
                .map_err(|_| ConfigError::BackupDirNotWritable(backup_dir.clone()))?;
        }

        if backup_dir.metadata()?.permissions().readonly() {
            return Err(ConfigError::BackupDirNotWritable(backup_dir));
        }

        Ok(Self {
            roster_path,
            backup_dir,
        })
    }

    pub fn roster_path(&self) -> &Path {
        &self.roster_path
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Reads the raw roster file content.
    pub fn read_roster(&self) -> Result<String, ConfigError> {
        Ok(fs::read_to_string(&self.roster_path)?)
    }

    /// Reads and parses the roster file.
    pub fn load(&self) -> Result<Roster, ConfigError> {
        let content = self.read_roster()?;
        Ok(Roster::from_toml(&content)?)
    }

    /// Starts a write transaction (takes a backup immediately).
    pub fn begin_transaction(&self) -> Result<RosterTransaction<'_>, ConfigError> {
        RosterTransaction::begin(self)
    }

    fn roster_file_name(&self) -> Result<&str, ConfigError> {
        self.roster_path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                ConfigError::BackupFailed(format!(
                    "Roster path has no UTF-8 file name: {}",
                    self.roster_path.display()
                ))
            })
    }

    /// Copies the current roster to `backups/<name>.<timestamp>`.
    ///
    /// Backup files are never overwritten: if the name for this instant
    /// is taken, the timestamp moves forward a microsecond at a time.
    pub(crate) fn create_timestamped_backup(&self) -> Result<PathBuf, ConfigError> {
        let content = fs::read_to_string(&self.roster_path)?;
        let file_name = self.roster_file_name()?;

        let mut stamp = Local::now().naive_local();
        loop {
            let backup_path = self
                .backup_dir
                .join(format!("{}.{}", file_name, stamp.format(BACKUP_TIMESTAMP_FORMAT)));

            match OpenOptions::new().write(true).create_new(true).open(&backup_path) {
                Ok(mut file) => {
                    file.write_all(content.as_bytes())?;
                    info!(backup = %backup_path.display(), "roster backup created");
                    return Ok(backup_path);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    stamp += TimeDelta::microseconds(1);
                }
                Err(e) => return Err(ConfigError::BackupFailed(format!("{}: {}", backup_path.display(), e))),
            }
        }
    }

    /// Lists backups of this roster, newest first.
    ///
    /// Files whose suffix is not a valid timestamp are ignored.
    pub fn list_backups(&self) -> Result<Vec<PathBuf>, ConfigError> {
        let prefix = format!("{}.", self.roster_file_name()?);
        let mut backups: Vec<(NaiveDateTime, PathBuf)> = Vec::new();

        for entry in fs::read_dir(&self.backup_dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }

            let stamp = path
                .file_name()
                .and_then(|name| name.to_str())
                .and_then(|name| name.strip_prefix(&prefix))
                .and_then(parse_backup_timestamp);

            if let Some(stamp) = stamp {
                backups.push((stamp, path));
            }
        }

        backups.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(backups.into_iter().map(|(_, path)| path).collect())
    }

    /// Deletes all but the `keep` newest backups, returning how many went.
    pub fn cleanup_old_backups(&self, keep: usize) -> Result<usize, ConfigError> {
        let backups = self.list_backups()?;
        let mut deleted = 0;

        for old in backups.iter().skip(keep) {
            fs::remove_file(old)?;
            deleted += 1;
        }

        if deleted > 0 {
            info!(deleted, keep, "old roster backups removed");
        }
        Ok(deleted)
    }

    /// Restores the roster from a backup file.
    ///
    /// The current roster is backed up first, so a restore can itself be
    /// undone. The backup content must parse as a roster.
    pub fn restore_backup(&self, backup_path: &Path) -> Result<(), ConfigError> {
        if !backup_path.is_file() {
            return Err(ConfigError::BackupFailed(format!(
                "Not a backup file: {}",
                backup_path.display()
            )));
        }

        let content = fs::read_to_string(backup_path)?;
        Roster::from_toml(&content)?;

        self.create_timestamped_backup()?;
        write_atomically(&self.roster_path, &content)?;

        info!(from = %backup_path.display(), "roster restored from backup");
        Ok(())
    }
}

/// Writes `content` to `path` via temp file and rename.
pub(crate) fn write_atomically(path: &Path, content: &str) -> Result<(), ConfigError> {
    let mut file = AtomicWriteFile::options()
        .open(path)
        .map_err(|e| ConfigError::WriteFailed(format!("Failed to open for atomic write: {}", e)))?;

    file.write_all(content.as_bytes())
        .map_err(|e| ConfigError::WriteFailed(format!("Failed to write content: {}", e)))?;

    file.commit()
        .map_err(|e| ConfigError::WriteFailed(format!("Failed to commit atomic write: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests;
