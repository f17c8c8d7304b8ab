use std::path::PathBuf;
use thiserror::Error;

use crate::config::roster::RosterError;

/// Errors that can occur during roster file management.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Roster file does not exist.
    #[error("Roster file not found: {0}")]
    NotFound(PathBuf),
    /// Backup directory cannot be created or written to.
    #[error("Backup directory not writable: {0}")]
    BackupDirNotWritable(PathBuf),
    /// Failed to create or restore a backup file.
    #[error("Backup failed: {0}")]
    BackupFailed(String),
    /// Atomic write operation failed.
    #[error("Atomic write failed: {0}")]
    WriteFailed(String),
    /// Roster file is not valid TOML or does not match the roster schema.
    #[error("Invalid roster file: {0}")]
    InvalidRoster(#[from] toml::de::Error),
    /// Roster could not be serialised.
    #[error("Failed to serialise roster: {0}")]
    SerializeFailed(#[from] toml::ser::Error),
    /// Roster operation refused (unknown ids, rejected assignment, ...)
    #[error(transparent)]
    Roster(#[from] RosterError),
    /// Generic I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
