// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Snapshot files
//!
//! Each record is a single JSON document that is overwritten on every save.
//! Writes go to a sibling temp file first and are renamed into place, so a
//! crash mid-write leaves the previous snapshot intact.

use rc_core::{ClaimRecord, QueueRecord};
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the claims record
pub const CLAIMS_FILE: &str = "timers-backup.json";
/// File name of the queue record
pub const QUEUE_FILE: &str = "queue-backup.json";

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Durable home of the claims record and the queue record
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    claims_path: PathBuf,
    queue_path: PathBuf,
}

impl SnapshotStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    pub fn open(dir: &Path) -> Result<Self, SnapshotError> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            claims_path: dir.join(CLAIMS_FILE),
            queue_path: dir.join(QUEUE_FILE),
        })
    }

    pub fn claims_path(&self) -> &Path {
        &self.claims_path
    }

    pub fn queue_path(&self) -> &Path {
        &self.queue_path
    }

    pub fn save_claims(&self, records: &[ClaimRecord]) -> Result<(), SnapshotError> {
        write_atomic(&self.claims_path, &records)
    }

    pub fn save_queue(&self, record: &QueueRecord) -> Result<(), SnapshotError> {
        write_atomic(&self.queue_path, record)
    }

    /// Load the claims record; `None` when no snapshot exists
    pub fn load_claims(&self) -> Result<Option<Vec<ClaimRecord>>, SnapshotError> {
        read_optional(&self.claims_path)
    }

    /// Load the queue record; `None` when no snapshot exists
    pub fn load_queue(&self) -> Result<Option<QueueRecord>, SnapshotError> {
        read_optional(&self.queue_path)
    }

    /// Delete both records. Missing files are ignored.
    pub fn clear(&self) -> Result<(), SnapshotError> {
        for path in [&self.claims_path, &self.queue_path] {
            match fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}

fn write_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), SnapshotError> {
    let json = serde_json::to_string_pretty(value)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    tracing::debug!(path = %path.display(), "snapshot written");
    Ok(())
}

fn read_optional<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, SnapshotError> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    if json.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(&json)?))
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
