//! Filesystem sink for roster snapshots written when a save fails.
//!
//! Snapshots are pretty-printed JSON files named
//! `roster-backup-{YYYYMMDDTHHMMSS}-{id}.json` inside one capability-scoped
//! directory. Writes go through a temporary file and a rename so a reader
//! never sees a partial snapshot.

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use cap_std::fs::{Dir, OpenOptions};
use cap_std::ambient_authority;
use chrono::{DateTime, Utc};
use mockable::Clock;
use tracing::info;
use uuid::Uuid;

use crate::domain::ports::{RosterBackup, RosterBackupError, RosterBackupSink};

const FILE_PREFIX: &str = "roster-backup-";
const FILE_SUFFIX: &str = ".json";

/// Backup sink writing into one directory.
pub struct FsRosterBackupSink {
    dir: Arc<Dir>,
    clock: Arc<dyn Clock>,
}

impl FsRosterBackupSink {
    /// Open (creating if needed) the backup directory.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the directory cannot be created or opened.
    pub fn open(path: &Path, clock: Arc<dyn Clock>) -> io::Result<Self> {
        Dir::create_ambient_dir_all(path, ambient_authority())?;
        let dir = Dir::open_ambient_dir(path, ambient_authority())?;
        Ok(Self {
            dir: Arc::new(dir),
            clock,
        })
    }
}

fn backup_file_name(at: DateTime<Utc>, id: Uuid) -> String {
    let simple = id.simple().to_string();
    let short: String = simple.chars().take(8).collect();
    format!("{FILE_PREFIX}{}-{short}{FILE_SUFFIX}", at.format("%Y%m%dT%H%M%S"))
}

/// Whether `name` is a plain backup file name inside the directory.
fn is_backup_name(name: &str) -> bool {
    name.starts_with(FILE_PREFIX)
        && name.ends_with(FILE_SUFFIX)
        && !name.contains("..")
        && name
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '.')
}

fn io_error(err: &impl ToString) -> RosterBackupError {
    RosterBackupError::io(err.to_string())
}

fn write_atomic(dir: &Dir, name: &str, contents: &[u8]) -> io::Result<()> {
    let tmp_name = format!(".{name}.tmp.{}", Uuid::new_v4().simple());
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(&tmp_name, &options)?;

    let written = file.write_all(contents).and_then(|()| file.sync_all());
    drop(file);
    if let Err(err) = written.and_then(|()| dir.rename(&tmp_name, dir, name)) {
        drop(dir.remove_file(&tmp_name));
        return Err(err);
    }
    Ok(())
}

#[async_trait]
impl RosterBackupSink for FsRosterBackupSink {
    async fn write(&self, backup: &RosterBackup) -> Result<String, RosterBackupError> {
        let contents = serde_json::to_vec_pretty(backup)
            .map_err(|err| RosterBackupError::encode(err.to_string()))?;
        let name = backup_file_name(self.clock.utc(), Uuid::new_v4());

        let dir = Arc::clone(&self.dir);
        let target = name.clone();
        tokio::task::spawn_blocking(move || write_atomic(&dir, &target, &contents))
            .await
            .map_err(|err| io_error(&err))?
            .map_err(|err| io_error(&err))?;

        info!(
            file = %name,
            timestamp = %backup.timestamp,
            trace_id = backup.trace_id.as_deref().unwrap_or("-"),
            "wrote roster backup"
        );
        Ok(name)
    }

    async fn read(&self, name: &str) -> Result<Option<Vec<u8>>, RosterBackupError> {
        if !is_backup_name(name) {
            return Err(RosterBackupError::invalid_name(name));
        }
        let dir = Arc::clone(&self.dir);
        let target = name.to_owned();
        let read = tokio::task::spawn_blocking(move || dir.read(target))
            .await
            .map_err(|err| io_error(&err))?;
        match read {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(io_error(&err)),
        }
    }
}
