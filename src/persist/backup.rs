//! Crash-recovery backup file, rewritten from scratch on every mutation.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::core::session::{SNAPSHOT_FORMAT_VERSION, SessionSnapshot};

use super::{PersistError, PersistResult, SnapshotSink};

/// JSON snapshot file next to the output file.
#[derive(Debug, Clone)]
pub struct BackupFile {
    path: PathBuf,
}

impl BackupFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Reads the snapshot, or `None` when no backup exists.
    pub fn load(&self) -> PersistResult<Option<SessionSnapshot>> {
        let payload = match fs::read(&self.path) {
            Ok(payload) => payload,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let snapshot: SessionSnapshot = serde_json::from_slice(&payload)?;
        if snapshot.format_version != SNAPSHOT_FORMAT_VERSION {
            return Err(PersistError::Message(format!(
                "unsupported backup format version: {}",
                snapshot.format_version
            )));
        }
        Ok(Some(snapshot))
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SnapshotSink for BackupFile {
    fn write_snapshot(&mut self, snapshot: &SessionSnapshot) -> PersistResult<()> {
        let payload = serde_json::to_vec_pretty(snapshot)?;
        let tmp = self.temp_path();
        {
            let mut file = File::create(&tmp)?;
            file.write_all(&payload)?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(
            path = %self.path.display(),
            records = snapshot.log.records.len(),
            "backup rewritten"
        );
        Ok(())
    }

    fn discard(&mut self) -> PersistResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
