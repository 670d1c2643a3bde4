pub mod backup;
pub mod output;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::session::SessionSnapshot;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("snapshot encoding error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("{0}")]
    Message(String),
}

pub type PersistResult<T> = Result<T, PersistError>;

/// Receives a full session snapshot after every log mutation.
pub trait SnapshotSink: Send {
    fn write_snapshot(&mut self, snapshot: &SessionSnapshot) -> PersistResult<()>;
    /// Drops the stored snapshot once the session is committed elsewhere.
    fn discard(&mut self) -> PersistResult<()> {
        Ok(())
    }
}

/// `dir/.name.bak` for an output file `dir/name`.
pub fn backup_path_for(output: &Path) -> PathBuf {
    let mut name = std::ffi::OsString::from(".");
    name.push(output.file_name().unwrap_or_default());
    name.push(".bak");
    output.with_file_name(name)
}
