//! Append-only commit of a session to the real output file.

use std::{
    fs::{File, OpenOptions},
    io::{Read, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
};

use crate::{
    core::session::Session,
    export::{ExportFormat, Exporter},
    reference::ReferenceTables,
};

use super::PersistResult;

#[derive(Debug, Clone)]
pub struct OutputFile {
    path: PathBuf,
    format: ExportFormat,
}

impl OutputFile {
    pub fn new(path: impl Into<PathBuf>, format: ExportFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends every record of `session`; existing content is never touched.
    ///
    /// The format header is written only when the file is new or empty.
    /// Returns the number of records written.
    pub fn append(&self, session: &Session, refs: &ReferenceTables) -> PersistResult<usize> {
        let exporter = self.format.exporter();
        let body = exporter.export(session, refs)?;

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)?;
        if file.metadata()?.len() == 0 {
            file.write_all(&exporter.file_header())?;
        } else if !ends_with_newline(&mut file)? {
            file.write_all(b"\n")?;
        }
        file.write_all(&body)?;
        file.sync_all()?;

        let written = session.log().len();
        tracing::info!(
            path = %self.path.display(),
            format = ?self.format,
            records = written,
            "log committed"
        );
        Ok(written)
    }
}

/// Existing content missing its final newline would swallow the first new row.
fn ends_with_newline(file: &mut File) -> PersistResult<bool> {
    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}
