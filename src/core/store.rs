use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    qso::{QsoRecord, StickyDefaults},
    types::QsoIndex,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LogError {
    #[error("QSO #{index} does not exist (log has {len} entries)")]
    IndexOutOfRange { index: QsoIndex, len: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSnapshotV1 {
    pub sticky: StickyDefaults,
    pub records: Vec<QsoRecord>,
}

/// Ordered, append/replace-only QSO log addressed by 1-based index.
#[derive(Debug, Default, Clone)]
pub struct QsoLog {
    records: Vec<QsoRecord>,
    sticky: StickyDefaults,
}

impl QsoLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: LogSnapshotV1) -> Self {
        Self {
            records: snapshot.records,
            sticky: snapshot.sticky,
        }
    }

    pub fn export_snapshot(&self) -> LogSnapshotV1 {
        LogSnapshotV1 {
            sticky: self.sticky.clone(),
            records: self.records.clone(),
        }
    }

    /// Appends `qso` and returns its 1-based index.
    pub fn append(&mut self, qso: QsoRecord) -> QsoIndex {
        self.sticky.remember(&qso);
        self.records.push(qso);
        self.records.len()
    }

    /// Replaces record `index` in place, returning the previous value.
    pub fn replace(&mut self, index: QsoIndex, qso: QsoRecord) -> Result<QsoRecord, LogError> {
        let slot = self.slot(index)?;
        self.sticky.remember(&qso);
        Ok(std::mem::replace(&mut self.records[slot], qso))
    }

    pub fn get(&self, index: QsoIndex) -> Option<&QsoRecord> {
        self.slot(index).ok().map(|slot| &self.records[slot])
    }

    pub fn records(&self) -> &[QsoRecord] {
        &self.records
    }

    pub fn sticky(&self) -> &StickyDefaults {
        &self.sticky
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Index the next appended record will receive.
    pub fn next_index(&self) -> QsoIndex {
        self.records.len() + 1
    }

    fn slot(&self, index: QsoIndex) -> Result<usize, LogError> {
        if index == 0 || index > self.records.len() {
            return Err(LogError::IndexOutOfRange {
                index,
                len: self.records.len(),
            });
        }
        Ok(index - 1)
    }
}
