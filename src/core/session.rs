use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    core::store::{LogSnapshotV1, QsoLog},
    reference::summits::SummitTable,
    types::SummitCode,
};

/// Version number for serialized [`SessionSnapshot`] payloads.
pub const SNAPSHOT_FORMAT_VERSION: u16 = 1;

/// Operator station details entered once per sitting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    /// Operator callsign, uppercase.
    pub callsign: String,
    /// Own summit; `None` means chasing from home.
    pub summit: Option<SummitCode>,
    /// Session date (UTC).
    pub date: NaiveDate,
}

impl Station {
    /// True when the operator is on a summit.
    pub fn is_activator(&self) -> bool {
        self.summit.is_some()
    }
}

/// Versioned, self-contained image of a session, used as the backup payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Payload format version.
    pub format_version: u16,
    /// Station details.
    pub station: Station,
    /// Log contents.
    pub log: LogSnapshotV1,
}

/// One sitting: station details plus the growing QSO log.
#[derive(Debug, Clone)]
pub struct Session {
    station: Station,
    log: QsoLog,
}

impl Session {
    pub fn new(station: Station) -> Self {
        Self {
            station,
            log: QsoLog::new(),
        }
    }

    pub fn from_snapshot(snapshot: SessionSnapshot) -> Self {
        Self {
            station: snapshot.station,
            log: QsoLog::from_snapshot(snapshot.log),
        }
    }

    pub fn export_snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            format_version: SNAPSHOT_FORMAT_VERSION,
            station: self.station.clone(),
            log: self.log.export_snapshot(),
        }
    }

    pub fn station(&self) -> &Station {
        &self.station
    }

    pub fn log(&self) -> &QsoLog {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut QsoLog {
        &mut self.log
    }

    /// Summit codes referenced by the session that `table` does not know.
    pub fn unknown_summits(&self, table: &SummitTable) -> Vec<SummitCode> {
        self.station
            .summit
            .iter()
            .chain(self.log.records().iter().filter_map(|r| r.remote_summit.as_ref()))
            .filter(|code| table.lookup(code.as_str()).is_none())
            .cloned()
            .collect()
    }
}
