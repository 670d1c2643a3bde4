//! Log interchange formats.

/// ADIF (structured logbook) exporter.
pub mod adif;
/// SOTA CSV V2 (flat-row) exporter.
pub mod sota_csv;

use std::path::Path;

use crate::{core::session::Session, persist::PersistResult, reference::ReferenceTables};

use self::{adif::AdifExporter, sota_csv::SotaCsvExporter};

/// Output format, chosen once from the output file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// SOTA database CSV upload format, version 2.
    SotaCsv,
    /// Amateur Data Interchange Format, `.adi`/`.adif`.
    Adif,
}

impl ExportFormat {
    /// `.adi` and `.adif` (any case) select ADIF; everything else is SOTA CSV.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("adi" | "adif") => ExportFormat::Adif,
            _ => ExportFormat::SotaCsv,
        }
    }

    pub fn exporter(&self) -> Box<dyn Exporter> {
        match self {
            ExportFormat::SotaCsv => Box::new(SotaCsvExporter),
            ExportFormat::Adif => Box::new(AdifExporter::default()),
        }
    }
}

/// Serializes a whole session into one output format.
pub trait Exporter {
    /// Bytes written once at the start of a new, empty output file.
    fn file_header(&self) -> Vec<u8> {
        Vec::new()
    }

    /// Serialized records for every QSO in `session`, in log order.
    fn export(&self, session: &Session, refs: &ReferenceTables) -> PersistResult<Vec<u8>>;
}
