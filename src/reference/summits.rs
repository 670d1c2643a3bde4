//! SOTA summit catalog.

use std::{
    fmt,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use hashbrown::HashMap;
use serde::Deserialize;

use crate::types::{Coordinate, SummitCode};

use super::ReferenceError;

const REQUIRED_COLUMNS: &[&str] = &[
    "SummitCode",
    "SummitName",
    "AltM",
    "RegionName",
    "AssociationName",
    "Latitude",
    "Longitude",
];

/// One catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Summit {
    /// Normalized summit reference.
    pub code: SummitCode,
    /// Display name.
    pub name: String,
    /// Altitude in meters.
    pub alt_m: i32,
    /// Region name.
    pub region: String,
    /// Association name.
    pub association: String,
    /// Summit position.
    pub position: Coordinate,
}

impl fmt::Display for Summit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}m), {}, {}",
            self.name, self.alt_m, self.region, self.association
        )
    }
}

#[derive(Debug, Deserialize)]
struct SummitRow {
    #[serde(rename = "SummitCode")]
    code: String,
    #[serde(rename = "SummitName")]
    name: String,
    #[serde(rename = "AltM")]
    alt_m: i32,
    #[serde(rename = "RegionName")]
    region: String,
    #[serde(rename = "AssociationName")]
    association: String,
    #[serde(rename = "Latitude")]
    lat: f64,
    #[serde(rename = "Longitude")]
    lon: f64,
}

/// Summit lookup table keyed by normalized code.
#[derive(Debug, Default, Clone)]
pub struct SummitTable {
    summits: HashMap<SummitCode, Summit>,
}

impl SummitTable {
    /// Loads the catalog from a cached `summitslist.csv`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReferenceError> {
        let file = File::open(path.as_ref())?;
        let table = Self::from_reader(BufReader::new(file))?;
        tracing::info!(
            "loaded {} summits from {}",
            table.len(),
            path.as_ref().display()
        );
        Ok(table)
    }

    /// Parses a catalog: one banner line, then CSV with a header row.
    ///
    /// Malformed rows are skipped; a later duplicate code replaces an earlier one.
    pub fn from_reader<R: BufRead>(mut reader: R) -> Result<Self, ReferenceError> {
        let mut banner = String::new();
        reader.read_line(&mut banner)?;
        tracing::debug!("summit catalog banner: {}", banner.trim_end());

        let mut body = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = body.headers()?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == *column) {
                return Err(ReferenceError::MissingColumn(column.to_string()));
            }
        }

        let mut table = Self::default();
        let mut skipped = 0usize;
        for (row_no, row) in body.deserialize::<SummitRow>().enumerate() {
            match row {
                Ok(row) => table.insert(Summit {
                    code: SummitCode::normalize(&row.code),
                    name: row.name,
                    alt_m: row.alt_m,
                    region: row.region,
                    association: row.association,
                    position: Coordinate::new(row.lat, row.lon),
                }),
                Err(e) => {
                    skipped += 1;
                    tracing::warn!("skipping summit row {}: {}", row_no + 1, e);
                }
            }
        }

        if skipped > 0 {
            tracing::warn!("{skipped} malformed summit rows skipped");
        }
        if table.is_empty() {
            return Err(ReferenceError::Empty("summit catalog"));
        }
        Ok(table)
    }

    /// Inserts `summit`, replacing any entry with the same code.
    pub fn insert(&mut self, summit: Summit) {
        self.summits.insert(summit.code.clone(), summit);
    }

    /// Case-insensitive lookup by summit reference.
    pub fn lookup(&self, code: &str) -> Option<&Summit> {
        self.summits.get(&SummitCode::normalize(code))
    }

    pub fn len(&self) -> usize {
        self.summits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.summits.is_empty()
    }
}
