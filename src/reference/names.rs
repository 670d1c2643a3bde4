//! Callsign to operator-name directory.

use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use hashbrown::HashMap;
use serde::Deserialize;

use super::ReferenceError;

#[derive(Debug, Deserialize)]
struct NameRow {
    #[serde(rename = "Call")]
    call: String,
    #[serde(rename = "Name")]
    name: String,
}

/// Operator names keyed by uppercase callsign.
#[derive(Debug, Default, Clone)]
pub struct NameDirectory {
    names: HashMap<String, String>,
}

impl NameDirectory {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReferenceError> {
        let file = File::open(path.as_ref())?;
        let dir = Self::from_reader(BufReader::new(file))?;
        tracing::info!(
            "loaded {} operator names from {}",
            dir.len(),
            path.as_ref().display()
        );
        Ok(dir)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ReferenceError> {
        let mut body = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = body.headers()?.clone();
        for column in ["Call", "Name"] {
            if !headers.iter().any(|h| h == column) {
                return Err(ReferenceError::MissingColumn(column.to_string()));
            }
        }

        let mut dir = Self::default();
        for row in body.deserialize::<NameRow>() {
            match row {
                Ok(row) if !row.call.is_empty() => dir.insert(&row.call, row.name),
                Ok(_) => {}
                Err(e) => tracing::warn!("skipping name row: {e}"),
            }
        }
        Ok(dir)
    }

    pub fn insert(&mut self, call: &str, name: String) {
        self.names.insert(call.trim().to_uppercase(), name);
    }

    pub fn lookup(&self, call: &str) -> Option<&str> {
        self.names
            .get(&call.trim().to_uppercase())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
