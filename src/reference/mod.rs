//! Reference tables: summit catalog and operator-name directory.

/// Operator-name directory.
pub mod names;
/// Refresh-if-stale downloads.
pub mod refresh;
/// Summit catalog.
pub mod summits;

use std::io::Write;

use thiserror::Error;

use crate::config::{LogbookConfig, SourceConfig};

use self::{names::NameDirectory, refresh::RefreshOutcome, summits::SummitTable};

#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("missing column `{0}`")]
    MissingColumn(String),
    #[error("{0} is empty")]
    Empty(&'static str),
    #[error("{0}")]
    Message(String),
}

/// Lookup tables shared by the validators and exporters for one sitting.
#[derive(Debug, Default, Clone)]
pub struct ReferenceTables {
    pub summits: SummitTable,
    pub names: NameDirectory,
}

impl ReferenceTables {
    pub fn new(summits: SummitTable, names: NameDirectory) -> Self {
        Self { summits, names }
    }

    /// Refreshes (unless disabled) and loads both tables.
    ///
    /// The summit catalog is mandatory: a failed refresh falls back to the cached
    /// copy, but a missing or unreadable catalog is an error. Name-directory
    /// problems only produce warnings and an empty directory.
    pub async fn prepare<W: Write>(
        config: &LogbookConfig,
        progress: &mut W,
    ) -> Result<Self, ReferenceError> {
        let client = refresh::build_client()?;

        if config.refresh {
            if let Some(url) = &config.summits.url {
                match refresh::refresh(&client, url, &config.summits.cache_path, progress).await {
                    Ok(outcome) => log_outcome("summit catalog", outcome),
                    Err(err) if config.summits.cache_path.exists() => {
                        tracing::warn!("summit catalog refresh failed, using cached copy: {err}");
                    }
                    Err(err) => return Err(err),
                }
            }
        }

        let summits_path = config.summits.cache_path.clone();
        let summits = tokio::task::spawn_blocking(move || SummitTable::load(summits_path))
            .await
            .map_err(|e| ReferenceError::Message(format!("join error: {e}")))??;

        let names = match load_names(&client, &config.names, config.refresh, progress).await {
            Ok(names) => names,
            Err(err) => {
                tracing::warn!("name directory unavailable, continuing without names: {err}");
                NameDirectory::default()
            }
        };

        Ok(Self { summits, names })
    }
}

async fn load_names<W: Write>(
    client: &reqwest::Client,
    source: &SourceConfig,
    refresh: bool,
    progress: &mut W,
) -> Result<NameDirectory, ReferenceError> {
    if refresh {
        if let Some(url) = &source.url {
            match refresh::refresh(client, url, &source.cache_path, progress).await {
                Ok(outcome) => log_outcome("name directory", outcome),
                Err(err) => tracing::warn!("name directory refresh failed: {err}"),
            }
        }
    }

    if !source.cache_path.exists() {
        tracing::debug!(path = %source.cache_path.display(), "no cached name directory");
        return Ok(NameDirectory::default());
    }

    let path = source.cache_path.clone();
    tokio::task::spawn_blocking(move || NameDirectory::load(path))
        .await
        .map_err(|e| ReferenceError::Message(format!("join error: {e}")))?
}

fn log_outcome(what: &str, outcome: RefreshOutcome) {
    match outcome {
        RefreshOutcome::UpToDate => tracing::debug!("{what} cache is up to date"),
        RefreshOutcome::Downloaded { bytes } => {
            tracing::info!("{what} refreshed ({bytes} bytes)")
        }
    }
}
