//! Logbook configuration assembled once at startup.

use std::path::{Path, PathBuf};

use crate::export::ExportFormat;

/// Default source of the SOTA summit catalog.
pub const SUMMITS_URL: &str = "https://www.sotadata.org.uk/summitslist.csv";
/// Cache file name of the summit catalog.
pub const SUMMITS_CACHE_FILE: &str = "summitslist.csv";
/// Cache file name of the operator-name directory.
pub const NAMES_CACHE_FILE: &str = "names.csv";

/// Remote source and local cache of one reference table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    /// Download URL; `None` uses whatever is cached.
    pub url: Option<String>,
    /// Local cache file.
    pub cache_path: PathBuf,
}

/// Everything the binary needs to run one logging session.
#[derive(Debug, Clone)]
pub struct LogbookConfig {
    /// File the log is appended to on save.
    pub output: PathBuf,
    /// Export format, resolved from the output file suffix.
    pub format: ExportFormat,
    /// Summit catalog source.
    pub summits: SourceConfig,
    /// Operator-name directory source.
    pub names: SourceConfig,
    /// Prompt for signal reports.
    pub ask_reports: bool,
    /// Check the remote sources for newer reference data.
    pub refresh: bool,
    /// Restore the session from an existing backup instead of prompting.
    pub resume: bool,
}

impl Default for LogbookConfig {
    fn default() -> Self {
        Self::for_output("sota-log.csv")
    }
}

impl LogbookConfig {
    /// Defaults for `output`, with caches under the user cache directory.
    pub fn for_output(output: impl Into<PathBuf>) -> Self {
        let output = output.into();
        let format = ExportFormat::from_path(&output);
        Self {
            output,
            format,
            summits: SourceConfig {
                url: Some(SUMMITS_URL.to_string()),
                cache_path: PathBuf::new(),
            },
            names: SourceConfig {
                url: None,
                cache_path: PathBuf::new(),
            },
            ask_reports: true,
            refresh: true,
            resume: false,
        }
        .with_cache_dir(default_cache_dir())
    }

    /// Points both reference caches into `dir`.
    pub fn with_cache_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.summits.cache_path = dir.as_ref().join(SUMMITS_CACHE_FILE);
        self.names.cache_path = dir.as_ref().join(NAMES_CACHE_FILE);
        self
    }

    /// Hidden sibling of the output file holding the crash-recovery snapshot.
    pub fn backup_path(&self) -> PathBuf {
        crate::persist::backup_path_for(&self.output)
    }
}

/// `<user cache dir>/sotalog`, or `./.sotalog-cache` when no cache dir is known.
pub fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .map(|d| d.join("sotalog"))
        .unwrap_or_else(|| PathBuf::from(".sotalog-cache"))
}
