//! QSO domain record, prompt draft, and sticky defaults.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::types::SummitCode;

/// Fully validated QSO as stored in the session log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QsoRecord {
    /// Time of day, UTC.
    pub time: NaiveTime,
    /// Remote station callsign, uppercase.
    pub callsign: String,
    /// Unit-normalized frequency text, e.g. `7.032MHz`.
    pub freq: String,
    /// Uppercase mode, e.g. `CW`.
    pub mode: String,
    /// Report sent, when collected.
    pub rst_sent: Option<String>,
    /// Report received, when collected.
    pub rst_rcvd: Option<String>,
    /// Summit the remote station was on, if any.
    pub remote_summit: Option<SummitCode>,
    /// Free-text comment.
    pub comment: String,
}

impl QsoRecord {
    /// Comment with collected signal reports folded in as `S:`/`R:` fragments.
    ///
    /// Formats without dedicated report fields carry the reports this way.
    pub fn comment_with_reports(&self) -> String {
        let mut parts = Vec::with_capacity(3);
        if let Some(sent) = self.rst_sent.as_deref().filter(|s| !s.is_empty()) {
            parts.push(format!("S:{sent}"));
        }
        if let Some(rcvd) = self.rst_rcvd.as_deref().filter(|s| !s.is_empty()) {
            parts.push(format!("R:{rcvd}"));
        }
        if !self.comment.is_empty() {
            parts.push(self.comment.clone());
        }
        parts.join(" ")
    }
}

/// Last-used frequency and mode, offered as defaults for the next QSO.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StickyDefaults {
    /// Last entered frequency.
    pub freq: String,
    /// Last entered mode.
    pub mode: String,
}

impl StickyDefaults {
    /// Remembers the frequency and mode of `rec`.
    pub fn remember(&mut self, rec: &QsoRecord) {
        self.freq = rec.freq.clone();
        self.mode = rec.mode.clone();
    }
}

/// Raw text defaults used to pre-fill each prompt of the QSO sequence.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QsoDraft {
    /// Time text.
    pub time: String,
    /// Callsign text.
    pub callsign: String,
    /// Frequency text.
    pub freq: String,
    /// Mode text.
    pub mode: String,
    /// Report sent; `None` means "derive from mode".
    pub rst_sent: Option<String>,
    /// Report received; `None` means "derive from mode".
    pub rst_rcvd: Option<String>,
    /// Remote summit text.
    pub remote_summit: String,
    /// Comment text.
    pub comment: String,
}

impl QsoDraft {
    /// Blank draft carrying the sticky frequency and mode.
    pub fn from_sticky(sticky: &StickyDefaults) -> Self {
        Self {
            freq: sticky.freq.clone(),
            mode: sticky.mode.clone(),
            ..Self::default()
        }
    }
}

impl From<&QsoRecord> for QsoDraft {
    fn from(rec: &QsoRecord) -> Self {
        Self {
            time: rec.time.format("%H:%M").to_string(),
            callsign: rec.callsign.clone(),
            freq: rec.freq.clone(),
            mode: rec.mode.clone(),
            rst_sent: Some(rec.rst_sent.clone().unwrap_or_default()),
            rst_rcvd: Some(rec.rst_rcvd.clone().unwrap_or_default()),
            remote_summit: rec
                .remote_summit
                .as_ref()
                .map(|s| s.as_str().to_string())
                .unwrap_or_default(),
            comment: rec.comment.clone(),
        }
    }
}

/// Customary full-strength report for `mode`: `599` for CW and digital, `59` for phone.
pub fn default_report(mode: &str) -> &'static str {
    match mode {
        "SSB" | "FM" | "AM" | "USB" | "LSB" | "DV" | "DMR" => "59",
        _ => "599",
    }
}

/// Normalizes frequency input: lowercase, canonical unit case, no spaces.
pub fn normalize_frequency(raw: &str) -> String {
    raw.to_lowercase()
        .replace("mhz", "MHz")
        .replace("khz", "kHz")
        .replace("ghz", "GHz")
        .replace(' ', "")
}
