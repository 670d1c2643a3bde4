//! Shared primitive types: summit codes, coordinates and amateur bands.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 1-based position of a QSO in the session log.
pub type QsoIndex = usize;

/// Normalized (trimmed, uppercase) summit reference such as `HB/ZH-001`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SummitCode(String);

impl SummitCode {
    /// Normalizes raw operator input into a summit code.
    pub fn normalize(raw: &str) -> Self {
        Self(raw.trim().to_uppercase())
    }

    /// Returns the normalized code text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the normalized code is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SummitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude, positive north.
    pub lat: f64,
    /// Longitude, positive east.
    pub lon: f64,
}

impl Coordinate {
    /// Builds a coordinate from latitude and longitude in degrees.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Amateur band bucket, named the way ADIF names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Band {
    /// 160 meters.
    B160m,
    /// 80 meters.
    B80m,
    /// 60 meters.
    B60m,
    /// 40 meters.
    B40m,
    /// 30 meters.
    B30m,
    /// 20 meters.
    B20m,
    /// 17 meters.
    B17m,
    /// 15 meters.
    B15m,
    /// 12 meters.
    B12m,
    /// 10 meters.
    B10m,
    /// 6 meters.
    B6m,
    /// 4 meters.
    B4m,
    /// 2 meters.
    B2m,
    /// 1.25 meters.
    B1_25m,
    /// 70 centimeters.
    B70cm,
    /// 23 centimeters.
    B23cm,
    /// 13 centimeters.
    B13cm,
}

/// Band edges in Hz, inclusive, lowest band first.
const BAND_EDGES: &[(Band, u64, u64)] = &[
    (Band::B160m, 1_800_000, 2_000_000),
    (Band::B80m, 3_500_000, 4_000_000),
    (Band::B60m, 5_060_000, 5_450_000),
    (Band::B40m, 7_000_000, 7_300_000),
    (Band::B30m, 10_100_000, 10_150_000),
    (Band::B20m, 14_000_000, 14_350_000),
    (Band::B17m, 18_068_000, 18_168_000),
    (Band::B15m, 21_000_000, 21_450_000),
    (Band::B12m, 24_890_000, 24_990_000),
    (Band::B10m, 28_000_000, 29_700_000),
    (Band::B6m, 50_000_000, 54_000_000),
    (Band::B4m, 70_000_000, 71_000_000),
    (Band::B2m, 144_000_000, 148_000_000),
    (Band::B1_25m, 222_000_000, 225_000_000),
    (Band::B70cm, 420_000_000, 450_000_000),
    (Band::B23cm, 1_240_000_000, 1_300_000_000),
    (Band::B13cm, 2_300_000_000, 2_450_000_000),
];

impl Band {
    /// Returns the band containing `freq_hz`, if any.
    pub fn from_freq(freq_hz: u64) -> Option<Band> {
        BAND_EDGES
            .iter()
            .find(|(_, lo, hi)| (*lo..=*hi).contains(&freq_hz))
            .map(|(band, _, _)| *band)
    }

    /// ADIF band name, e.g. `40m` or `70cm`.
    pub fn name(&self) -> &'static str {
        match self {
            Band::B160m => "160m",
            Band::B80m => "80m",
            Band::B60m => "60m",
            Band::B40m => "40m",
            Band::B30m => "30m",
            Band::B20m => "20m",
            Band::B17m => "17m",
            Band::B15m => "15m",
            Band::B12m => "12m",
            Band::B10m => "10m",
            Band::B6m => "6m",
            Band::B4m => "4m",
            Band::B2m => "2m",
            Band::B1_25m => "1.25m",
            Band::B70cm => "70cm",
            Band::B23cm => "23cm",
            Band::B13cm => "13cm",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses an operator frequency such as `7MHz`, `14.062MHz`, `7032kHz` or a
/// bare `145.5` (taken as MHz) into Hz.
pub fn parse_frequency_hz(freq: &str) -> Option<u64> {
    let compact: String = freq.chars().filter(|c| !c.is_whitespace()).collect();
    let lower = compact.to_lowercase();
    let split = lower
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(lower.len());
    let (number, unit) = lower.split_at(split);
    let value: f64 = number.parse().ok()?;
    let scale = match unit {
        "" | "mhz" => 1e6,
        "khz" => 1e3,
        "ghz" => 1e9,
        "hz" => 1.0,
        _ => return None,
    };
    let hz = (value * scale).round();
    (hz.is_finite() && hz > 0.0).then_some(hz as u64)
}
