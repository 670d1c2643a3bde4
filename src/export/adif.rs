use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use crate::{
    core::session::Session,
    geo::{distance_km, grid_locator},
    persist::PersistResult,
    qso::QsoRecord,
    reference::{ReferenceTables, summits::Summit},
    types::{Band, Coordinate, parse_frequency_hz},
};

use super::Exporter;

pub const ADIF_VERSION: &str = "3.1.4";
pub const PROGRAM_ID: &str = "sotalog";

/// ADIF exporter. `created` pins the header timestamp; `None` uses the current time.
#[derive(Debug, Default, Clone)]
pub struct AdifExporter {
    pub created: Option<DateTime<Utc>>,
}

impl Exporter for AdifExporter {
    fn file_header(&self) -> Vec<u8> {
        let created = self.created.unwrap_or_else(Utc::now);
        let mut out = String::from("ADIF export from sotalog\n");
        push_field(&mut out, "ADIF_VER", ADIF_VERSION);
        out.push('\n');
        push_field(&mut out, "PROGRAMID", PROGRAM_ID);
        out.push('\n');
        push_field(&mut out, "PROGRAMVERSION", env!("CARGO_PKG_VERSION"));
        out.push('\n');
        push_field(
            &mut out,
            "CREATED_TIMESTAMP",
            &created.format("%Y%m%d %H%M%S").to_string(),
        );
        out.push('\n');
        out.push_str("<EOH>\n");
        out.into_bytes()
    }

    fn export(&self, session: &Session, refs: &ReferenceTables) -> PersistResult<Vec<u8>> {
        let station = session.station();
        let own = station
            .summit
            .as_ref()
            .and_then(|code| refs.summits.lookup(code.as_str()));
        let date = station.date.format("%Y%m%d").to_string();

        let mut out = String::new();
        for qso in session.log().records() {
            let remote = qso
                .remote_summit
                .as_ref()
                .and_then(|code| refs.summits.lookup(code.as_str()));

            push_field(&mut out, "STATION_CALLSIGN", &station.callsign);
            push_field(&mut out, "OPERATOR", &station.callsign);
            push_field(&mut out, "CALL", &qso.callsign);
            push_field(&mut out, "QSO_DATE", &date);
            push_field(&mut out, "TIME_ON", &qso.time.format("%H%M").to_string());
            push_frequency(&mut out, qso);
            push_field(&mut out, "MODE", &qso.mode);
            push_field(&mut out, "RST_SENT", qso.rst_sent.as_deref().unwrap_or(""));
            push_field(&mut out, "RST_RCVD", qso.rst_rcvd.as_deref().unwrap_or(""));
            push_field(&mut out, "NAME", refs.names.lookup(&qso.callsign).unwrap_or(""));

            if let Some(summit) = own {
                push_field(&mut out, "MY_SOTA_REF", summit.code.as_str());
                push_field(&mut out, "MY_CITY", &summit.name);
                push_location(&mut out, "MY_", summit);
            }
            if let Some(summit) = remote {
                push_field(&mut out, "SOTA_REF", summit.code.as_str());
                push_field(&mut out, "QTH", &summit.name);
                push_location(&mut out, "", summit);
            }
            if let (Some(a), Some(b)) = (own, remote) {
                let km = distance_km(a.position, b.position);
                push_field(&mut out, "DISTANCE", &format!("{km:.1}"));
            }

            push_field(&mut out, "COMMENT", &qso.comment);
            out.push_str("<EOR>\n");
        }
        Ok(out.into_bytes())
    }
}

/// Appends `<NAME:len>value ` unless `value` is empty.
fn push_field(out: &mut String, name: &str, value: &str) {
    if value.is_empty() {
        return;
    }
    let _ = write!(out, "<{}:{}>{} ", name, value.chars().count(), value);
}

fn push_frequency(out: &mut String, qso: &QsoRecord) {
    let Some(hz) = parse_frequency_hz(&qso.freq) else {
        tracing::debug!(freq = %qso.freq, "frequency not machine-readable, FREQ/BAND omitted");
        return;
    };
    push_field(out, "FREQ", &format_mhz(hz));
    if let Some(band) = Band::from_freq(hz) {
        push_field(out, "BAND", band.name());
    }
}

fn push_location(out: &mut String, prefix: &str, summit: &Summit) {
    push_field(
        out,
        &format!("{prefix}GRIDSQUARE"),
        &grid_locator(summit.position),
    );
    push_field(out, &format!("{prefix}LAT"), &adif_lat(summit.position));
    push_field(out, &format!("{prefix}LON"), &adif_lon(summit.position));
    push_field(out, &format!("{prefix}ALTITUDE"), &summit.alt_m.to_string());
}

/// Hz rendered as MHz without trailing zeros, e.g. `7.032`.
pub fn format_mhz(hz: u64) -> String {
    let text = format!("{}.{:06}", hz / 1_000_000, hz % 1_000_000);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// ADIF latitude, e.g. `N046 00.000`.
pub fn adif_lat(pos: Coordinate) -> String {
    adif_angle(pos.lat, 'N', 'S')
}

/// ADIF longitude, e.g. `E007 30.000`.
pub fn adif_lon(pos: Coordinate) -> String {
    adif_angle(pos.lon, 'E', 'W')
}

fn adif_angle(value: f64, pos: char, neg: char) -> String {
    let hemisphere = if value < 0.0 { neg } else { pos };
    let thousandths = (value.abs() * 60_000.0).round() as u64;
    let degrees = thousandths / 60_000;
    let minutes = thousandths % 60_000;
    format!(
        "{hemisphere}{degrees:03} {:02}.{:03}",
        minutes / 1000,
        minutes % 1000
    )
}
