mod common;

use std::path::Path;

use chrono::{TimeZone, Utc};
use tempfile::TempDir;

use common::{activator, chaser, qso, refs};
use sotalog::{
    core::session::{Session, Station},
    export::{Exporter, ExportFormat, adif::AdifExporter, sota_csv::SotaCsvExporter},
    persist::output::OutputFile,
    qso::QsoRecord,
    types::SummitCode,
};

fn session_with(station: Station, records: Vec<QsoRecord>) -> Session {
    let mut session = Session::new(station);
    for rec in records {
        session.log_mut().append(rec);
    }
    session
}

fn s2s_qso() -> QsoRecord {
    QsoRecord {
        rst_sent: Some("599".to_string()),
        rst_rcvd: Some("579".to_string()),
        remote_summit: Some(SummitCode::normalize("G/LD-003")),
        comment: "tnx".to_string(),
        ..qso("G4ABC", 12, 5)
    }
}

#[test]
fn format_follows_file_suffix() {
    assert_eq!(ExportFormat::from_path(Path::new("log.adi")), ExportFormat::Adif);
    assert_eq!(ExportFormat::from_path(Path::new("LOG.ADIF")), ExportFormat::Adif);
    assert_eq!(ExportFormat::from_path(Path::new("log.csv")), ExportFormat::SotaCsv);
    assert_eq!(ExportFormat::from_path(Path::new("log")), ExportFormat::SotaCsv);
}

#[test]
fn csv_rows_fold_reports_into_comment() {
    let session = session_with(activator(), vec![s2s_qso(), qso("DL1XYZ", 12, 9)]);
    let bytes = SotaCsvExporter.export(&session, &refs()).expect("export");
    let text = String::from_utf8(bytes).expect("utf8");

    assert!(SotaCsvExporter.file_header().is_empty());
    assert_eq!(
        text,
        "V2,M0XYZ,G/LD-001,01/06/24,12:05,7.032MHz,CW,G4ABC,G/LD-003,S:599 R:579 tnx\n\
         V2,M0XYZ,G/LD-001,01/06/24,12:09,7.032MHz,CW,DL1XYZ,,\n"
    );
}

#[test]
fn csv_quotes_commas_in_comments() {
    let rec = QsoRecord {
        comment: "rain, wind".to_string(),
        ..qso("G4ABC", 8, 0)
    };
    let session = session_with(chaser(), vec![rec]);
    let bytes = SotaCsvExporter.export(&session, &refs()).expect("export");
    let text = String::from_utf8(bytes).expect("utf8");
    assert!(text.ends_with(",\"rain, wind\"\n"), "{text}");
}

#[test]
fn adif_record_carries_locations_and_distance() {
    let session = session_with(activator(), vec![s2s_qso()]);
    let bytes = AdifExporter::default()
        .export(&session, &refs())
        .expect("export");
    let text = String::from_utf8(bytes).expect("utf8");

    for field in [
        "<STATION_CALLSIGN:5>M0XYZ ",
        "<CALL:5>G4ABC ",
        "<QSO_DATE:8>20240601 ",
        "<TIME_ON:4>1205 ",
        "<FREQ:5>7.032 ",
        "<BAND:3>40m ",
        "<MODE:2>CW ",
        "<RST_SENT:3>599 ",
        "<RST_RCVD:3>579 ",
        "<NAME:5>Alice ",
        "<MY_SOTA_REF:8>G/LD-001 ",
        "<MY_CITY:12>Scafell Pike ",
        "<MY_GRIDSQUARE:6>IO84jk ",
        "<MY_ALTITUDE:3>978 ",
        "<SOTA_REF:8>G/LD-003 ",
        "<QTH:9>Helvellyn ",
        "<LAT:11>N054 31.620 ",
        "<DISTANCE:",
        "<COMMENT:3>tnx ",
    ] {
        assert!(text.contains(field), "missing {field} in {text}");
    }
    assert!(text.trim_end().ends_with("<EOR>"));
}

#[test]
fn adif_chaser_record_has_no_own_summit_or_distance() {
    let rec = QsoRecord {
        freq: "vhf".to_string(),
        remote_summit: Some(SummitCode::normalize("hb/zh-001")),
        ..qso("HB9AAA", 10, 30)
    };
    let session = session_with(chaser(), vec![rec]);
    let bytes = AdifExporter::default()
        .export(&session, &refs())
        .expect("export");
    let text = String::from_utf8(bytes).expect("utf8");

    assert!(text.contains("<SOTA_REF:9>HB/ZH-001 "));
    assert!(!text.contains("MY_SOTA_REF"));
    assert!(!text.contains("DISTANCE"));
    assert!(!text.contains("<FREQ:"));
    assert!(!text.contains("<BAND:"));
}

#[test]
fn adif_header_is_pinned_and_terminated() {
    let exporter = AdifExporter {
        created: Some(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()),
    };
    let header = String::from_utf8(exporter.file_header()).expect("utf8");
    assert!(header.contains("<ADIF_VER:5>3.1.4 "));
    assert!(header.contains("<PROGRAMID:7>sotalog "));
    assert!(header.contains("<CREATED_TIMESTAMP:15>20240601 120000 "));
    assert!(header.trim_end().ends_with("<EOH>"));
}

#[test]
fn adif_header_written_once_across_appends() {
    let tmp = TempDir::new().expect("tmp");
    let path = tmp.path().join("log.adi");
    let output = OutputFile::new(&path, ExportFormat::from_path(&path));
    let refs = refs();

    let first = session_with(activator(), vec![s2s_qso()]);
    let second = session_with(chaser(), vec![qso("G4DEF", 13, 0), qso("G4GHI", 13, 1)]);
    assert_eq!(output.append(&first, &refs).expect("append"), 1);
    assert_eq!(output.append(&second, &refs).expect("append"), 2);

    let text = std::fs::read_to_string(&path).expect("read");
    assert_eq!(text.matches("<EOH>").count(), 1);
    assert_eq!(text.matches("<EOR>").count(), 3);
    assert!(text.find("<EOH>") < text.find("<CALL:"));
}
