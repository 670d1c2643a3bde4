mod common;

use std::fs;

use chrono::{Duration, TimeZone, Utc};
use tempfile::TempDir;

use common::{NAMES_CSV, SUMMITS_CSV};
use sotalog::{
    config::{LogbookConfig, NAMES_CACHE_FILE, SUMMITS_CACHE_FILE},
    reference::{
        ReferenceError, ReferenceTables,
        names::NameDirectory,
        refresh::{needs_refresh, parse_http_date},
        summits::SummitTable,
    },
};

const HEADER: &str = "SummitCode,AssociationName,RegionName,SummitName,AltM,AltFt,GridRef1,GridRef2,Longitude,Latitude,Points,BonusPoints";

fn catalog(rows: &[&str]) -> String {
    let mut text = format!("SOTA Summits List\n{HEADER}\n");
    for row in rows {
        text.push_str(row);
        text.push('\n');
    }
    text
}

#[test]
fn summit_catalog_skips_banner_and_ignores_extra_columns() {
    let table = SummitTable::from_reader(SUMMITS_CSV.as_bytes()).expect("load");
    assert_eq!(table.len(), 3);

    let summit = table.lookup("hb/zh-001").expect("summit");
    assert_eq!(summit.name, "Hoernli");
    assert_eq!(summit.alt_m, 1133);
    assert!((summit.position.lat - 47.371).abs() < 1e-9);
    assert!((summit.position.lon - 8.943).abs() < 1e-9);
    assert_eq!(summit.to_string(), "Hoernli (1133m), Zuerich, Switzerland");
}

#[test]
fn malformed_rows_are_skipped_and_last_duplicate_wins() {
    let text = catalog(&[
        "G/LD-001,England,Lake District,Scafell Pike,978,3209,NY2154,07,-3.2117,54.4542,10,3",
        "G/LD-002,England,Lake District,Broken,not-a-number,0,x,y,-3.0,54.0,10,3",
        "G/LD-001,England,Lake District,Scafell Pike (new),978,3209,NY2154,07,-3.2117,54.4542,10,3",
    ]);
    let table = SummitTable::from_reader(text.as_bytes()).expect("load");

    assert_eq!(table.len(), 1);
    assert!(table.lookup("G/LD-002").is_none());
    assert_eq!(table.lookup("G/LD-001").expect("summit").name, "Scafell Pike (new)");
}

#[test]
fn catalog_without_required_column_is_rejected() {
    let text = "banner\nSummitCode,SummitName\nG/LD-001,Scafell Pike\n";
    let err = SummitTable::from_reader(text.as_bytes()).expect_err("missing columns");
    assert!(matches!(err, ReferenceError::MissingColumn(_)), "{err}");
}

#[test]
fn catalog_without_rows_is_rejected() {
    let err = SummitTable::from_reader(catalog(&[]).as_bytes()).expect_err("empty");
    assert!(matches!(err, ReferenceError::Empty(_)), "{err}");
}

#[test]
fn name_directory_is_case_insensitive() {
    let names = NameDirectory::from_reader(NAMES_CSV.as_bytes()).expect("load");
    assert_eq!(names.len(), 2);
    assert_eq!(names.lookup("g4abc"), Some("Alice"));
    assert_eq!(names.lookup("DL1XYZ"), Some("Dieter"));
    assert_eq!(names.lookup("K1ABC"), None);

    let err = NameDirectory::from_reader("Callsign,Who\nG4ABC,Alice\n".as_bytes())
        .expect_err("missing columns");
    assert!(matches!(err, ReferenceError::MissingColumn(ref c) if c == "Call"));
}

#[test]
fn staleness_rule() {
    let local = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    let newer = local + Duration::hours(1);
    let older = local - Duration::hours(1);

    assert!(needs_refresh(Some(newer), Some(local)));
    assert!(!needs_refresh(Some(local), Some(local)));
    assert!(!needs_refresh(Some(older), Some(local)));
    assert!(!needs_refresh(None, Some(local)));
    assert!(needs_refresh(None, None));
    assert!(needs_refresh(Some(older), None));
}

#[test]
fn last_modified_header_parses() {
    let parsed = parse_http_date("Sat, 01 Jun 2024 10:15:00 GMT").expect("date");
    assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 6, 1, 10, 15, 0).unwrap());
    assert!(parse_http_date("yesterday").is_none());
}

fn offline_config(tmp: &TempDir) -> LogbookConfig {
    let mut config =
        LogbookConfig::for_output(tmp.path().join("log.csv")).with_cache_dir(tmp.path());
    config.refresh = false;
    config
}

#[tokio::test]
async fn prepare_loads_cached_tables_offline() {
    let tmp = TempDir::new().expect("tmp");
    fs::write(tmp.path().join(SUMMITS_CACHE_FILE), SUMMITS_CSV).expect("write summits");
    fs::write(tmp.path().join(NAMES_CACHE_FILE), NAMES_CSV).expect("write names");

    let mut progress = Vec::<u8>::new();
    let refs = ReferenceTables::prepare(&offline_config(&tmp), &mut progress)
        .await
        .expect("prepare");

    assert_eq!(refs.summits.len(), 3);
    assert_eq!(refs.names.len(), 2);
    assert!(progress.is_empty());
}

#[tokio::test]
async fn prepare_without_names_continues() {
    let tmp = TempDir::new().expect("tmp");
    fs::write(tmp.path().join(SUMMITS_CACHE_FILE), SUMMITS_CSV).expect("write summits");
    fs::write(tmp.path().join(NAMES_CACHE_FILE), "garbage\n").expect("write names");

    let refs = ReferenceTables::prepare(&offline_config(&tmp), &mut Vec::<u8>::new())
        .await
        .expect("prepare");
    assert_eq!(refs.summits.len(), 3);
    assert!(refs.names.is_empty());
}

#[tokio::test]
async fn prepare_fails_without_summit_catalog() {
    let tmp = TempDir::new().expect("tmp");
    let err = ReferenceTables::prepare(&offline_config(&tmp), &mut Vec::<u8>::new())
        .await
        .expect_err("no catalog");
    assert!(matches!(err, ReferenceError::Io(_)), "{err}");
}
