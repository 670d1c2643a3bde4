use chrono::{NaiveDate, NaiveTime};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use sotalog::{
    core::session::{Session, Station},
    export::{ExportFormat, Exporter},
    qso::QsoRecord,
    reference::{ReferenceTables, names::NameDirectory, summits::SummitTable},
    types::SummitCode,
};

const SUMMITS: &str = "\
SOTA Summits List
SummitCode,AssociationName,RegionName,SummitName,AltM,AltFt,GridRef1,GridRef2,Longitude,Latitude,Points,BonusPoints
G/LD-001,England,Lake District,Scafell Pike,978,3209,NY2154,07,-3.2117,54.4542,10,3
G/LD-003,England,Lake District,Helvellyn,950,3117,NY3415,15,-3.0164,54.5270,10,3
";

fn record(i: u32) -> QsoRecord {
    QsoRecord {
        time: NaiveTime::from_hms_opt(i / 60 % 24, i % 60, 0).expect("time"),
        callsign: format!("G{i}ABC"),
        freq: "7.032MHz".to_string(),
        mode: "CW".to_string(),
        rst_sent: Some("599".to_string()),
        rst_rcvd: Some("579".to_string()),
        remote_summit: (i % 3 == 0).then(|| SummitCode::normalize("G/LD-003")),
        comment: String::new(),
    }
}

fn session(n: u32) -> Session {
    let mut session = Session::new(Station {
        callsign: "M0XYZ".to_string(),
        summit: Some(SummitCode::normalize("G/LD-001")),
        date: NaiveDate::from_ymd_opt(2024, 6, 1).expect("date"),
    });
    for i in 0..n {
        session.log_mut().append(record(i));
    }
    session
}

fn bench_appends(c: &mut Criterion) {
    c.bench_function("log_append_10k", |b| {
        b.iter(|| session(10_000));
    });
}

fn bench_edits(c: &mut Criterion) {
    c.bench_function("log_replace_10k", |b| {
        b.iter(|| {
            let mut s = session(10_000);
            for i in 1..=10_000u32 {
                let _ = s.log_mut().replace(i as usize, record(i)).expect("replace");
            }
        });
    });
}

fn bench_export(c: &mut Criterion) {
    let refs = ReferenceTables::new(
        SummitTable::from_reader(SUMMITS.as_bytes()).expect("summits"),
        NameDirectory::default(),
    );
    let mut group = c.benchmark_group("export");
    for n in [10u32, 100, 1000] {
        let s = session(n);
        for format in [ExportFormat::SotaCsv, ExportFormat::Adif] {
            let exporter = format.exporter();
            group.bench_with_input(BenchmarkId::new(format!("{format:?}"), n), &s, |b, s| {
                b.iter(|| exporter.export(s, &refs).expect("export"));
            });
        }
    }
    group.finish();
}

fn bench_snapshot(c: &mut Criterion) {
    let s = session(500);
    c.bench_function("snapshot_encode_500", |b| {
        b.iter(|| serde_json::to_vec_pretty(&s.export_snapshot()).expect("encode"));
    });
}

criterion_group!(benches, bench_appends, bench_edits, bench_export, bench_snapshot);
criterion_main!(benches);
