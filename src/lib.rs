//! Interactive SOTA field logbook with crash-safe backups and CSV/ADIF export.
//!
//! # Examples
//!
//! In-memory logging with [`core::session::Session`]:
//! ```
//! use chrono::{NaiveDate, NaiveTime};
//! use sotalog::{
//!     core::session::{Session, Station},
//!     qso::QsoRecord,
//!     types::SummitCode,
//! };
//!
//! let mut session = Session::new(Station {
//!     callsign: "M0XYZ".to_string(),
//!     summit: Some(SummitCode::normalize("g/ld-001")),
//!     date: NaiveDate::from_ymd_opt(2024, 6, 1).expect("date"),
//! });
//! let n = session.log_mut().append(QsoRecord {
//!     time: NaiveTime::from_hms_opt(12, 5, 0).expect("time"),
//!     callsign: "G4ABC".to_string(),
//!     freq: "7.032MHz".to_string(),
//!     mode: "CW".to_string(),
//!     rst_sent: Some("599".to_string()),
//!     rst_rcvd: Some("579".to_string()),
//!     remote_summit: None,
//!     comment: String::new(),
//! });
//! assert_eq!(n, 1);
//! assert_eq!(session.log().sticky().mode, "CW");
//! ```
//!
//! Exporting with an [`export::Exporter`]:
//! ```no_run
//! use sotalog::{
//!     core::session::Session,
//!     export::{ExportFormat, Exporter},
//!     reference::ReferenceTables,
//! };
//!
//! fn commit(session: &Session, refs: &ReferenceTables) -> Vec<u8> {
//!     ExportFormat::Adif
//!         .exporter()
//!         .export(session, refs)
//!         .expect("export")
//! }
//! ```

/// Startup configuration.
pub mod config;
/// Operator console abstraction.
pub mod console;
/// Session log and station state.
pub mod core;
/// CSV and ADIF exporters.
pub mod export;
/// Great-circle distance and Maidenhead locators.
pub mod geo;
/// Backup snapshots and output-file commit.
pub mod persist;
/// QSO records, drafts and sticky defaults.
pub mod qso;
/// Summit catalog and name directory.
pub mod reference;
/// Interactive controller.
pub mod runtime;
/// Shared primitive types.
pub mod types;
/// Field parsers and prompt loops.
pub mod validate;
