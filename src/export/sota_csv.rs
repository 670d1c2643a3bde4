use crate::{
    core::session::Session,
    persist::{PersistError, PersistResult},
    reference::ReferenceTables,
    types::SummitCode,
};

use super::Exporter;

/// Version tag in the first column of every row.
pub const FORMAT_TAG: &str = "V2";

/// Writes `V2,<my call>,<my summit>,<DD/MM/YY>,<HH:MM>,<freq>,<mode>,<call>,<summit>,<comment>` rows.
///
/// There are no report columns, so reports travel inside the comment.
#[derive(Debug, Default, Clone, Copy)]
pub struct SotaCsvExporter;

impl Exporter for SotaCsvExporter {
    fn export(&self, session: &Session, _refs: &ReferenceTables) -> PersistResult<Vec<u8>> {
        let station = session.station();
        let own_summit = summit_text(station.summit.as_ref());
        let date = station.date.format("%d/%m/%y").to_string();

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());

        for qso in session.log().records() {
            let time = qso.time.format("%H:%M").to_string();
            let comment = qso.comment_with_reports();
            writer.write_record([
                FORMAT_TAG,
                station.callsign.as_str(),
                own_summit,
                date.as_str(),
                time.as_str(),
                qso.freq.as_str(),
                qso.mode.as_str(),
                qso.callsign.as_str(),
                summit_text(qso.remote_summit.as_ref()),
                comment.as_str(),
            ])?;
        }

        writer
            .into_inner()
            .map_err(|e| PersistError::Io(e.into_error()))
    }
}

fn summit_text(code: Option<&SummitCode>) -> &str {
    code.map(SummitCode::as_str).unwrap_or("")
}
