//! Station and QSO prompt sequences.

use chrono::NaiveDate;

use crate::{
    console::{Console, ConsoleError},
    core::session::Station,
    geo::distance_km,
    qso::{QsoDraft, QsoRecord, default_report},
    reference::ReferenceTables,
    validate::{
        DATE_FORMAT, pad_label, parse_frequency, parse_mode, prompt_callsign, prompt_date,
        prompt_summit, prompt_time, prompt_with,
    },
};

/// Horizontal rule between prompt blocks.
pub const RULE: &str = "######################################################################";

/// Asks for the operator's callsign, own summit and session date.
///
/// `today` pre-fills the date prompt.
pub fn prompt_station<C: Console + ?Sized>(
    console: &mut C,
    refs: &ReferenceTables,
    today: NaiveDate,
) -> Result<Station, ConsoleError> {
    console.print(RULE);
    console.print("Enter station info:");

    let callsign = prompt_callsign(console, &pad_label("Your Callsign: "), "", &refs.names)?;
    let summit = prompt_summit(console, &pad_label("Your Summit: "), "", &refs.summits, true)?;
    match summit {
        Some(summit) => console.print(&format!("{}{summit}", pad_label("Found Summit: "))),
        None => console.print(&format!("{}Assuming chaser", pad_label("No summit: "))),
    }

    let today = today.format(DATE_FORMAT).to_string();
    let date = prompt_date(console, &pad_label("Date (DD/MM/YY): "), &today)?;
    console.print(RULE);

    Ok(Station {
        callsign,
        summit: summit.map(|s| s.code.clone()),
        date,
    })
}

/// Runs the full QSO prompt sequence seeded from `draft`.
///
/// Activators may leave the remote summit empty; chasers must name one.
pub fn prompt_qso<C: Console + ?Sized>(
    console: &mut C,
    refs: &ReferenceTables,
    station: &Station,
    draft: &QsoDraft,
    ask_reports: bool,
) -> Result<QsoRecord, ConsoleError> {
    let time = prompt_time(console, &pad_label("Time (HHMM - UTC): "), &draft.time)?;
    let callsign = prompt_callsign(console, &pad_label("Callsign: "), &draft.callsign, &refs.names)?;
    let freq = prompt_with(console, &pad_label("Freq (7MHz/21MHz): "), &draft.freq, parse_frequency)?;
    let mode = prompt_with(console, &pad_label("Mode (CW/SSB/FM): "), &draft.mode, parse_mode)?;

    let (rst_sent, rst_rcvd) = if ask_reports {
        let sent_default = draft
            .rst_sent
            .clone()
            .unwrap_or_else(|| default_report(&mode).to_string());
        let rcvd_default = draft
            .rst_rcvd
            .clone()
            .unwrap_or_else(|| default_report(&mode).to_string());
        let sent = console.read_line(&pad_label("RST sent: "), &sent_default)?;
        let rcvd = console.read_line(&pad_label("RST rcvd: "), &rcvd_default)?;
        (non_empty(sent), non_empty(rcvd))
    } else {
        (None, None)
    };

    let activating = station.is_activator();
    let label = if activating { "S2S Summit: " } else { "Chased Summit: " };
    let remote = prompt_summit(
        console,
        &pad_label(label),
        &draft.remote_summit,
        &refs.summits,
        activating,
    )?;

    if let Some(summit) = remote {
        console.print(&format!("{}{summit}", pad_label("Found Summit: ")));
        let own = station
            .summit
            .as_ref()
            .and_then(|code| refs.summits.lookup(code.as_str()));
        if let Some(own) = own {
            let km = distance_km(own.position, summit.position);
            console.print(&format!("{}{}", pad_label("Distance: "), format_distance(km)));
        }
    }

    let comment = console.read_line(&pad_label("Comment: "), &draft.comment)?;

    Ok(QsoRecord {
        time,
        callsign,
        freq,
        mode,
        rst_sent,
        rst_rcvd,
        remote_summit: remote.map(|s| s.code.clone()),
        comment: comment.trim().to_string(),
    })
}

/// Whole kilometers, truncated.
fn format_distance(km: f64) -> String {
    format!("{}km", km.trunc() as i64)
}

fn non_empty(text: String) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_truncated_to_whole_km() {
        assert_eq!(format_distance(15.97), "15km");
        assert_eq!(format_distance(0.4), "0km");
        assert_eq!(format_distance(212.0), "212km");
    }
}
