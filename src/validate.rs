//! Field parsers and their re-prompting loops.
//!
//! Each `parse_*` function is pure. The `prompt_*` functions wrap a parser in a
//! loop that prints `Error: ...` and asks again with the same default until the
//! input parses; console interrupts pass through untouched.

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

use crate::{
    console::{Console, ConsoleError},
    qso::normalize_frequency,
    reference::{names::NameDirectory, summits::{Summit, SummitTable}},
};

/// Width that prompt labels are right-aligned to.
pub const LABEL_WIDTH: usize = 20;

/// Canonical session date format.
pub const DATE_FORMAT: &str = "%d/%m/%y";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Callsign too short")]
    CallsignTooShort,
    #[error("Invalid time format - use HHMM or HH:MM 24h UTC")]
    InvalidTime,
    #[error("Invalid date format - use DD/MM/YY")]
    InvalidDate,
    #[error("Summit not found")]
    UnknownSummit,
    #[error("Summit required when chasing")]
    SummitRequired,
    #[error("Frequency required")]
    MissingFrequency,
    #[error("Mode required")]
    MissingMode,
}

/// Right-aligns `label` to [`LABEL_WIDTH`].
pub fn pad_label(label: &str) -> String {
    format!("{label:>width$}", width = LABEL_WIDTH)
}

pub fn parse_callsign(input: &str) -> Result<String, FieldError> {
    let call = input.trim();
    if call.chars().count() < 3 {
        return Err(FieldError::CallsignTooShort);
    }
    Ok(call.to_uppercase())
}

/// Accepts `HHMM`, `HMM`, `H:MM` and `HH:MM` on a 24-hour clock.
pub fn parse_time(input: &str) -> Result<NaiveTime, FieldError> {
    let text = input.trim();
    let (hours, minutes) = match text.split_once(':') {
        Some(parts) => parts,
        None if matches!(text.len(), 3 | 4) && text.bytes().all(|b| b.is_ascii_digit()) => {
            text.split_at(text.len() - 2)
        }
        None => return Err(FieldError::InvalidTime),
    };

    let digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    if !digits(hours) || !digits(minutes) || hours.len() > 2 || minutes.len() != 2 {
        return Err(FieldError::InvalidTime);
    }

    NaiveTime::parse_from_str(&format!("{hours:0>2}:{minutes}"), "%H:%M")
        .map_err(|_| FieldError::InvalidTime)
}

/// Accepts `DD/MM/YY`.
pub fn parse_date(input: &str) -> Result<NaiveDate, FieldError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|_| FieldError::InvalidDate)
}

/// Resolves a summit reference; empty input yields `None` only if `allow_empty`.
pub fn parse_summit<'a>(
    input: &str,
    table: &'a SummitTable,
    allow_empty: bool,
) -> Result<Option<&'a Summit>, FieldError> {
    if input.trim().is_empty() {
        return if allow_empty {
            Ok(None)
        } else {
            Err(FieldError::SummitRequired)
        };
    }
    table
        .lookup(input)
        .map(Some)
        .ok_or(FieldError::UnknownSummit)
}

pub fn parse_frequency(input: &str) -> Result<String, FieldError> {
    let freq = normalize_frequency(input.trim());
    if freq.is_empty() {
        return Err(FieldError::MissingFrequency);
    }
    Ok(freq)
}

pub fn parse_mode(input: &str) -> Result<String, FieldError> {
    let mode = input.trim().to_uppercase();
    if mode.is_empty() {
        return Err(FieldError::MissingMode);
    }
    Ok(mode)
}

/// Prompts until `parse` accepts the input.
pub fn prompt_with<C, T, F>(
    console: &mut C,
    prompt: &str,
    default: &str,
    mut parse: F,
) -> Result<T, ConsoleError>
where
    C: Console + ?Sized,
    F: FnMut(&str) -> Result<T, FieldError>,
{
    loop {
        let line = console.read_line(prompt, default)?;
        match parse(&line) {
            Ok(value) => return Ok(value),
            Err(err) => console.print(&format!("Error: {err}")),
        }
    }
}

/// Callsign prompt; prints the operator's name when the directory knows it.
pub fn prompt_callsign<C: Console + ?Sized>(
    console: &mut C,
    prompt: &str,
    default: &str,
    names: &NameDirectory,
) -> Result<String, ConsoleError> {
    let call = prompt_with(console, prompt, default, parse_callsign)?;
    if let Some(name) = names.lookup(&call) {
        console.print(&format!("{}{name}", pad_label("Name: ")));
    }
    Ok(call)
}

pub fn prompt_time<C: Console + ?Sized>(
    console: &mut C,
    prompt: &str,
    default: &str,
) -> Result<NaiveTime, ConsoleError> {
    prompt_with(console, prompt, default, parse_time)
}

pub fn prompt_date<C: Console + ?Sized>(
    console: &mut C,
    prompt: &str,
    default: &str,
) -> Result<NaiveDate, ConsoleError> {
    prompt_with(console, prompt, default, parse_date)
}

pub fn prompt_summit<'a, C: Console + ?Sized>(
    console: &mut C,
    prompt: &str,
    default: &str,
    table: &'a SummitTable,
    allow_empty: bool,
) -> Result<Option<&'a Summit>, ConsoleError> {
    prompt_with(console, prompt, default, |input| {
        parse_summit(input, table, allow_empty)
    })
}
