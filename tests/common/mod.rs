#![allow(dead_code)]

use std::collections::VecDeque;

use chrono::{NaiveDate, NaiveTime};

use sotalog::{
    console::{Console, ConsoleError},
    core::session::Station,
    qso::QsoRecord,
    reference::{ReferenceTables, names::NameDirectory, summits::SummitTable},
    types::SummitCode,
};

pub const SUMMITS_CSV: &str = "\
SOTA Summits List (Date=01/06/2024)
SummitCode,AssociationName,RegionName,SummitName,AltM,AltFt,GridRef1,GridRef2,Longitude,Latitude,Points,BonusPoints
G/LD-001,England,Lake District,Scafell Pike,978,3209,NY2154,07,-3.2117,54.4542,10,3
G/LD-003,England,Lake District,Helvellyn,950,3117,NY3415,15,-3.0164,54.5270,10,3
HB/ZH-001,Switzerland,Zuerich,Hoernli,1133,3717,709800,247800,8.9430,47.3710,4,0
";

pub const NAMES_CSV: &str = "\
Call,Name,Country
G4ABC,Alice,England
dl1xyz,Dieter,Germany
";

/// One scripted reply to a console prompt.
#[derive(Debug, Clone)]
pub enum Input {
    Line(String),
    /// Accept the pre-filled default.
    Accept,
    Interrupt,
}

pub fn line(text: &str) -> Input {
    Input::Line(text.to_string())
}

pub fn lines(texts: &[&str]) -> Vec<Input> {
    texts.iter().map(|t| line(t)).collect()
}

/// Console replaying a fixed script; an exhausted script reads as end of input.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    script: VecDeque<Input>,
    /// `(prompt, default)` for every read, in order.
    pub prompts: Vec<(String, String)>,
    pub output: Vec<String>,
}

impl ScriptedConsole {
    pub fn new(script: impl IntoIterator<Item = Input>) -> Self {
        Self {
            script: script.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn printed(&self, needle: &str) -> bool {
        self.output.iter().any(|l| l.contains(needle))
    }

    pub fn default_for(&self, label: &str) -> Option<&str> {
        self.prompts
            .iter()
            .rev()
            .find(|(p, _)| p.trim() == label.trim())
            .map(|(_, d)| d.as_str())
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str, default: &str) -> Result<String, ConsoleError> {
        self.prompts.push((prompt.to_string(), default.to_string()));
        match self.script.pop_front() {
            Some(Input::Line(text)) => Ok(text),
            Some(Input::Accept) => Ok(default.to_string()),
            Some(Input::Interrupt) => Err(ConsoleError::Interrupted),
            None => Err(ConsoleError::Eof),
        }
    }

    fn print(&mut self, line: &str) {
        self.output.push(line.to_string());
    }
}

pub fn summit_table() -> SummitTable {
    SummitTable::from_reader(SUMMITS_CSV.as_bytes()).expect("summit fixture")
}

pub fn name_directory() -> NameDirectory {
    NameDirectory::from_reader(NAMES_CSV.as_bytes()).expect("name fixture")
}

pub fn refs() -> ReferenceTables {
    ReferenceTables::new(summit_table(), name_directory())
}

pub fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).expect("date")
}

pub fn activator() -> Station {
    Station {
        callsign: "M0XYZ".to_string(),
        summit: Some(SummitCode::normalize("G/LD-001")),
        date: date(),
    }
}

pub fn chaser() -> Station {
    Station {
        callsign: "M0XYZ".to_string(),
        summit: None,
        date: date(),
    }
}

pub fn qso(call: &str, hour: u32, minute: u32) -> QsoRecord {
    QsoRecord {
        time: NaiveTime::from_hms_opt(hour, minute, 0).expect("time"),
        callsign: call.to_string(),
        freq: "7.032MHz".to_string(),
        mode: "CW".to_string(),
        rst_sent: None,
        rst_rcvd: None,
        remote_summit: None,
        comment: String::new(),
    }
}
