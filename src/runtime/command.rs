use std::str::FromStr;

use thiserror::Error;

use crate::types::QsoIndex;

/// Help text printed on entering command mode.
pub const MENU: &[&str] = &[
    "",
    "Available Commands:",
    "E <num> : Edit QSO <num>",
    "L       : List logged QSOs",
    "C       : Continue entering logs",
    "S       : Save and exit",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Edit(QsoIndex),
    List,
    Continue,
    Save,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("missing QSO number - use E <num>")]
    MissingIndex,
    #[error("invalid QSO number `{0}`")]
    BadIndex(String),
    #[error("unknown command `{0}`")]
    Unknown(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cmd = s.trim().to_uppercase();
        match cmd.as_str() {
            "" | "C" => return Ok(Command::Continue),
            "S" => return Ok(Command::Save),
            "L" => return Ok(Command::List),
            _ => {}
        }

        let Some(arg) = cmd.strip_prefix('E') else {
            return Err(CommandError::Unknown(s.trim().to_string()));
        };
        let arg = arg.trim();
        if arg.is_empty() {
            return Err(CommandError::MissingIndex);
        }
        arg.parse::<QsoIndex>()
            .map(Command::Edit)
            .map_err(|_| CommandError::BadIndex(arg.to_string()))
    }
}
