use thiserror::Error;

use crate::{
    console::{Console, ConsoleError},
    core::{session::Session, store::LogError},
    persist::{SnapshotSink, output::OutputFile},
    qso::QsoDraft,
    reference::ReferenceTables,
    types::QsoIndex,
};

use super::{
    command::{Command, MENU},
    events::SessionEvent,
    prompts::{RULE, prompt_qso},
};

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error(transparent)]
    Console(#[from] ConsoleError),
    #[error(transparent)]
    Log(#[from] LogError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    PromptingNew,
    CommandMode,
    Saved,
    Aborted,
}

impl ControllerState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ControllerState::Saved | ControllerState::Aborted)
    }
}

/// Drives one logging session: new-QSO prompting, command mode, backup and commit.
pub struct Controller<C: Console> {
    console: C,
    session: Session,
    refs: ReferenceTables,
    backup: Box<dyn SnapshotSink>,
    output: OutputFile,
    ask_reports: bool,
    state: ControllerState,
}

impl<C: Console> Controller<C> {
    pub fn new(
        console: C,
        session: Session,
        refs: ReferenceTables,
        backup: Box<dyn SnapshotSink>,
        output: OutputFile,
        ask_reports: bool,
    ) -> Self {
        Self {
            console,
            session,
            refs,
            backup,
            output,
            ask_reports,
            state: ControllerState::PromptingNew,
        }
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    /// Steps until the session is saved or aborted.
    pub fn run(&mut self) -> Result<ControllerState, ControllerError> {
        self.console.print(&format!(
            "Adding log to '{}' - Press CTRL+C to edit previous QSOs or exit",
            self.output.path().display()
        ));
        while !self.state.is_terminal() {
            if let Some(event) = self.step()? {
                tracing::debug!(?event, "session event");
            }
        }
        Ok(self.state)
    }

    /// Performs one prompt sequence or one command.
    pub fn step(&mut self) -> Result<Option<SessionEvent>, ControllerError> {
        match self.state {
            ControllerState::PromptingNew => self.prompt_new(),
            ControllerState::CommandMode => self.read_command(),
            ControllerState::Saved | ControllerState::Aborted => Ok(None),
        }
    }

    fn prompt_new(&mut self) -> Result<Option<SessionEvent>, ControllerError> {
        let next = self.session.log().next_index();
        self.console.print(&format!("Enter QSO #{next}:"));

        let draft = QsoDraft::from_sticky(self.session.log().sticky());
        match prompt_qso(
            &mut self.console,
            &self.refs,
            self.session.station(),
            &draft,
            self.ask_reports,
        ) {
            Ok(qso) => {
                let index = self.session.log_mut().append(qso);
                self.checkpoint();
                self.console.print(RULE);
                Ok(Some(SessionEvent::Appended { index }))
            }
            Err(ConsoleError::Interrupted | ConsoleError::Eof) => {
                self.enter_command_mode();
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn enter_command_mode(&mut self) {
        self.state = ControllerState::CommandMode;
        for line in MENU {
            self.console.print(line);
        }
    }

    fn read_command(&mut self) -> Result<Option<SessionEvent>, ControllerError> {
        let line = match self.console.read_line("cmd> ", "") {
            Ok(line) => line,
            Err(ConsoleError::Interrupted) => return self.confirm_abort(),
            Err(ConsoleError::Eof) => return Ok(Some(self.abort())),
            Err(err) => return Err(err.into()),
        };

        match line.parse::<Command>() {
            Ok(Command::Continue) => {
                self.state = ControllerState::PromptingNew;
                Ok(None)
            }
            Ok(Command::List) => {
                self.list();
                Ok(None)
            }
            Ok(Command::Edit(index)) => self.edit(index),
            Ok(Command::Save) => Ok(self.save()),
            Err(err) => {
                self.console.print(&format!("Error: {err}"));
                Ok(None)
            }
        }
    }

    fn edit(&mut self, index: QsoIndex) -> Result<Option<SessionEvent>, ControllerError> {
        let draft = match self.session.log().get(index) {
            Some(current) => QsoDraft::from(current),
            None => {
                let len = self.session.log().len();
                self.console
                    .print(&format!("Error: {}", LogError::IndexOutOfRange { index, len }));
                return Ok(None);
            }
        };

        self.console.print(&format!("Edit QSO #{index}:"));
        match prompt_qso(
            &mut self.console,
            &self.refs,
            self.session.station(),
            &draft,
            self.ask_reports,
        ) {
            Ok(qso) => {
                self.session.log_mut().replace(index, qso)?;
                self.checkpoint();
                Ok(Some(SessionEvent::Replaced { index }))
            }
            Err(ConsoleError::Interrupted | ConsoleError::Eof) => {
                self.console.print(&format!("Edit of QSO #{index} cancelled"));
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn list(&mut self) {
        if self.session.log().is_empty() {
            self.console.print("No QSOs logged yet");
            return;
        }
        let lines: Vec<String> = self
            .session
            .log()
            .records()
            .iter()
            .enumerate()
            .map(|(i, q)| {
                format!(
                    "#{:<3} {} {:<10} {:<10} {:<4} {:<12} {}",
                    i + 1,
                    q.time.format("%H:%M"),
                    q.callsign,
                    q.freq,
                    q.mode,
                    q.remote_summit.as_ref().map(|s| s.as_str()).unwrap_or("-"),
                    q.comment_with_reports()
                )
            })
            .collect();
        for line in &lines {
            self.console.print(line);
        }
    }

    fn save(&mut self) -> Option<SessionEvent> {
        match self.output.append(&self.session, &self.refs) {
            Ok(records) => {
                if let Err(err) = self.backup.discard() {
                    tracing::warn!("could not remove backup after save: {err}");
                    self.console
                        .print(&format!("Warning: backup file not removed: {err}"));
                }
                self.console.print(&format!(
                    "Saved {records} QSOs to '{}'",
                    self.output.path().display()
                ));
                self.state = ControllerState::Saved;
                Some(SessionEvent::Committed { records })
            }
            Err(err) => {
                tracing::error!("commit to {} failed: {err}", self.output.path().display());
                self.console
                    .print(&format!("Error: could not save log, backup kept: {err}"));
                None
            }
        }
    }

    fn confirm_abort(&mut self) -> Result<Option<SessionEvent>, ControllerError> {
        match self
            .console
            .read_line("Discard this session without saving? (y/N): ", "")
        {
            Ok(answer) if matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") => {
                Ok(Some(self.abort()))
            }
            Ok(_) => Ok(None),
            Err(ConsoleError::Interrupted | ConsoleError::Eof) => Ok(Some(self.abort())),
            Err(err) => Err(err.into()),
        }
    }

    fn abort(&mut self) -> SessionEvent {
        tracing::warn!(
            records = self.session.log().len(),
            "session discarded without saving"
        );
        self.state = ControllerState::Aborted;
        SessionEvent::Aborted
    }

    /// Rewrites the backup with the whole session; failures are reported, not fatal.
    fn checkpoint(&mut self) {
        let snapshot = self.session.export_snapshot();
        if let Err(err) = self.backup.write_snapshot(&snapshot) {
            tracing::error!("backup write failed: {err}");
            self.console
                .print(&format!("Warning: backup could not be written: {err}"));
        }
    }
}
