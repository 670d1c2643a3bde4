use rustyline::{DefaultEditor, error::ReadlineError};

use super::{Console, ConsoleError};

/// Interactive terminal with readline editing and per-session history.
pub struct TerminalConsole {
    editor: DefaultEditor,
}

impl TerminalConsole {
    pub fn new() -> Result<Self, ConsoleError> {
        let editor = DefaultEditor::new().map_err(|e| ConsoleError::Terminal(e.to_string()))?;
        Ok(Self { editor })
    }
}

impl Console for TerminalConsole {
    fn read_line(&mut self, prompt: &str, default: &str) -> Result<String, ConsoleError> {
        match self.editor.readline_with_initial(prompt, (default, "")) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    if let Err(err) = self.editor.add_history_entry(line.as_str()) {
                        tracing::debug!("history entry not recorded: {err}");
                    }
                }
                Ok(line)
            }
            Err(ReadlineError::Interrupted) => Err(ConsoleError::Interrupted),
            Err(ReadlineError::Eof) => Err(ConsoleError::Eof),
            Err(err) => Err(ConsoleError::Terminal(err.to_string())),
        }
    }

    fn print(&mut self, line: &str) {
        println!("{line}");
    }
}
