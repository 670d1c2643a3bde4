//! Line-oriented operator I/O.

/// rustyline-backed terminal console.
pub mod terminal;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsoleError {
    /// Operator pressed Ctrl-C.
    #[error("interrupted")]
    Interrupted,
    /// Input closed (Ctrl-D or end of stream).
    #[error("end of input")]
    Eof,
    #[error("terminal error: {0}")]
    Terminal(String),
}

/// Blocking prompt/print seam between the controller and the operator.
pub trait Console {
    /// Reads one line after showing `prompt`, with `default` pre-filled and editable.
    fn read_line(&mut self, prompt: &str, default: &str) -> Result<String, ConsoleError>;

    /// Prints one line of feedback.
    fn print(&mut self, line: &str);
}
