//! Interactive session state machine.

/// Command-mode parsing.
pub mod command;
/// Controller state machine.
pub mod controller;
/// Events emitted by controller steps.
pub mod events;
/// Station and QSO prompt sequences.
pub mod prompts;
