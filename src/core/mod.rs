//! In-memory session state.

/// Station details, session aggregate and backup snapshot.
pub mod session;
/// Ordered QSO log with sticky defaults.
pub mod store;
