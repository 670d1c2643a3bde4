//! Events emitted by controller steps.

use crate::types::QsoIndex;

/// Observable outcome of one controller step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A new QSO was appended.
    Appended {
        /// 1-based index of the new QSO.
        index: QsoIndex,
    },
    /// An existing QSO was replaced by the edit command.
    Replaced {
        /// 1-based index of the edited QSO.
        index: QsoIndex,
    },
    /// The log was appended to the output file and the backup removed.
    Committed {
        /// Records written.
        records: usize,
    },
    /// The session was discarded without saving.
    Aborted,
}
