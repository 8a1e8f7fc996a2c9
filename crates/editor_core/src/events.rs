//! User intents accepted by the list editor and what became of them.

use shared::domain::{Pressure, PressureId};

use crate::view::ItemHandle;

#[derive(Debug, Clone, PartialEq)]
pub enum EditorIntent {
    Add,
    CreateFirst,
    Edit { handle: ItemHandle, updated: Pressure },
    Delete { handle: ItemHandle },
    ToggleExpand { handle: ItemHandle },
}

impl EditorIntent {
    pub fn name(&self) -> &'static str {
        match self {
            EditorIntent::Add => "add",
            EditorIntent::CreateFirst => "create_first",
            EditorIntent::Edit { .. } => "edit",
            EditorIntent::Delete { .. } => "delete",
            EditorIntent::ToggleExpand { .. } => "toggle_expand",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum IntentOutcome {
    Added(PressureId),
    Edited,
    Deleted(Pressure),
    DeleteDeclined,
    Toggled { expanded: Option<usize> },
}

impl IntentOutcome {
    /// Whether a replacement collection was published.
    pub fn changed_collection(&self) -> bool {
        matches!(
            self,
            IntentOutcome::Added(_) | IntentOutcome::Edited | IntentOutcome::Deleted(_)
        )
    }
}
