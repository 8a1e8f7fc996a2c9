//! Render output of the list editor.

use shared::{
    catalog::{Schema, UsageMap},
    domain::{Pressure, PressureId},
};

use crate::events::EditorIntent;

pub const EMPTY_STATE_MESSAGE: &str = "No pressures defined yet.";

/// Identifies one rendered item. Only a render pass hands these out, so edits
/// and deletes always refer to a position the user actually saw.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemHandle {
    index: usize,
    id: PressureId,
}

impl ItemHandle {
    pub(crate) fn new(index: usize, id: PressureId) -> Self {
        Self { index, id }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn id(&self) -> &PressureId {
        &self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affordance {
    CreateFirst,
    Add,
}

impl Affordance {
    pub fn label(self) -> &'static str {
        match self {
            Affordance::CreateFirst => "Create first pressure",
            Affordance::Add => "Add pressure",
        }
    }

    pub fn intent(self) -> EditorIntent {
        match self {
            Affordance::CreateFirst => EditorIntent::CreateFirst,
            Affordance::Add => EditorIntent::Add,
        }
    }
}

/// What the item delegate receives for one pressure.
#[derive(Debug, Clone)]
pub struct ItemView<'a> {
    pub handle: ItemHandle,
    pub pressure: &'a Pressure,
    pub expanded: bool,
    pub schema: &'a Schema,
    pub usage: &'a UsageMap,
}

impl<'a> ItemView<'a> {
    pub fn usages(&self) -> &'a [String] {
        self.usage.usages_of(&self.pressure.id)
    }

    pub fn toggle_intent(&self) -> EditorIntent {
        EditorIntent::ToggleExpand {
            handle: self.handle.clone(),
        }
    }

    pub fn edit_intent(&self, updated: Pressure) -> EditorIntent {
        EditorIntent::Edit {
            handle: self.handle.clone(),
            updated,
        }
    }

    pub fn delete_intent(&self) -> EditorIntent {
        EditorIntent::Delete {
            handle: self.handle.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum EditorView<'a> {
    Empty { create_first: Affordance },
    Items {
        items: Vec<ItemView<'a>>,
        add: Affordance,
    },
}

impl<'a> EditorView<'a> {
    pub fn is_empty(&self) -> bool {
        matches!(self, EditorView::Empty { .. })
    }

    pub fn items(&self) -> &[ItemView<'a>] {
        match self {
            EditorView::Empty { .. } => &[],
            EditorView::Items { items, .. } => items,
        }
    }

    /// The single trailing affordance: "create first" when empty, "add" otherwise.
    pub fn affordance(&self) -> Affordance {
        match self {
            EditorView::Empty { create_first } => *create_first,
            EditorView::Items { add, .. } => *add,
        }
    }

    pub fn item(&self, index: usize) -> Option<&ItemView<'a>> {
        self.items().get(index)
    }

    pub fn find(&self, id: &PressureId) -> Option<&ItemView<'a>> {
        self.items().iter().find(|item| &item.pressure.id == id)
    }

    pub fn expanded_item(&self) -> Option<&ItemView<'a>> {
        self.items().iter().find(|item| item.expanded)
    }
}
