//! Editing controller for an ordered collection of pressures.
//!
//! The controller never owns the collection. Every operation reads the
//! current slice, builds a replacement `Vec` and hands it to a [`ChangeSink`];
//! the only state it keeps is which item is expanded.

use shared::{
    catalog::{Schema, UsageMap},
    domain::{Pressure, PressureId},
};
use tracing::{debug, warn};

pub mod capabilities;
pub mod error;
pub mod events;
pub mod ids;
pub mod view;

pub use capabilities::{delete_confirmation_message, ChangeSink, ConfirmPrompt};
pub use error::EditorError;
pub use events::{EditorIntent, IntentOutcome};
pub use ids::{IdGenerator, SequentialIdGenerator, UuidIdGenerator};
pub use view::{Affordance, EditorView, ItemHandle, ItemView, EMPTY_STATE_MESSAGE};

#[derive(Debug, Clone)]
pub struct ListEditorController<G = UuidIdGenerator> {
    expanded: Option<usize>,
    ids: G,
}

impl ListEditorController<UuidIdGenerator> {
    pub fn new() -> Self {
        Self::with_id_generator(UuidIdGenerator)
    }
}

impl Default for ListEditorController<UuidIdGenerator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: IdGenerator> ListEditorController<G> {
    pub fn with_id_generator(ids: G) -> Self {
        Self {
            expanded: None,
            ids,
        }
    }

    pub fn expanded_index(&self) -> Option<usize> {
        self.expanded
    }

    pub fn render<'a>(
        &self,
        pressures: &'a [Pressure],
        schema: &'a Schema,
        usage: &'a UsageMap,
    ) -> EditorView<'a> {
        if pressures.is_empty() {
            return EditorView::Empty {
                create_first: Affordance::CreateFirst,
            };
        }

        let items = pressures
            .iter()
            .enumerate()
            .map(|(index, pressure)| ItemView {
                handle: ItemHandle::new(index, pressure.id.clone()),
                pressure,
                expanded: self.expanded == Some(index),
                schema,
                usage,
            })
            .collect();

        EditorView::Items {
            items,
            add: Affordance::Add,
        }
    }

    /// Appends a default pressure and expands it.
    pub fn add(&mut self, pressures: &[Pressure], sink: &mut impl ChangeSink) -> PressureId {
        let id = self.ids.next_id();
        let position = pressures.len();

        let mut next = Vec::with_capacity(position + 1);
        next.extend_from_slice(pressures);
        next.push(Pressure::with_defaults(id.clone()));

        debug!(id = %id, position, "added pressure");
        sink.publish(next);
        self.expanded = Some(position);
        id
    }

    /// Empty-state variant of [`ListEditorController::add`]; identical effect.
    pub fn create_first(
        &mut self,
        pressures: &[Pressure],
        sink: &mut impl ChangeSink,
    ) -> PressureId {
        self.add(pressures, sink)
    }

    pub fn edit(
        &mut self,
        pressures: &[Pressure],
        handle: &ItemHandle,
        updated: Pressure,
        sink: &mut impl ChangeSink,
    ) -> Result<(), EditorError> {
        let index = self.resolve(pressures, handle)?;

        let mut next = pressures.to_vec();
        next[index] = updated;

        debug!(id = %handle.id(), index, "edited pressure");
        sink.publish(next);
        Ok(())
    }

    /// Removes the item after the user agrees. Returns the removed pressure,
    /// or `None` when the prompt was declined.
    pub fn delete(
        &mut self,
        pressures: &[Pressure],
        handle: &ItemHandle,
        confirm: &mut impl ConfirmPrompt,
        sink: &mut impl ChangeSink,
    ) -> Result<Option<Pressure>, EditorError> {
        let index = self.resolve(pressures, handle)?;
        let target = &pressures[index];

        if !confirm.confirm(&delete_confirmation_message(&target.name)) {
            debug!(id = %target.id, index, "pressure deletion declined");
            return Ok(None);
        }

        let mut next = Vec::with_capacity(pressures.len() - 1);
        next.extend_from_slice(&pressures[..index]);
        next.extend_from_slice(&pressures[index + 1..]);

        debug!(id = %target.id, index, "deleted pressure");
        sink.publish(next);

        // Keep the same pressure expanded when an earlier one disappears.
        self.expanded = match self.expanded {
            Some(expanded) if expanded == index => None,
            Some(expanded) if expanded > index => Some(expanded - 1),
            other => other,
        };

        Ok(Some(target.clone()))
    }

    pub fn toggle_expand(
        &mut self,
        pressures: &[Pressure],
        handle: &ItemHandle,
    ) -> Result<Option<usize>, EditorError> {
        let index = self.resolve(pressures, handle)?;
        self.expanded = if self.expanded == Some(index) {
            None
        } else {
            Some(index)
        };
        Ok(self.expanded)
    }

    pub fn dispatch(
        &mut self,
        intent: EditorIntent,
        pressures: &[Pressure],
        confirm: &mut impl ConfirmPrompt,
        sink: &mut impl ChangeSink,
    ) -> Result<IntentOutcome, EditorError> {
        let outcome = match intent {
            EditorIntent::Add => IntentOutcome::Added(self.add(pressures, sink)),
            EditorIntent::CreateFirst => IntentOutcome::Added(self.create_first(pressures, sink)),
            EditorIntent::Edit { handle, updated } => {
                self.edit(pressures, &handle, updated, sink)?;
                IntentOutcome::Edited
            }
            EditorIntent::Delete { handle } => {
                match self.delete(pressures, &handle, confirm, sink)? {
                    Some(removed) => IntentOutcome::Deleted(removed),
                    None => IntentOutcome::DeleteDeclined,
                }
            }
            EditorIntent::ToggleExpand { handle } => IntentOutcome::Toggled {
                expanded: self.toggle_expand(pressures, &handle)?,
            },
        };
        Ok(outcome)
    }

    fn resolve(&self, pressures: &[Pressure], handle: &ItemHandle) -> Result<usize, EditorError> {
        let index = handle.index();
        let Some(current) = pressures.get(index) else {
            warn!(index, len = pressures.len(), "rejected out-of-range item handle");
            return Err(EditorError::IndexOutOfRange {
                index,
                len: pressures.len(),
            });
        };

        if &current.id != handle.id() {
            warn!(index, expected = %handle.id(), found = %current.id, "rejected stale item handle");
            return Err(EditorError::IdMismatch {
                index,
                expected: handle.id().clone(),
                found: current.id.clone(),
            });
        }

        Ok(index)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
