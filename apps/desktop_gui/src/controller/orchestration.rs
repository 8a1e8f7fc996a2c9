//! Orchestration from collected UI intents to the list editor and the persistence queue.

use crossbeam_channel::{Sender, TrySendError};
use editor_core::{
    ConfirmPrompt, EditorError, EditorIntent, IdGenerator, IntentOutcome, ListEditorController,
};
use shared::{Pressure, PressureDocument};

use crate::backend_bridge::commands::PersistCommand;

/// Runs one intent against the document's current pressures and installs
/// whatever collection the editor emits.
pub fn apply_intent<G: IdGenerator>(
    editor: &mut ListEditorController<G>,
    document: &mut PressureDocument,
    intent: EditorIntent,
    confirm: &mut impl ConfirmPrompt,
) -> Result<IntentOutcome, EditorError> {
    let intent_name = intent.name();
    let mut emitted = None;
    let outcome = editor.dispatch(
        intent,
        &document.pressures,
        confirm,
        &mut |next: Vec<Pressure>| emitted = Some(next),
    )?;

    if let Some(next) = emitted {
        document.replace_pressures(next);
    }

    tracing::debug!(
        intent = intent_name,
        changed = outcome.changed_collection(),
        "applied editor intent"
    );
    Ok(outcome)
}

pub fn dispatch_persist_command(
    cmd_tx: &Sender<PersistCommand>,
    cmd: PersistCommand,
    status: &mut String,
) -> bool {
    let cmd_name = cmd.name();

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->persistence command");
            true
        }
        Err(TrySendError::Full(_)) => {
            *status = "Save queue is full; changes will be saved on the next edit".to_string();
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            *status = "Persistence worker disconnected; changes are not being saved".to_string();
            false
        }
    }
}

/// Blocking variant for shutdown, where a full queue must wait rather than drop.
pub fn flush_persist_command(cmd_tx: &Sender<PersistCommand>, cmd: PersistCommand) -> bool {
    let cmd_name = cmd.name();
    match cmd_tx.send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "flushed ui->persistence command");
            true
        }
        Err(_) => {
            tracing::warn!(command = cmd_name, "persistence worker gone; command dropped");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{thread, time::Duration};

    use crossbeam_channel::bounded;
    use editor_core::SequentialIdGenerator;

    fn accept(_: &str) -> bool {
        true
    }

    #[test]
    fn emitted_collections_replace_the_document_pressures() {
        let mut editor = ListEditorController::with_id_generator(SequentialIdGenerator::new("p"));
        let mut document = PressureDocument::default();

        let outcome = apply_intent(
            &mut editor,
            &mut document,
            EditorIntent::CreateFirst,
            &mut accept,
        )
        .expect("create first");

        assert!(outcome.changed_collection());
        assert_eq!(document.pressures.len(), 1);
        assert_eq!(document.pressures[0].id.as_str(), "p-1");
        assert!(document.updated_at.is_some());
    }

    #[test]
    fn toggles_leave_the_document_untouched() {
        let mut editor = ListEditorController::with_id_generator(SequentialIdGenerator::new("p"));
        let mut document = PressureDocument::default();
        apply_intent(&mut editor, &mut document, EditorIntent::Add, &mut accept).expect("add");
        let before = document.clone();

        let toggle = editor
            .render(&document.pressures, &document.schema, &document.usage_map)
            .items()[0]
            .toggle_intent();
        let outcome =
            apply_intent(&mut editor, &mut document, toggle, &mut accept).expect("toggle");

        assert_eq!(outcome, IntentOutcome::Toggled { expanded: None });
        assert_eq!(document, before);
    }

    #[test]
    fn reports_full_and_disconnected_queues() {
        let (tx, rx) = bounded::<PersistCommand>(1);
        let mut status = String::new();

        assert!(dispatch_persist_command(&tx, PersistCommand::Shutdown, &mut status));
        assert!(!dispatch_persist_command(&tx, PersistCommand::Shutdown, &mut status));
        assert!(status.contains("full"));

        drop(rx);
        assert!(!dispatch_persist_command(&tx, PersistCommand::Shutdown, &mut status));
        assert!(status.contains("disconnected"));
    }

    #[test]
    fn flush_waits_for_room_in_a_full_queue() {
        let (tx, rx) = bounded::<PersistCommand>(1);
        let mut status = String::new();
        assert!(dispatch_persist_command(&tx, PersistCommand::Shutdown, &mut status));

        let drain = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            let received: Vec<_> = rx.iter().take(2).collect();
            received.len()
        });

        assert!(flush_persist_command(&tx, PersistCommand::Shutdown));
        assert_eq!(drain.join().expect("drain thread"), 2);
    }

    #[test]
    fn flush_reports_a_gone_worker() {
        let (tx, rx) = bounded::<PersistCommand>(1);
        drop(rx);
        assert!(!flush_persist_command(&tx, PersistCommand::Shutdown));
    }
}
