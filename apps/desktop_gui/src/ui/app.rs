use std::{path::PathBuf, thread::JoinHandle, time::Duration};

use chrono::Local;
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use editor_core::{
    EditorIntent, EditorView, IntentOutcome, ListEditorController, EMPTY_STATE_MESSAGE,
};
use shared::PressureDocument;

use crate::backend_bridge::commands::PersistCommand;
use crate::controller::events::{err_label, UiError, UiErrorContext, UiEvent};
use crate::controller::orchestration::{
    apply_intent, dispatch_persist_command, flush_persist_command,
};
use crate::ui::{confirm::DialogConfirm, pressure_card};

/// Everything the shell needs at startup.
pub struct AppInit {
    pub document_path: PathBuf,
    pub loaded: Result<PressureDocument, shared::DocumentError>,
    pub autosave: bool,
    pub cmd_tx: Sender<PersistCommand>,
    pub ui_rx: Receiver<UiEvent>,
    pub worker: JoinHandle<()>,
}

/// Owns the pressure document; the list editor only ever sees it borrowed.
pub struct PressureStudioApp {
    document: PressureDocument,
    document_path: PathBuf,
    editor: ListEditorController,
    cmd_tx: Sender<PersistCommand>,
    ui_rx: Receiver<UiEvent>,
    worker: Option<JoinHandle<()>>,
    autosave: bool,
    revision: u64,
    saved_revision: u64,
    status: String,
    banner: Option<UiError>,
}

impl PressureStudioApp {
    pub fn new(init: AppInit) -> Self {
        let (document, autosave, banner, status) = match init.loaded {
            Ok(document) => {
                let status = format!(
                    "Opened {} ({} pressures)",
                    init.document_path.display(),
                    document.pressures.len()
                );
                (document, init.autosave, None, status)
            }
            Err(err) => {
                let err = anyhow::Error::new(err);
                tracing::error!("{err:#}");
                // Never autosave over a file we could not read.
                (
                    PressureDocument::default(),
                    false,
                    Some(UiError::from_message(UiErrorContext::Load, format!("{err:#}"))),
                    "Autosave disabled until the document loads cleanly".to_string(),
                )
            }
        };

        Self {
            document,
            document_path: init.document_path,
            editor: ListEditorController::new(),
            cmd_tx: init.cmd_tx,
            ui_rx: init.ui_rx,
            worker: Some(init.worker),
            autosave,
            revision: 0,
            saved_revision: 0,
            status,
            banner,
        }
    }

    fn has_unsaved_changes(&self) -> bool {
        self.revision != self.saved_revision
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Saved { path, revision } => {
                    self.saved_revision = self.saved_revision.max(revision);
                    self.status = format!(
                        "Saved {} at {}",
                        path.display(),
                        Local::now().format("%H:%M:%S")
                    );
                }
                UiEvent::Error(err) => self.banner = Some(err),
            }
        }
    }

    fn save_command(&self) -> PersistCommand {
        PersistCommand::Save {
            path: self.document_path.clone(),
            document: Box::new(self.document.clone()),
            revision: self.revision,
        }
    }

    fn request_save(&mut self) {
        let cmd = self.save_command();
        dispatch_persist_command(&self.cmd_tx, cmd, &mut self.status);
    }

    fn apply(&mut self, intents: Vec<EditorIntent>) {
        let mut confirm = DialogConfirm;
        for intent in intents {
            match apply_intent(&mut self.editor, &mut self.document, intent, &mut confirm) {
                Ok(outcome) => {
                    if let Some(status) = status_for(&outcome) {
                        self.status = status;
                    }
                    if outcome.changed_collection() {
                        self.revision += 1;
                        if self.autosave {
                            self.request_save();
                        }
                    }
                }
                Err(err) => self.banner = Some(UiError::from_editor(&err)),
            }
        }
    }

    fn show_toolbar(&mut self, ui: &mut egui::Ui) {
        let mut save_clicked = false;
        let unsaved = self.has_unsaved_changes();
        ui.horizontal(|ui| {
            ui.heading("Pressures");
            ui.label(egui::RichText::new(self.document_path.display().to_string()).weak());
            if unsaved {
                ui.label(
                    egui::RichText::new("● unsaved").color(egui::Color32::from_rgb(220, 170, 60)),
                );
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Save").clicked() {
                    save_clicked = true;
                }
                ui.checkbox(&mut self.autosave, "Autosave");
            });
        });

        let mut dismiss = false;
        if let Some(err) = &self.banner {
            ui.horizontal(|ui| {
                ui.colored_label(
                    egui::Color32::from_rgb(210, 80, 80),
                    format!("{}: {}", err_label(err.category()), err.message()),
                );
                if ui.small_button("Dismiss").clicked() {
                    dismiss = true;
                }
            });
        }
        if dismiss {
            self.banner = None;
        }

        if save_clicked {
            self.request_save();
        }
    }
}

fn status_for(outcome: &IntentOutcome) -> Option<String> {
    match outcome {
        IntentOutcome::Added(id) => Some(format!("Added pressure {id}")),
        IntentOutcome::Edited => None,
        IntentOutcome::Deleted(removed) => Some(format!("Deleted \"{}\"", removed.name)),
        IntentOutcome::DeleteDeclined => Some("Deletion cancelled".to_string()),
        IntentOutcome::Toggled { .. } => None,
    }
}

impl eframe::App for PressureStudioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| self.show_toolbar(ui));
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(&self.status);
        });

        let mut intents = Vec::new();
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    let view = self.editor.render(
                        &self.document.pressures,
                        &self.document.schema,
                        &self.document.usage_map,
                    );
                    match &view {
                        EditorView::Empty { create_first } => {
                            ui.vertical_centered(|ui| {
                                ui.add_space(40.0);
                                ui.label(EMPTY_STATE_MESSAGE);
                                if ui.button(create_first.label()).clicked() {
                                    intents.push(create_first.intent());
                                }
                            });
                        }
                        EditorView::Items { items, add } => {
                            for item in items {
                                if let Some(intent) = pressure_card::show(ui, item) {
                                    intents.push(intent);
                                }
                                ui.add_space(4.0);
                            }
                            if ui.button(add.label()).clicked() {
                                intents.push(add.intent());
                            }
                        }
                    }
                });
        });

        if !intents.is_empty() {
            self.apply(intents);
        }

        // Poll for worker results even when the user is idle.
        ctx.request_repaint_after(Duration::from_millis(250));
    }
}

impl Drop for PressureStudioApp {
    fn drop(&mut self) {
        if self.autosave && self.has_unsaved_changes() {
            // Blocks until the worker has room; the last edits must not be dropped.
            flush_persist_command(&self.cmd_tx, self.save_command());
        }
        let _ = self.cmd_tx.send(PersistCommand::Shutdown);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Pressure, PressureId};

    #[test]
    fn status_lines_describe_collection_changes() {
        assert_eq!(
            status_for(&IntentOutcome::Added(PressureId::from("p-1"))),
            Some("Added pressure p-1".to_string())
        );
        let removed = Pressure {
            name: "Unrest".to_string(),
            ..Pressure::with_defaults(PressureId::from("p-1"))
        };
        assert_eq!(
            status_for(&IntentOutcome::Deleted(removed)),
            Some("Deleted \"Unrest\"".to_string())
        );
        assert_eq!(status_for(&IntentOutcome::Edited), None);
        assert_eq!(status_for(&IntentOutcome::Toggled { expanded: Some(0) }), None);
    }
}
