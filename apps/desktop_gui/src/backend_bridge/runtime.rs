//! Runtime bridge between the UI command queue and the persistence worker.

use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::PersistCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(cmd_rx: Receiver<PersistCommand>, ui_tx: Sender<UiEvent>) -> JoinHandle<()> {
    thread::spawn(move || {
        tracing::debug!("persistence worker started");
        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                PersistCommand::Save {
                    path,
                    document,
                    revision,
                } => {
                    let event = match document.save(&path) {
                        Ok(()) => UiEvent::Saved { path, revision },
                        Err(err) => {
                            let err = anyhow::Error::new(err);
                            tracing::warn!(path = %path.display(), "{err:#}");
                            UiEvent::Error(UiError::from_message(
                                UiErrorContext::Save,
                                format!("{err:#}"),
                            ))
                        }
                    };
                    if ui_tx.send(event).is_err() {
                        break;
                    }
                }
                PersistCommand::Shutdown => break,
            }
        }
        tracing::debug!("persistence worker stopped");
    })
}
