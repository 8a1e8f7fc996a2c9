//! Commands queued from UI to the persistence worker.

use shared::PressureDocument;
use std::path::PathBuf;

pub enum PersistCommand {
    Save {
        path: PathBuf,
        document: Box<PressureDocument>,
        revision: u64,
    },
    Shutdown,
}

impl PersistCommand {
    pub fn name(&self) -> &'static str {
        match self {
            PersistCommand::Save { .. } => "save",
            PersistCommand::Shutdown => "shutdown",
        }
    }
}
