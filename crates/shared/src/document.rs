use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    catalog::{Schema, UsageMap},
    domain::Pressure,
    error::DocumentError,
};

pub const DOCUMENT_VERSION: u32 = 1;

/// On-disk container for a pressure collection and the collaborators its
/// item views need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PressureDocument {
    pub version: u32,
    #[serde(default)]
    pub pressures: Vec<Pressure>,
    #[serde(default)]
    pub schema: Schema,
    #[serde(default)]
    pub usage_map: UsageMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for PressureDocument {
    fn default() -> Self {
        Self {
            version: DOCUMENT_VERSION,
            pressures: Vec::new(),
            schema: Schema::default(),
            usage_map: UsageMap::default(),
            updated_at: None,
        }
    }
}

impl PressureDocument {
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let raw = fs::read_to_string(path).map_err(|source| DocumentError::io(path, source))?;
        let document: Self =
            serde_json::from_str(&raw).map_err(|source| DocumentError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        if document.version != DOCUMENT_VERSION {
            return Err(DocumentError::UnsupportedVersion {
                path: path.to_path_buf(),
                found: document.version,
                expected: DOCUMENT_VERSION,
            });
        }

        tracing::info!(
            path = %path.display(),
            pressures = document.pressures.len(),
            "loaded pressure document"
        );
        Ok(document)
    }

    /// Like [`PressureDocument::load`], but a missing file yields an empty document.
    pub fn load_or_default(path: &Path) -> Result<Self, DocumentError> {
        match Self::load(path) {
            Err(DocumentError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no pressure document yet; starting empty");
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), DocumentError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| DocumentError::io(parent, source))?;
        }

        let encoded = serde_json::to_string_pretty(self).map_err(DocumentError::Encode)?;
        let staging = staging_path(path);
        fs::write(&staging, encoded).map_err(|source| DocumentError::io(&staging, source))?;
        fs::rename(&staging, path).map_err(|source| DocumentError::io(path, source))?;

        tracing::info!(
            path = %path.display(),
            pressures = self.pressures.len(),
            "saved pressure document"
        );
        Ok(())
    }

    /// Installs a collection emitted by the editor as the new source of truth.
    pub fn replace_pressures(&mut self, pressures: Vec<Pressure>) {
        self.pressures = pressures;
        self.updated_at = Some(Utc::now());
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "pressures.json".into());
    name.push(".tmp");
    path.with_file_name(name)
}
