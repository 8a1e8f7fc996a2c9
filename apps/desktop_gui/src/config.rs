//! Startup flags, on-disk settings and resolved application paths.

use std::{
    fs,
    path::{Path, PathBuf},
};

use clap::Parser;
use serde::Deserialize;

pub const SETTINGS_FILE_NAME: &str = "pressure_studio.toml";
pub const DOCUMENT_FILE_NAME: &str = "pressures.json";

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "pressure_studio", about = "Edit world pressures")]
pub struct StartupConfig {
    /// Pressure document to open (created on first save).
    #[arg(long, env = "PRESSURE_STUDIO_DOCUMENT")]
    pub document: Option<PathBuf>,
    /// Directory holding settings and the default document.
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
    /// Settings file; defaults to `pressure_studio.toml` inside the data directory.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub document_path: Option<PathBuf>,
    pub log_filter: String,
    pub autosave: bool,
    /// Problems found while loading; logged once tracing is up.
    pub warnings: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            document_path: None,
            log_filter: "info".into(),
            autosave: true,
            warnings: Vec::new(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    document_path: Option<PathBuf>,
    log_filter: Option<String>,
    autosave: Option<bool>,
}

pub fn load_settings(path: &Path) -> Settings {
    load_settings_with(path, |key| std::env::var(key).ok())
}

pub(crate) fn load_settings_with(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.document_path {
                    settings.document_path = Some(v);
                }
                if let Some(v) = file_cfg.log_filter {
                    settings.log_filter = v;
                }
                if let Some(v) = file_cfg.autosave {
                    settings.autosave = v;
                }
            }
            Err(err) => settings.warnings.push(format!(
                "ignoring unreadable settings file '{}': {err}",
                path.display()
            )),
        }
    }

    if let Some(v) = env("PRESSURE_STUDIO_DOCUMENT") {
        settings.document_path = Some(PathBuf::from(v));
    }
    if let Some(v) = env("APP__DOCUMENT_PATH") {
        settings.document_path = Some(PathBuf::from(v));
    }

    if let Some(v) = env("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    if let Some(v) = env("APP__AUTOSAVE") {
        match parse_flag(&v) {
            Some(flag) => settings.autosave = flag,
            None => settings
                .warnings
                .push(format!("ignoring APP__AUTOSAVE={v:?}; expected true or false")),
        }
    }

    settings
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[derive(Debug, Clone)]
pub struct AppPaths {
    pub data_root: PathBuf,
    pub settings_path: PathBuf,
}

impl AppPaths {
    pub fn from_startup(startup: &StartupConfig) -> anyhow::Result<Self> {
        let root = if let Some(p) = &startup.data_dir {
            p.clone()
        } else {
            let base = dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("unable to resolve local app data dir"))?;
            base.join("pressure_studio")
        };

        Ok(Self {
            settings_path: startup
                .config
                .clone()
                .unwrap_or_else(|| root.join(SETTINGS_FILE_NAME)),
            data_root: root,
        })
    }

    /// Command line wins over settings, which win over the data directory default.
    pub fn document_path(&self, startup: &StartupConfig, settings: &Settings) -> PathBuf {
        startup
            .document
            .clone()
            .or_else(|| settings.document_path.clone())
            .unwrap_or_else(|| self.data_root.join(DOCUMENT_FILE_NAME))
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
