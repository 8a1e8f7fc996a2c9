//! UI layer for the desktop editor: app shell, item cards and native dialogs.

pub mod app;
pub mod confirm;
pub mod pressure_card;

pub use app::{AppInit, PressureStudioApp};
