//! Persistence worker: owns disk writes so the UI thread never blocks on I/O.

pub mod commands;
pub mod runtime;
