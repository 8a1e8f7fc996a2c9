//! Capabilities injected by whoever owns the pressure collection.

use shared::domain::Pressure;

/// Blocking yes/no question asked before destructive actions.
pub trait ConfirmPrompt {
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F> ConfirmPrompt for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

/// Receives every replacement collection the editor produces. The owner is
/// expected to render the editor again with the value it was handed.
pub trait ChangeSink {
    fn publish(&mut self, pressures: Vec<Pressure>);
}

impl<F> ChangeSink for F
where
    F: FnMut(Vec<Pressure>),
{
    fn publish(&mut self, pressures: Vec<Pressure>) {
        self(pressures)
    }
}

pub fn delete_confirmation_message(name: &str) -> String {
    format!("Delete pressure \"{name}\"? This cannot be undone.")
}
