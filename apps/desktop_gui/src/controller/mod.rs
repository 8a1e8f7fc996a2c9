//! Controller layer: UI events and orchestration between the list editor and the worker.

pub mod events;
pub mod orchestration;
