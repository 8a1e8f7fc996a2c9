pub mod catalog;
pub mod document;
pub mod domain;
pub mod error;

pub use catalog::{Schema, UsageMap};
pub use document::PressureDocument;
pub use domain::{FeedbackFactor, Growth, Pressure, PressureId};
pub use error::DocumentError;
