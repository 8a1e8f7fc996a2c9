use shared::domain::PressureId;
use thiserror::Error;

/// Raised when an item handle no longer describes the collection it is
/// applied to, e.g. one kept across a render that removed items.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("item index {index} is out of range for a collection of {len} pressure(s)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("item {index} was rendered as '{expected}' but is now '{found}'")]
    IdMismatch {
        index: usize,
        expected: PressureId,
        found: PressureId,
    },
}
