//! Worker events and error modeling for the desktop controller.

use std::path::PathBuf;

use editor_core::EditorError;

pub enum UiEvent {
    Saved { path: PathBuf, revision: u64 },
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Storage,
    Format,
    StaleView,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    Load,
    Save,
    Edit,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("parse")
            || message_lower.contains("unsupported version")
            || message_lower.contains("encode")
        {
            UiErrorCategory::Format
        } else if message_lower.contains("access")
            || message_lower.contains("permission")
            || message_lower.contains("disconnected")
            || message_lower.contains("queue")
        {
            UiErrorCategory::Storage
        } else if message_lower.contains("out of range") || message_lower.contains("rendered as") {
            UiErrorCategory::StaleView
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn from_editor(err: &EditorError) -> Self {
        Self {
            category: UiErrorCategory::StaleView,
            context: UiErrorContext::Edit,
            message: err.to_string(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Storage => "Storage",
        UiErrorCategory::Format => "Document format",
        UiErrorCategory::StaleView => "Out-of-date view",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::PressureId;

    #[test]
    fn classifies_document_failures() {
        let err = UiError::from_message(
            UiErrorContext::Load,
            "failed to parse pressure document 'a.json': expected value",
        );
        assert_eq!(err.category(), UiErrorCategory::Format);
        assert_eq!(err.context(), UiErrorContext::Load);

        let err = UiError::from_message(
            UiErrorContext::Save,
            "failed to access pressure document 'a.json': permission denied",
        );
        assert_eq!(err.category(), UiErrorCategory::Storage);
    }

    #[test]
    fn editor_errors_are_stale_view_errors() {
        let err = UiError::from_editor(&EditorError::IdMismatch {
            index: 0,
            expected: PressureId::from("a"),
            found: PressureId::from("b"),
        });
        assert_eq!(err.category(), UiErrorCategory::StaleView);
        assert_eq!(err.context(), UiErrorContext::Edit);
        assert!(err.message().contains("'a'"));
    }
}
