use editor_core::ConfirmPrompt;

/// Native yes/no dialog; blocks the UI thread until answered.
#[derive(Debug, Default, Clone, Copy)]
pub struct DialogConfirm;

impl ConfirmPrompt for DialogConfirm {
    fn confirm(&mut self, message: &str) -> bool {
        let answer = rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Warning)
            .set_title("Delete pressure")
            .set_description(message)
            .set_buttons(rfd::MessageButtons::YesNo)
            .show();
        matches!(answer, rfd::MessageDialogResult::Yes)
    }
}
