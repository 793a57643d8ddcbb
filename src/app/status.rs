#[derive(Debug, Clone)]
pub struct StatusLine {
    message: String,
}

pub const READY_STATUS: &str = "Ready. Press Ctrl+S to submit.";

impl Default for StatusLine {
    fn default() -> Self {
        Self {
            message: READY_STATUS.to_string(),
        }
    }
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_raw(&mut self, msg: impl Into<String>) {
        self.message = msg.into();
    }

    pub fn ready(&mut self) {
        self.message = READY_STATUS.to_string();
    }

    pub fn editing(&mut self, label: &str) {
        self.message = format!("Editing {label}");
    }

    pub fn read_only(&mut self, label: &str) {
        self.message = format!("{label} is read-only");
    }

    pub fn submitted(&mut self) {
        self.message = "Form complete. Press Ctrl+Q to send and exit.".to_string();
    }

    pub fn issues_remaining(&mut self, count: usize) {
        self.message = format!("{count} field(s) need attention");
    }

    pub fn pending_exit(&mut self) {
        self.message = "Unsaved changes. Press Ctrl+Q again to quit without submitting.".to_string();
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
