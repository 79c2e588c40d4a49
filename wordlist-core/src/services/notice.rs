use serde::Serialize;

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Success,
}

impl Severity {
    /// How long the view keeps the message on screen.
    pub fn dismiss_after_ms(&self) -> u64 {
        match self {
            Severity::Error => 5000,
            Severity::Warning => 3500,
            Severity::Success => 2000,
        }
    }
}

/// Transient message for the view.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
    pub dismiss_after_ms: u64,
}

impl Notice {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Notice {
            severity,
            message: message.into(),
            dismiss_after_ms: severity.dismiss_after_ms(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Severity::Success, message)
    }
}
