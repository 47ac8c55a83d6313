//! Actions describing what a view should do with the outcome of an operation

/// Outcome handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Show a titled list of label/value rows
    Show {
        title: String,
        rows: Vec<(String, String)>,
    },

    /// Show a toast-style notification
    Notify(String, NotifyLevel),
}

impl Action {
    pub fn info(message: impl Into<String>) -> Self {
        Self::Notify(message.into(), NotifyLevel::Info)
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self::Notify(message.into(), NotifyLevel::Warn)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Notify(message.into(), NotifyLevel::Error)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Notify(_, NotifyLevel::Error))
    }
}

/// Notification levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Warn,
    Error,
}
