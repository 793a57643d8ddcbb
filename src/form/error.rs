use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// Submission was attempted while fields still carry errors.
    Invalid { count: usize },
    /// The collected state could not be turned into the request payload.
    Payload { message: String },
    UnknownScreen(String),
    /// A state sink refused a patched value.
    StateRejected { message: String },
}

impl FormError {
    pub fn payload(err: impl fmt::Display) -> Self {
        FormError::Payload {
            message: err.to_string(),
        }
    }

    pub fn state_rejected(err: impl fmt::Display) -> Self {
        FormError::StateRejected {
            message: err.to_string(),
        }
    }
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::Invalid { count } => write!(f, "{count} field(s) need attention"),
            FormError::Payload { message } => write!(f, "invalid form payload: {message}"),
            FormError::UnknownScreen(name) => write!(f, "unknown screen '{name}'"),
            FormError::StateRejected { message } => write!(f, "form state rejected edit: {message}"),
        }
    }
}

impl std::error::Error for FormError {}
