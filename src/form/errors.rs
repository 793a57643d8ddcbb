use indexmap::IndexMap;

/// Error indicator attached to a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// The field is invalid; the presentation layer picks the wording.
    Flag,
    Message(String),
}

impl FieldError {
    pub fn message(&self) -> Option<&str> {
        match self {
            FieldError::Flag => None,
            FieldError::Message(message) => Some(message),
        }
    }
}

/// Field key to error indicator. A key is "truthy" when present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorsMap {
    entries: IndexMap<String, FieldError>,
}

impl ErrorsMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flag(&mut self, key: impl Into<String>) {
        self.entries.insert(key.into(), FieldError::Flag);
    }

    pub fn set_message(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.entries
            .insert(key.into(), FieldError::Message(message.into()));
    }

    pub fn clear(&mut self, key: &str) -> bool {
        self.entries.shift_remove(key).is_some()
    }

    pub fn clear_all(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, key: &str) -> Option<&FieldError> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldError)> {
        self.entries.iter().map(|(key, error)| (key.as_str(), error))
    }

    /// Text to show for `key`, substituting `fallback` for bare flags.
    pub fn display_message(&self, key: &str, fallback: &str) -> Option<String> {
        self.entries.get(key).map(|error| {
            error
                .message()
                .map(str::to_string)
                .unwrap_or_else(|| fallback.to_string())
        })
    }
}
