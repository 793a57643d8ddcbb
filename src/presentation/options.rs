use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::io::{DocumentFormat, parse_document_str};

/// Presentation settings passed explicitly into [`super::render`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOptions {
    pub container_style: Option<String>,
    pub required_marker: String,
    pub mask_char: char,
    /// Wording for errors that carry no message of their own.
    pub required_message: String,
    pub error_icon: String,
    pub loading_label: String,
    pub select_placeholder: String,
    pub empty_options_label: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            container_style: None,
            required_marker: " *".to_string(),
            mask_char: '•',
            required_message: "This field is required".to_string(),
            error_icon: "⚠".to_string(),
            loading_label: "loading…".to_string(),
            select_placeholder: "Select…".to_string(),
            empty_options_label: "No options available".to_string(),
        }
    }
}

impl RenderOptions {
    /// Loads options from a JSON (or YAML/TOML, with the matching feature)
    /// document. Missing keys keep their defaults.
    pub fn from_document_str(contents: &str, format: DocumentFormat) -> Result<Self> {
        let value = parse_document_str(contents, format)?;
        serde_json::from_value(value).context("invalid render options")
    }

    pub fn with_container_style(mut self, style: impl Into<String>) -> Self {
        self.container_style = Some(style.into());
        self
    }

    pub fn with_required_marker(mut self, marker: impl Into<String>) -> Self {
        self.required_marker = marker.into();
        self
    }

    pub fn with_mask_char(mut self, mask: char) -> Self {
        self.mask_char = mask;
        self
    }

    pub fn with_required_message(mut self, message: impl Into<String>) -> Self {
        self.required_message = message.into();
        self
    }

    pub fn with_error_icon(mut self, icon: impl Into<String>) -> Self {
        self.error_icon = icon.into();
        self
    }

    pub fn with_loading_label(mut self, label: impl Into<String>) -> Self {
        self.loading_label = label.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_documents_keep_defaults() {
        let options = RenderOptions::from_document_str(
            r#"{"mask_char": "*", "required_marker": " (required)"}"#,
            DocumentFormat::Json,
        )
        .unwrap();
        assert_eq!(options.mask_char, '*');
        assert_eq!(options.required_marker, " (required)");
        assert_eq!(options.required_message, RenderOptions::default().required_message);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = RenderOptions::from_document_str(r#"{"colour": "red"}"#, DocumentFormat::Json)
            .unwrap_err();
        assert!(err.to_string().contains("invalid render options"));
    }
}
