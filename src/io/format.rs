use std::{fmt, path::Path};

/// Supported data formats for state seeds, options and output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    #[cfg(feature = "yaml")]
    Yaml,
    #[cfg(feature = "toml")]
    Toml,
}

impl DocumentFormat {
    /// Guesses the format from a file extension, defaulting to JSON.
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            #[cfg(feature = "yaml")]
            Some("yaml" | "yml") => DocumentFormat::Yaml,
            #[cfg(feature = "toml")]
            Some("toml") => DocumentFormat::Toml,
            _ => DocumentFormat::Json,
        }
    }

    pub fn available() -> &'static [DocumentFormat] {
        &[
            DocumentFormat::Json,
            #[cfg(feature = "yaml")]
            DocumentFormat::Yaml,
            #[cfg(feature = "toml")]
            DocumentFormat::Toml,
        ]
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Json => write!(f, "json"),
            #[cfg(feature = "yaml")]
            DocumentFormat::Yaml => write!(f, "yaml"),
            #[cfg(feature = "toml")]
            DocumentFormat::Toml => write!(f, "toml"),
        }
    }
}

impl std::str::FromStr for DocumentFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        DocumentFormat::available()
            .iter()
            .copied()
            .find(|format| format.to_string().eq_ignore_ascii_case(value))
            .ok_or_else(|| format!("unsupported format '{value}'"))
    }
}
