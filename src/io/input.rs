use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde_json::Value;

use super::DocumentFormat;

/// Parse structured data in any supported format into a `serde_json::Value`.
pub fn parse_document_str(contents: &str, format: DocumentFormat) -> Result<Value> {
    match format {
        DocumentFormat::Json => {
            serde_json::from_str::<Value>(contents).with_context(|| "failed to parse JSON document")
        }
        #[cfg(feature = "yaml")]
        DocumentFormat::Yaml => {
            serde_yaml::from_str::<Value>(contents).with_context(|| "failed to parse YAML document")
        }
        #[cfg(feature = "toml")]
        DocumentFormat::Toml => toml::from_str::<toml::Table>(contents)
            .with_context(|| "failed to parse TOML document")
            .and_then(|value| {
                serde_json::to_value(value).context("failed to convert TOML to JSON")
            }),
    }
}

/// Reads and parses a document, picking the format from its extension.
pub fn parse_document_file(path: &Path) -> Result<Value> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_document_str(&contents, DocumentFormat::from_path(path))
        .with_context(|| format!("failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_json_objects() {
        let value = parse_document_str(r#"{"name": "Ada"}"#, DocumentFormat::Json).unwrap();
        assert_eq!(value, json!({"name": "Ada"}));
    }

    #[test]
    fn reports_json_errors() {
        let err = parse_document_str("{", DocumentFormat::Json).unwrap_err();
        assert!(err.to_string().contains("failed to parse JSON document"));
    }

    #[cfg(feature = "toml")]
    #[test]
    fn parses_toml_tables() {
        let value = parse_document_str("mask_char = \"*\"", DocumentFormat::Toml).unwrap();
        assert_eq!(value, json!({"mask_char": "*"}));
    }

    #[cfg(feature = "toml")]
    #[test]
    fn parses_toml_documents_with_tables() {
        let doc = "id = \"u-1\"\n\n[billingInfo]\ncity = \"Pune\"\nzipCode = \"411001\"\n";
        let value = parse_document_str(doc, DocumentFormat::Toml).unwrap();
        assert_eq!(
            value,
            json!({"id": "u-1", "billingInfo": {"city": "Pune", "zipCode": "411001"}})
        );
    }
}
