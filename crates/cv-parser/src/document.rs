use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Input format declared by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    Pdf,
    Text,
}

impl DocumentFormat {
    /// Resolves a declared-format string. Unknown strings are rejected up
    /// front, before any extraction work happens.
    pub fn from_declared(declared: &str) -> Result<Self, ParseError> {
        match declared.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(DocumentFormat::Pdf),
            "text" | "txt" | "plain" => Ok(DocumentFormat::Text),
            other => Err(ParseError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// The unparsed input payload. Created once at ingestion and consumed by the
/// text extractor; nothing mutates it afterwards.
#[derive(Debug, Clone)]
pub struct RawDocument {
    bytes: Vec<u8>,
    format: DocumentFormat,
    filename: String,
}

impl RawDocument {
    pub fn new(bytes: Vec<u8>, format: DocumentFormat, filename: impl Into<String>) -> Self {
        Self {
            bytes,
            format,
            filename: filename.into(),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_format_accepts_common_spellings() {
        assert_eq!(
            DocumentFormat::from_declared("pdf").unwrap(),
            DocumentFormat::Pdf
        );
        assert_eq!(
            DocumentFormat::from_declared("PDF").unwrap(),
            DocumentFormat::Pdf
        );
        assert_eq!(
            DocumentFormat::from_declared("txt").unwrap(),
            DocumentFormat::Text
        );
        assert_eq!(
            DocumentFormat::from_declared(" text ").unwrap(),
            DocumentFormat::Text
        );
    }

    #[test]
    fn test_declared_format_rejects_unknown() {
        let err = DocumentFormat::from_declared("docx").unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedFormat(f) if f == "docx"));
    }
}
