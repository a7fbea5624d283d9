use thiserror::Error;

/// Parsing failure taxonomy. Anything less severe than these three cases
/// degrades into an entry in `CandidateRecord::extraction_warnings` instead.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The caller declared a format the engine does not handle. Raised before
    /// any byte of the payload is inspected.
    #[error("unsupported document format '{0}' (expected 'pdf' or 'text')")]
    UnsupportedFormat(String),

    /// The payload could not be turned into text (e.g. a malformed PDF stream).
    #[error("failed to extract text: {0}")]
    Extraction(String),

    /// The document was readable but yielded zero extractable lines. Signals an
    /// empty or garbage document, not a heuristic miss.
    #[error("document yielded no extractable content")]
    Assembly,
}
