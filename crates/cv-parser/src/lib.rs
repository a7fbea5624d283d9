//! Heuristic resume parsing engine.
//!
//! Turns a resume document (PDF or plain text) into a structured
//! [`CandidateRecord`] through a five-stage pipeline: text extraction, section
//! segmentation, per-section field extraction, normalization, and assembly.
//! The pipeline degrades gracefully: a missing field becomes a warning on the
//! record, and only three things are fatal — an unsupported format, an
//! unreadable payload, and a document with no extractable content.
//!
//! ```no_run
//! let record = cv_parser::parse(b"John Doe\njohn@example.com", "text", "john.txt")?;
//! assert_eq!(record.email.as_deref(), Some("john@example.com"));
//! # Ok::<(), cv_parser::ParseError>(())
//! ```

pub mod document;
pub mod error;
pub mod extract;
pub mod fields;
pub mod lexicon;
pub mod normalize;
pub mod record;
pub mod segment;

mod patterns;

pub use document::{DocumentFormat, RawDocument};
pub use error::ParseError;
pub use lexicon::Lexicon;
pub use normalize::{DateRange, YearMonth};
pub use record::{CandidateRecord, EducationEntry, ExperienceEntry};
pub use segment::{Section, SectionLabel};

/// Parses a resume with the default [`Lexicon`].
///
/// `declared_format` is the caller's claim about the payload ("pdf" or
/// "text"); it is validated before any byte of the payload is touched.
pub fn parse(
    bytes: &[u8],
    declared_format: &str,
    filename: &str,
) -> Result<CandidateRecord, ParseError> {
    parse_with_lexicon(bytes, declared_format, filename, &Lexicon::default())
}

/// Parses a resume with a caller-supplied lexicon, for tuning the heuristic
/// vocabulary without rebuilding.
pub fn parse_with_lexicon(
    bytes: &[u8],
    declared_format: &str,
    filename: &str,
    lexicon: &Lexicon,
) -> Result<CandidateRecord, ParseError> {
    let span = tracing::debug_span!("parse", filename, declared_format);
    let _guard = span.enter();

    let format = DocumentFormat::from_declared(declared_format)?;
    let document = RawDocument::new(bytes.to_vec(), format, filename);

    let block = extract::extract_text(&document)?;
    let sections = segment::segment(&block, lexicon);
    let raw_fields = fields::extract(&sections, lexicon);
    let record = record::assemble(&sections, raw_fields, lexicon, filename)?;

    tracing::debug!(
        warnings = record.extraction_warnings.len(),
        "parse complete"
    );
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
John Doe
john.doe@example.com
+1 (555) 123-4567

Experience
Acme Corp, Engineer, 2019-2021
- Built internal tools

Education
MIT, B.S. Computer Science, 2015-2019

Skills
Python, python, Rust, JS
";

    #[test]
    fn test_full_pipeline_on_sample() {
        let record = parse(SAMPLE.as_bytes(), "text", "john.txt").unwrap();
        assert_eq!(record.name.as_deref(), Some("John Doe"));
        assert_eq!(record.email.as_deref(), Some("john.doe@example.com"));
        assert_eq!(record.phone.as_deref(), Some("+15551234567"));
        assert_eq!(record.source_filename, "john.txt");

        assert_eq!(record.experience.len(), 1);
        let job = &record.experience[0];
        assert_eq!(job.organization.as_deref(), Some("Acme Corp"));
        assert_eq!(job.title.as_deref(), Some("Engineer"));
        let dates = job.dates.unwrap();
        assert_eq!(dates.start.year, 2019);
        assert_eq!(dates.end.map(|e| e.year), Some(2021));

        assert_eq!(record.education.len(), 1);
        let school = &record.education[0];
        assert_eq!(school.institution.as_deref(), Some("MIT"));
        assert_eq!(school.degree.as_deref(), Some("B.S."));
        assert_eq!(school.field.as_deref(), Some("Computer Science"));
    }

    #[test]
    fn test_email_is_exact_source_text() {
        let record = parse(
            b"Jane\ncontact: Jane.Roe+hiring@Example.org here",
            "text",
            "jane.txt",
        )
        .unwrap();
        assert_eq!(record.email.as_deref(), Some("Jane.Roe+hiring@Example.org"));
    }

    #[test]
    fn test_section_rules_do_not_cross_boundaries() {
        // "Acme Corp" sits in Experience; nothing in Education may claim it.
        let record = parse(SAMPLE.as_bytes(), "text", "john.txt").unwrap();
        assert!(record
            .education
            .iter()
            .all(|e| e.institution.as_deref() != Some("Acme Corp")));
        assert!(record
            .experience
            .iter()
            .all(|x| x.organization.as_deref() != Some("MIT")));
    }

    #[test]
    fn test_skills_deduped_and_synonyms_collapsed() {
        let record = parse(SAMPLE.as_bytes(), "text", "john.txt").unwrap();
        assert_eq!(record.skills, vec!["Python", "Rust", "JavaScript"]);
    }

    #[test]
    fn test_unsupported_format_rejected_before_reading_payload() {
        let err = parse(b"anything", "docx", "a.docx").unwrap_err();
        match err {
            ParseError::UnsupportedFormat(fmt) => assert_eq!(fmt, "docx"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_document_is_assembly_error() {
        assert!(matches!(
            parse(b"", "text", "empty.txt"),
            Err(ParseError::Assembly)
        ));
        assert!(matches!(
            parse(b"   \n\n  ", "text", "blank.txt"),
            Err(ParseError::Assembly)
        ));
    }

    #[test]
    fn test_missing_contact_fields_warn_but_succeed() {
        let record = parse(b"Skills\nRust, Go", "text", "skills.txt").unwrap();
        assert_eq!(record.phone, None);
        assert!(record.extraction_warnings.iter().any(|w| w.contains("phone")));
        assert!(record.extraction_warnings.iter().any(|w| w.contains("email")));
        assert!(record.extraction_warnings.iter().any(|w| w.contains("name")));
        assert_eq!(record.skills, vec!["Rust", "Go"]);
    }

    #[test]
    fn test_parse_is_deterministic() {
        let first = parse(SAMPLE.as_bytes(), "text", "john.txt").unwrap();
        let second = parse(SAMPLE.as_bytes(), "text", "john.txt").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_record_serde_round_trip() {
        let record = parse(SAMPLE.as_bytes(), "text", "john.txt").unwrap();
        let json = serde_json::to_string(&record).unwrap();
        let back: CandidateRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }

    #[test]
    fn test_email_found_outside_contact_block() {
        let record = parse(
            b"Jane Roe\n\nExperience\nAcme, Engineer, 2020\nReach me at jane@example.com",
            "text",
            "jane.txt",
        )
        .unwrap();
        assert_eq!(record.email.as_deref(), Some("jane@example.com"));
    }
}
