//! Certification rules: one certification per line, bullet markers stripped.

use crate::lexicon::Lexicon;
use crate::segment::Section;

const BULLETS: [char; 6] = ['•', '◦', '▪', '·', '-', '*'];

pub(crate) fn extract(section: &Section, lexicon: &Lexicon) -> Vec<String> {
    let mut certs = Vec::new();
    for line in &section.lines {
        let text = line.text.trim();
        let stripped = text.trim_start_matches(BULLETS).trim();
        if stripped.is_empty() {
            continue;
        }
        // Inside a certifications section a bulleted line is taken as-is;
        // unbulleted lines must carry a certification keyword to filter out
        // stray prose.
        let bulleted = stripped.len() != text.len();
        if bulleted || lexicon.has_certification_keyword(stripped) {
            certs.push(stripped.to_string());
        }
    }
    certs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{DocumentFormat, RawDocument};
    use crate::extract::extract_text;
    use crate::segment::{segment, SectionLabel};

    fn cert_lines(text: &str) -> Vec<String> {
        let doc = RawDocument::new(text.as_bytes().to_vec(), DocumentFormat::Text, "t.txt");
        let block = extract_text(&doc).unwrap();
        let lexicon = Lexicon::default();
        let sections = segment(&block, &lexicon);
        let section = sections
            .iter()
            .find(|s| s.label == SectionLabel::Certifications)
            .expect("certifications section");
        extract(section, &lexicon)
    }

    #[test]
    fn test_bulleted_lines_taken_verbatim() {
        let certs = cert_lines(
            "Certifications\n• AWS Solutions Architect (2021)\n• CKA: Certified Kubernetes Administrator",
        );
        assert_eq!(
            certs,
            vec![
                "AWS Solutions Architect (2021)",
                "CKA: Certified Kubernetes Administrator"
            ]
        );
    }

    #[test]
    fn test_unbulleted_line_needs_keyword() {
        let certs = cert_lines(
            "Certifications\nCertified ScrumMaster\nI also attended a workshop once",
        );
        assert_eq!(certs, vec!["Certified ScrumMaster"]);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let certs = cert_lines("Certifications\n\n- Google Cloud Professional Certificate\n");
        assert_eq!(certs, vec!["Google Cloud Professional Certificate"]);
    }
}
